//! Check command implementation
//!
//! Validates a product definition without asset data and lists its events
//! and payoff ranges.

use std::fmt;
use std::path::Path;

use note_models::instruments::format_percent;
use note_models::simulation::SimulationModel;
use tracing::info;

use crate::loader::load_product;
use crate::Result;

/// Run the check command
pub fn run(product: &Path, precision: usize) -> Result<()> {
    info!("Checking product definition {}", product.display());

    let model = load_product(product)?.build_model()?;
    print!("{}", render(&model, precision));

    info!("Product definition is valid");
    Ok(())
}

fn format_bound(level: f64, precision: usize) -> String {
    if level.is_finite() {
        format_percent(level, precision)
    } else {
        "∞".to_string()
    }
}

/// Product summary with every event's payoff ranges.
pub fn render(model: &SimulationModel, precision: usize) -> String {
    ProductSummary { model, precision }.to_string()
}

struct ProductSummary<'a> {
    model: &'a SimulationModel,
    precision: usize,
}

impl fmt::Display for ProductSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let terms = self.model.terms();
        let precision = self.precision;

        writeln!(f, "Product: {} to {}", terms.start_date(), terms.final_maturity_date())?;
        writeln!(f, "  Notional: {}", terms.currency().format_amount(terms.notional()))?;
        writeln!(f, "  Start level: {}", format_percent(terms.start_level(), precision))?;
        writeln!(
            f,
            "  Participation rate: {}{}",
            format_percent(terms.participation_rate(), precision),
            if terms.participation_rate_assumed() {
                " (assumed)"
            } else {
                ""
            }
        )?;

        writeln!(f, "Income barrier events: {}", self.model.sequence().len())?;
        for event in self.model.sequence().events() {
            writeln!(
                f,
                "  {} on {} ({})",
                event.id(),
                event.planned_date(),
                event.spec().payoff_style()
            )?;
            for range in event.payoff_ranges() {
                writeln!(
                    f,
                    "    {} - {}: {}",
                    format_bound(range.min, precision),
                    format_bound(range.max, precision),
                    format_percent(range.payoff, precision)
                )?;
            }
        }
        Ok(())
    }
}
