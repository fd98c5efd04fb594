//! Simulate command implementation
//!
//! Evaluates a product against asset prices and renders the chart data as
//! JSON or the events as a table.

use std::fmt;
use std::path::Path;

use note_models::instruments::format_percent;
use note_models::simulation::SimulationModel;
use tracing::info;

use crate::config::OutputFormat;
use crate::loader::{load_assets, load_product, write_output};
use crate::Result;

/// Run the simulate command
pub fn run(
    product: &Path,
    assets: &Path,
    format: OutputFormat,
    output: Option<&Path>,
    precision: usize,
) -> Result<()> {
    info!("Starting simulation...");
    info!("  Product: {}", product.display());
    info!("  Assets: {}", assets.display());
    info!("  Output format: {}", format);

    let model = simulate(product, assets)?;
    let rendered = render(&model, format, precision)?;

    match output {
        Some(path) => {
            write_output(path, &rendered)?;
            info!("Results written to {}", path.display());
        }
        None => print!("{}", rendered),
    }

    info!("Simulation complete");
    Ok(())
}

/// Loads both inputs and evaluates the product.
pub fn simulate(product: &Path, assets: &Path) -> Result<SimulationModel> {
    let mut model = load_product(product)?.build_model()?;
    model.set_asset_data(load_assets(assets)?);
    Ok(model)
}

/// Renders an evaluated model.
pub fn render(model: &SimulationModel, format: OutputFormat, precision: usize) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&model.chart_data(precision))?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Table => Ok(render_table(model, precision)),
    }
}

const ID_WIDTH: usize = 24;
const DATE_WIDTH: usize = 10;
const LEVEL_WIDTH: usize = 9;
const AMOUNT_WIDTH: usize = 14;

fn rule(left: char, middle: char, right: char) -> String {
    let widths = [ID_WIDTH, DATE_WIDTH, LEVEL_WIDTH, AMOUNT_WIDTH];
    let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    format!("{}{}{}", left, segments.join(&middle.to_string()), right)
}

/// Event table followed by the status line of every event.
pub fn render_table(model: &SimulationModel, precision: usize) -> String {
    EventTable { model, precision }.to_string()
}

struct EventTable<'a> {
    model: &'a SimulationModel,
    precision: usize,
}

impl EventTable<'_> {
    fn row(f: &mut fmt::Formatter<'_>, id: &str, date: &str, level: &str, amount: &str) -> fmt::Result {
        writeln!(
            f,
            "│ {:<iw$} │ {:<dw$} │ {:>lw$} │ {:>aw$} │",
            id,
            date,
            level,
            amount,
            iw = ID_WIDTH,
            dw = DATE_WIDTH,
            lw = LEVEL_WIDTH,
            aw = AMOUNT_WIDTH
        )
    }
}

impl fmt::Display for EventTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let terms = self.model.terms();
        let currency = terms.currency();

        writeln!(
            f,
            "Product {} to {}, notional {}",
            terms.start_date(),
            terms.final_maturity_date(),
            currency.format_amount(terms.notional())
        )?;
        match self.model.fixing() {
            Some(fixing) => writeln!(f, "Fixing: {}", fixing)?,
            None => writeln!(f, "Fixing: unavailable")?,
        }

        writeln!(f, "{}", rule('┌', '┬', '┐'))?;
        Self::row(f, "Event", "Date", "Level", "Amount")?;
        writeln!(f, "{}", rule('├', '┼', '┤'))?;

        let markers = self.model.event_markers(self.precision);
        for marker in &markers {
            let level = marker
                .level
                .map(|level| format_percent(level, self.precision))
                .unwrap_or_else(|| "-".to_string());
            let amount = if marker.executed {
                currency.format_amount(marker.amount)
            } else {
                "-".to_string()
            };
            Self::row(f, &marker.id, &marker.date.to_string(), &level, &amount)?;
        }
        writeln!(f, "{}", rule('└', '┴', '┘'))?;

        for marker in &markers {
            writeln!(f, "{}", marker.comment)?;
        }
        writeln!(f, "Total income: {}", self.model.total_income_percent(self.precision))?;
        for warning in self.model.warnings() {
            writeln!(f, "Warning: {}", warning)?;
        }
        Ok(())
    }
}
