//! Batch command - calculate every scenario in a CSV file with totals

use crate::cmd::read_scenarios;
use crate::tax::{calculate, RsuResult};
use anyhow::Context;
use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct BatchCommand {
    /// Scenarios file (CSV). Reads from stdin if not specified.
    #[arg(default_value = "-")]
    file: PathBuf,

    /// Output as CSV instead of formatted table
    #[arg(long)]
    csv: bool,

    /// Output as JSON instead of formatted table
    #[arg(long)]
    json: bool,
}

/// Row for the batch table and CSV output
#[derive(Debug, Clone, Tabled, Serialize)]
struct ScenarioRow {
    #[tabled(rename = "#")]
    #[serde(rename = "row_num")]
    row_num: String,

    #[tabled(rename = "Name")]
    name: String,

    #[tabled(rename = "Regime")]
    regime: String,

    #[tabled(rename = "Years")]
    years_held: String,

    #[tabled(rename = "Relief")]
    relief: String,

    #[tabled(rename = "Gross (EUR)")]
    gross_proceeds: String,

    #[tabled(rename = "Taxes (EUR)")]
    total_taxes: String,

    #[tabled(rename = "Net (EUR)")]
    net_proceeds: String,

    #[tabled(rename = "Rate")]
    effective_rate: String,
}

#[derive(Debug, Serialize)]
struct BatchData {
    scenarios: Vec<ScenarioRow>,
    totals: TotalsData,
}

#[derive(Debug, Serialize)]
struct TotalsData {
    gross_proceeds: String,
    total_taxes: String,
    net_proceeds: String,
    effective_tax_rate_pct: String,
}

impl BatchCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let records = read_scenarios(&self.file)?;

        let mut rows = Vec::new();
        let mut results: Vec<RsuResult> = Vec::new();
        for (i, record) in records.iter().enumerate() {
            let name = record.display_name(i);
            let result = calculate(&record.scenario())
                .with_context(|| format!("scenario {}", name))?;
            rows.push(ScenarioRow {
                row_num: (i + 1).to_string(),
                name,
                regime: result.regime.to_string(),
                years_held: format!("{:.2}", result.years_held),
                relief: result.relief_display(),
                gross_proceeds: format!("{:.2}", result.gross_proceeds),
                total_taxes: format!("{:.2}", result.total_taxes),
                net_proceeds: format!("{:.2}", result.net_proceeds),
                effective_rate: format!("{:.1}%", result.effective_tax_rate * dec!(100)),
            });
            results.push(result);
        }

        let totals = totals(&results);

        if self.csv {
            crate::utils::write_csv(rows, io::stdout())
        } else if self.json {
            let data = BatchData {
                scenarios: rows,
                totals,
            };
            println!("{}", serde_json::to_string_pretty(&data)?);
            Ok(())
        } else {
            self.print_table(&rows, &totals);
            Ok(())
        }
    }

    fn print_table(&self, rows: &[ScenarioRow], totals: &TotalsData) {
        println!();
        println!("RSU SELL SCENARIOS");
        println!();

        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);

        println!();
        println!(
            "TOTALS: Gross €{} | Taxes €{} | Net €{} | Effective Rate {}%",
            totals.gross_proceeds,
            totals.total_taxes,
            totals.net_proceeds,
            totals.effective_tax_rate_pct
        );
        println!();
    }
}

fn totals(results: &[RsuResult]) -> TotalsData {
    let gross: Decimal = results.iter().map(|r| r.gross_proceeds).sum();
    let taxes: Decimal = results.iter().map(|r| r.total_taxes).sum();
    let net: Decimal = results.iter().map(|r| r.net_proceeds).sum();
    let rate = if gross > Decimal::ZERO {
        taxes / gross * dec!(100)
    } else {
        Decimal::ZERO
    };

    TotalsData {
        gross_proceeds: format!("{:.2}", gross),
        total_taxes: format!("{:.2}", taxes),
        net_proceeds: format!("{:.2}", net),
        effective_tax_rate_pct: format!("{:.1}", rate),
    }
}
