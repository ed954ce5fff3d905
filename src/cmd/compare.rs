//! Compare command - two sell scenarios side by side

use crate::cmd::{read_scenarios, ScenarioRecord};
use crate::tax::{calculate, RsuResult};
use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct CompareCommand {
    /// Scenarios file (CSV). Reads from stdin if not specified.
    #[arg(default_value = "-")]
    file: PathBuf,

    /// Name of the first scenario (defaults to the first row)
    #[arg(long)]
    first: Option<String>,

    /// Name of the second scenario (defaults to the second row)
    #[arg(long)]
    second: Option<String>,

    /// Output as JSON instead of formatted table
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Tabled)]
struct CompareRow {
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Scenario A")]
    a: String,
    #[tabled(rename = "Scenario B")]
    b: String,
    #[tabled(rename = "Difference")]
    diff: String,
}

#[derive(Debug, Serialize)]
struct CompareData {
    first: ComparedScenario,
    second: ComparedScenario,
    net_difference: String,
}

#[derive(Debug, Serialize)]
struct ComparedScenario {
    name: String,
    regime: String,
    years_held: String,
    taper_relief: String,
    gross_proceeds: String,
    acquisition_gain: String,
    capital_gain: String,
    total_taxes: String,
    net_proceeds: String,
    effective_tax_rate_pct: String,
}

impl CompareCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let records = read_scenarios(&self.file)?;

        let (name_a, result_a) = self.pick(&records, self.first.as_deref(), 0)?;
        let (name_b, result_b) = self.pick(&records, self.second.as_deref(), 1)?;

        if self.json {
            let data = CompareData {
                first: compared(&name_a, &result_a),
                second: compared(&name_b, &result_b),
                net_difference: format!("{:.2}", result_b.net_proceeds - result_a.net_proceeds),
            };
            println!("{}", serde_json::to_string_pretty(&data)?);
            Ok(())
        } else {
            self.print_comparison(&name_a, &result_a, &name_b, &result_b);
            Ok(())
        }
    }

    fn pick(
        &self,
        records: &[ScenarioRecord],
        name: Option<&str>,
        default_index: usize,
    ) -> anyhow::Result<(String, RsuResult)> {
        let (index, record) = match name {
            Some(name) => records
                .iter()
                .enumerate()
                .find(|(_, r)| {
                    r.name
                        .as_deref()
                        .is_some_and(|n| n.eq_ignore_ascii_case(name))
                })
                .ok_or_else(|| anyhow::anyhow!("no scenario named '{}'", name))?,
            None => records.get(default_index).map(|r| (default_index, r)).ok_or_else(
                || anyhow::anyhow!("need at least two scenarios to compare"),
            )?,
        };

        let display_name = record.display_name(index);
        let result = calculate(&record.scenario())
            .map_err(|e| anyhow::anyhow!("scenario {}: {}", display_name, e))?;
        Ok((display_name, result))
    }

    fn print_comparison(&self, name_a: &str, a: &RsuResult, name_b: &str, b: &RsuResult) {
        println!();
        println!("SCENARIO COMPARISON");
        println!("  A: {} ({}) | B: {} ({})", name_a, a.regime, name_b, b.regime);
        println!();

        let rows = vec![
            CompareRow {
                metric: "Years Held".to_string(),
                a: format!("{:.2}", a.years_held),
                b: format!("{:.2}", b.years_held),
                diff: format!("{:+.2}", b.years_held - a.years_held),
            },
            CompareRow {
                metric: "Taper Relief".to_string(),
                a: a.relief_display(),
                b: b.relief_display(),
                diff: "-".to_string(),
            },
            CompareRow {
                metric: "Gross Proceeds".to_string(),
                a: format_eur(a.gross_proceeds),
                b: format_eur(b.gross_proceeds),
                diff: diff_eur(a.gross_proceeds, b.gross_proceeds),
            },
            CompareRow {
                metric: "Acquisition Gain".to_string(),
                a: format_eur(a.acquisition_gain),
                b: format_eur(b.acquisition_gain),
                diff: diff_eur(a.acquisition_gain, b.acquisition_gain),
            },
            CompareRow {
                metric: "Capital Gain".to_string(),
                a: format_eur_signed(a.capital_gain),
                b: format_eur_signed(b.capital_gain),
                diff: diff_eur(a.capital_gain, b.capital_gain),
            },
            CompareRow {
                metric: "Total Taxes".to_string(),
                a: format_eur(a.total_taxes),
                b: format_eur(b.total_taxes),
                diff: diff_eur(a.total_taxes, b.total_taxes),
            },
            CompareRow {
                metric: "Net in Pocket".to_string(),
                a: format_eur(a.net_proceeds),
                b: format_eur(b.net_proceeds),
                diff: diff_eur(a.net_proceeds, b.net_proceeds),
            },
            CompareRow {
                metric: "Effective Tax Rate".to_string(),
                a: format!("{:.1}%", a.effective_tax_rate * dec!(100)),
                b: format!("{:.1}%", b.effective_tax_rate * dec!(100)),
                diff: format!(
                    "{:+.1}%",
                    (b.effective_tax_rate - a.effective_tax_rate) * dec!(100)
                ),
            },
        ];

        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
        println!();

        let diff_net = b.net_proceeds - a.net_proceeds;
        if diff_net.abs() > dec!(0.01) {
            let winner = if diff_net > Decimal::ZERO { name_b } else { name_a };
            println!(
                "{} yields {} more net in pocket",
                winner,
                format_eur(diff_net.abs())
            );
            println!();
        }
    }
}

fn compared(name: &str, r: &RsuResult) -> ComparedScenario {
    ComparedScenario {
        name: name.to_string(),
        regime: r.regime.to_string(),
        years_held: format!("{:.2}", r.years_held),
        taper_relief: r.relief_display(),
        gross_proceeds: format!("{:.2}", r.gross_proceeds),
        acquisition_gain: format!("{:.2}", r.acquisition_gain),
        capital_gain: format!("{:.2}", r.capital_gain),
        total_taxes: format!("{:.2}", r.total_taxes),
        net_proceeds: format!("{:.2}", r.net_proceeds),
        effective_tax_rate_pct: format!("{:.1}", r.effective_tax_rate * dec!(100)),
    }
}

fn format_eur(amount: Decimal) -> String {
    format!("€{:.2}", amount)
}

fn format_eur_signed(amount: Decimal) -> String {
    if amount < Decimal::ZERO {
        format!("-€{:.2}", amount.abs())
    } else {
        format!("€{:.2}", amount)
    }
}

fn diff_eur(a: Decimal, b: Decimal) -> String {
    let diff = b - a;
    if diff < Decimal::ZERO {
        format!("-€{:.2}", diff.abs())
    } else {
        format!("+€{:.2}", diff)
    }
}
