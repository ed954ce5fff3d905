//! Schema command - print expected input formats

use crate::tax::ScenarioInput;
use clap::Args;
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Output format: json-schema or csv-header
    #[arg(value_enum, default_value = "json-schema")]
    format: SchemaFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema for a single scenario input
    JsonSchema,
    /// CSV header row with column names
    CsvHeader,
    /// CSV column descriptions
    CsvFields,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match self.format {
            SchemaFormat::JsonSchema => self.print_json_schema(),
            SchemaFormat::CsvHeader => self.print_csv_header(),
            SchemaFormat::CsvFields => self.print_csv_fields(),
        }
    }

    fn print_json_schema(&self) -> anyhow::Result<()> {
        let schema = schema_for!(ScenarioInput);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        Ok(())
    }

    fn print_csv_header(&self) -> anyhow::Result<()> {
        println!("{}", CSV_COLUMNS.join(","));
        Ok(())
    }

    fn print_csv_fields(&self) -> anyhow::Result<()> {
        println!("Scenarios CSV Format");
        println!("====================");
        println!();
        for (name, required, description) in CSV_FIELD_DESCRIPTIONS {
            let req = if *required { "required" } else { "optional" };
            println!("{:20} ({:8})  {}", name, req, description);
        }
        println!();
        println!("FX rate convention: usd_to_eur is always EUR per 1 USD");
        Ok(())
    }
}

const CSV_COLUMNS: &[&str] = &[
    "name",
    "regime",
    "shares",
    "vesting_date",
    "sell_date",
    "vesting_price_usd",
    "sell_price_usd",
    "usd_to_eur",
    "income_tax_rate",
    "social_security_rate",
    "annual_income",
];

const CSV_FIELD_DESCRIPTIONS: &[(&str, bool, &str)] = &[
    ("name", false, "Label shown in table and comparison output"),
    (
        "regime",
        true,
        "macron_i, macron_iii or unrestricted",
    ),
    ("shares", true, "Number of shares to sell"),
    ("vesting_date", true, "Vesting date (YYYY-MM-DD)"),
    ("sell_date", true, "Sell date (YYYY-MM-DD)"),
    (
        "vesting_price_usd",
        true,
        "Share price at vesting, in USD",
    ),
    ("sell_price_usd", true, "Share price at sale, in USD"),
    ("usd_to_eur", true, "USD to EUR conversion rate"),
    (
        "income_tax_rate",
        false,
        "Marginal income tax rate, 0 to 1 (default 0.30)",
    ),
    (
        "social_security_rate",
        false,
        "Overrides the regime-derived social security rate",
    ),
    (
        "annual_income",
        false,
        "Annual taxable income; switches the acquisition tax to the progressive bareme",
    ),
];
