pub mod batch;
pub mod calc;
pub mod compare;
pub mod schema;

use crate::tax::{ScenarioInput, TaxRegime, DEFAULT_INCOME_TAX_RATE};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// One row of a scenarios CSV file
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioRecord {
    /// Optional label shown in table and comparison output
    #[serde(default)]
    pub name: Option<String>,
    pub regime: TaxRegime,
    pub shares: Decimal,
    pub vesting_date: NaiveDate,
    pub sell_date: NaiveDate,
    pub vesting_price_usd: Decimal,
    pub sell_price_usd: Decimal,
    pub usd_to_eur: Decimal,
    #[serde(default)]
    pub income_tax_rate: Option<Decimal>,
    #[serde(default)]
    pub social_security_rate: Option<Decimal>,
    #[serde(default)]
    pub annual_income: Option<Decimal>,
}

impl ScenarioRecord {
    pub fn scenario(&self) -> ScenarioInput {
        ScenarioInput {
            regime: self.regime,
            shares: self.shares,
            vesting_price_usd: self.vesting_price_usd,
            sell_price_usd: self.sell_price_usd,
            usd_to_eur: self.usd_to_eur,
            vesting_date: self.vesting_date,
            sell_date: self.sell_date,
            income_tax_rate: self.income_tax_rate.unwrap_or(DEFAULT_INCOME_TAX_RATE),
            social_security_rate: self.social_security_rate,
            annual_income: self.annual_income,
        }
    }

    pub fn display_name(&self, index: usize) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("#{}", index + 1))
    }
}

/// Read scenario rows from a CSV file (or stdin with "-")
pub fn read_scenarios(path: &Path) -> anyhow::Result<Vec<ScenarioRecord>> {
    if path.as_os_str() == "-" {
        read_from_stdin()
    } else {
        let file = File::open(path)?;
        read_csv(BufReader::new(file))
    }
}

fn read_from_stdin() -> anyhow::Result<Vec<ScenarioRecord>> {
    let stdin = io::stdin();
    let mut reader = BufReader::new(stdin.lock());

    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;

    if buffer.is_empty() {
        anyhow::bail!("No input received. Provide a file or pipe data to stdin.");
    }

    read_csv(io::Cursor::new(buffer))
}

fn read_csv<R: Read>(reader: R) -> anyhow::Result<Vec<ScenarioRecord>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut records = Vec::new();
    for result in rdr.deserialize() {
        records.push(result?);
    }
    if records.is_empty() {
        anyhow::bail!("no scenarios found in input");
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn csv_rows_deserialize_with_optional_columns() {
        let data = "\
name,regime,shares,vesting_date,sell_date,vesting_price_usd,sell_price_usd,usd_to_eur,income_tax_rate,social_security_rate,annual_income
Feb tranche,macron_iii,100,2024-02-15,2025-02-15,50,80,0.90,0.30,,
,unrestricted,40,2023-11-20,2025-01-10,95,120,0.92,,,60000
";
        let records = read_csv(data.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].name.as_deref(), Some("Feb tranche"));
        assert_eq!(records[0].regime, TaxRegime::MacronIii);
        assert_eq!(records[0].scenario().income_tax_rate, dec!(0.30));
        assert_eq!(records[0].social_security_rate, None);

        assert_eq!(records[1].display_name(1), "#2");
        assert_eq!(records[1].scenario().income_tax_rate, DEFAULT_INCOME_TAX_RATE);
        assert_eq!(records[1].annual_income, Some(dec!(60000)));
    }

    #[test]
    fn empty_input_is_an_error() {
        let data = "name,regime,shares,vesting_date,sell_date,vesting_price_usd,sell_price_usd,usd_to_eur\n";
        assert!(read_csv(data.as_bytes()).is_err());
    }
}
