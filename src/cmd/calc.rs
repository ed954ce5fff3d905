//! Calc command - full tax breakdown for a single sell scenario

use crate::tax::{calculate, marginal_tax_rate, RsuResult, ScenarioInput, TaxRegime};
use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct CalcCommand {
    /// Number of shares to sell
    #[arg(short = 'n', long)]
    shares: Decimal,

    /// Share price at vesting, in USD
    #[arg(long)]
    vesting_price: Decimal,

    /// Share price at sale, in USD
    #[arg(long)]
    sell_price: Decimal,

    /// USD to EUR conversion rate
    #[arg(long, default_value = "0.92")]
    usd_to_eur: Decimal,

    /// Vesting date (YYYY-MM-DD)
    #[arg(long)]
    vesting_date: NaiveDate,

    /// Sell date (YYYY-MM-DD)
    #[arg(long)]
    sell_date: NaiveDate,

    /// Tax regime
    #[arg(short, long, value_enum, default_value_t = RegimeArg::MacronIii)]
    regime: RegimeArg,

    /// Marginal income tax rate (TMI)
    #[arg(long, default_value = "0.30")]
    tax_rate: Decimal,

    /// Override the regime-derived social security rate
    #[arg(long)]
    social_rate: Option<Decimal>,

    /// Annual taxable income; taxes the acquisition gain through the
    /// progressive bareme instead of the flat rate
    #[arg(long)]
    annual_income: Option<Decimal>,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum RegimeArg {
    /// Grants Aug 2015 - Dec 2016: 50%/65% abatement by holding period
    MacronI,
    /// Grants from Jan 2018: automatic 50% abatement under the 300k threshold
    #[default]
    MacronIii,
    /// Non-qualified plan: no abatement
    Unrestricted,
}

impl From<RegimeArg> for TaxRegime {
    fn from(arg: RegimeArg) -> Self {
        match arg {
            RegimeArg::MacronI => TaxRegime::MacronI,
            RegimeArg::MacronIii => TaxRegime::MacronIii,
            RegimeArg::Unrestricted => TaxRegime::Unrestricted,
        }
    }
}

/// Breakdown data for JSON output
#[derive(Debug, Serialize)]
struct BreakdownData {
    regime: String,
    years_held: String,
    taper_relief: String,
    vesting_price_eur: String,
    sell_price_eur: String,
    gross_proceeds: String,
    acquisition_gain: String,
    acquisition_gain_after_relief: String,
    capital_gain: String,
    tributable_gain: String,
    social_security_rate_pct: String,
    social_security_tax: String,
    acquisition_tax: String,
    capital_gain_tax: String,
    salariale_contribution: String,
    total_taxes: String,
    net_proceeds: String,
    effective_tax_rate_pct: String,
    regime_notes: String,
}

impl From<&RsuResult> for BreakdownData {
    fn from(r: &RsuResult) -> Self {
        BreakdownData {
            regime: r.regime.to_string(),
            years_held: format!("{:.2}", r.years_held),
            taper_relief: r.relief_display(),
            vesting_price_eur: format!("{:.2}", r.vesting_price_eur),
            sell_price_eur: format!("{:.2}", r.sell_price_eur),
            gross_proceeds: format!("{:.2}", r.gross_proceeds),
            acquisition_gain: format!("{:.2}", r.acquisition_gain),
            acquisition_gain_after_relief: format!("{:.2}", r.acquisition_gain_after_relief),
            capital_gain: format!("{:.2}", r.capital_gain),
            tributable_gain: format!("{:.2}", r.tributable_gain),
            social_security_rate_pct: format!("{:.1}", r.social_security_rate * dec!(100)),
            social_security_tax: format!("{:.2}", r.social_security_tax),
            acquisition_tax: format!("{:.2}", r.acquisition_tax),
            capital_gain_tax: format!("{:.2}", r.capital_gain_tax),
            salariale_contribution: format!("{:.2}", r.salariale_contribution),
            total_taxes: format!("{:.2}", r.total_taxes),
            net_proceeds: format!("{:.2}", r.net_proceeds),
            effective_tax_rate_pct: format!("{:.1}", r.effective_tax_rate * dec!(100)),
            regime_notes: r.regime_notes.clone(),
        }
    }
}

impl CalcCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let input = ScenarioInput {
            regime: self.regime.into(),
            shares: self.shares,
            vesting_price_usd: self.vesting_price,
            sell_price_usd: self.sell_price,
            usd_to_eur: self.usd_to_eur,
            vesting_date: self.vesting_date,
            sell_date: self.sell_date,
            income_tax_rate: self.tax_rate,
            social_security_rate: self.social_rate,
            annual_income: self.annual_income,
        };

        let result = calculate(&input)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&BreakdownData::from(&result))?);
            Ok(())
        } else {
            self.print_breakdown(&result);
            Ok(())
        }
    }

    fn print_breakdown(&self, r: &RsuResult) {
        println!();
        println!("RSU TAX BREAKDOWN ({})", r.regime);
        println!();

        println!("HOLDING");
        println!(
            "  Vesting: {} | Sell: {} | Held: {:.2} years",
            self.vesting_date, self.sell_date, r.years_held
        );
        println!("  Taper relief: {}", r.relief_display());
        println!();

        println!("VALUES (EUR)");
        println!(
            "  Vesting Price: {} | Sell Price: {} | USD/EUR: {}",
            format_eur(r.vesting_price_eur),
            format_eur(r.sell_price_eur),
            self.usd_to_eur
        );
        println!("  Gross Proceeds: {}", format_eur(r.gross_proceeds));
        println!();

        println!("GAINS");
        println!(
            "  Acquisition: {} | After Relief: {}",
            format_eur(r.acquisition_gain),
            format_eur(r.acquisition_gain_after_relief)
        );
        println!(
            "  Capital: {} | Tributable: {}",
            format_eur_signed(r.capital_gain),
            format_eur_signed(r.tributable_gain)
        );
        println!();

        println!("TAXES");
        println!(
            "  Social Security @ {:.1}%: {}",
            r.social_security_rate * dec!(100),
            format_eur(r.social_security_tax)
        );
        let income_tax_label = match self.annual_income {
            Some(income) => format!(
                "progressive on {} (TMI {:.0}%)",
                format_eur(income),
                marginal_tax_rate(income) * dec!(100)
            ),
            None => format!("@ {:.0}%", self.tax_rate * dec!(100)),
        };
        println!(
            "  Acquisition Income Tax {}: {}",
            income_tax_label,
            format_eur(r.acquisition_tax)
        );
        println!(
            "  Capital Gain (PFU) @ {:.0}%: {}",
            self.tax_rate * dec!(100),
            format_eur(r.capital_gain_tax)
        );
        if r.salariale_contribution > Decimal::ZERO {
            println!(
                "  Salariale Contribution @ 10%: {}",
                format_eur(r.salariale_contribution)
            );
        }
        println!();

        println!(
            "TOTAL TAXES: {} | NET IN POCKET: {} | EFFECTIVE RATE: {:.1}%",
            format_eur(r.total_taxes),
            format_eur(r.net_proceeds),
            r.effective_tax_rate * dec!(100)
        );
        println!("{}", r.regime_notes);
        println!();
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
