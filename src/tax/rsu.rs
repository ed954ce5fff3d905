use crate::tax::bareme::tax_on_additional_income;
use crate::tax::fr::{TaxRegime, DEFAULT_INCOME_TAX_RATE, MACRON_III_THRESHOLD};
use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Precondition violation on a scenario input field
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InvalidInput {
    #[error("{field} must not be negative: {value}")]
    Negative { field: &'static str, value: Decimal },
    #[error("{field} must be positive: {value}")]
    NotPositive { field: &'static str, value: Decimal },
    #[error("sell_date {sell_date} precedes vesting_date {vesting_date}")]
    SellBeforeVesting {
        vesting_date: NaiveDate,
        sell_date: NaiveDate,
    },
    #[error("{field} must be between 0 and 1: {value}")]
    RateOutOfRange { field: &'static str, value: Decimal },
}

/// Input parameters for one RSU sell scenario.
///
/// Prices are per share in USD; the caller has already resolved them (and the
/// FX rate) from whatever market data source it uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScenarioInput {
    /// Tax regime the award falls under
    pub regime: TaxRegime,
    /// Number of shares to sell
    #[schemars(with = "f64")]
    pub shares: Decimal,
    /// Share price at vesting, in USD
    #[schemars(with = "f64")]
    pub vesting_price_usd: Decimal,
    /// Share price at sale, in USD
    #[schemars(with = "f64")]
    pub sell_price_usd: Decimal,
    /// USD to EUR conversion rate (EUR per 1 USD)
    #[schemars(with = "f64")]
    pub usd_to_eur: Decimal,
    /// Date the shares vested
    pub vesting_date: NaiveDate,
    /// Date the shares are sold
    pub sell_date: NaiveDate,
    /// Flat income tax rate (TMI) applied to the relieved acquisition gain
    /// and to positive capital gains
    #[serde(default = "default_income_tax_rate")]
    #[schemars(with = "f64")]
    pub income_tax_rate: Decimal,
    /// Overrides the regime-derived social security rate when set
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub social_security_rate: Option<Decimal>,
    /// Annual taxable income; when set, the acquisition gain is taxed through
    /// the progressive barème on top of this income instead of the flat rate
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub annual_income: Option<Decimal>,
}

fn default_income_tax_rate() -> Decimal {
    DEFAULT_INCOME_TAX_RATE
}

impl ScenarioInput {
    pub fn validate(&self) -> Result<(), InvalidInput> {
        if self.shares < Decimal::ZERO {
            return Err(InvalidInput::Negative {
                field: "shares",
                value: self.shares,
            });
        }
        if self.vesting_price_usd < Decimal::ZERO {
            return Err(InvalidInput::Negative {
                field: "vesting_price_usd",
                value: self.vesting_price_usd,
            });
        }
        if self.sell_price_usd < Decimal::ZERO {
            return Err(InvalidInput::Negative {
                field: "sell_price_usd",
                value: self.sell_price_usd,
            });
        }
        if self.usd_to_eur <= Decimal::ZERO {
            return Err(InvalidInput::NotPositive {
                field: "usd_to_eur",
                value: self.usd_to_eur,
            });
        }
        if self.sell_date < self.vesting_date {
            return Err(InvalidInput::SellBeforeVesting {
                vesting_date: self.vesting_date,
                sell_date: self.sell_date,
            });
        }
        if !(Decimal::ZERO..=Decimal::ONE).contains(&self.income_tax_rate) {
            return Err(InvalidInput::RateOutOfRange {
                field: "income_tax_rate",
                value: self.income_tax_rate,
            });
        }
        if let Some(rate) = self.social_security_rate {
            if !(Decimal::ZERO..=Decimal::ONE).contains(&rate) {
                return Err(InvalidInput::RateOutOfRange {
                    field: "social_security_rate",
                    value: rate,
                });
            }
        }
        if let Some(income) = self.annual_income {
            if income < Decimal::ZERO {
                return Err(InvalidInput::Negative {
                    field: "annual_income",
                    value: income,
                });
            }
        }
        Ok(())
    }
}

/// Full breakdown of one RSU sell calculation.
///
/// Every intermediate of the pipeline is kept as a field so callers can show
/// how each number was derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RsuResult {
    pub regime: TaxRegime,
    pub years_held: Decimal,
    pub has_taper_relief: bool,
    pub taper_relief_rate: Decimal,

    pub vesting_price_eur: Decimal,
    pub sell_price_eur: Decimal,
    pub gross_proceeds: Decimal,

    pub acquisition_gain: Decimal,
    pub acquisition_gain_after_relief: Decimal,
    pub capital_gain: Decimal,
    pub tributable_gain: Decimal,

    pub social_security_rate: Decimal,
    pub social_security_tax: Decimal,
    pub acquisition_tax: Decimal,
    pub capital_gain_tax: Decimal,
    pub salariale_contribution: Decimal,
    pub total_taxes: Decimal,

    pub net_proceeds: Decimal,
    /// `total_taxes / gross_proceeds`, zero when there are no proceeds
    pub effective_tax_rate: Decimal,
    pub regime_notes: String,
}

impl RsuResult {
    /// Short label for the applied relief, e.g. "50%"
    pub fn relief_display(&self) -> String {
        if self.has_taper_relief {
            format!("{:.0}%", self.taper_relief_rate * dec!(100))
        } else {
            "none".to_string()
        }
    }
}

/// Fractional years between two dates: whole calendar months by date
/// arithmetic (month-end days clamp), remainder in days, combined as
/// `years + months/12 + days/365`. Anniversary dates yield exact integers,
/// so the 2 and 8 year relief boundaries are exact ties.
pub fn years_held(vesting_date: NaiveDate, sell_date: NaiveDate) -> Decimal {
    let mut months = (sell_date.year() - vesting_date.year()) * 12
        + sell_date.month() as i32
        - vesting_date.month() as i32;
    if months > 0 && vesting_date + Months::new(months as u32) > sell_date {
        months -= 1;
    }
    let anchor = vesting_date + Months::new(months.max(0) as u32);
    let days = (sell_date - anchor).num_days();

    Decimal::from(months / 12)
        + Decimal::from(months % 12) / dec!(12)
        + Decimal::from(days) / dec!(365)
}

/// Calculate the complete tax breakdown for one scenario.
///
/// Pure and deterministic: no I/O, no shared state, identical input yields an
/// identical result. The only failure mode is a precondition violation.
pub fn calculate(input: &ScenarioInput) -> Result<RsuResult, InvalidInput> {
    input.validate()?;

    let years_held = years_held(input.vesting_date, input.sell_date);

    let vesting_price_eur = input.vesting_price_usd * input.usd_to_eur;
    let sell_price_eur = input.sell_price_usd * input.usd_to_eur;

    let gross_proceeds = input.shares * sell_price_eur;
    let acquisition_gain = input.shares * vesting_price_eur;
    let capital_gain = gross_proceeds - acquisition_gain;

    let taper_relief_rate = input.regime.relief_rate(years_held, acquisition_gain);
    let has_taper_relief = !taper_relief_rate.is_zero();
    let acquisition_gain_after_relief = acquisition_gain * (Decimal::ONE - taper_relief_rate);
    let tributable_gain = acquisition_gain_after_relief + capital_gain;

    let social_security_rate = input
        .social_security_rate
        .unwrap_or_else(|| input.regime.social_security_rate(acquisition_gain));

    log::debug!(
        "{}: held={} years, relief={}, social rate={}",
        input.regime,
        years_held.round_dp(4),
        taper_relief_rate,
        social_security_rate
    );

    // Negative tributable gain (capital loss exceeding the relieved
    // acquisition gain) does not produce a negative levy.
    let social_security_tax = tributable_gain.max(Decimal::ZERO) * social_security_rate;
    let acquisition_tax = match input.annual_income {
        Some(annual_income) => {
            tax_on_additional_income(annual_income, acquisition_gain_after_relief)
        }
        None => acquisition_gain_after_relief * input.income_tax_rate,
    };
    // Capital losses are not refunded
    let capital_gain_tax = capital_gain.max(Decimal::ZERO) * input.income_tax_rate;
    // Salariale applies to the pre-relief gain
    let salariale_contribution = acquisition_gain * input.regime.salariale_rate(acquisition_gain);

    let total_taxes =
        social_security_tax + acquisition_tax + capital_gain_tax + salariale_contribution;
    let net_proceeds = gross_proceeds - total_taxes;
    let effective_tax_rate = if gross_proceeds > Decimal::ZERO {
        total_taxes / gross_proceeds
    } else {
        Decimal::ZERO
    };

    let regime_notes = regime_notes(input.regime, years_held, acquisition_gain);

    Ok(RsuResult {
        regime: input.regime,
        years_held,
        has_taper_relief,
        taper_relief_rate,
        vesting_price_eur,
        sell_price_eur,
        gross_proceeds,
        acquisition_gain,
        acquisition_gain_after_relief,
        capital_gain,
        tributable_gain,
        social_security_rate,
        social_security_tax,
        acquisition_tax,
        capital_gain_tax,
        salariale_contribution,
        total_taxes,
        net_proceeds,
        effective_tax_rate,
        regime_notes,
    })
}

fn regime_notes(regime: TaxRegime, years_held: Decimal, acquisition_gain: Decimal) -> String {
    match regime {
        TaxRegime::MacronI => {
            if years_held >= dec!(8) {
                "Macron I: 65% abatement (held 8+ years)".to_string()
            } else if years_held >= dec!(2) {
                "Macron I: 50% abatement (held 2-8 years)".to_string()
            } else {
                format!(
                    "Macron I: no abatement (held < 2 years, need {:.1} more)",
                    dec!(2) - years_held
                )
            }
        }
        TaxRegime::MacronIii => {
            if acquisition_gain > MACRON_III_THRESHOLD {
                "Macron III: over the 300k threshold, taxed as salary + 10% contribution"
                    .to_string()
            } else {
                "Macron III: 50% automatic abatement (gain under 300k)".to_string()
            }
        }
        TaxRegime::Unrestricted => "Unrestricted: no abatement, fully taxed as salary".to_string(),
    }
}
