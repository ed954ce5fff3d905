use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Acquisition gain threshold above which Macron III drops the abatement,
/// switches to the activity social rate and levies the salariale contribution.
pub const MACRON_III_THRESHOLD: Decimal = dec!(300_000);

/// Patrimony social security rate (17.2%)
pub const PATRIMONY_RATE: Decimal = dec!(0.172);

/// Activity social security rate (9.7% = 9.2% CSG + 0.5% CRDS)
pub const ACTIVITY_RATE: Decimal = dec!(0.097);

/// Employee contribution on the pre-relief acquisition gain (Macron III over threshold)
pub const SALARIALE_RATE: Decimal = dec!(0.10);

/// Default flat income tax rate (TMI)
pub const DEFAULT_INCOME_TAX_RATE: Decimal = dec!(0.30);

/// French RSU tax regime, determined by the grant date of the award
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TaxRegime {
    /// Grants between 7 August 2015 and 29 December 2016
    MacronI,
    /// Grants from 1 January 2018 onwards
    MacronIii,
    /// Non-qualified plans
    Unrestricted,
}

impl TaxRegime {
    /// Taper relief (abatement) rate on the acquisition gain.
    ///
    /// Macron I grants relief by holding period: 50% from 2 years, 65% from
    /// 8 years, boundaries inclusive. Macron III grants an automatic 50% when
    /// the pre-relief acquisition gain is at or under the 300k threshold.
    pub fn relief_rate(&self, years_held: Decimal, acquisition_gain: Decimal) -> Decimal {
        match self {
            TaxRegime::MacronI => {
                if years_held >= dec!(8) {
                    dec!(0.65)
                } else if years_held >= dec!(2) {
                    dec!(0.50)
                } else {
                    Decimal::ZERO
                }
            }
            TaxRegime::MacronIii => {
                if acquisition_gain <= MACRON_III_THRESHOLD {
                    dec!(0.50)
                } else {
                    Decimal::ZERO
                }
            }
            TaxRegime::Unrestricted => Decimal::ZERO,
        }
    }

    /// Social security rate, selected on the pre-relief acquisition gain
    pub fn social_security_rate(&self, acquisition_gain: Decimal) -> Decimal {
        match self {
            TaxRegime::MacronI => PATRIMONY_RATE,
            TaxRegime::MacronIii => {
                if acquisition_gain <= MACRON_III_THRESHOLD {
                    PATRIMONY_RATE
                } else {
                    ACTIVITY_RATE
                }
            }
            TaxRegime::Unrestricted => ACTIVITY_RATE,
        }
    }

    /// Salariale contribution rate. Only Macron III over the threshold pays it.
    pub fn salariale_rate(&self, acquisition_gain: Decimal) -> Decimal {
        match self {
            TaxRegime::MacronIii if acquisition_gain > MACRON_III_THRESHOLD => SALARIALE_RATE,
            _ => Decimal::ZERO,
        }
    }

    pub fn display(&self) -> &'static str {
        match self {
            TaxRegime::MacronI => "Macron I",
            TaxRegime::MacronIii => "Macron III",
            TaxRegime::Unrestricted => "Unrestricted",
        }
    }
}

impl std::fmt::Display for TaxRegime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn macron_i_no_relief_under_two_years() {
        let regime = TaxRegime::MacronI;
        assert_eq!(regime.relief_rate(dec!(0), dec!(1000)), dec!(0));
        assert_eq!(regime.relief_rate(dec!(1.5), dec!(1000)), dec!(0));
        assert_eq!(regime.relief_rate(dec!(1.99), dec!(1000)), dec!(0));
    }

    #[test]
    fn macron_i_50_percent_from_two_years() {
        let regime = TaxRegime::MacronI;
        assert_eq!(regime.relief_rate(dec!(2), dec!(1000)), dec!(0.50));
        assert_eq!(regime.relief_rate(dec!(5), dec!(1000)), dec!(0.50));
        assert_eq!(regime.relief_rate(dec!(7.99), dec!(1000)), dec!(0.50));
    }

    #[test]
    fn macron_i_65_percent_from_eight_years() {
        let regime = TaxRegime::MacronI;
        assert_eq!(regime.relief_rate(dec!(8), dec!(1000)), dec!(0.65));
        assert_eq!(regime.relief_rate(dec!(10), dec!(1000)), dec!(0.65));
    }

    #[test]
    fn macron_iii_relief_depends_on_threshold_not_years() {
        let regime = TaxRegime::MacronIii;
        assert_eq!(regime.relief_rate(dec!(0), dec!(100_000)), dec!(0.50));
        assert_eq!(regime.relief_rate(dec!(10), MACRON_III_THRESHOLD), dec!(0.50));
        assert_eq!(regime.relief_rate(dec!(10), dec!(300_001)), dec!(0));
        assert_eq!(regime.relief_rate(dec!(10), dec!(500_000)), dec!(0));
    }

    #[test]
    fn unrestricted_never_gets_relief() {
        let regime = TaxRegime::Unrestricted;
        assert_eq!(regime.relief_rate(dec!(10), dec!(1000)), dec!(0));
    }

    #[test]
    fn social_security_rates() {
        assert_eq!(
            TaxRegime::MacronI.social_security_rate(dec!(500_000)),
            PATRIMONY_RATE
        );
        assert_eq!(
            TaxRegime::MacronIii.social_security_rate(dec!(100_000)),
            PATRIMONY_RATE
        );
        assert_eq!(
            TaxRegime::MacronIii.social_security_rate(MACRON_III_THRESHOLD),
            PATRIMONY_RATE
        );
        assert_eq!(
            TaxRegime::MacronIii.social_security_rate(dec!(300_001)),
            ACTIVITY_RATE
        );
        assert_eq!(
            TaxRegime::Unrestricted.social_security_rate(dec!(1000)),
            ACTIVITY_RATE
        );
    }

    #[test]
    fn salariale_only_for_macron_iii_over_threshold() {
        assert_eq!(TaxRegime::MacronI.salariale_rate(dec!(500_000)), dec!(0));
        assert_eq!(TaxRegime::MacronIii.salariale_rate(dec!(100_000)), dec!(0));
        assert_eq!(
            TaxRegime::MacronIii.salariale_rate(MACRON_III_THRESHOLD),
            dec!(0)
        );
        assert_eq!(
            TaxRegime::MacronIii.salariale_rate(dec!(400_000)),
            SALARIALE_RATE
        );
        assert_eq!(
            TaxRegime::Unrestricted.salariale_rate(dec!(500_000)),
            dec!(0)
        );
    }

    #[test]
    fn regime_display() {
        assert_eq!(TaxRegime::MacronI.display(), "Macron I");
        assert_eq!(TaxRegime::MacronIii.display(), "Macron III");
        assert_eq!(TaxRegime::Unrestricted.display(), "Unrestricted");
    }
}
