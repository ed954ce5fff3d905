//! Progressive income tax (barème) per the 2025 French brackets

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// One bracket of the barème. `upper` is inclusive; the last bracket is open.
#[derive(Debug, Clone, Copy)]
pub struct Bracket {
    pub upper: Option<Decimal>,
    pub rate: Decimal,
}

/// 2025 barème on taxable income
pub const BAREME_2025: &[Bracket] = &[
    Bracket {
        upper: Some(dec!(11_497)),
        rate: dec!(0),
    },
    Bracket {
        upper: Some(dec!(29_315)),
        rate: dec!(0.11),
    },
    Bracket {
        upper: Some(dec!(83_823)),
        rate: dec!(0.30),
    },
    Bracket {
        upper: Some(dec!(180_294)),
        rate: dec!(0.41),
    },
    Bracket {
        upper: None,
        rate: dec!(0.45),
    },
];

/// Marginal tax rate (TMI): the rate of the bracket the income falls in
pub fn marginal_tax_rate(income: Decimal) -> Decimal {
    for bracket in BAREME_2025 {
        match bracket.upper {
            Some(upper) if income > upper => continue,
            _ => return bracket.rate,
        }
    }
    Decimal::ZERO
}

/// Total income tax across the brackets. Negative income is treated as zero.
pub fn progressive_income_tax(income: Decimal) -> Decimal {
    let income = income.max(Decimal::ZERO);
    let mut tax = Decimal::ZERO;
    let mut lower = Decimal::ZERO;
    for bracket in BAREME_2025 {
        let upper = bracket.upper.unwrap_or(income);
        if income > lower {
            tax += (income.min(upper) - lower) * bracket.rate;
        }
        lower = upper;
    }
    tax
}

/// Tax attributable to extra income stacked on top of a base income.
///
/// Computed as the difference of the progressive tax with and without the
/// additional amount, so income spanning a bracket boundary is taxed
/// correctly rather than entirely at the marginal rate.
pub fn tax_on_additional_income(base_income: Decimal, additional: Decimal) -> Decimal {
    progressive_income_tax(base_income + additional) - progressive_income_tax(base_income)
}
