pub mod bareme;
pub mod fr;
pub mod rsu;

pub use bareme::{marginal_tax_rate, progressive_income_tax, tax_on_additional_income};
pub use fr::{TaxRegime, DEFAULT_INCOME_TAX_RATE, MACRON_III_THRESHOLD};
pub use rsu::{calculate, years_held, InvalidInput, RsuResult, ScenarioInput};
