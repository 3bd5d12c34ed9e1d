mod allowance;
mod tax_bracket;
mod tax_computation;

pub use allowance::{Allowance, AllowanceType};
pub use tax_bracket::TaxBracket;
pub use tax_computation::{TaxComputationInput, TaxComputationResult, TaxLevel};
