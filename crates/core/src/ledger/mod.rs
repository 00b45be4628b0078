pub mod ledger_model;
pub mod transaction_model;

pub use ledger_model::*;
pub use transaction_model::*;
