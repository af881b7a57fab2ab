pub mod seasonal_repo;
pub mod transaction_repo;

pub use seasonal_repo::{SeasonalInput, SeasonalRepository};
pub use transaction_repo::{TransactionInput, TransactionRepository};
