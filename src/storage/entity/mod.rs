pub mod product_transaction;
pub mod seasonal_ingredient;
