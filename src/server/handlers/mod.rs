pub mod export;
pub mod health;
pub mod query;
