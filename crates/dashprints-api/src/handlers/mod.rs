pub mod health;
pub mod quote;
