pub mod config;
pub mod output;
pub mod price;
pub mod token;
