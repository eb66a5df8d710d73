pub mod ai;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod cli;
pub mod core;
pub mod openai;
