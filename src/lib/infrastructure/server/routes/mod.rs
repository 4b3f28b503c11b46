pub mod command;
pub mod health;
