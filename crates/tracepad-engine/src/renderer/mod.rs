pub mod command;
pub mod ink;
