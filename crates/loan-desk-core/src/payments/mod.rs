pub mod allocation;
pub mod balance;
