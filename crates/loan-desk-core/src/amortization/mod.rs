pub mod calculator;
pub mod schedule;
