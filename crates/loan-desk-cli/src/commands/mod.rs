pub mod amortization;
pub mod origination;
pub mod payments;
