pub mod accounts;
pub mod businesses;
pub mod offers;
pub mod payments;
