pub mod accounts;
pub mod businesses;
pub mod clock;
pub mod offers;
pub mod payments;
