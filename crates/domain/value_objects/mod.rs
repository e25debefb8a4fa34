pub mod accounts;
pub mod business_status;
pub mod businesses;
pub mod enums;
pub mod offers;
pub mod payments;
pub mod schedule;
pub mod search;
pub mod subscriptions;
pub mod taxonomy;
