pub mod accounts;
pub mod businesses;
pub mod errors;
pub mod offers;
pub mod payments;
pub mod search;
pub mod status_refresher;

#[cfg(test)]
pub(crate) mod test_support;
