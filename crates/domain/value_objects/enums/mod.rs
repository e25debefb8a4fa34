pub mod account_roles;
pub mod business_kinds;
pub mod business_modes;
pub mod city_match;
pub mod payment_statuses;
