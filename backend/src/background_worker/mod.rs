pub mod status_refresher;
