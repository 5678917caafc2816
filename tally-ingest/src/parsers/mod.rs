pub mod activity_log_csv;
pub mod catalog;
pub mod goals;
