pub mod account;
pub mod ip_log;
pub mod review;
