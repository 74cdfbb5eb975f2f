pub mod admin;
pub mod auth;
pub mod backup;
pub mod calculator;
pub mod del;
pub mod edit;
pub mod log;
pub mod state;
pub mod timer;
pub mod views;
