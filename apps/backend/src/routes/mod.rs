pub mod account;
pub mod auth;
pub mod faculty;
pub mod progress;
pub mod quiz;
