pub mod password;
pub mod progress;
pub mod token;
