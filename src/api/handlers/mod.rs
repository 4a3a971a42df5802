pub mod attendance;
pub mod event;
pub mod health;
pub mod person;
pub mod preflight;
pub mod report;
