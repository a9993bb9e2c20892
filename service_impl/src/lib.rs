pub mod booking;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod macros;
pub mod navigation;
pub mod payment;
pub mod session;
pub mod uuid_service;
pub mod wizard;

mod test;
