pub mod accounts;
pub mod booking;
pub mod catalog;
pub mod dashboard;
pub mod money;
