pub mod auth;
pub mod backup;
pub mod dashboard;
pub mod events;
pub mod log;
pub mod members;
pub mod pager;
pub mod report;
pub mod scanner;
