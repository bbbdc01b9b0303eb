pub mod attendance;
pub mod event;
pub mod member;
pub mod officer;
pub mod program;
pub mod session;
