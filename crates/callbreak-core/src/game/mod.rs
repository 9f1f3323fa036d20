pub mod notice;
pub mod ranking;
pub mod serialization;
pub mod session;
pub mod sink;
