pub mod document;
pub mod gap;
pub mod job;
pub mod suggestion;
