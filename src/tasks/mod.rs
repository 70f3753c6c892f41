//! Background Tasks
//!
//! Periodic maintenance work running alongside the HTTP server.

mod cleanup;

pub use cleanup::spawn_cleanup_task;
