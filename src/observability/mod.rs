//! Observability for the blog list service
//!
//! Structured JSON-line logging of typed events.
//!
//! # Usage
//!
//! ```ignore
//! use bloglist::observability::{Event, Logger};
//!
//! Logger::event(Event::PostCreated, &[("post", "…"), ("user", "…")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};
