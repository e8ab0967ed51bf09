//! Observable events of the blog list service
//!
//! Every log line names exactly one of these.

use std::fmt;

use super::logger::Severity;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Configuration loaded and validated
    ConfigLoaded,
    /// Listener bound, ready for requests
    ServerStart,
    /// Server stopped with an error
    ServerFailed,

    // Posts
    PostCreated,
    PostUpdated,
    PostDeleted,
    /// Ownership check refused a delete
    DeleteDenied,

    // Users
    UserRegistered,
    LoginSucceeded,
    LoginFailed,
    /// Request carried no usable credential
    AuthRejected,

    /// Handler failed with a server-side error
    RequestFailed,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::ServerStart => "SERVER_START",
            Event::ServerFailed => "SERVER_FAILED",
            Event::PostCreated => "POST_CREATED",
            Event::PostUpdated => "POST_UPDATED",
            Event::PostDeleted => "POST_DELETED",
            Event::DeleteDenied => "POST_DELETE_DENIED",
            Event::UserRegistered => "USER_REGISTERED",
            Event::LoginSucceeded => "LOGIN_SUCCEEDED",
            Event::LoginFailed => "LOGIN_FAILED",
            Event::AuthRejected => "AUTH_REJECTED",
            Event::RequestFailed => "REQUEST_FAILED",
        }
    }

    /// Severity this event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::ServerFailed | Event::RequestFailed => Severity::Error,
            Event::DeleteDenied | Event::LoginFailed | Event::AuthRejected => Severity::Warn,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
