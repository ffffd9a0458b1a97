//! Event System
//!
//! Entries of the TUI activity feed

use crate::logging::{LogLevel, should_log_with_env};
use chrono::Local;
use std::fmt::Display;

/// What produced an event.
#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum Origin {
    /// Login, logout and credential handling.
    Session,
    /// Loading a view's data from the backend.
    Sync,
    /// Sending a create, update or delete.
    Write,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum EventType {
    Success,
    Error,
    Refresh,
    Waiting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub origin: Origin,
    pub msg: String,
    pub timestamp: String,
    pub event_type: EventType,
    pub log_level: LogLevel,
}

impl Event {
    fn new(origin: Origin, msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self {
            origin,
            msg,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            event_type,
            log_level,
        }
    }

    pub fn session(msg: String, event_type: EventType) -> Self {
        let log_level = match event_type {
            EventType::Error => LogLevel::Error,
            _ => LogLevel::Info,
        };
        Self::new(Origin::Session, msg, event_type, log_level)
    }

    pub fn sync_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Origin::Sync, msg, event_type, log_level)
    }

    pub fn write_with_level(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Origin::Write, msg, event_type, log_level)
    }

    pub fn should_display(&self) -> bool {
        // Always show success events and info level events
        if self.event_type == EventType::Success || self.log_level >= LogLevel::Info {
            return true;
        }
        should_log_with_env(self.log_level)
    }
}

impl Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}] {}", self.event_type, self.timestamp, self.msg)
    }
}
