//! Common type aliases used across the workspace.

/// UTC timestamp type used for all time tracking.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
