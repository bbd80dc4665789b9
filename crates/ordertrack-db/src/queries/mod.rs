//! Database query implementations.

pub mod actors;
pub mod notifications;
pub mod projects;
pub mod sessions;
pub mod steps;
