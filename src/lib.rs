//! Desktop rendering of a single-page CV with an embedded chat assistant.
//!
//! The chat answers from a keyword table or proxies to a hosted endpoint,
//! degrading to the keyword table whenever the endpoint fails.

pub mod ai;
pub mod config;
pub mod core;
pub mod gui;
pub mod logger;
pub mod ui;
