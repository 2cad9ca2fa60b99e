//! `neo-watch` library crate.
//!
//! The binary (`neo`) is a thin wrapper around this library so that:
//!
//! - the fetch/filter/store pipeline is testable without a running server
//! - every HTTP route can be exercised in-process

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod logging;
pub mod plot;
pub mod report;
pub mod server;
pub mod store;
