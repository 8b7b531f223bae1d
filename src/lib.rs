//! Survivor Tracker Library
//!
//! This library provides the core of the Survivor Tracker application: the
//! survivor catalog, the persisted tracked set, card rendering, search
//! filtering, and the terminal and command-line front ends built on them.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod logging;
pub mod models;
pub mod services;
pub mod shortcuts;
pub mod storage;
pub mod tui;
