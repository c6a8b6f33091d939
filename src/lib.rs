//! Forecast Chart - hourly temperature forecast TUI
//!
//! This library exposes the app's modules for testing.

pub mod action;
pub mod api;
pub mod chart;
pub mod components;
pub mod config;
pub mod effect;
pub mod reducer;
pub mod state;
pub mod transform;
