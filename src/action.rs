//! Actions - every user intent and async result

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::ForecastReport;

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Search category =====
    /// City input text changed
    SearchQueryChange(String),

    /// Intent: look up the city (Enter in the input or the Search button)
    SearchSubmit(String),

    // ===== Forecast category =====
    /// Result: geocoding and forecast succeeded for search `seq`
    ForecastDidLoad { seq: u64, report: ForecastReport },

    /// Result: search `seq` failed
    ForecastDidError { seq: u64, message: String },

    // ===== Chart category =====
    /// Move the hover cursor by a number of points
    ChartCursorMove(i32),

    /// Jump the hover cursor to the first point
    ChartCursorHome,

    /// Jump the hover cursor to the last point
    ChartCursorEnd,

    // ===== UI category =====
    UiFocusNext,

    UiFocusPrev,

    /// Force a re-render (for cursor movement, etc.)
    Render,

    // ===== Uncategorized (global) =====
    /// Spinner tick while loading
    Tick,

    /// Exit the application
    Quit,
}
