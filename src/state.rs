//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;

use crate::chart::ChartSlot;

/// First geocoding match for a searched city
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GeoResult {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
    pub country: Option<String>,
}

impl GeoResult {
    /// "<name>, <country>", or just the name when the API has no country.
    pub fn display_name(&self) -> String {
        match &self.country {
            Some(country) => format!("{}, {}", self.name, country),
            None => self.name.clone(),
        }
    }
}

/// Hourly temperatures; `temperatures[i]` belongs to `timestamps[i]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ForecastSeries {
    pub timestamps: Vec<String>,
    pub temperatures: Vec<f64>,
}

impl ForecastSeries {
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}

/// Everything a finished search hands to the chart
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ForecastReport {
    pub place: GeoResult,
    pub labels: Vec<String>,
    pub temperatures: Vec<f64>,
}

/// Which part of the screen receives keys
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Focus {
    #[default]
    Input,
    Button,
    Chart,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Input => Focus::Button,
            Focus::Button => Focus::Chart,
            Focus::Chart => Focus::Input,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Input => Focus::Chart,
            Focus::Button => Focus::Input,
            Focus::Chart => Focus::Button,
        }
    }
}

/// Spinner frame interval while a search is in flight.
pub const LOADING_TICK_MS: u64 = 80;

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    /// Text currently in the city input
    #[debug(section = "Search", label = "Query")]
    pub query: String,

    /// Token of the most recent search; older results are ignored
    #[debug(section = "Search", label = "Seq")]
    pub search_seq: u64,

    /// Search lifecycle: Empty → Loading → Loaded(place)/Failed(message)
    #[debug(section = "Forecast", label = "Status", debug_fmt)]
    pub forecast: DataResource<GeoResult>,

    /// Owner of the one live chart
    #[debug(section = "Forecast", label = "Chart", debug_fmt)]
    pub chart: ChartSlot,

    /// Hovered x-index on the chart
    #[debug(section = "Forecast", label = "Cursor")]
    pub cursor: usize,

    #[debug(skip)]
    pub focus: Focus,

    /// Spinner frame counter
    #[debug(skip)]
    pub tick_count: u32,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            query: String::new(),
            search_seq: 0,
            forecast: DataResource::Empty,
            chart: ChartSlot::default(),
            cursor: 0,
            focus: Focus::default(),
            tick_count: 0,
        }
    }
}

impl AppState {
    /// Create state with the input pre-filled
    pub fn with_query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn is_loading(&self) -> bool {
        self.forecast.is_loading()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_with_and_without_country() {
        let mut place = GeoResult {
            latitude: 40.4,
            longitude: -3.7,
            name: "Madrid".into(),
            country: Some("Spain".into()),
        };
        assert_eq!(place.display_name(), "Madrid, Spain");

        place.country = None;
        assert_eq!(place.display_name(), "Madrid");
    }

    #[test]
    fn test_focus_cycles_both_ways() {
        assert_eq!(Focus::Input.next(), Focus::Button);
        assert_eq!(Focus::Button.next(), Focus::Chart);
        assert_eq!(Focus::Chart.next(), Focus::Input);
        assert_eq!(Focus::Input.prev(), Focus::Chart);
        assert_eq!(Focus::Chart.prev().next(), Focus::Chart);
    }
}
