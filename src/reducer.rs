//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::chart::TemperatureChart;
use crate::effect::Effect;
use crate::state::AppState;

/// Shown when a failure carries no message of its own.
pub const FALLBACK_ERROR: &str = "An error occurred while fetching the data.";

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Search actions =====
        Action::SearchQueryChange(query) => {
            if state.query == query {
                return DispatchResult::unchanged();
            }
            state.query = query;
            DispatchResult::changed()
        }

        Action::SearchSubmit(query) => {
            let city = query.trim();
            if city.is_empty() {
                return DispatchResult::unchanged();
            }
            let city = city.to_string();

            state.search_seq += 1;
            state.forecast = DataResource::Loading;
            state.tick_count = 0;
            DispatchResult::changed_with(Effect::FetchForecast {
                seq: state.search_seq,
                city,
            })
        }

        // ===== Forecast actions =====
        Action::ForecastDidLoad { seq, report } => {
            if seq != state.search_seq {
                tracing::debug!(seq, latest = state.search_seq, "dropping stale forecast");
                return DispatchResult::unchanged();
            }
            let location = report.place.display_name();
            state
                .chart
                .replace(TemperatureChart::new(report.labels, report.temperatures, location));
            state.cursor = 0;
            state.forecast = DataResource::Loaded(report.place);
            DispatchResult::changed()
        }

        Action::ForecastDidError { seq, message } => {
            if seq != state.search_seq {
                tracing::debug!(seq, latest = state.search_seq, "dropping stale error");
                return DispatchResult::unchanged();
            }
            let message = if message.trim().is_empty() {
                FALLBACK_ERROR.to_string()
            } else {
                message
            };
            state.forecast = DataResource::Failed(message);
            DispatchResult::changed()
        }

        // ===== Chart actions =====
        Action::ChartCursorMove(delta) => {
            let Some(last) = last_index(state) else {
                return DispatchResult::unchanged();
            };
            let target = (state.cursor as i64 + delta as i64).clamp(0, last as i64) as usize;
            set_cursor(state, target)
        }

        Action::ChartCursorHome => match last_index(state) {
            Some(_) => set_cursor(state, 0),
            None => DispatchResult::unchanged(),
        },

        Action::ChartCursorEnd => match last_index(state) {
            Some(last) => set_cursor(state, last),
            None => DispatchResult::unchanged(),
        },

        // ===== UI actions =====
        Action::UiFocusNext => {
            state.focus = state.focus.next();
            DispatchResult::changed()
        }

        Action::UiFocusPrev => {
            state.focus = state.focus.prev();
            DispatchResult::changed()
        }

        Action::Render => DispatchResult::changed(),

        // ===== Global actions =====
        Action::Tick => {
            if state.is_loading() {
                state.tick_count = state.tick_count.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Last point of the visible chart, if a chart is showing.
fn last_index(state: &AppState) -> Option<usize> {
    if !state.forecast.is_loaded() {
        return None;
    }
    let chart = state.chart.current()?;
    chart.len().checked_sub(1)
}

fn set_cursor(state: &mut AppState, target: usize) -> DispatchResult<Effect> {
    if state.cursor == target {
        DispatchResult::unchanged()
    } else {
        state.cursor = target;
        DispatchResult::changed()
    }
}
