//! Effects - side effects declared by the reducer

use crate::action::Action;
use crate::api::ForecastError;
use crate::state::ForecastReport;

/// Side effects that can be triggered by actions
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Geocode the city, then fetch its hourly forecast.
    /// `seq` identifies the search so stale results can be dropped.
    FetchForecast { seq: u64, city: String },
}

/// Turn a finished `FetchForecast` into the action that reports it.
pub fn forecast_completion(seq: u64, result: Result<ForecastReport, ForecastError>) -> Action {
    match result {
        Ok(report) => Action::ForecastDidLoad { seq, report },
        Err(e) => Action::ForecastDidError {
            seq,
            message: e.to_string(),
        },
    }
}
