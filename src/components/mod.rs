pub mod forecast_chart;
pub mod forecast_view;
pub mod search_bar;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use forecast_chart::{ForecastChart, ForecastChartProps};
pub use forecast_view::{ERROR_ICON, ForecastView, ForecastViewProps};
pub use search_bar::{SearchBar, SearchBarProps};
