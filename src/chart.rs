//! Temperature chart model
//!
//! Everything here is pure data: the segment colour rule, the fixed chart
//! configuration, curve smoothing and axis helpers. The ratatui widget is
//! assembled from this model in `components::forecast_chart`.

use ratatui::style::Color;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A segment touching a value above this is drawn hot.
pub const HOT_THRESHOLD: f64 = 30.0;
/// A segment touching a value below this is drawn cold (unless it is hot).
pub const COLD_THRESHOLD: f64 = 10.0;

// ============================================================================
// Segment colouring
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum SegmentColor {
    Hot,
    Cold,
    Neutral,
}

impl SegmentColor {
    /// Classify the segment between two adjacent values. Hot wins over cold.
    pub fn classify(start: f64, end: f64) -> Self {
        if start > HOT_THRESHOLD || end > HOT_THRESHOLD {
            SegmentColor::Hot
        } else if start < COLD_THRESHOLD || end < COLD_THRESHOLD {
            SegmentColor::Cold
        } else {
            SegmentColor::Neutral
        }
    }

    pub fn color(self) -> Color {
        match self {
            SegmentColor::Hot => Color::Rgb(0xff, 0x4d, 0x4d),
            SegmentColor::Cold => Color::Rgb(0x2e, 0x86, 0xde),
            SegmentColor::Neutral => Color::Rgb(0x4b, 0x55, 0x63),
        }
    }
}

// ============================================================================
// Fixed configuration
// ============================================================================

/// Chart options. Not user-configurable; see [`CHART_CONFIG`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartConfig {
    /// Bezier tension between points; 0 draws straight lines.
    pub tension: f64,
    /// Points sampled per smoothed segment, endpoints included.
    pub samples_per_segment: usize,
    pub show_points: bool,
    pub legend_top: bool,
    /// Show the readout for the cursor's x-index.
    pub tooltips: bool,
    pub max_x_ticks: usize,
    pub begin_at_zero: bool,
    pub x_title: &'static str,
    pub y_title: &'static str,
}

pub const CHART_CONFIG: ChartConfig = ChartConfig {
    tension: 0.4,
    samples_per_segment: 8,
    show_points: true,
    legend_top: true,
    tooltips: true,
    max_x_ticks: 10,
    begin_at_zero: false,
    x_title: "Timeline (Days / Hours)",
    y_title: "Temperature (°C)",
};

// ============================================================================
// Chart instance
// ============================================================================

/// One coloured piece of the line, already smoothed.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    pub color: SegmentColor,
    pub path: Vec<(f64, f64)>,
}

/// A built line chart: labels on x, temperatures on y.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TemperatureChart {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub location_label: String,
}

impl TemperatureChart {
    pub fn new(labels: Vec<String>, values: Vec<f64>, location_label: impl Into<String>) -> Self {
        debug_assert_eq!(labels.len(), values.len());
        Self {
            labels,
            values,
            location_label: location_label.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn legend_label(&self) -> String {
        format!("Temperature in {} (°C)", self.location_label)
    }

    /// Data points as (x-index, value).
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.values
            .iter()
            .enumerate()
            .map(|(i, v)| (i as f64, *v))
            .collect()
    }

    /// One segment per adjacent pair of points, coloured by its endpoints.
    pub fn segments(&self, config: &ChartConfig) -> Vec<Segment> {
        let points = self.points();
        (0..points.len().saturating_sub(1))
            .map(|i| Segment {
                color: SegmentColor::classify(points[i].1, points[i + 1].1),
                path: smooth_segment(&points, i, config.tension, config.samples_per_segment),
            })
            .collect()
    }

    pub fn x_bounds(&self) -> [f64; 2] {
        [0.0, (self.len().saturating_sub(1) as f64).max(1.0)]
    }

    /// Fit the y-axis to the data with some headroom for the curve.
    pub fn y_bounds(&self, config: &ChartConfig) -> [f64; 2] {
        let Some(first) = self.values.first() else {
            return [0.0, 1.0];
        };
        let (mut min, mut max) = self
            .values
            .iter()
            .fold((*first, *first), |(lo, hi), v| (lo.min(*v), hi.max(*v)));
        if config.begin_at_zero {
            min = min.min(0.0);
            max = max.max(0.0);
        }
        let pad = ((max - min) * 0.1).max(1.0);
        [min - pad, max + pad]
    }

    /// Evenly spaced x labels, at most `max_ticks` of them.
    pub fn x_tick_labels(&self, max_ticks: usize) -> Vec<String> {
        tick_indices(self.labels.len(), max_ticks)
            .into_iter()
            .map(|i| self.labels[i].clone())
            .collect()
    }

    /// Tooltip text for the point at `index`.
    pub fn readout(&self, index: usize) -> Option<String> {
        let label = self.labels.get(index)?;
        let value = self.values.get(index)?;
        Some(format!("{label}  {value:.1}°C"))
    }
}

/// Indices of `len` labels to show when at most `max_ticks` fit.
pub fn tick_indices(len: usize, max_ticks: usize) -> Vec<usize> {
    let count = len.min(max_ticks);
    match count {
        0 => Vec::new(),
        1 => vec![0],
        _ => {
            let last = (len - 1) as f64;
            let step = last / (count - 1) as f64;
            (0..count).map(|i| (i as f64 * step).round() as usize).collect()
        }
    }
}

/// Sample the cubic Bezier between `points[index]` and `points[index + 1]`.
///
/// Control points follow the neighbouring points scaled by `tension`
/// (a cardinal spline); ends of the series reuse their own point as the
/// missing neighbour.
pub fn smooth_segment(
    points: &[(f64, f64)],
    index: usize,
    tension: f64,
    samples: usize,
) -> Vec<(f64, f64)> {
    let Some((&p1, &p2)) = points.get(index).zip(points.get(index + 1)) else {
        return Vec::new();
    };
    if tension <= 0.0 || samples < 3 {
        return vec![p1, p2];
    }
    let p0 = if index == 0 { p1 } else { points[index - 1] };
    let p3 = points.get(index + 2).copied().unwrap_or(p2);

    let k = tension / 2.0;
    let c1 = (p1.0 + k * (p2.0 - p0.0), p1.1 + k * (p2.1 - p0.1));
    let c2 = (p2.0 - k * (p3.0 - p1.0), p2.1 - k * (p3.1 - p1.1));

    (0..samples)
        .map(|step| {
            let t = step as f64 / (samples - 1) as f64;
            let u = 1.0 - t;
            let b0 = u * u * u;
            let b1 = 3.0 * u * u * t;
            let b2 = 3.0 * u * t * t;
            let b3 = t * t * t;
            (
                b0 * p1.0 + b1 * c1.0 + b2 * c2.0 + b3 * p2.0,
                b0 * p1.1 + b1 * c1.1 + b2 * c2.1 + b3 * p2.1,
            )
        })
        .collect()
}

// ============================================================================
// Chart owner
// ============================================================================

/// Holds at most one live chart. A new chart always releases the old one.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ChartSlot {
    chart: Option<TemperatureChart>,
}

impl ChartSlot {
    /// Release the current chart (if any), then install `chart`.
    pub fn replace(&mut self, chart: TemperatureChart) -> &TemperatureChart {
        if let Some(previous) = self.chart.take() {
            drop(previous);
        }
        self.chart.insert(chart)
    }

    pub fn current(&self) -> Option<&TemperatureChart> {
        self.chart.as_ref()
    }

    pub fn is_live(&self) -> bool {
        self.chart.is_some()
    }
}
