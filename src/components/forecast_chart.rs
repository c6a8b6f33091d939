use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Chart, Dataset, GraphType, LegendPosition, Paragraph},
};
use tui_dispatch::EventKind;

use super::Component;
use crate::action::Action;
use crate::chart::{CHART_CONFIG, ChartConfig, TemperatureChart};

/// Line chart of the hourly temperatures with a hover readout
#[derive(Default)]
pub struct ForecastChart;

pub struct ForecastChartProps<'a> {
    pub chart: &'a TemperatureChart,
    pub cursor: usize,
    pub is_focused: bool,
}

fn y_labels([lo, hi]: [f64; 2]) -> Vec<String> {
    let mid = (lo + hi) / 2.0;
    [lo, mid, hi].iter().map(|v| format!("{v:.0}")).collect()
}

impl Component<Action> for ForecastChart {
    type Props<'a> = ForecastChartProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }

        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Left | KeyCode::Char('h') => Some(Action::ChartCursorMove(-1)),
                KeyCode::Right | KeyCode::Char('l') => Some(Action::ChartCursorMove(1)),
                KeyCode::PageUp => Some(Action::ChartCursorMove(-24)),
                KeyCode::PageDown => Some(Action::ChartCursorMove(24)),
                KeyCode::Home => Some(Action::ChartCursorHome),
                KeyCode::End => Some(Action::ChartCursorEnd),
                KeyCode::Char('q') => Some(Action::Quit),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let config: &ChartConfig = &CHART_CONFIG;
        let chart = props.chart;

        let chunks = Layout::vertical([
            Constraint::Min(1),    // Chart
            Constraint::Length(1), // Readout
        ])
        .split(area);

        let segments = chart.segments(config);
        let points = chart.points();
        let hovered: Vec<(f64, f64)> = points.get(props.cursor).copied().into_iter().collect();

        // Legend entry only; carries no points
        let mut datasets = vec![Dataset::default()
            .name(chart.legend_label())
            .style(Style::default().fg(Color::Gray))
            .data(&[])];

        datasets.extend(segments.iter().map(|segment| {
            Dataset::default()
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(segment.color.color()))
                .data(&segment.path)
        }));

        if config.show_points {
            datasets.push(
                Dataset::default()
                    .marker(Marker::Dot)
                    .graph_type(GraphType::Scatter)
                    .style(Style::default().fg(Color::Gray))
                    .data(&points),
            );
        }

        if config.tooltips && props.is_focused {
            datasets.push(
                Dataset::default()
                    .marker(Marker::Block)
                    .graph_type(GraphType::Scatter)
                    .style(Style::default().fg(Color::Yellow))
                    .data(&hovered),
            );
        }

        let axis_style = Style::default().fg(Color::DarkGray);
        let y_bounds = chart.y_bounds(config);
        let x_axis = Axis::default()
            .title(config.x_title)
            .style(axis_style)
            .bounds(chart.x_bounds())
            .labels(chart.x_tick_labels(config.max_x_ticks));
        let y_axis = Axis::default()
            .title(config.y_title)
            .style(axis_style)
            .bounds(y_bounds)
            .labels(y_labels(y_bounds));

        let border = if props.is_focused {
            Color::Cyan
        } else {
            Color::DarkGray
        };
        let widget = Chart::new(datasets)
            .block(Block::bordered().border_style(Style::default().fg(border)))
            .x_axis(x_axis)
            .y_axis(y_axis)
            .legend_position(config.legend_top.then_some(LegendPosition::Top))
            .hidden_legend_constraints((Constraint::Percentage(100), Constraint::Percentage(100)));
        frame.render_widget(widget, chunks[0]);

        if config.tooltips {
            if let Some(readout) = chart.readout(props.cursor) {
                let line = Line::from(vec![
                    Span::styled("▸ ", Style::default().fg(Color::Yellow)),
                    Span::styled(readout, Style::default().fg(Color::White).bold()),
                ])
                .centered();
                frame.render_widget(Paragraph::new(line), chunks[1]);
            }
        }
    }
}
