use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};
use tui_dispatch::{DataResource, EventKind};
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{Component, ForecastChart, ForecastChartProps, SearchBar, SearchBarProps};
use crate::action::Action;
use crate::chart::TemperatureChart;
use crate::state::{AppState, Focus};

pub const ERROR_ICON: &str = "\u{26a0}\u{fe0f}";
const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Props for ForecastView - read-only view of state
pub struct ForecastViewProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// The whole screen: search bar, status body and help bar
#[derive(Default)]
pub struct ForecastView {
    search: SearchBar,
}

impl ForecastView {
    pub fn new() -> Self {
        Self::default()
    }
}

/// The chart to draw, only once the latest search succeeded.
fn visible_chart(state: &AppState) -> Option<&TemperatureChart> {
    if state.forecast.is_loaded() {
        state.chart.current()
    } else {
        None
    }
}

fn search_props(state: &AppState) -> SearchBarProps<'_> {
    SearchBarProps {
        query: &state.query,
        focus: state.focus,
        is_loading: state.is_loading(),
        on_query_change: Action::SearchQueryChange,
        on_submit: Action::SearchSubmit,
    }
}

impl Component<Action> for ForecastView {
    type Props<'a> = ForecastViewProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }
        let EventKind::Key(key) = event else {
            return Vec::new();
        };

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return vec![Action::Quit];
        }
        match key.code {
            KeyCode::Tab => return vec![Action::UiFocusNext],
            KeyCode::BackTab => return vec![Action::UiFocusPrev],
            KeyCode::Esc => return vec![Action::Quit],
            _ => {}
        }

        let state = props.state;
        match state.focus {
            Focus::Input | Focus::Button => self
                .search
                .handle_event(event, search_props(state))
                .into_iter()
                .collect(),
            Focus::Chart => match visible_chart(state) {
                Some(chart) => ForecastChart
                    .handle_event(
                        event,
                        ForecastChartProps {
                            chart,
                            cursor: state.cursor,
                            is_focused: true,
                        },
                    )
                    .into_iter()
                    .collect(),
                None if key.code == KeyCode::Char('q') => vec![Action::Quit],
                None => Vec::new(),
            },
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: ForecastViewProps<'_>) {
        let state = props.state;
        let chunks = Layout::vertical([
            Constraint::Length(3), // Search bar
            Constraint::Min(1),    // Status body
            Constraint::Length(1), // Help bar
        ])
        .split(area);

        self.search.render(frame, chunks[0], search_props(state));

        match &state.forecast {
            DataResource::Empty => render_hint(frame, chunks[1]),
            DataResource::Loading => render_loading(frame, chunks[1], state.tick_count),
            DataResource::Failed(error) => render_error(frame, chunks[1], error),
            DataResource::Loaded(_) => match visible_chart(state) {
                Some(chart) => ForecastChart.render(
                    frame,
                    chunks[1],
                    ForecastChartProps {
                        chart,
                        cursor: state.cursor,
                        is_focused: props.is_focused && state.focus == Focus::Chart,
                    },
                ),
                None => render_hint(frame, chunks[1]),
            },
        }

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[2],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("enter", "search"),
                    StatusBarHint::new("tab", "focus"),
                    StatusBarHint::new("←/→", "inspect"),
                    StatusBarHint::new("esc", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}

fn centered_rows(area: Rect, rows: u16) -> std::rc::Rc<[Rect]> {
    Layout::vertical(vec![Constraint::Length(1); rows as usize])
        .flex(Flex::Center)
        .split(area)
}

fn render_hint(frame: &mut Frame, area: Rect) {
    let rows = centered_rows(area, 1);
    let hint = Line::from(vec![
        Span::styled("Type a city and press ", Style::default().fg(Color::DarkGray)),
        Span::styled("enter", Style::default().fg(Color::Cyan).bold()),
        Span::styled(
            " to chart its hourly forecast",
            Style::default().fg(Color::DarkGray),
        ),
    ])
    .centered();
    frame.render_widget(Paragraph::new(hint), rows[0]);
}

fn render_loading(frame: &mut Frame, area: Rect, tick_count: u32) {
    let rows = centered_rows(area, 1);
    let frame_glyph = SPINNER[tick_count as usize % SPINNER.len()];
    let line = Line::from(vec![
        Span::styled(frame_glyph, Style::default().fg(Color::Cyan)),
        Span::styled(" Loading forecast...", Style::default().fg(Color::DarkGray)),
    ])
    .centered();
    frame.render_widget(Paragraph::new(line), rows[0]);
}

fn render_error(frame: &mut Frame, area: Rect, error: &str) {
    let rows = centered_rows(area, 5);

    frame.render_widget(Paragraph::new(Line::from(ERROR_ICON).centered()), rows[0]);
    frame.render_widget(
        Paragraph::new(
            Line::from(vec![Span::styled(
                "Error",
                Style::default().fg(Color::Red).bold(),
            )])
            .centered(),
        ),
        rows[1],
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(vec![Span::styled(
                error.to_string(),
                Style::default().fg(Color::Rgb(200, 100, 100)),
            )])
            .centered(),
        ),
        rows[2],
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(vec![
                Span::styled("Edit the city and press ", Style::default().fg(Color::DarkGray)),
                Span::styled("enter", Style::default().fg(Color::Cyan).bold()),
                Span::styled(" to retry", Style::default().fg(Color::DarkGray)),
            ])
            .centered(),
        ),
        rows[4],
    );
}
