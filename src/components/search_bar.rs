use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Paragraph},
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{BaseStyle, Padding, TextInput, TextInputProps, TextInputStyle};

use super::Component;
use crate::action::Action;
use crate::state::Focus;

const PLACEHOLDER: &str = "Type a city, e.g. Madrid";
const BUTTON_WIDTH: u16 = 12;

/// City input plus the Search button
#[derive(Default)]
pub struct SearchBar {
    input: TextInput,
}

pub struct SearchBarProps<'a> {
    pub query: &'a str,
    pub focus: Focus,
    pub is_loading: bool,
    // Action constructors
    pub on_query_change: fn(String) -> Action,
    pub on_submit: fn(String) -> Action,
}

impl SearchBar {
    pub fn new() -> Self {
        Self::default()
    }
}

fn input_style() -> TextInputStyle {
    TextInputStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::new(0, 1, 0, 1),
            bg: None,
            fg: None,
        },
        placeholder_style: None,
        cursor_style: None,
    }
}

fn border_style(is_focused: bool) -> Style {
    if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

impl Component<Action> for SearchBar {
    type Props<'a> = SearchBarProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        let EventKind::Key(key) = event else {
            return Vec::new();
        };

        match props.focus {
            Focus::Input => {
                // Submit ourselves so Enter behaves the same as the button
                if key.code == KeyCode::Enter {
                    return vec![(props.on_submit)(props.query.to_string())];
                }
                let input_props = TextInputProps {
                    value: props.query,
                    placeholder: PLACEHOLDER,
                    is_focused: true,
                    style: input_style(),
                    on_change: props.on_query_change,
                    on_submit: props.on_submit,
                    on_cursor_move: Some(|_| Action::Render),
                };
                self.input
                    .handle_event(event, input_props)
                    .into_iter()
                    .collect()
            }
            Focus::Button => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => {
                    vec![(props.on_submit)(props.query.to_string())]
                }
                _ => Vec::new(),
            },
            Focus::Chart => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks =
            Layout::horizontal([Constraint::Min(10), Constraint::Length(BUTTON_WIDTH)]).split(area);

        let input_focused = props.focus == Focus::Input;
        let block = Block::bordered()
            .title(" City ")
            .border_style(border_style(input_focused));
        let inner = block.inner(chunks[0]);
        frame.render_widget(block, chunks[0]);
        let input_props = TextInputProps {
            value: props.query,
            placeholder: PLACEHOLDER,
            is_focused: input_focused,
            style: input_style(),
            on_change: props.on_query_change,
            on_submit: props.on_submit,
            on_cursor_move: Some(|_| Action::Render),
        };
        self.input.render(frame, inner, input_props);

        let button_focused = props.focus == Focus::Button;
        let label = if props.is_loading { "..." } else { "Search" };
        let mut label_style = Style::default().add_modifier(Modifier::BOLD);
        if button_focused {
            label_style = label_style.add_modifier(Modifier::REVERSED);
        }
        let button = Paragraph::new(Line::styled(label, label_style).centered())
            .block(Block::bordered().border_style(border_style(button_focused)));
        frame.render_widget(button, chunks[1]);
    }
}
