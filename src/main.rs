//! Forecast Chart - hourly temperature forecast TUI

use std::cell::RefCell;
use std::fs::File;
use std::io;
use std::path::Path;
use std::rc::Rc;
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use forecast_chart::action::Action;
use forecast_chart::api::ForecastClient;
use forecast_chart::components::{Component, ForecastView, ForecastViewProps};
use forecast_chart::config::Args;
use forecast_chart::effect::{Effect, forecast_completion};
use forecast_chart::reducer::reducer;
use forecast_chart::state::{AppState, LOADING_TICK_MS};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing_subscriber::EnvFilter;
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventKind,
    EventRoutingState, HandlerResponse, Keybindings,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{DebugRunOutput, DebugSession, DebugSessionError, ReplayItem};

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum ForecastComponentId {
    View,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum ForecastContext {
    Main,
}

impl EventRoutingState<ForecastComponentId, ForecastContext> for AppState {
    fn focused(&self) -> Option<ForecastComponentId> {
        Some(ForecastComponentId::View)
    }

    fn modal(&self) -> Option<ForecastComponentId> {
        None
    }

    fn binding_context(&self, _id: ForecastComponentId) -> ForecastContext {
        ForecastContext::Main
    }

    fn default_context(&self) -> ForecastContext {
        ForecastContext::Main
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let client = ForecastClient::new(args.api_config()).map_err(io::Error::other)?;
    let initial_city = args.initial_city();
    let debug = DebugSession::new(args.debug);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let query = initial_city.clone().unwrap_or_default();
    let state = debug
        .load_state_or_else_async(move || async move {
            Ok::<AppState, io::Error>(AppState::with_query(query))
        })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(
        &mut terminal,
        &debug,
        store,
        client,
        initial_city.map(Action::SearchSubmit),
        replay_actions,
    )
    .await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    Ok(())
}

/// Log to a file; the terminal belongs to the UI.
fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| io::Error::other(e.to_string()))
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    client: ForecastClient,
    initial_action: Option<Action>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let view = Rc::new(RefCell::new(ForecastView::new()));
    let mut bus: EventBus<AppState, Action, ForecastComponentId, ForecastContext> =
        EventBus::new();
    let keybindings: Keybindings<ForecastContext> = Keybindings::new();

    let view_events = Rc::clone(&view);
    bus.register(ForecastComponentId::View, move |event, state| {
        let props = ForecastViewProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = view_events
            .borrow_mut()
            .handle_event(&event.kind, props)
            .into_iter()
            .collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    });

    // Re-render on terminal resize (no action needed, just redraw)
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            initial_action,
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(LOADING_TICK_MS),
                    || Action::Tick,
                );
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                event_ctx.set_component_area(ForecastComponentId::View, area);
                let props = ForecastViewProps {
                    state,
                    is_focused: render_ctx.is_focused(),
                };
                view.borrow_mut().render(frame, area, props);
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(effect, ctx, &client),
        )
        .await
}

/// Handle effects by spawning tasks
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>, client: &ForecastClient) {
    match effect {
        Effect::FetchForecast { seq, city } => {
            tracing::info!(seq, %city, "search started");
            let client = client.clone();
            // One key: a newer search cancels the one in flight
            ctx.tasks().spawn("forecast", async move {
                let result = client.fetch_report(&city).await;
                match &result {
                    Ok(report) => {
                        tracing::info!(seq, points = report.temperatures.len(), "search finished")
                    }
                    Err(e) => tracing::warn!(seq, %city, error = %e, "search failed"),
                }
                forecast_completion(seq, result)
            });
        }
    }
}
