//! Action and state tests using the store and test harnesses

use tui_dispatch::testing::*;
use tui_dispatch::{EffectStore, NumericComponentId, assert_emitted, assert_not_emitted};
use forecast_chart::{
    action::Action,
    components::{Component, ForecastView, ForecastViewProps},
    effect::Effect,
    reducer::reducer,
    state::{AppState, Focus, ForecastReport, GeoResult},
};

fn lisbon_report() -> ForecastReport {
    ForecastReport {
        place: GeoResult {
            latitude: 38.7,
            longitude: -9.1,
            name: "Lisboa".into(),
            country: Some("Portugal".into()),
        },
        labels: vec!["3/7 12:00".into(), "3/7 13:00".into(), "3/7 14:00".into()],
        temperatures: vec![28.0, 31.5, 29.0],
    }
}

#[test]
fn test_reducer_search_submit() {
    let mut store = EffectStore::new(AppState::default(), reducer);
    assert!(store.state().forecast.is_empty());

    let result = store.dispatch(Action::SearchSubmit("Lisboa".into()));
    assert!(result.changed, "State should change");
    assert!(store.state().forecast.is_loading());
    assert_eq!(result.effects.len(), 1);
    assert!(matches!(
        result.effects[0],
        Effect::FetchForecast { seq: 1, ref city } if city == "Lisboa"
    ));
}

#[test]
fn test_search_flow_with_harness() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::SearchSubmit("Lisboa".into()));
    harness.assert_state(|s| s.forecast.is_loading());

    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| matches!(e, Effect::FetchForecast { .. }));

    // Simulate async completion
    harness.complete_action(Action::ForecastDidLoad {
        seq: 1,
        report: lisbon_report(),
    });
    let (changed, total) = harness.process_emitted();

    assert_eq!(total, 1, "Should have processed 1 action");
    assert_eq!(changed, 1, "Action should have changed state");
    harness.assert_state(|s| s.forecast.is_loaded());
    harness.assert_state(|s| s.chart.current().unwrap().location_label == "Lisboa, Portugal");
}

#[test]
fn test_error_flow() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::SearchSubmit("Lisboa".into()));
    harness.complete_action(Action::ForecastDidError {
        seq: 1,
        message: "request failed: connection refused".into(),
    });
    harness.process_emitted();

    harness.assert_state(|s| s.forecast.is_failed());
    harness.assert_state(|s| s.forecast.error() == Some("request failed: connection refused"));
}

#[test]
fn test_overlapping_searches_latest_wins() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::SearchSubmit("Lisboa".into()));
    harness.dispatch_collect(Action::SearchSubmit("Oslo".into()));
    harness.drain_effects().effects_count(2);

    // The newer search fails first, then the older one resolves late
    harness.complete_action(Action::ForecastDidError {
        seq: 2,
        message: "City not found. Try another name.".into(),
    });
    harness.complete_action(Action::ForecastDidLoad {
        seq: 1,
        report: lisbon_report(),
    });
    let (changed, total) = harness.process_emitted();

    assert_eq!(total, 2);
    assert_eq!(changed, 1, "Stale result must not change state");
    harness.assert_state(|s| s.forecast.is_failed());
    harness.assert_state(|s| !s.chart.is_live());
}

#[test]
fn test_enter_key_submits_through_view() {
    let mut harness = EffectStoreTestHarness::new(AppState::with_query("Lisboa"), reducer);
    let mut view = ForecastView::new();

    let actions = harness.send_keys::<NumericComponentId, _, _>("enter", |state, event| {
        let props = ForecastViewProps {
            state,
            is_focused: true,
        };
        view.handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });

    actions.assert_count(1);
    actions.assert_first(Action::SearchSubmit("Lisboa".into()));

    for action in actions {
        harness.dispatch_collect(action);
    }
    harness.assert_state(|s| s.forecast.is_loading());
}

#[test]
fn test_view_ignores_when_unfocused() {
    let mut harness = TestHarness::<AppState, Action>::default();
    let mut view = ForecastView::new();

    let actions = harness.send_keys::<NumericComponentId, _, _>("a b q", |state, event| {
        let props = ForecastViewProps {
            state,
            is_focused: false,
        };
        view.handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });

    actions.assert_empty();
}

#[test]
fn test_chart_keys_after_load() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    harness.dispatch_all([
        Action::SearchSubmit("Lisboa".into()),
        Action::ForecastDidLoad {
            seq: 1,
            report: lisbon_report(),
        },
        Action::UiFocusNext,
        Action::UiFocusNext,
    ]);
    harness.assert_state(|s| s.focus == Focus::Chart);

    let mut view = ForecastView::new();
    let actions = harness.send_keys::<NumericComponentId, _, _>("l l", |state, event| {
        let props = ForecastViewProps {
            state,
            is_focused: true,
        };
        view.handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });
    actions.assert_count(2);

    for action in actions {
        harness.dispatch_collect(action);
    }
    harness.assert_state(|s| s.cursor == 2);
}

#[test]
fn test_action_categories() {
    let did_load = Action::ForecastDidLoad {
        seq: 1,
        report: lisbon_report(),
    };
    let focus = Action::UiFocusNext;
    let tick = Action::Tick;

    assert_eq!(did_load.category(), Some("forecast_did"));
    assert_eq!(focus.category(), Some("ui"));
    assert_eq!(tick.category(), None);

    assert!(did_load.is_forecast_did());
    assert!(focus.is_ui());
}

#[test]
fn test_assert_emitted_macro() {
    let actions = vec![
        Action::SearchSubmit("Lisboa".into()),
        Action::ForecastDidLoad {
            seq: 1,
            report: lisbon_report(),
        },
    ];

    assert_emitted!(actions, Action::SearchSubmit(_));
    assert_emitted!(actions, Action::ForecastDidLoad { .. });
    assert_not_emitted!(actions, Action::Quit);
    assert_not_emitted!(actions, Action::ForecastDidError { .. });
}
