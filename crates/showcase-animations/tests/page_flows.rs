//! End-to-end page sessions driven through DOM events

#![allow(clippy::unwrap_used, clippy::expect_used)]

use showcase_animations::dom::ids;
use showcase_animations::prelude::*;

fn page(config: ShowcaseConfig) -> Stage {
    let mut stage = Stage::showcase(config);
    stage.init();
    stage
}

#[test]
fn test_full_session() {
    let mut stage = page(ShowcaseConfig::default());
    assert_eq!(stage.last_message(), Some(WELCOME_MESSAGE));

    stage.handle_event(DomEvent::input(ids::NUMBER_INPUT, "-4"));
    stage.handle_event(DomEvent::click(ids::BTN_SQUARE));
    assert_eq!(stage.last_message(), Some("The square of -4 is 16"));

    stage.handle_event(DomEvent::click(ids::BTN_COUNTER));
    stage.handle_event(DomEvent::click(ids::BTN_COUNTER));
    stage.handle_event(DomEvent::click(ids::BTN_COUNTER));
    assert_eq!(stage.dom().get_element_text(ids::COUNTER), Some("3"));

    stage.handle_event(DomEvent::click(ids::BTN_SPIN));
    stage.handle_event(DomEvent::click(ids::ANIMATED_BOX));
    stage.handle_event(DomEvent::click(ids::BTN_MODAL_OPEN));
    stage.run_until_idle();

    let dom = stage.dom();
    let boxed = dom.get_element(ids::ANIMATED_BOX).unwrap();
    assert!(boxed.classes.is_empty());
    assert!(boxed.style.transform.is_empty());
    assert!(boxed.style.box_shadow.is_empty());
    assert!(boxed.style.animation.is_empty());
    assert!(!dom.get_element(ids::LOADING).unwrap().has_class("show"));
    assert_eq!(dom.style(ids::RESULT_DISPLAY).unwrap().opacity, "1");

    let effect = &stage.dispatched()[0].effect;
    assert_eq!(
        stage.last_message().unwrap(),
        format!("Box clicked! Applied {effect} effect.")
    );
}

#[test]
fn test_modal_message_precedes_box_message() {
    let mut stage = page(ShowcaseConfig::default());
    stage.handle_event(DomEvent::click(ids::BTN_MODAL_OPEN));
    stage.handle_event(DomEvent::click(ids::ANIMATED_BOX));
    stage.run_until_idle();

    let modal = stage
        .messages()
        .iter()
        .position(|m| m == "Modal opened with slide-in animation!")
        .unwrap();
    let boxed = stage
        .messages()
        .iter()
        .position(|m| m.starts_with("Box clicked!"))
        .unwrap();
    assert!(modal < boxed);
}

#[test]
fn test_same_seed_same_session() {
    let run = |seed| {
        let mut stage = page(ShowcaseConfig::default().with_seed(seed));
        for _ in 0..5 {
            stage.handle_event(DomEvent::click(ids::ANIMATED_BOX));
            stage.handle_event(DomEvent::click(ids::BTN_COLOR));
            stage.run_until_idle();
        }
        stage.messages().to_vec()
    };
    assert_eq!(run(99), run(99));
}

#[test]
fn test_configured_request_from_json() {
    let mut stage = page(ShowcaseConfig::default());
    let config =
        AnimationConfig::from_json(r#"{"type": "rainbow", "durationMs": 650, "repeat": true}"#)
            .unwrap();
    let first = stage.run_configured(&config).unwrap();
    assert_eq!(first.element, ids::ANIMATED_BOX);
    assert_eq!(first.reversal_at_ms, 650);

    stage.run_until_idle();
    assert_eq!(stage.dispatched().len(), 2);
    assert_eq!(stage.dispatched()[1].dispatched_at_ms, 1150);
    assert!(stage
        .dom()
        .style(ids::ANIMATED_BOX)
        .unwrap()
        .background_color
        .is_empty());
}

#[test]
fn test_configured_request_missing_element() {
    let mut stage = page(ShowcaseConfig::default());
    let config = AnimationConfig::from_json(r#"{"element": "ghost", "type": "glow"}"#).unwrap();
    let pending = stage.timers().len();

    let err = stage.run_configured(&config).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(stage.last_message(), Some("Element not found!"));
    // Only the toast fade-in was added
    assert_eq!(stage.timers().len(), pending + 1);
    assert_eq!(stage.pending_reversals(), 0);
}

#[test]
fn test_cancel_previous_from_yaml_config() {
    let config = ShowcaseConfig::from_yaml("overlap_policy: cancel-previous\n").unwrap();
    let mut stage = page(config);

    stage
        .apply_effect(ids::ANIMATED_BOX, EffectKind::Glow, 1000, None)
        .unwrap();
    stage.advance(100);
    stage
        .apply_effect(ids::ANIMATED_BOX, EffectKind::Shake, 1000, None)
        .unwrap();

    let style = stage.dom().style(ids::ANIMATED_BOX).unwrap();
    assert!(style.box_shadow.is_empty());
    assert!(!style.animation.is_empty());

    let events = stage.drain_completions();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].outcome, CompletionOutcome::Superseded);
    assert_eq!(events[0].at_ms, 100);
}

#[test]
fn test_custom_timing() {
    let timing = TimingConfig {
        box_click_duration_ms: 40,
        toast_fade_ms: 5,
        ..TimingConfig::default()
    };
    let mut stage = page(ShowcaseConfig::default().with_timing(timing));
    stage.handle_event(DomEvent::click(ids::ANIMATED_BOX));
    assert_eq!(stage.dispatched()[0].reversal_at_ms, 40);
    stage.advance(40);
    assert!(stage.last_message().unwrap().starts_with("Box clicked!"));
}

#[test]
fn test_step_walks_timers_in_order() {
    let mut stage = page(ShowcaseConfig::default());
    stage.handle_event(DomEvent::click(ids::BTN_COLOR));

    let mut labels = Vec::new();
    while let Some(report) = stage.step() {
        labels.push((report.at_ms, report.label));
    }
    assert_eq!(
        labels,
        vec![
            (50, "toast-fade-in"),
            (50, "toast-fade-in"),
            (200, "reset-transform"),
        ]
    );
}
