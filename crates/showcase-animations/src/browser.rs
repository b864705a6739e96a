//! Browser WASM bindings
//!
//! Wraps a [`Stage`] for a JavaScript host. The host forwards DOM events
//! and calls [`BrowserShowcase::tick`] from its frame loop; virtual time
//! follows the host clock from the first tick.

use wasm_bindgen::prelude::*;
use web_sys::console;

use crate::config::ShowcaseConfig;
use crate::dom::ids::RESULT_DISPLAY;
use crate::dom::DomEvent;
use crate::engine::{AnimationConfig, CompletionOutcome};
use crate::stage::Stage;

/// Browser showcase - the main WASM entry point
#[derive(Debug)]
#[wasm_bindgen]
pub struct BrowserShowcase {
    stage: Stage,
    origin_ms: Option<f64>,
}

#[wasm_bindgen]
impl BrowserShowcase {
    /// Create an initialized showcase page
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u32) -> Self {
        console_error_panic_hook::set_once();

        let mut stage = Stage::showcase(ShowcaseConfig::default().with_seed(u64::from(seed)));
        stage.init();
        Self {
            stage,
            origin_ms: None,
        }
    }

    /// Click an element by ID
    pub fn click(&mut self, element_id: &str) {
        self.stage.handle_event(DomEvent::click(element_id));
    }

    /// Press a key on an element
    pub fn key_press(&mut self, element_id: &str, key: &str) {
        self.stage.handle_event(DomEvent::key_press(element_id, key));
    }

    /// Set an input's value
    pub fn set_input(&mut self, element_id: &str, value: &str) {
        self.stage.handle_event(DomEvent::input(element_id, value));
    }

    /// Pointer entered an element
    pub fn mouse_enter(&mut self, element_id: &str) {
        self.stage.handle_event(DomEvent::mouse_enter(element_id));
    }

    /// Pointer left an element
    pub fn mouse_leave(&mut self, element_id: &str) {
        self.stage.handle_event(DomEvent::mouse_leave(element_id));
    }

    /// Fire every timer due by the host timestamp `now_ms`; returns the
    /// number fired
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn tick(&mut self, now_ms: f64) -> u32 {
        let origin = *self.origin_ms.get_or_insert(now_ms);
        let elapsed = (now_ms - origin).max(0.0) as u64;
        u32::try_from(self.stage.advance_to(elapsed)).unwrap_or(u32::MAX)
    }

    /// Run a JSON animation config (`{}` for all defaults)
    pub fn run_configured(&mut self, json: &str) -> Result<(), JsValue> {
        let config =
            AnimationConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.stage
            .run_configured(&config)
            .map(drop)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Element state as JSON
    pub fn element_state(&self, element_id: &str) -> Option<String> {
        self.stage
            .dom()
            .get_element(element_id)
            .and_then(|element| serde_json::to_string(element).ok())
    }

    /// Text of the result toast
    #[wasm_bindgen(getter)]
    pub fn result_text(&self) -> String {
        self.stage
            .dom()
            .get_element_text(RESULT_DISPLAY)
            .unwrap_or_default()
            .to_string()
    }

    /// Global counter value
    #[wasm_bindgen(getter)]
    pub fn counter(&self) -> u32 {
        u32::try_from(self.stage.global_counter()).unwrap_or(u32::MAX)
    }

    /// Number of armed timers
    pub fn pending_timers(&self) -> u32 {
        u32::try_from(self.stage.timers().len()).unwrap_or(u32::MAX)
    }

    /// Takes the completion notifications as a JSON array of
    /// `{request, element, effect, at_ms, superseded}` objects
    pub fn take_completions(&mut self) -> String {
        let events: Vec<serde_json::Value> = self
            .stage
            .drain_completions()
            .into_iter()
            .map(|event| {
                serde_json::json!({
                    "request": event.request_id.0,
                    "element": event.element,
                    "effect": event.effect.name(),
                    "at_ms": event.at_ms,
                    "superseded": event.outcome == CompletionOutcome::Superseded,
                })
            })
            .collect();
        serde_json::Value::Array(events).to_string()
    }
}

/// Initialize the showcase in the browser
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    console::log_1(&"Showcase WASM initialized".into());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::ids::{ANIMATED_BOX, BTN_COUNTER, NUMBER_INPUT};

    #[test]
    fn test_browser_showcase_new() {
        let page = BrowserShowcase::new(1);
        assert!(page.stage.is_initialized());
        assert_eq!(page.result_text(), "Welcome! Try the interactive functions above.");
    }

    #[test]
    fn test_click_counter() {
        let mut page = BrowserShowcase::new(1);
        page.click(BTN_COUNTER);
        page.click(BTN_COUNTER);
        assert_eq!(page.counter(), 2);
        assert_eq!(page.result_text(), "Counter updated to: 2");
    }

    #[test]
    fn test_input_and_enter() {
        let mut page = BrowserShowcase::new(1);
        page.set_input(NUMBER_INPUT, "7");
        page.key_press(NUMBER_INPUT, "Enter");
        assert_eq!(page.result_text(), "The square of 7 is 49");
    }

    #[test]
    fn test_tick_follows_host_clock() {
        let mut page = BrowserShowcase::new(1);
        page.run_configured(r#"{"type": "glow", "durationMs": 300}"#)
            .unwrap();
        assert_eq!(page.tick(5_000.0), 0);
        // Welcome toast fade-in
        assert_eq!(page.tick(5_050.0), 1);
        assert_eq!(page.tick(5_299.0), 0);
        assert_eq!(page.tick(5_300.0), 1);
        assert_eq!(page.pending_timers(), 0);
    }

    #[test]
    fn test_take_completions() {
        let mut page = BrowserShowcase::new(1);
        page.run_configured(r#"{"type": "shake", "durationMs": 100}"#)
            .unwrap();
        page.tick(0.0);
        page.tick(100.0);

        let taken: serde_json::Value = serde_json::from_str(&page.take_completions()).unwrap();
        assert_eq!(taken[0]["effect"], "shake");
        assert_eq!(taken[0]["at_ms"], 100);
        assert_eq!(taken[0]["superseded"], false);
        assert_eq!(page.take_completions(), "[]");
    }

    #[test]
    fn test_long_session_logs_stay_bounded() {
        let mut page = BrowserShowcase::new(1);
        for i in 0..1_000 {
            page.click(BTN_COUNTER);
            page.click(ANIMATED_BOX);
            page.tick(f64::from(i) * 2_000.0);
        }
        let limit = crate::config::DEFAULT_HISTORY_LIMIT;
        assert!(page.stage.messages().len() <= limit);
        assert!(page.stage.dispatched().len() <= limit);
        assert!(page.stage.completions().count() <= limit);
        assert!(page.stage.dom().event_history().len() <= limit);
        assert_eq!(page.counter(), 1_000);
    }

    #[test]
    fn test_element_state_json() {
        let page = BrowserShowcase::new(1);
        let state = page.element_state(ANIMATED_BOX).unwrap();
        assert!(state.contains("\"id\":\"animated-box\""));
        assert!(page.element_state("missing").is_none());
    }
}
