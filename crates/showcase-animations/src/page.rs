//! Page handlers
//!
//! The interactive entry points of the showcase page and the routing of
//! [`DomEvent`]s to them. Every handler reports through the result toast.

use crate::core::{calculate, format_number, parse_number};
use crate::dom::ids::{
    ANIMATED_BOX, BTN_BOUNCE, BTN_COLOR, BTN_COUNTER, BTN_MODAL_CLOSE, BTN_MODAL_OPEN, BTN_PULSE,
    BTN_RESET, BTN_SPIN, BTN_SQUARE, COLOR_DISPLAY, COUNTER, COUNTER_DISPLAY, FLIP_CARD, LOADING,
    MODAL, NUMBER_INPUT,
};
use crate::dom::{DomEvent, SECTION_CLASS};
use crate::engine::{ClassEffect, Completion, EffectKind, Scheduled, SHAKE_KEYFRAMES};
use crate::error::{ShowcaseError, ShowcaseResult};
use crate::stage::{Stage, TimerTask};
use tracing::{debug, info, trace, warn};

/// Message shown once the page is ready
pub const WELCOME_MESSAGE: &str = "Welcome! Try the interactive functions above.";

const PULSE_TRANSFORM: &str = "scale(1.1)";
const RESTING_TRANSFORM: &str = "scale(1)";
const HOVER_RAISED: &str = "translateY(-5px)";
const HOVER_RESTING: &str = "translateY(0)";
const FLIPPED_CLASS: &str = "flipped";
const SHOW_CLASS: &str = "show";

impl Stage {
    /// Page load: injects the shake keyframes and shows the welcome
    /// message. Returns false if the page was already initialized.
    pub fn init(&mut self) -> bool {
        if self.initialized {
            return false;
        }
        self.initialized = true;
        self.dom.inject_stylesheet("shake", SHAKE_KEYFRAMES);
        info!(elements = self.dom.len(), "showcase page initialized");
        self.display_result(WELCOME_MESSAGE);
        true
    }

    /// Whether [`Stage::init`] has run
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Squares the number typed into the input field
    pub fn calculate_square(&mut self) -> Option<f64> {
        let raw = self.dom.input_value(NUMBER_INPUT).unwrap_or_default();
        match parse_number(raw) {
            Ok(number) => {
                let square = calculate(number, "square");
                self.display_result(&format!(
                    "The square of {} is {}",
                    format_number(number),
                    format_number(square)
                ));
                Some(square)
            }
            Err(err) => {
                debug!(%err, "rejected numeric input");
                self.display_result("Please enter a valid number!");
                None
            }
        }
    }

    /// Draws a palette color using the stage's generator
    pub fn random_color_value(&mut self) -> &'static str {
        self.palette.pick(&mut self.rng)
    }

    /// Paints the color swatch with a random palette color
    pub fn generate_random_color(&mut self) -> &'static str {
        let color = self.random_color_value();
        self.pulse(COLOR_DISPLAY, color);
        self.display_result(&format!("Generated color: {color}"));
        color
    }

    /// Increments the global counter and pulses its display
    pub fn update_counter(&mut self) -> u64 {
        self.global_counter += 1;
        let value = self.global_counter;
        self.dom.set_element_text(COUNTER, &value.to_string());
        let color = self.random_color_value();
        self.pulse(COUNTER_DISPLAY, color);
        self.display_result(&format!("Counter updated to: {value}"));
        value
    }

    /// Applies a class effect to the animated box
    pub fn animate_box(&mut self, class: ClassEffect) -> ShowcaseResult<()> {
        self.apply_class_effect(ANIMATED_BOX, class)?;
        self.display_result(&format!(
            "Applied {} animation to the box!",
            class.class_name()
        ));
        Ok(())
    }

    /// Strips class effects and inline transform/background from the box.
    /// Armed timers are left alone.
    pub fn reset_animations(&mut self) -> ShowcaseResult<()> {
        let target = self
            .dom
            .get_element_mut(ANIMATED_BOX)
            .ok_or_else(|| ShowcaseError::not_found(ANIMATED_BOX))?;
        for class in ClassEffect::ALL {
            target.remove_class(class.class_name());
        }
        if let Some(style) = self.dom.style_mut(ANIMATED_BOX) {
            style.transform.clear();
            style.background_color.clear();
        }
        self.display_result("All animations reset!");
        Ok(())
    }

    /// Flips the card, returning whether it is now flipped
    pub fn toggle_card(&mut self) -> ShowcaseResult<bool> {
        let flipped = self
            .dom
            .get_element_mut(FLIP_CARD)
            .ok_or_else(|| ShowcaseError::not_found(FLIP_CARD))?
            .toggle_class(FLIPPED_CLASS);
        self.display_result(if flipped { "Card flipped!" } else { "Card reset!" });
        Ok(flipped)
    }

    /// Opens the modal behind a loading spinner
    pub fn show_modal(&mut self) -> ShowcaseResult<()> {
        self.dom
            .get_element_mut(MODAL)
            .ok_or_else(|| ShowcaseError::not_found(MODAL))?
            .add_class(SHOW_CLASS);
        self.show_loading();
        self.timers
            .set_timeout(self.config.timing.modal_loading_ms, TimerTask::FinishLoading);
        Ok(())
    }

    /// Closes the modal
    pub fn hide_modal(&mut self) -> ShowcaseResult<()> {
        self.dom
            .get_element_mut(MODAL)
            .ok_or_else(|| ShowcaseError::not_found(MODAL))?
            .remove_class(SHOW_CLASS);
        self.display_result("Modal closed!");
        Ok(())
    }

    /// Shows the loading spinner
    pub fn show_loading(&mut self) {
        if let Some(loading) = self.dom.get_element_mut(LOADING) {
            loading.add_class(SHOW_CLASS);
        }
    }

    /// Hides the loading spinner
    pub fn hide_loading(&mut self) {
        if let Some(loading) = self.dom.get_element_mut(LOADING) {
            loading.remove_class(SHOW_CLASS);
        }
    }

    pub(crate) fn finish_loading(&mut self) {
        self.hide_loading();
        self.display_result("Modal opened with slide-in animation!");
    }

    /// Applies a random click effect to the animated box
    pub fn click_animated_box(&mut self) -> ShowcaseResult<Scheduled> {
        let pick = self.rng.next_index(EffectKind::CLICK_EFFECTS.len());
        let effect = EffectKind::CLICK_EFFECTS[pick].clone();
        let message = format!("Box clicked! Applied {effect} effect.");
        let duration_ms = self.config.timing.box_click_duration_ms;
        self.apply_effect(
            ANIMATED_BOX,
            effect,
            duration_ms,
            Some(Completion::Message(message)),
        )
    }

    /// Records `event` in the document and runs its handler
    pub fn handle_event(&mut self, event: DomEvent) {
        self.dom.dispatch_event(event.clone());
        match event {
            DomEvent::Click { element_id } => self.handle_click(&element_id),
            DomEvent::KeyPress { element_id, key } if element_id == NUMBER_INPUT && key == "Enter" => {
                self.calculate_square();
            }
            DomEvent::MouseEnter { element_id } => self.hover_section(&element_id, HOVER_RAISED),
            DomEvent::MouseLeave { element_id } => self.hover_section(&element_id, HOVER_RESTING),
            DomEvent::KeyPress { .. }
            | DomEvent::Input { .. }
            | DomEvent::Focus { .. }
            | DomEvent::Blur { .. } => {}
        }
    }

    fn handle_click(&mut self, element_id: &str) {
        let outcome = match element_id {
            ANIMATED_BOX => self.click_animated_box().map(drop),
            BTN_SQUARE => {
                self.calculate_square();
                Ok(())
            }
            BTN_COLOR => {
                self.generate_random_color();
                Ok(())
            }
            BTN_COUNTER => {
                self.update_counter();
                Ok(())
            }
            BTN_BOUNCE => self.animate_box(ClassEffect::Bounce),
            BTN_SPIN => self.animate_box(ClassEffect::Spin),
            BTN_PULSE => self.animate_box(ClassEffect::Pulse),
            BTN_RESET => self.reset_animations(),
            FLIP_CARD => self.toggle_card().map(drop),
            BTN_MODAL_OPEN => self.show_modal(),
            BTN_MODAL_CLOSE => self.hide_modal(),
            _ => {
                trace!(element_id, "click without handler");
                Ok(())
            }
        };
        if let Err(err) = outcome {
            warn!(%err, element_id, "click handler failed");
            if err.is_not_found() {
                self.display_result("Element not found!");
            }
        }
    }

    fn hover_section(&mut self, element_id: &str, transform: &str) {
        let is_section = self
            .dom
            .get_element(element_id)
            .is_some_and(|element| element.has_class(SECTION_CLASS));
        if !is_section {
            return;
        }
        if let Some(style) = self.dom.style_mut(element_id) {
            style.transform = transform.to_string();
        }
    }

    fn pulse(&mut self, element: &str, color: &str) {
        let Some(style) = self.dom.style_mut(element) else {
            return;
        };
        style.background_color = color.to_string();
        style.transform = PULSE_TRANSFORM.to_string();
        self.timers.set_timeout(
            self.config.timing.pulse_reset_ms,
            TimerTask::ResetTransform {
                element: element.to_string(),
                transform: RESTING_TRANSFORM.to_string(),
            },
        );
    }
}
