//! Mock DOM
//!
//! A flat element registry with inline styles and class sets, standing in
//! for the browser document. Every style write goes through
//! [`MockDom::style_mut`], which counts writes per element so tests can
//! prove that nothing touches an element after its animation was restored.

use crate::core::push_bounded;
use serde::Serialize;
use std::collections::HashMap;

/// Element ids used by the showcase page
pub mod ids {
    /// Numeric input field
    pub const NUMBER_INPUT: &str = "numberInput";
    /// Toast that shows every result message
    pub const RESULT_DISPLAY: &str = "result-display";
    /// Swatch recolored by random color picks
    pub const COLOR_DISPLAY: &str = "color-display";
    /// Text node holding the global counter
    pub const COUNTER: &str = "counter";
    /// Box around the global counter
    pub const COUNTER_DISPLAY: &str = "counter-display";
    /// Default animation target
    pub const ANIMATED_BOX: &str = "animated-box";
    /// Card toggled by the flip handler
    pub const FLIP_CARD: &str = "flip-card";
    /// Modal dialog
    pub const MODAL: &str = "modal";
    /// Loading spinner shown while the modal opens
    pub const LOADING: &str = "loading";
    /// Square button
    pub const BTN_SQUARE: &str = "btn-square";
    /// Random color button
    pub const BTN_COLOR: &str = "btn-color";
    /// Counter button
    pub const BTN_COUNTER: &str = "btn-counter";
    /// Bounce button
    pub const BTN_BOUNCE: &str = "btn-bounce";
    /// Spin button
    pub const BTN_SPIN: &str = "btn-spin";
    /// Pulse button
    pub const BTN_PULSE: &str = "btn-pulse";
    /// Reset button
    pub const BTN_RESET: &str = "btn-reset";
    /// Open modal button
    pub const BTN_MODAL_OPEN: &str = "btn-modal-open";
    /// Close modal button
    pub const BTN_MODAL_CLOSE: &str = "btn-modal-close";
}

/// Class carried by hoverable page sections
pub const SECTION_CLASS: &str = "section";

/// Height reported by layout reads when an element sets none
const DEFAULT_OFFSET_HEIGHT: u32 = 100;

/// Inline style attributes the showcase mutates
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ElementStyle {
    /// CSS transform
    pub transform: String,
    /// CSS background-color
    pub background_color: String,
    /// CSS box-shadow
    pub box_shadow: String,
    /// CSS animation shorthand
    pub animation: String,
    /// CSS opacity
    pub opacity: String,
}

/// Represents a DOM element
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomElement {
    /// Element ID
    pub id: String,
    /// Element tag name
    pub tag: String,
    /// Text content
    pub text_content: String,
    /// Element attributes
    pub attributes: HashMap<String, String>,
    /// CSS classes
    pub classes: Vec<String>,
    /// Inline style
    pub style: ElementStyle,
    /// Number of times the inline style was handed out for writing
    pub style_writes: u64,
}

impl Default for DomElement {
    fn default() -> Self {
        Self::new("div")
    }
}

impl DomElement {
    /// Creates a new DOM element with the given tag
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            id: String::new(),
            tag: tag.to_string(),
            text_content: String::new(),
            attributes: HashMap::new(),
            classes: Vec::new(),
            style: ElementStyle::default(),
            style_writes: 0,
        }
    }

    /// Creates an element with an ID
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    /// Sets the text content
    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.text_content = text.to_string();
        self
    }

    /// Adds a class
    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    /// Sets an attribute
    #[must_use]
    pub fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }

    /// Sets the initial inline background
    #[must_use]
    pub fn with_background(mut self, color: &str) -> Self {
        self.style.background_color = color.to_string();
        self
    }

    /// Sets text content
    pub fn set_text(&mut self, text: &str) {
        self.text_content = text.to_string();
    }

    /// Adds a class (no duplicates)
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    /// Removes a class; absent classes are ignored
    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Toggles a class, returning whether it is now present
    pub fn toggle_class(&mut self, class: &str) -> bool {
        if self.has_class(class) {
            self.remove_class(class);
            false
        } else {
            self.add_class(class);
            true
        }
    }

    /// Checks if element has a class
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Gets an attribute value
    #[must_use]
    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

/// DOM events that can be dispatched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomEvent {
    /// Click event on an element
    Click {
        /// The ID of the clicked element
        element_id: String,
    },
    /// Input event with new value
    Input {
        /// The ID of the input element
        element_id: String,
        /// The new value entered
        value: String,
    },
    /// Key press on a focused element
    KeyPress {
        /// The ID of the element receiving the key
        element_id: String,
        /// The key that was pressed
        key: String,
    },
    /// Pointer entered an element
    MouseEnter {
        /// The ID of the hovered element
        element_id: String,
    },
    /// Pointer left an element
    MouseLeave {
        /// The ID of the element left
        element_id: String,
    },
    /// Focus event on an element
    Focus {
        /// The ID of the focused element
        element_id: String,
    },
    /// Blur event (element lost focus)
    Blur {
        /// The ID of the element that lost focus
        element_id: String,
    },
}

impl DomEvent {
    /// Creates a click event
    #[must_use]
    pub fn click(element_id: &str) -> Self {
        Self::Click {
            element_id: element_id.to_string(),
        }
    }

    /// Creates an input event
    #[must_use]
    pub fn input(element_id: &str, value: &str) -> Self {
        Self::Input {
            element_id: element_id.to_string(),
            value: value.to_string(),
        }
    }

    /// Creates a key press event
    #[must_use]
    pub fn key_press(element_id: &str, key: &str) -> Self {
        Self::KeyPress {
            element_id: element_id.to_string(),
            key: key.to_string(),
        }
    }

    /// Creates a mouse enter event
    #[must_use]
    pub fn mouse_enter(element_id: &str) -> Self {
        Self::MouseEnter {
            element_id: element_id.to_string(),
        }
    }

    /// Creates a mouse leave event
    #[must_use]
    pub fn mouse_leave(element_id: &str) -> Self {
        Self::MouseLeave {
            element_id: element_id.to_string(),
        }
    }

    /// Creates a focus event
    #[must_use]
    pub fn focus(element_id: &str) -> Self {
        Self::Focus {
            element_id: element_id.to_string(),
        }
    }

    /// Creates a blur event
    #[must_use]
    pub fn blur(element_id: &str) -> Self {
        Self::Blur {
            element_id: element_id.to_string(),
        }
    }

    /// The element the event targets
    #[must_use]
    pub fn element_id(&self) -> &str {
        match self {
            Self::Click { element_id }
            | Self::Input { element_id, .. }
            | Self::KeyPress { element_id, .. }
            | Self::MouseEnter { element_id }
            | Self::MouseLeave { element_id }
            | Self::Focus { element_id }
            | Self::Blur { element_id } => element_id,
        }
    }
}

/// A stylesheet rule registered into the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRule {
    /// Rule name (the keyframes identifier)
    pub name: String,
    /// Rule text
    pub css: String,
}

/// Mock DOM for driving the showcase without a browser
#[derive(Debug, Default)]
pub struct MockDom {
    /// Elements by ID
    elements: HashMap<String, DomElement>,
    /// Registration order, used for deterministic queries
    order: Vec<String>,
    /// Event history for verification
    event_history: Vec<DomEvent>,
    /// Newest events kept in the history; unbounded when unset
    history_limit: Option<usize>,
    /// Focused element ID
    focused_element: Option<String>,
    /// Injected stylesheet rules
    stylesheet: Vec<StyleRule>,
    /// Forced layout reads
    reflows: u64,
}

impl MockDom {
    /// Creates an empty document
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the showcase page structure
    #[must_use]
    pub fn showcase() -> Self {
        let mut dom = Self::new();

        dom.register_element(
            DomElement::new("section")
                .with_id("section-functions")
                .with_class(SECTION_CLASS),
        );
        dom.register_element(
            DomElement::new("input")
                .with_id(ids::NUMBER_INPUT)
                .with_attr("type", "number")
                .with_attr("placeholder", "Enter a number"),
        );
        dom.register_element(DomElement::new("div").with_id(ids::RESULT_DISPLAY));
        dom.register_element(DomElement::new("div").with_id(ids::COLOR_DISPLAY));
        dom.register_element(DomElement::new("div").with_id(ids::COUNTER_DISPLAY));
        dom.register_element(DomElement::new("span").with_id(ids::COUNTER).with_text("0"));

        dom.register_element(
            DomElement::new("section")
                .with_id("section-animations")
                .with_class(SECTION_CLASS),
        );
        dom.register_element(
            DomElement::new("div")
                .with_id(ids::ANIMATED_BOX)
                .with_attr("height", "120"),
        );
        dom.register_element(DomElement::new("div").with_id(ids::FLIP_CARD));
        dom.register_element(DomElement::new("div").with_id(ids::MODAL));
        dom.register_element(DomElement::new("div").with_id(ids::LOADING));

        for (id, label) in [
            (ids::BTN_SQUARE, "Calculate Square"),
            (ids::BTN_COLOR, "Random Color"),
            (ids::BTN_COUNTER, "Update Counter"),
            (ids::BTN_BOUNCE, "Bounce"),
            (ids::BTN_SPIN, "Spin"),
            (ids::BTN_PULSE, "Pulse"),
            (ids::BTN_RESET, "Reset"),
            (ids::BTN_MODAL_OPEN, "Show Modal"),
            (ids::BTN_MODAL_CLOSE, "Close"),
        ] {
            dom.register_element(DomElement::new("button").with_id(id).with_text(label));
        }

        dom
    }

    /// Registers an element for ID lookup; elements without an ID are ignored
    pub fn register_element(&mut self, element: DomElement) {
        if element.id.is_empty() {
            return;
        }
        if !self.elements.contains_key(&element.id) {
            self.order.push(element.id.clone());
        }
        self.elements.insert(element.id.clone(), element);
    }

    /// Removes an element, returning it
    pub fn remove_element(&mut self, id: &str) -> Option<DomElement> {
        self.order.retain(|existing| existing != id);
        self.elements.remove(id)
    }

    /// Gets an element by ID
    #[must_use]
    pub fn get_element(&self, id: &str) -> Option<&DomElement> {
        self.elements.get(id)
    }

    /// Gets a mutable element by ID
    pub fn get_element_mut(&mut self, id: &str) -> Option<&mut DomElement> {
        self.elements.get_mut(id)
    }

    /// Whether an element with this ID exists
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    /// Number of registered elements
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the document has no elements
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Inline style of an element
    #[must_use]
    pub fn style(&self, id: &str) -> Option<&ElementStyle> {
        self.elements.get(id).map(|e| &e.style)
    }

    /// Inline style of an element, for writing
    pub fn style_mut(&mut self, id: &str) -> Option<&mut ElementStyle> {
        self.elements.get_mut(id).map(|e| {
            e.style_writes += 1;
            &mut e.style
        })
    }

    /// IDs of elements carrying `class`, in registration order
    #[must_use]
    pub fn query_class(&self, class: &str) -> Vec<String> {
        self.order
            .iter()
            .filter(|id| self.elements.get(*id).is_some_and(|e| e.has_class(class)))
            .cloned()
            .collect()
    }

    /// Forces a layout read of the element and returns its height.
    ///
    /// Class changes made before this call are observed by the renderer
    /// before any change made after it.
    pub fn offset_height(&mut self, id: &str) -> Option<u32> {
        let element = self.elements.get(id)?;
        self.reflows += 1;
        Some(
            element
                .get_attr("height")
                .and_then(|h| h.parse().ok())
                .unwrap_or(DEFAULT_OFFSET_HEIGHT),
        )
    }

    /// Number of forced layout reads so far
    #[must_use]
    pub fn reflow_count(&self) -> u64 {
        self.reflows
    }

    /// Registers a stylesheet rule once; returns false if `name` already exists
    pub fn inject_stylesheet(&mut self, name: &str, css: &str) -> bool {
        if self.stylesheet.iter().any(|rule| rule.name == name) {
            return false;
        }
        self.stylesheet.push(StyleRule {
            name: name.to_string(),
            css: css.to_string(),
        });
        true
    }

    /// Injected stylesheet rules
    #[must_use]
    pub fn stylesheet(&self) -> &[StyleRule] {
        &self.stylesheet
    }

    /// Records an event and applies its default action
    pub fn dispatch_event(&mut self, event: DomEvent) {
        match &event {
            DomEvent::Focus { element_id } => {
                self.focused_element = Some(element_id.clone());
            }
            DomEvent::Blur { .. } => {
                self.focused_element = None;
            }
            DomEvent::Input { element_id, value } => {
                if let Some(elem) = self.elements.get_mut(element_id) {
                    elem.attributes.insert("value".to_string(), value.clone());
                }
            }
            _ => {}
        }
        match self.history_limit {
            Some(limit) => push_bounded(&mut self.event_history, event, limit),
            None => self.event_history.push(event),
        }
    }

    /// Keeps only the newest `limit` events from now on
    pub fn set_history_limit(&mut self, limit: usize) {
        self.history_limit = Some(limit);
        if self.event_history.len() > limit {
            let overflow = self.event_history.len() - limit;
            self.event_history.drain(..overflow);
        }
    }

    /// Gets the event history
    #[must_use]
    pub fn event_history(&self) -> &[DomEvent] {
        &self.event_history
    }

    /// Clears event history
    pub fn clear_event_history(&mut self) {
        self.event_history.clear();
    }

    /// Gets the currently focused element ID
    #[must_use]
    pub fn focused_element(&self) -> Option<&str> {
        self.focused_element.as_deref()
    }

    /// Updates element text by ID
    pub fn set_element_text(&mut self, id: &str, text: &str) {
        if let Some(elem) = self.elements.get_mut(id) {
            elem.set_text(text);
        }
    }

    /// Gets element text by ID
    #[must_use]
    pub fn get_element_text(&self, id: &str) -> Option<&str> {
        self.elements.get(id).map(|e| e.text_content.as_str())
    }

    /// Current `value` attribute of an input
    #[must_use]
    pub fn input_value(&self, id: &str) -> Option<&str> {
        self.elements.get(id).and_then(|e| e.get_attr("value"))
    }
}
