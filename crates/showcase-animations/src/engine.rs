//! Animation engine vocabulary and style policies.
//!
//! This module holds the request/acknowledgement/completion types and the
//! pure functions that mutate and restore an [`ElementStyle`]. Scheduling
//! lives in [`crate::stage`].

use crate::dom::ElementStyle;
use crate::dom::ids::ANIMATED_BOX;
use crate::stage::Stage;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Animation shorthand written by the shake effect
pub const SHAKE_ANIMATION: &str = "shake 0.5s ease-in-out";
/// Shadow written by the glow effect
pub const GLOW_SHADOW: &str = "0 0 20px rgba(102, 126, 234, 0.8)";
/// Transform written by the glow effect
pub const GLOW_TRANSFORM: &str = "scale(1.05)";
/// Keyframes backing [`SHAKE_ANIMATION`], injected once at page init
pub const SHAKE_KEYFRAMES: &str = "
@keyframes shake {
    0%, 100% { transform: translateX(0); }
    10%, 30%, 50%, 70%, 90% { transform: translateX(-10px); }
    20%, 40%, 60%, 80% { transform: translateX(10px); }
}";

/// Default request duration
pub const DEFAULT_DURATION_MS: u64 = 1000;

/// CSS-class driven effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassEffect {
    /// `bounce` class
    Bounce,
    /// `spin` class
    Spin,
    /// `pulse` class
    Pulse,
}

impl ClassEffect {
    /// Every class effect, in the order they are stripped
    pub const ALL: [Self; 3] = [Self::Bounce, Self::Spin, Self::Pulse];

    /// Class label
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Bounce => "bounce",
            Self::Spin => "spin",
            Self::Pulse => "pulse",
        }
    }

    /// Parses a class label
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.class_name() == name)
    }
}

/// Effect selected by a request tag
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EffectKind {
    /// Short keyframe shake
    Shake,
    /// Shadow plus scale, held until reversal
    Glow,
    /// Background cycled through the palette
    Rainbow,
    /// Class effect tag; has no style policy on the timed path
    Class(ClassEffect),
    /// Unrecognized tag, carried through as a no-op
    Unknown(String),
}

impl EffectKind {
    /// Effects picked at random when the animated box is clicked
    pub const CLICK_EFFECTS: [Self; 3] = [Self::Shake, Self::Glow, Self::Rainbow];

    /// Resolves a tag; never fails
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "shake" => Self::Shake,
            "glow" => Self::Glow,
            "rainbow" => Self::Rainbow,
            other => ClassEffect::from_name(other)
                .map_or_else(|| Self::Unknown(other.to_string()), Self::Class),
        }
    }

    /// Tag for this effect
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Shake => "shake",
            Self::Glow => "glow",
            Self::Rainbow => "rainbow",
            Self::Class(class) => class.class_name(),
            Self::Unknown(name) => name,
        }
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Style values captured before an effect mutates its target. Only the
/// background is restored; transform, shadow and animation are cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    /// Background at dispatch
    pub background_color: String,
}

impl Snapshot {
    /// Captures the restorable attributes
    #[must_use]
    pub fn capture(style: &ElementStyle) -> Self {
        Self {
            background_color: style.background_color.clone(),
        }
    }
}

/// Applies the immediate style mutation for `effect`.
///
/// Rainbow writes nothing here: its first color lands on the first tick.
pub fn apply_style(style: &mut ElementStyle, effect: &EffectKind) {
    match effect {
        EffectKind::Shake => style.animation = SHAKE_ANIMATION.to_string(),
        EffectKind::Glow => {
            style.box_shadow = GLOW_SHADOW.to_string();
            style.transform = GLOW_TRANSFORM.to_string();
        }
        EffectKind::Rainbow | EffectKind::Class(_) | EffectKind::Unknown(_) => {}
    }
}

/// Reverts an effect: transform, shadow and animation are cleared to empty
/// for every effect; rainbow additionally writes back the captured
/// background.
pub fn restore_style(style: &mut ElementStyle, effect: &EffectKind, snapshot: &Snapshot) {
    if matches!(effect, EffectKind::Rainbow) {
        style.background_color.clone_from(&snapshot.background_color);
    }
    style.transform.clear();
    style.box_shadow.clear();
    style.animation.clear();
}

/// Identifier of a dispatched request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "req#{}", self.0)
    }
}

/// Continuation run after a request's reversal
pub enum Completion {
    /// Show a message in the result toast
    Message(String),
    /// Re-issue a configured request after the repeat delay
    Repeat(AnimationConfig),
    /// Arbitrary follow-up with access to the stage
    Callback(Box<dyn FnOnce(&mut Stage)>),
}

impl Completion {
    /// Wraps a closure
    pub fn callback(f: impl FnOnce(&mut Stage) + 'static) -> Self {
        Self::Callback(Box::new(f))
    }
}

impl fmt::Debug for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Message(message) => f.debug_tuple("Message").field(message).finish(),
            Self::Repeat(config) => f.debug_tuple("Repeat").field(config).finish(),
            Self::Callback(_) => f.write_str("Callback(..)"),
        }
    }
}

/// A transient effect request. The repeat flag of a configured request is
/// carried as a [`Completion::Repeat`] continuation.
#[derive(Debug)]
pub struct AnimationRequest {
    /// Target element id
    pub element: String,
    /// Effect to apply
    pub effect: EffectKind,
    /// Time until reversal
    pub duration_ms: u64,
    /// Continuation after reversal
    pub on_complete: Option<Completion>,
}

impl AnimationRequest {
    /// Request with the default duration and no continuation
    #[must_use]
    pub fn new(element: &str, effect: EffectKind) -> Self {
        Self {
            element: element.to_string(),
            effect,
            duration_ms: DEFAULT_DURATION_MS,
            on_complete: None,
        }
    }

    /// Set duration
    #[must_use]
    pub const fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Set continuation
    #[must_use]
    pub fn with_completion(mut self, completion: Completion) -> Self {
        self.on_complete = Some(completion);
        self
    }
}

/// Synchronous acknowledgement that a request is scheduled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scheduled {
    /// Request identifier
    pub request_id: RequestId,
    /// Target element id
    pub element: String,
    /// Effect applied
    pub effect: EffectKind,
    /// Virtual time of dispatch
    pub dispatched_at_ms: u64,
    /// Virtual time the reversal is due
    pub reversal_at_ms: u64,
}

/// How a request ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// Reversal fired on schedule and the continuation ran
    Completed,
    /// A later request on the same target replaced it; no continuation ran
    Superseded,
}

/// Asynchronous notification that a request finished
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionEvent {
    /// Request identifier
    pub request_id: RequestId,
    /// Target element id
    pub element: String,
    /// Effect that was applied
    pub effect: EffectKind,
    /// Virtual time of completion
    pub at_ms: u64,
    /// How it ended
    pub outcome: CompletionOutcome,
}

/// Handling of a new request on a target whose reversal is still armed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverlapPolicy {
    /// Both reversals stay armed and each writes when it fires
    #[default]
    Independent,
    /// The earlier request is restored immediately and its timers cancelled
    CancelPrevious,
}

/// Declarative, defaultable request. Unknown keys are ignored when
/// deserializing and every key falls back to its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnimationConfig {
    /// Target element id
    pub element: String,
    /// Effect tag
    #[serde(rename = "type")]
    pub effect: String,
    /// Time until reversal; when omitted the stage's configured default
    /// duration applies
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    /// Re-issue once after completion
    pub repeat: bool,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            element: ANIMATED_BOX.to_string(),
            effect: "bounce".to_string(),
            duration_ms: None,
            repeat: false,
        }
    }
}

impl AnimationConfig {
    /// All defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON object; `{}` yields all defaults
    pub fn from_json(json: &str) -> crate::error::ShowcaseResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set target element
    #[must_use]
    pub fn with_element(mut self, element: &str) -> Self {
        self.element = element.to_string();
        self
    }

    /// Set effect tag
    #[must_use]
    pub fn with_effect(mut self, effect: &str) -> Self {
        self.effect = effect.to_string();
        self
    }

    /// Set duration
    #[must_use]
    pub const fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    /// Set repeat
    #[must_use]
    pub const fn with_repeat(mut self, repeat: bool) -> Self {
        self.repeat = repeat;
        self
    }

    /// Resolved effect
    #[must_use]
    pub fn effect_kind(&self) -> EffectKind {
        EffectKind::from_name(&self.effect)
    }
}
