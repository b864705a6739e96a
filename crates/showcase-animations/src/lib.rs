//! Showcase Animations - timer-sequenced effects on a mock DOM
//!
//! An interactive page model: a numeric square, random palette colors, a
//! global click counter and a set of transient animations (shake, glow,
//! rainbow, class effects, card flip, modal with loading spinner), all
//! sequenced on a virtual-time timer queue so every run is reproducible.
//!
//! # Layers
//!
//! - [`core`]: pure arithmetic, palette and counter factory
//! - [`dom`]: mock document with inline styles and class sets
//! - [`timer`]: deterministic timeout/interval queue
//! - [`engine`]: effect vocabulary and style policies
//! - [`stage`]: the page session that schedules and reverts effects
//! - [`page`]: UI entry points and event routing
//!
//! # Example
//!
//! ```rust
//! use showcase_animations::prelude::*;
//!
//! let mut stage = Stage::showcase(ShowcaseConfig::default());
//! stage
//!     .apply_effect("animated-box", EffectKind::Glow, 300, None)
//!     .unwrap();
//! assert!(!stage.dom().style("animated-box").unwrap().box_shadow.is_empty());
//!
//! stage.advance(300);
//! assert!(stage.dom().style("animated-box").unwrap().box_shadow.is_empty());
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod config;
pub mod core;
pub mod dom;
pub mod engine;
pub mod error;
pub mod page;
pub mod stage;
pub mod timer;

/// Browser bindings (wasm-bindgen)
#[cfg(feature = "wasm")]
pub mod browser;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{ShowcaseConfig, TimingConfig, DEFAULT_HISTORY_LIMIT};
    pub use crate::core::{
        calculate, create_counter, format_number, parse_number, ColorPalette, Counter, Operation,
        Seed, Xorshift64,
    };
    pub use crate::dom::{DomElement, DomEvent, ElementStyle, MockDom};
    pub use crate::engine::{
        AnimationConfig, AnimationRequest, ClassEffect, Completion, CompletionEvent,
        CompletionOutcome, EffectKind, OverlapPolicy, RequestId, Scheduled,
    };
    pub use crate::error::{ShowcaseError, ShowcaseResult};
    pub use crate::page::WELCOME_MESSAGE;
    pub use crate::stage::{Stage, StepReport, TimerTask};
    pub use crate::timer::{TimerId, TimerQueue};

    #[cfg(feature = "wasm")]
    pub use crate::browser::BrowserShowcase;
}
