//! The stage: one page session.
//!
//! A [`Stage`] owns everything the page mutates (document, timer queue,
//! palette generator, global counter, message log) and is passed
//! explicitly to every handler. It is driven by [`Stage::advance`],
//! [`Stage::step`] or [`Stage::run_until_idle`]; nothing happens between
//! those calls.
//!
//! Requests report on two channels. [`Stage::dispatch`] returns a
//! [`Scheduled`] acknowledgement immediately; the reversal later pushes a
//! [`CompletionEvent`] (see [`Stage::drain_completions`]) and then runs the
//! request's [`Completion`].

use crate::config::ShowcaseConfig;
use crate::core::{push_bounded, ColorPalette, Seed, Xorshift64};
use crate::dom::ids::RESULT_DISPLAY;
use crate::dom::MockDom;
use crate::engine::{
    apply_style, restore_style, AnimationConfig, AnimationRequest, ClassEffect, Completion,
    CompletionEvent, CompletionOutcome, EffectKind, OverlapPolicy, RequestId, Scheduled, Snapshot,
};
use crate::error::{ShowcaseError, ShowcaseResult};
use crate::timer::{Fired, TimerId, TimerQueue};
use std::collections::{HashMap, VecDeque};
use tracing::{debug, trace, warn};

/// Upper bound on timers fired by one [`Stage::run_until_idle`] call
pub const IDLE_STEP_LIMIT: usize = 100_000;

/// Transform of the result toast while hidden
const TOAST_HIDDEN_TRANSFORM: &str = "translateY(10px)";
/// Transform of the result toast once shown
const TOAST_SHOWN_TRANSFORM: &str = "translateY(0)";

/// Pending reversal of one request
#[derive(Debug)]
pub struct Reversal {
    request_id: RequestId,
    element: String,
    effect: EffectKind,
    snapshot: Snapshot,
    rainbow: Option<TimerId>,
    completion: Option<Completion>,
}

/// Work carried by an armed timer
#[derive(Debug)]
pub enum TimerTask {
    /// Revert a transient effect and run its continuation
    Reverse(Box<Reversal>),
    /// Write the next palette color to a rainbow target
    RainbowTick {
        /// Target element id
        element: String,
        /// Palette position of the next write
        index: usize,
    },
    /// Remove a class effect label
    RemoveClass {
        /// Target element id
        element: String,
        /// Class to remove
        class: ClassEffect,
    },
    /// Put a pulsed element's transform back
    ResetTransform {
        /// Target element id
        element: String,
        /// Transform to write
        transform: String,
    },
    /// Fade the result toast in
    ToastFadeIn,
    /// Hide the loading spinner and announce the modal
    FinishLoading,
    /// Re-issue a configured request
    Rerun(AnimationConfig),
}

impl TimerTask {
    /// Short name for logs and reports
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Reverse(_) => "reverse",
            Self::RainbowTick { .. } => "rainbow-tick",
            Self::RemoveClass { .. } => "remove-class",
            Self::ResetTransform { .. } => "reset-transform",
            Self::ToastFadeIn => "toast-fade-in",
            Self::FinishLoading => "finish-loading",
            Self::Rerun(_) => "rerun",
        }
    }

    /// Element the task writes to, if any
    #[must_use]
    pub fn element(&self) -> Option<&str> {
        match self {
            Self::Reverse(reversal) => Some(&reversal.element),
            Self::RainbowTick { element, .. }
            | Self::RemoveClass { element, .. }
            | Self::ResetTransform { element, .. } => Some(element),
            Self::ToastFadeIn => Some(RESULT_DISPLAY),
            Self::FinishLoading => None,
            Self::Rerun(config) => Some(&config.element),
        }
    }
}

/// What one fired timer did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    /// Virtual time the timer fired at
    pub at_ms: u64,
    /// Task label
    pub label: &'static str,
    /// Element the task wrote to
    pub element: Option<String>,
}

/// Page session state
#[derive(Debug)]
pub struct Stage {
    pub(crate) dom: MockDom,
    pub(crate) timers: TimerQueue<TimerTask>,
    pub(crate) config: ShowcaseConfig,
    pub(crate) palette: ColorPalette,
    pub(crate) rng: Xorshift64,
    pub(crate) global_counter: u64,
    pub(crate) initialized: bool,
    messages: Vec<String>,
    completions: VecDeque<CompletionEvent>,
    dispatched: Vec<Scheduled>,
    armed: HashMap<String, TimerId>,
    next_request: u64,
}

impl Default for Stage {
    fn default() -> Self {
        Self::new(MockDom::new(), ShowcaseConfig::default())
    }
}

impl Stage {
    /// Creates a stage over `dom`. Every session log, the document's event
    /// history included, keeps the newest `config.history_limit` entries.
    #[must_use]
    pub fn new(mut dom: MockDom, config: ShowcaseConfig) -> Self {
        dom.set_history_limit(config.history_limit);
        let rng = Xorshift64::new(Seed::from_u64(config.seed));
        Self {
            dom,
            timers: TimerQueue::new(),
            config,
            palette: ColorPalette::standard(),
            rng,
            global_counter: 0,
            initialized: false,
            messages: Vec::new(),
            completions: VecDeque::new(),
            dispatched: Vec::new(),
            armed: HashMap::new(),
            next_request: 1,
        }
    }

    /// Creates a stage over the showcase page
    #[must_use]
    pub fn showcase(config: ShowcaseConfig) -> Self {
        Self::new(MockDom::showcase(), config)
    }

    /// The document
    #[must_use]
    pub const fn dom(&self) -> &MockDom {
        &self.dom
    }

    /// The document, for setup
    pub fn dom_mut(&mut self) -> &mut MockDom {
        &mut self.dom
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &ShowcaseConfig {
        &self.config
    }

    /// The timer queue
    #[must_use]
    pub const fn timers(&self) -> &TimerQueue<TimerTask> {
        &self.timers
    }

    /// Current virtual time
    #[must_use]
    pub const fn now_ms(&self) -> u64 {
        self.timers.now_ms()
    }

    /// The palette in use
    #[must_use]
    pub const fn palette(&self) -> &ColorPalette {
        &self.palette
    }

    /// Value of the page's global counter
    #[must_use]
    pub const fn global_counter(&self) -> u64 {
        self.global_counter
    }

    /// Messages shown in the result toast, oldest first (the newest
    /// `history_limit` only)
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Most recent result message
    #[must_use]
    pub fn last_message(&self) -> Option<&str> {
        self.messages.last().map(String::as_str)
    }

    /// Acknowledged dispatches, oldest first (the newest `history_limit`
    /// only)
    #[must_use]
    pub fn dispatched(&self) -> &[Scheduled] {
        &self.dispatched
    }

    /// Takes the message log
    pub fn drain_messages(&mut self) -> Vec<String> {
        std::mem::take(&mut self.messages)
    }

    /// Takes the dispatch log
    pub fn drain_dispatched(&mut self) -> Vec<Scheduled> {
        std::mem::take(&mut self.dispatched)
    }

    /// Completion notifications not yet drained (the newest
    /// `history_limit` only)
    pub fn completions(&self) -> impl Iterator<Item = &CompletionEvent> {
        self.completions.iter()
    }

    /// Takes all pending completion notifications
    pub fn drain_completions(&mut self) -> Vec<CompletionEvent> {
        self.completions.drain(..).collect()
    }

    /// Number of armed effect reversals
    #[must_use]
    pub fn pending_reversals(&self) -> usize {
        self.timers
            .tasks()
            .filter(|task| matches!(task, TimerTask::Reverse(_)))
            .count()
    }

    /// Shows a message in the result toast: hidden immediately, faded in
    /// after the toast delay. The message is logged even when the page has
    /// no toast element.
    pub fn display_result(&mut self, message: &str) {
        debug!(message, "result message");
        push_bounded(
            &mut self.messages,
            message.to_string(),
            self.config.history_limit,
        );
        self.dom.set_element_text(RESULT_DISPLAY, message);
        let Some(style) = self.dom.style_mut(RESULT_DISPLAY) else {
            return;
        };
        style.opacity = "0".to_string();
        style.transform = TOAST_HIDDEN_TRANSFORM.to_string();
        self.timers
            .set_timeout(self.config.timing.toast_fade_ms, TimerTask::ToastFadeIn);
    }

    /// Applies a transient effect and arms its reversal
    pub fn dispatch(&mut self, request: AnimationRequest) -> ShowcaseResult<Scheduled> {
        let AnimationRequest {
            element,
            effect,
            duration_ms,
            on_complete,
        } = request;

        if !self.dom.contains(&element) {
            return Err(ShowcaseError::not_found(element));
        }
        if self.config.overlap_policy == OverlapPolicy::CancelPrevious {
            self.supersede(&element);
        }

        let snapshot = self
            .dom
            .style(&element)
            .map(Snapshot::capture)
            .unwrap_or_default();

        let rainbow = match effect {
            EffectKind::Rainbow => Some(self.timers.set_interval(
                self.config.timing.rainbow_tick_ms,
                TimerTask::RainbowTick {
                    element: element.clone(),
                    index: 0,
                },
            )),
            EffectKind::Shake | EffectKind::Glow => {
                if let Some(style) = self.dom.style_mut(&element) {
                    apply_style(style, &effect);
                }
                None
            }
            EffectKind::Class(_) | EffectKind::Unknown(_) => {
                trace!(effect = %effect, "effect has no style policy, scheduling reversal only");
                None
            }
        };

        let request_id = RequestId(self.next_request);
        self.next_request += 1;
        let dispatched_at_ms = self.timers.now_ms();

        let reversal = Reversal {
            request_id,
            element: element.clone(),
            effect: effect.clone(),
            snapshot,
            rainbow,
            completion: on_complete,
        };
        let timer = self
            .timers
            .set_timeout(duration_ms, TimerTask::Reverse(Box::new(reversal)));
        self.armed.insert(element.clone(), timer);

        debug!(
            request = %request_id,
            element = %element,
            effect = %effect,
            duration_ms,
            "dispatched animation"
        );

        let scheduled = Scheduled {
            request_id,
            element,
            effect,
            dispatched_at_ms,
            reversal_at_ms: dispatched_at_ms.saturating_add(duration_ms),
        };
        push_bounded(
            &mut self.dispatched,
            scheduled.clone(),
            self.config.history_limit,
        );
        Ok(scheduled)
    }

    /// Applies `effect` to `element` for `duration_ms`, then runs `on_complete`
    pub fn apply_effect(
        &mut self,
        element: &str,
        effect: EffectKind,
        duration_ms: u64,
        on_complete: Option<Completion>,
    ) -> ShowcaseResult<Scheduled> {
        let mut request = AnimationRequest::new(element, effect).with_duration_ms(duration_ms);
        request.on_complete = on_complete;
        self.dispatch(request)
    }

    /// Restarts a class effect on `element`: strips every class effect,
    /// forces a layout read, adds `class`, and removes it again after the
    /// class effect lifetime. Returns the removal timer.
    pub fn apply_class_effect(
        &mut self,
        element: &str,
        class: ClassEffect,
    ) -> ShowcaseResult<TimerId> {
        let target = self
            .dom
            .get_element_mut(element)
            .ok_or_else(|| ShowcaseError::not_found(element))?;
        for label in ClassEffect::ALL {
            target.remove_class(label.class_name());
        }

        // Removal must be laid out before the re-add or the same class will not restart
        self.dom.offset_height(element);

        if let Some(target) = self.dom.get_element_mut(element) {
            target.add_class(class.class_name());
        }
        let timer = self.timers.set_timeout(
            self.config.timing.class_effect_ms,
            TimerTask::RemoveClass {
                element: element.to_string(),
                class,
            },
        );
        debug!(element, class = class.class_name(), "applied class effect");
        Ok(timer)
    }

    /// Runs a declarative request. A missing target shows "Element not
    /// found!" and arms nothing. Without a duration the configured default
    /// duration applies. With `repeat`, the request is issued once more
    /// (with `repeat` off) after completion plus the repeat delay.
    pub fn run_configured(&mut self, config: &AnimationConfig) -> ShowcaseResult<Scheduled> {
        if !self.dom.contains(&config.element) {
            warn!(element = %config.element, "configured animation target missing");
            self.display_result("Element not found!");
            return Err(ShowcaseError::not_found(&config.element));
        }

        let duration_ms = config
            .duration_ms
            .unwrap_or(self.config.timing.default_duration_ms);
        let mut request = AnimationRequest::new(&config.element, config.effect_kind())
            .with_duration_ms(duration_ms);
        if config.repeat {
            request =
                request.with_completion(Completion::Repeat(config.clone().with_repeat(false)));
        }
        self.dispatch(request)
    }

    /// Fires every timer due within the next `ms` milliseconds
    pub fn advance(&mut self, ms: u64) -> usize {
        let target = self.now_ms().saturating_add(ms);
        self.advance_to(target)
    }

    /// Fires every timer due at or before `time_ms` and moves the clock there
    pub fn advance_to(&mut self, time_ms: u64) -> usize {
        let mut fired = 0;
        while let Some(due) = self.timers.pop_due(time_ms) {
            self.fire(due);
            fired += 1;
        }
        self.timers.advance_clock_to(time_ms);
        fired
    }

    /// Fires the next armed timer, whenever it is due
    pub fn step(&mut self) -> Option<StepReport> {
        let due = self.timers.pop_due(u64::MAX)?;
        Some(self.fire(due))
    }

    /// Fires timers until none is armed (bounded by [`IDLE_STEP_LIMIT`])
    pub fn run_until_idle(&mut self) -> usize {
        let mut fired = 0;
        while fired < IDLE_STEP_LIMIT && self.step().is_some() {
            fired += 1;
        }
        if fired == IDLE_STEP_LIMIT {
            warn!(limit = IDLE_STEP_LIMIT, "timers still armed after step limit");
        }
        fired
    }

    fn fire(&mut self, fired: Fired<TimerTask>) -> StepReport {
        let Fired {
            id,
            deadline_ms,
            task,
        } = fired;
        let report = StepReport {
            at_ms: deadline_ms,
            label: task.label(),
            element: task.element().map(str::to_string),
        };
        trace!(timer = %id, task = report.label, at_ms = deadline_ms, "timer fired");

        match task {
            TimerTask::Reverse(reversal) => {
                self.finish_reversal(id, *reversal, CompletionOutcome::Completed);
            }
            TimerTask::RainbowTick { element, index } => {
                let color = self.palette.cycle(index);
                if let Some(style) = self.dom.style_mut(&element) {
                    style.background_color = color.to_string();
                }
                self.timers.rearm(
                    id,
                    TimerTask::RainbowTick {
                        element,
                        index: index.wrapping_add(1),
                    },
                );
            }
            TimerTask::RemoveClass { element, class } => {
                if let Some(target) = self.dom.get_element_mut(&element) {
                    target.remove_class(class.class_name());
                }
            }
            TimerTask::ResetTransform { element, transform } => {
                if let Some(style) = self.dom.style_mut(&element) {
                    style.transform = transform;
                }
            }
            TimerTask::ToastFadeIn => {
                if let Some(style) = self.dom.style_mut(RESULT_DISPLAY) {
                    style.opacity = "1".to_string();
                    style.transform = TOAST_SHOWN_TRANSFORM.to_string();
                }
            }
            TimerTask::FinishLoading => self.finish_loading(),
            TimerTask::Rerun(config) => {
                if let Err(err) = self.run_configured(&config.with_repeat(false)) {
                    warn!(%err, "repeat request failed");
                }
            }
        }
        report
    }

    fn finish_reversal(&mut self, timer: TimerId, reversal: Reversal, outcome: CompletionOutcome) {
        let Reversal {
            request_id,
            element,
            effect,
            snapshot,
            rainbow,
            completion,
        } = reversal;

        if let Some(tick) = rainbow {
            self.timers.clear(tick);
        }
        if let Some(style) = self.dom.style_mut(&element) {
            restore_style(style, &effect, &snapshot);
        }
        if self.armed.get(&element) == Some(&timer) {
            self.armed.remove(&element);
        }
        debug!(request = %request_id, element = %element, ?outcome, "animation reverted");

        self.completions.push_back(CompletionEvent {
            request_id,
            element,
            effect,
            at_ms: self.timers.now_ms(),
            outcome,
        });
        while self.completions.len() > self.config.history_limit {
            self.completions.pop_front();
        }

        if outcome == CompletionOutcome::Completed {
            if let Some(completion) = completion {
                self.run_completion(completion);
            }
        }
    }

    fn supersede(&mut self, element: &str) {
        let Some(previous) = self.armed.remove(element) else {
            return;
        };
        if let Some(TimerTask::Reverse(reversal)) = self.timers.take(previous) {
            debug!(element, request = %reversal.request_id, "superseding armed animation");
            self.finish_reversal(previous, *reversal, CompletionOutcome::Superseded);
        }
    }

    fn run_completion(&mut self, completion: Completion) {
        match completion {
            Completion::Message(message) => self.display_result(&message),
            Completion::Repeat(config) => {
                self.timers.set_timeout(
                    self.config.timing.repeat_delay_ms,
                    TimerTask::Rerun(config.with_repeat(false)),
                );
            }
            Completion::Callback(callback) => callback(self),
        }
    }
}
