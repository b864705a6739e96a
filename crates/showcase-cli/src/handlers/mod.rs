//! Command handlers - one module per subcommand
//!
//! Handlers build a serializable report from a fresh [`Stage`], then render
//! it as text or JSON. The shared pieces (timer frames, completion records
//! and style summaries) live here.

pub mod click;
pub mod config;
pub mod counter;
pub mod palette;
pub mod simulate;

pub use click::{click, execute_click, ClickReport};
pub use config::execute_config;
pub use counter::{counter_sequence, execute_counter};
pub use palette::{execute_palette, palette_draws};
pub use simulate::{build_request, execute_simulate, simulate, SimulationReport};

use crate::output::Reporter;
use serde::Serialize;
use showcase_animations::dom::ElementStyle;
use showcase_animations::engine::{CompletionEvent, CompletionOutcome, Scheduled};
use showcase_animations::stage::{Stage, IDLE_STEP_LIMIT};

/// One fired timer and the resulting style of the element it touched
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frame {
    /// Virtual time of the firing
    pub at_ms: u64,
    /// Task label
    pub task: &'static str,
    /// Element written, if any
    pub element: Option<String>,
    /// Inline style of that element after the firing
    pub style: Option<ElementStyle>,
}

/// A dispatched request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchRecord {
    /// Request number
    pub request: u64,
    /// Target element id
    pub element: String,
    /// Effect tag
    pub effect: String,
    /// Dispatch time
    pub dispatched_at_ms: u64,
    /// Reversal time
    pub reversal_at_ms: u64,
}

impl From<&Scheduled> for DispatchRecord {
    fn from(scheduled: &Scheduled) -> Self {
        Self {
            request: scheduled.request_id.0,
            element: scheduled.element.clone(),
            effect: scheduled.effect.to_string(),
            dispatched_at_ms: scheduled.dispatched_at_ms,
            reversal_at_ms: scheduled.reversal_at_ms,
        }
    }
}

/// A finished request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionRecord {
    /// Request number
    pub request: u64,
    /// Target element id
    pub element: String,
    /// Effect tag
    pub effect: String,
    /// Completion time
    pub at_ms: u64,
    /// `completed` or `superseded`
    pub outcome: &'static str,
}

impl From<&CompletionEvent> for CompletionRecord {
    fn from(event: &CompletionEvent) -> Self {
        Self {
            request: event.request_id.0,
            element: event.element.clone(),
            effect: event.effect.to_string(),
            at_ms: event.at_ms,
            outcome: match event.outcome {
                CompletionOutcome::Completed => "completed",
                CompletionOutcome::Superseded => "superseded",
            },
        }
    }
}

/// Fires timers in order, recording each, until idle or until the next
/// deadline passes `until_ms`. With a limit the clock ends at the limit.
pub fn run_frames(stage: &mut Stage, until_ms: Option<u64>) -> Vec<Frame> {
    let mut frames = Vec::new();
    while frames.len() < IDLE_STEP_LIMIT {
        if let (Some(limit), Some(next)) = (until_ms, stage.timers().next_deadline()) {
            if next > limit {
                break;
            }
        }
        let Some(report) = stage.step() else {
            break;
        };
        let style = report
            .element
            .as_deref()
            .and_then(|id| stage.dom().style(id))
            .cloned();
        frames.push(Frame {
            at_ms: report.at_ms,
            task: report.label,
            element: report.element,
            style,
        });
    }
    if let Some(limit) = until_ms {
        stage.advance_to(limit);
    }
    frames
}

/// Non-empty style attributes as `name=value` pairs
#[must_use]
pub fn style_summary(style: &ElementStyle) -> String {
    let parts: Vec<String> = [
        ("transform", &style.transform),
        ("background", &style.background_color),
        ("shadow", &style.box_shadow),
        ("animation", &style.animation),
        ("opacity", &style.opacity),
    ]
    .into_iter()
    .filter(|(_, value)| !value.is_empty())
    .map(|(name, value)| format!("{name}={value}"))
    .collect();

    if parts.is_empty() {
        "(clear)".to_string()
    } else {
        parts.join(" ")
    }
}

/// Prints timer frames
pub fn print_frames(reporter: &Reporter, frames: &[Frame]) {
    reporter.header("Timers");
    if frames.is_empty() {
        reporter.line("  (none fired)");
    }
    for frame in frames {
        let detail = match (&frame.element, &frame.style) {
            (Some(element), Some(style)) => format!("{element} {}", style_summary(style)),
            (Some(element), None) => format!("{element} (missing)"),
            (None, _) => String::new(),
        };
        reporter.event(frame.at_ms, frame.task, &detail);
    }
}

/// Prints completion records and result messages
pub fn print_outcomes(reporter: &Reporter, completions: &[CompletionRecord], messages: &[String]) {
    if !completions.is_empty() {
        reporter.header("Completions");
        for record in completions {
            reporter.line(&format!(
                "  req#{} {} on {} {} at {} ms",
                record.request, record.effect, record.element, record.outcome, record.at_ms
            ));
        }
    }
    reporter.header("Messages");
    for message in messages {
        reporter.line(&format!("  {message}"));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use showcase_animations::config::ShowcaseConfig;
    use showcase_animations::engine::EffectKind;

    #[test]
    fn test_style_summary() {
        assert_eq!(style_summary(&ElementStyle::default()), "(clear)");
        let style = ElementStyle {
            transform: "scale(1.05)".into(),
            opacity: "1".into(),
            ..ElementStyle::default()
        };
        assert_eq!(style_summary(&style), "transform=scale(1.05) opacity=1");
    }

    #[test]
    fn test_run_frames_until_idle() {
        let mut stage = Stage::showcase(ShowcaseConfig::default());
        stage
            .apply_effect("animated-box", EffectKind::Glow, 100, None)
            .unwrap();
        let frames = run_frames(&mut stage, None);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].task, "reverse");
        assert_eq!(frames[0].style, Some(ElementStyle::default()));
    }

    #[test]
    fn test_run_frames_with_limit() {
        let mut stage = Stage::showcase(ShowcaseConfig::default());
        stage
            .apply_effect("animated-box", EffectKind::Shake, 500, None)
            .unwrap();
        let frames = run_frames(&mut stage, Some(200));
        assert!(frames.is_empty());
        assert_eq!(stage.now_ms(), 200);
        assert_eq!(stage.pending_reversals(), 1);
    }

    #[test]
    fn test_records_from_stage() {
        let mut stage = Stage::showcase(ShowcaseConfig::default());
        let scheduled = stage
            .apply_effect("animated-box", EffectKind::Rainbow, 10, None)
            .unwrap();
        stage.run_until_idle();
        let dispatch = DispatchRecord::from(&scheduled);
        assert_eq!(dispatch.effect, "rainbow");
        let completion = CompletionRecord::from(&stage.drain_completions()[0]);
        assert_eq!(completion.outcome, "completed");
        assert_eq!(completion.at_ms, 10);
    }
}
