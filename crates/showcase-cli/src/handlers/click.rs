//! Click command handler

use super::{print_frames, print_outcomes, run_frames, CompletionRecord, DispatchRecord, Frame};
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::Reporter;
use crate::ClickArgs;
use serde::Serialize;
use showcase_animations::config::ShowcaseConfig;
use showcase_animations::dom::DomEvent;
use showcase_animations::stage::Stage;
use tracing::{debug, warn};

/// What one click set in motion
#[derive(Debug, Clone, Serialize)]
pub struct ClickReport {
    /// Clicked element id
    pub element: String,
    /// Whether the page has that element
    pub known: bool,
    /// Generator seed
    pub seed: u64,
    /// Requests dispatched by the click
    pub dispatched: Vec<DispatchRecord>,
    /// Timer firings in order
    pub frames: Vec<Frame>,
    /// Finished requests
    pub completions: Vec<CompletionRecord>,
    /// Result toast messages, welcome included
    pub messages: Vec<String>,
    /// Global counter afterwards
    pub counter: u64,
    /// Virtual time at the end
    pub end_ms: u64,
}

/// Clicks `element` on a fresh, initialized page and runs timers until
/// idle or until `until_ms`
#[must_use]
pub fn click(settings: ShowcaseConfig, element: &str, until_ms: Option<u64>) -> ClickReport {
    let seed = settings.seed;
    let mut stage = Stage::showcase(settings);
    stage.init();

    let known = stage.dom().contains(element);
    if !known {
        warn!(element, "clicked element is not on the page");
    }
    stage.handle_event(DomEvent::click(element));
    let frames = run_frames(&mut stage, until_ms);
    debug!(fired = frames.len(), "click settled");

    ClickReport {
        element: element.to_string(),
        known,
        seed,
        dispatched: stage.dispatched().iter().map(DispatchRecord::from).collect(),
        frames,
        completions: stage
            .drain_completions()
            .iter()
            .map(CompletionRecord::from)
            .collect(),
        messages: stage.messages().to_vec(),
        counter: stage.global_counter(),
        end_ms: stage.now_ms(),
    }
}

/// Execute the click command
pub fn execute_click(config: &CliConfig, reporter: &Reporter, args: &ClickArgs) -> CliResult<()> {
    let report = click(config.settings_with_seed(args.seed), &args.element, args.until);

    if args.json {
        reporter.raw(&serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    reporter.header(&format!("Click on {}", report.element));
    if !report.known {
        reporter.warning(&format!("no element with id {:?}", report.element));
    }
    reporter.field("seed", &report.seed.to_string());
    reporter.field("counter", &report.counter.to_string());
    for dispatch in &report.dispatched {
        reporter.field(
            &format!("req#{}", dispatch.request),
            &format!(
                "{} on {} until {} ms",
                dispatch.effect, dispatch.element, dispatch.reversal_at_ms
            ),
        );
    }
    print_frames(reporter, &report.frames);
    print_outcomes(reporter, &report.completions, &report.messages);
    reporter.success(&format!("stopped at {} ms", report.end_ms));
    Ok(())
}
