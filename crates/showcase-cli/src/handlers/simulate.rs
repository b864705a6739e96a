//! Simulate command handler

use super::{print_frames, print_outcomes, run_frames, CompletionRecord, DispatchRecord, Frame};
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::Reporter;
use crate::SimulateArgs;
use serde::Serialize;
use showcase_animations::config::ShowcaseConfig;
use showcase_animations::engine::{AnimationConfig, OverlapPolicy};
use showcase_animations::stage::Stage;
use tracing::info;

/// Everything one simulated request did
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    /// The request as issued
    pub request: AnimationConfig,
    /// Time until reversal, after defaults
    pub duration_ms: u64,
    /// Overlap policy in force
    pub policy: OverlapPolicy,
    /// Generator seed
    pub seed: u64,
    /// Every dispatch, the repeat included
    pub dispatched: Vec<DispatchRecord>,
    /// Timer firings in order
    pub frames: Vec<Frame>,
    /// Finished requests
    pub completions: Vec<CompletionRecord>,
    /// Result toast messages
    pub messages: Vec<String>,
    /// Virtual time once idle
    pub end_ms: u64,
}

/// Builds the configured request from command arguments
pub fn build_request(args: &SimulateArgs) -> CliResult<AnimationConfig> {
    let effect = args.effect.trim();
    if effect.is_empty() {
        return Err(CliError::invalid_argument("effect tag must not be empty"));
    }
    let request = AnimationConfig::new()
        .with_element(&args.element)
        .with_effect(effect)
        .with_repeat(args.repeat);
    Ok(match args.duration {
        Some(duration_ms) => request.with_duration_ms(duration_ms),
        None => request,
    })
}

/// Runs `request` on a fresh, initialized page until idle
pub fn simulate(settings: ShowcaseConfig, request: &AnimationConfig) -> CliResult<SimulationReport> {
    let seed = settings.seed;
    let policy = settings.overlap_policy;
    let duration_ms = request
        .duration_ms
        .unwrap_or(settings.timing.default_duration_ms);
    let mut stage = Stage::showcase(settings);
    stage.init();

    info!(effect = %request.effect, element = %request.element, "running simulation");
    stage.run_configured(request)?;
    let frames = run_frames(&mut stage, None);

    Ok(SimulationReport {
        request: request.clone(),
        duration_ms,
        policy,
        seed,
        dispatched: stage.dispatched().iter().map(DispatchRecord::from).collect(),
        frames,
        completions: stage
            .drain_completions()
            .iter()
            .map(CompletionRecord::from)
            .collect(),
        messages: stage.messages().to_vec(),
        end_ms: stage.now_ms(),
    })
}

/// Execute the simulate command
pub fn execute_simulate(
    config: &CliConfig,
    reporter: &Reporter,
    args: &SimulateArgs,
) -> CliResult<()> {
    let mut settings = config.settings_with_seed(args.seed);
    if let Some(policy) = args.policy {
        settings = settings.with_overlap_policy(policy.into());
    }
    let request = build_request(args)?;
    let report = simulate(settings, &request)?;

    if args.json {
        reporter.raw(&serde_json::to_string_pretty(&report)?);
        return Ok(());
    }
    print_simulation(reporter, &report);
    Ok(())
}

fn print_simulation(reporter: &Reporter, report: &SimulationReport) {
    reporter.header(&format!(
        "Simulating {} on {}",
        report.request.effect, report.request.element
    ));
    reporter.field("duration", &format!("{} ms", report.duration_ms));
    reporter.field("repeat", &report.request.repeat.to_string());
    reporter.field("policy", &format!("{:?}", report.policy));
    reporter.field("seed", &report.seed.to_string());
    for dispatch in &report.dispatched {
        reporter.field(
            &format!("req#{}", dispatch.request),
            &format!(
                "dispatched at {} ms, reverts at {} ms",
                dispatch.dispatched_at_ms, dispatch.reversal_at_ms
            ),
        );
    }

    print_frames(reporter, &report.frames);
    print_outcomes(reporter, &report.completions, &report.messages);
    reporter.success(&format!("idle at {} ms", report.end_ms));
}
