//! Config command handler

use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::Reporter;
use crate::ConfigArgs;

/// Renders the effective stage settings
pub fn render_config(config: &CliConfig, json: bool) -> CliResult<String> {
    if json {
        Ok(serde_json::to_string_pretty(&config.settings)?)
    } else {
        Ok(config.settings.to_yaml()?)
    }
}

/// Execute the config command
pub fn execute_config(config: &CliConfig, reporter: &Reporter, args: &ConfigArgs) -> CliResult<()> {
    let rendered = render_config(config, args.json)?;
    reporter.raw(rendered.trim_end());
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use showcase_animations::config::ShowcaseConfig;

    #[test]
    fn test_render_yaml() {
        let yaml = render_config(&CliConfig::new(), false).unwrap();
        assert!(yaml.contains("overlap_policy: independent"));
        assert!(yaml.contains("rainbow_tick_ms: 200"));
    }

    #[test]
    fn test_render_json_roundtrip() {
        let config = CliConfig::new().with_settings(ShowcaseConfig::new().with_seed(5));
        let json = render_config(&config, true).unwrap();
        assert_eq!(ShowcaseConfig::from_json(&json).unwrap().seed, 5);
    }
}
