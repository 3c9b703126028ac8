//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# oaslint configuration

# Rules enabled by default: "recommended", "all" or "off"
preset = "recommended"

# Lowest severity that makes `oaslint lint` exit with status 1
fail_on = "error"

[analyzer]
# Evaluate rules in parallel
parallel = true

# Honor `x-lint-ignore` directives inside documents
honor_ignores = true

# Rule configurations
# Each rule can be enabled/disabled and have its severity overridden.
# Any other key is passed to the rule as an option.

[rules.operation-description]
enabled = true
# severity = "warning"
# minWords = "3"

# [rules.post-response-success]
# enabled = true
# properties = ["200", "201", "202"]

# [rules.camel-case-properties]
# enabled = true
"#;

/// Name of the generated file.
pub const CONFIG_FILE: &str = "oaslint.toml";

/// Runs the init command in `dir`.
pub fn run(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILE);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!("Created {CONFIG_FILE}");
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE} to configure rules");
    println!("  2. Run: oaslint lint openapi.yaml");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use oaslint_core::{Config, Preset, Severity};
    use tempfile::TempDir;

    #[test]
    fn default_config_parses() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.preset(), Preset::Recommended);
        assert_eq!(config.fail_on(), Severity::Error);
        assert!(config.analyzer.parallel);
        assert!(config.is_rule_enabled("operation-description", false));
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let tmp = TempDir::new().unwrap();
        run(tmp.path(), false).unwrap();
        assert!(run(tmp.path(), false).is_err());
        assert!(run(tmp.path(), true).is_ok());
        assert!(tmp.path().join(CONFIG_FILE).exists());
    }
}
