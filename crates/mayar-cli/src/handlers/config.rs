//! Configuration command handlers

use crate::cli::{ConfigAction, ConfigArgs, ConfigInitArgs};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::OutputWriter;

/// Handle the config command
pub fn handle_config(args: ConfigArgs, config: &Config, output: &mut OutputWriter) -> Result<bool> {
    match args.action {
        ConfigAction::Show => handle_config_show(config, output),
        ConfigAction::Init(init_args) => handle_config_init(init_args, output),
    }
}

/// Print the effective configuration with tokens masked
fn handle_config_show(config: &Config, output: &mut OutputWriter) -> Result<bool> {
    output.data(&config.redacted()?)?;
    Ok(true)
}

/// Write a default configuration file
fn handle_config_init(args: ConfigInitArgs, output: &mut OutputWriter) -> Result<bool> {
    let path = match args.path {
        Some(path) => path,
        None => Config::user_config_path()
            .ok_or_else(|| Error::config("Unable to determine user config directory"))?,
    };

    if path.exists() && !args.force {
        output.warning(&format!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        ))?;
        return Ok(true);
    }

    Config::default().save(&path)?;
    output.success(&format!("✓ Created config at {}", path.display()))?;
    output.info("Set provider.api_token, or export MAYAR_API_TOKEN, before sending requests.")?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use tempfile::TempDir;

    fn output() -> OutputWriter {
        OutputWriter::with_writer(OutputFormat::Human, false, true, Box::new(std::io::sink()))
    }

    fn init_args(path: &std::path::Path, force: bool) -> ConfigArgs {
        ConfigArgs {
            action: ConfigAction::Init(ConfigInitArgs {
                force,
                path: Some(path.to_path_buf()),
            }),
        }
    }

    #[test]
    fn test_init_writes_default_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mayar").join("config.yaml");

        handle_config(init_args(&path, false), &Config::default(), &mut output()).unwrap();

        assert_eq!(Config::from_file(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_init_respects_force() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "provider:\n  api_token: keep-me\n").unwrap();

        handle_config(init_args(&path, false), &Config::default(), &mut output()).unwrap();
        assert_eq!(
            Config::from_file(&path).unwrap().provider.api_token.as_deref(),
            Some("keep-me")
        );

        handle_config(init_args(&path, true), &Config::default(), &mut output()).unwrap();
        assert_eq!(Config::from_file(&path).unwrap().provider.api_token, None);
    }

    #[test]
    fn test_show_succeeds() {
        let args = ConfigArgs { action: ConfigAction::Show };
        assert!(handle_config(args, &Config::default(), &mut output()).unwrap());
    }
}
