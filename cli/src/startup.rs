// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Process startup: logging first, then configuration
//!
//! Configuration loading reports discovery and environment overrides through
//! `tracing`, so the subscriber has to exist before the real load runs. The
//! level and format themselves come from a silent read of the same file.

use anyhow::{Context, Result};
use std::path::Path;

use vibecraft_core::domain::stylist_config::StylistConfigManifest;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: String,
    pub format: String,
}

impl LogSettings {
    /// `--log-level` wins over the config file, which wins over "info".
    /// `RUST_LOG` still overrides all of them in [`init_logging`].
    pub fn resolve(cli_level: Option<String>, config_path: Option<&Path>) -> Self {
        let peeked = StylistConfigManifest::peek(config_path);

        let level = cli_level
            .or_else(|| {
                peeked
                    .as_ref()
                    .and_then(|c| c.log_level().map(str::to_string))
            })
            .unwrap_or_else(|| "info".to_string());
        let format = peeked
            .as_ref()
            .map(|c| c.log_format().to_string())
            .unwrap_or_else(|| "text".to_string());

        Self { level, format }
    }
}

/// Install logging via `install`, then load the configuration.
///
/// The install result (e.g. a scoped subscriber guard) is handed back so the
/// caller controls its lifetime. A configuration load failure is returned
/// inside, because `config` subcommands report it themselves.
pub fn bootstrap<G>(
    config_path: Option<&Path>,
    cli_level: Option<String>,
    install: impl FnOnce(&LogSettings) -> Result<G>,
) -> Result<(G, Result<StylistConfigManifest>)> {
    let settings = LogSettings::resolve(cli_level, config_path);
    let installed = install(&settings)?;

    let loaded = StylistConfigManifest::load_or_default(config_path.map(Path::to_path_buf))
        .context("Failed to load configuration");

    Ok((installed, loaded))
}

/// Initialize the global tracing subscriber
pub fn init_logging(settings: &LogSettings) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(&settings.level))
        .context("Failed to create log filter")?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    if settings.format == "json" {
        builder.json().init();
    } else {
        builder.compact().init();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn write_config(dir: &tempfile::TempDir, logging: &str) -> std::path::PathBuf {
        let path = dir.path().join("vibecraft-config.yaml");
        std::fs::write(
            &path,
            format!(
                "apiVersion: vibecraft/v1\nkind: StylistConfig\nmetadata:\n  name: closet\nspec:\n{}",
                logging
            ),
        )
        .unwrap();
        path
    }

    #[test]
    fn test_level_precedence() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "  observability:\n    logging:\n      level: debug\n      format: json\n");

        let from_file = LogSettings::resolve(None, Some(&path));
        assert_eq!(from_file.level, "debug");
        assert_eq!(from_file.format, "json");

        let from_flag = LogSettings::resolve(Some("warn".to_string()), Some(&path));
        assert_eq!(from_flag.level, "warn");
        assert_eq!(from_flag.format, "json");

        let missing = LogSettings::resolve(None, Some(&dir.path().join("nope.yaml")));
        assert_eq!(missing, LogSettings { level: "info".to_string(), format: "text".to_string() });
    }

    #[test]
    fn test_configuration_events_reach_the_installed_subscriber() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "  network:\n    port: 5100\n");
        let buffer = SharedBuffer::default();

        let writer = buffer.clone();
        let (_guard, loaded) = bootstrap(Some(&path), Some("info".to_string()), |settings| {
            let subscriber = tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new(&settings.level))
                .with_writer(move || writer.clone())
                .finish();
            Ok(tracing::subscriber::set_default(subscriber))
        })
        .unwrap();

        assert_eq!(loaded.unwrap().spec.network.port, 5100);

        let output = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("Loading configuration from explicit path"), "{}", output);
    }

    #[test]
    fn test_load_failure_is_returned_after_logging_is_installed() {
        let dir = tempfile::tempdir().unwrap();
        let mut installed = false;

        let (_, loaded) = bootstrap(Some(&dir.path().join("missing.yaml")), None, |_| {
            installed = true;
            Ok(())
        })
        .unwrap();

        assert!(installed);
        assert!(loaded.is_err());
    }
}
