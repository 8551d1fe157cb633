//! Configuration: optional TOML file merged with command-line flags
//!
//! Precedence is flag (or its environment variable) over config file over
//! built-in default.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::api::NetworkContext;
use crate::api::constants::DEFAULT_BASE_URL;
use crate::cli::Cli;
use crate::provision::{DuplicatePolicy, RunOptions, Sections};

pub const DEFAULT_INPUT_FILE: &str = "Meraki - Network Object Firewall Rules.xlsx";
pub const DEFAULT_OUTPUT_FILE: &str = "output.xlsx";

/// Contents of `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ConfigFile {
    pub api_key: Option<String>,
    pub org_id: Option<String>,
    pub net_id: Option<String>,
    pub input_file: Option<PathBuf>,
    pub output_file: Option<PathBuf>,
    /// Dashboard API base URL
    pub base_url: Option<String>,
    /// Per-request timeout; no timeout when unset
    pub timeout_secs: Option<u64>,
    pub duplicate_names: DuplicatePolicy,
    pub sections: Sections,
}

impl ConfigFile {
    /// Load configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// `<config_dir>/meraki-cli/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("meraki-cli").join("config.toml"))
    }

    /// Load an explicitly given file, or the default one if it exists
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => {
                log::debug!("Using config file {}", path.display());
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }
}

/// Everything a run needs, fully resolved
#[derive(Debug, Clone)]
pub struct Settings {
    pub context: NetworkContext,
    pub input_file: PathBuf,
    pub output_file: PathBuf,
    pub base_url: String,
    pub timeout: Option<Duration>,
    pub options: RunOptions,
    pub verbose: bool,
    pub dry_run: bool,
    pub inventory: bool,
}

impl Settings {
    /// Merge flags over the config file.
    ///
    /// Missing `api_key`, `org_id` or `net_id` is a configuration error.
    pub fn resolve(cli: &Cli, file: ConfigFile) -> Result<Self> {
        let api_key = non_empty(cli.api_key.clone()).or(non_empty(file.api_key));
        let org_id = non_empty(cli.org_id.clone()).or(non_empty(file.org_id));
        let net_id = non_empty(cli.net_id.clone()).or(non_empty(file.net_id));

        let mut missing = Vec::new();
        if api_key.is_none() {
            missing.push("api_key (-k/--api-key)");
        }
        if org_id.is_none() {
            missing.push("org_id (-o/--org-id)");
        }
        if net_id.is_none() {
            missing.push("net_id (-n/--net-id)");
        }
        let (Some(api_key), Some(org_id), Some(net_id)) = (api_key, org_id, net_id) else {
            bail!(
                "Please make sure all the required arguments are used. Missing: {}",
                missing.join(", ")
            );
        };

        let mut sections = file.sections;
        if cli.no_objects {
            sections.objects = false;
        }
        if cli.no_groups {
            sections.groups = false;
        }
        if cli.no_rules {
            sections.rules = false;
        }

        Ok(Settings {
            context: NetworkContext::new(org_id, net_id, api_key),
            input_file: cli
                .input_file
                .clone()
                .or(file.input_file)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_FILE)),
            output_file: cli
                .output_file
                .clone()
                .or(file.output_file)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILE)),
            base_url: file
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout: file.timeout_secs.map(Duration::from_secs),
            options: RunOptions {
                sections,
                duplicate_policy: file.duplicate_names,
            },
            verbose: cli.verbose,
            dry_run: cli.dry_run,
            inventory: cli.inventory,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["meraki-cli"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_load_config_file() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            tmp,
            r#"
org_id = "123"
base_url = "https://api.meraki.ca/api/v1"
timeout_secs = 30
duplicate_names = "reject"

[sections]
groups = false
"#
        )
        .unwrap();

        let config = ConfigFile::load(tmp.path()).unwrap();

        assert_eq!(config.org_id.as_deref(), Some("123"));
        assert_eq!(config.timeout_secs, Some(30));
        assert_eq!(config.duplicate_names, DuplicatePolicy::Reject);
        assert!(config.sections.objects);
        assert!(!config.sections.groups);
        assert!(config.sections.rules);
    }

    #[test]
    fn test_load_rejects_unknown_duplicate_policy() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "duplicate_names = \"first-wins\"").unwrap();
        assert!(ConfigFile::load(tmp.path()).is_err());
    }

    #[test]
    fn test_resolve_requires_credentials_and_ids() {
        let err = Settings::resolve(&cli(&["-k", "key"]), ConfigFile::default()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("org_id"));
        assert!(message.contains("net_id"));
        assert!(!message.contains("api_key"));
    }

    #[test]
    fn test_resolve_blank_values_count_as_missing() {
        let result = Settings::resolve(
            &cli(&["-k", " ", "-o", "1", "-n", "N_1"]),
            ConfigFile::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_defaults() {
        let settings =
            Settings::resolve(&cli(&["-k", "key", "-o", "1", "-n", "N_1"]), ConfigFile::default())
                .unwrap();

        assert_eq!(settings.context.org_id, "1");
        assert_eq!(settings.context.network_id, "N_1");
        assert_eq!(settings.input_file, PathBuf::from(DEFAULT_INPUT_FILE));
        assert_eq!(settings.output_file, PathBuf::from(DEFAULT_OUTPUT_FILE));
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.timeout, None);
        assert_eq!(settings.options.sections, Sections::default());
        assert_eq!(settings.options.duplicate_policy, DuplicatePolicy::LastWins);
    }

    #[test]
    fn test_flags_override_config_file() {
        let file = ConfigFile {
            api_key: Some("file-key".to_string()),
            org_id: Some("file-org".to_string()),
            net_id: Some("file-net".to_string()),
            output_file: Some(PathBuf::from("from-file.xlsx")),
            ..ConfigFile::default()
        };

        let settings = Settings::resolve(
            &cli(&["-o", "flag-org", "-f", "flag.xlsx", "--no-rules"]),
            file,
        )
        .unwrap();

        assert_eq!(settings.context.api_key, "file-key");
        assert_eq!(settings.context.org_id, "flag-org");
        assert_eq!(settings.context.network_id, "file-net");
        assert_eq!(settings.output_file, PathBuf::from("flag.xlsx"));
        assert!(settings.options.sections.objects);
        assert!(!settings.options.sections.rules);
    }
}
