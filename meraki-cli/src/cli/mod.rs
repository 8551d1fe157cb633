//! Command-line interface

pub mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::config::{ConfigFile, Settings};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Create Meraki network objects, object groups and L3 firewall rules from a spreadsheet"
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Input workbook (.xlsx)
    #[arg(short, long = "input-file", value_name = "PATH")]
    pub input_file: Option<PathBuf>,

    /// Dashboard API key
    #[arg(short = 'k', long = "api-key", env = "MERAKI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Organization ID
    #[arg(short = 'o', long = "org-id", env = "MERAKI_ORG_ID")]
    pub org_id: Option<String>,

    /// Network ID
    #[arg(short = 'n', long = "net-id", env = "MERAKI_NET_ID")]
    pub net_id: Option<String>,

    /// Output file name of the Excel workbook
    #[arg(short = 'f', long = "output-file", value_name = "PATH")]
    pub output_file: Option<PathBuf>,

    /// Path to configuration file (TOML)
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the requests that would be sent without changing anything
    #[arg(long = "dry-run", conflicts_with = "inventory")]
    pub dry_run: bool,

    /// List the organization's existing network objects and groups, then exit
    #[arg(long)]
    pub inventory: bool,

    /// Skip the "Network Object" tab
    #[arg(long = "no-objects")]
    pub no_objects: bool,

    /// Skip the "Network Object Groups" tab
    #[arg(long = "no-groups")]
    pub no_groups: bool,

    /// Skip the "Firewall Rule" tab
    #[arg(long = "no-rules")]
    pub no_rules: bool,
}

/// Resolve configuration and dispatch to the requested command
pub async fn run(cli: Cli) -> Result<()> {
    let file = ConfigFile::discover(cli.config.as_deref())?;
    let settings = Settings::resolve(&cli, file)?;

    if settings.inventory {
        commands::inventory::handle_inventory_command(&settings).await
    } else {
        commands::provision::handle_provision_command(&settings).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_short_flags_match_long_names() {
        let cli = Cli::try_parse_from([
            "meraki-cli", "-v", "-i", "in.xlsx", "-k", "key", "-o", "org", "-n", "net", "-f",
            "out.xlsx",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert_eq!(cli.input_file, Some(PathBuf::from("in.xlsx")));
        assert_eq!(cli.api_key.as_deref(), Some("key"));
        assert_eq!(cli.org_id.as_deref(), Some("org"));
        assert_eq!(cli.net_id.as_deref(), Some("net"));
        assert_eq!(cli.output_file, Some(PathBuf::from("out.xlsx")));
    }

    #[test]
    fn test_dry_run_conflicts_with_inventory() {
        let result = Cli::try_parse_from(["meraki-cli", "--dry-run", "--inventory"]);
        assert!(result.is_err());
    }
}
