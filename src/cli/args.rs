//! CLI argument definitions using clap
//!
//! Commands:
//! - folio init --config <path>
//! - folio check --config <path>
//! - folio serve --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// folio - a portfolio and blog site with validated content
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a default config and create the collection directories
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./site.json")]
        config: PathBuf,
    },

    /// Validate all content and report every problem
    Check {
        /// Path to configuration file
        #[arg(long, default_value = "./site.json")]
        config: PathBuf,
    },

    /// Load content and serve the site
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./site.json")]
        config: PathBuf,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_default_config_path() {
        let cli = Cli::try_parse_from(["folio", "check"]).unwrap();
        match cli.command {
            Command::Check { config } => assert_eq!(config, PathBuf::from("./site.json")),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_serve_with_port_override() {
        let cli = Cli::try_parse_from(["folio", "serve", "--config", "/srv/site.json", "--port", "8080"])
            .unwrap();
        match cli.command {
            Command::Serve { config, port } => {
                assert_eq!(config, PathBuf::from("/srv/site.json"));
                assert_eq!(port, Some(8080));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_command_rejected() {
        assert!(Cli::try_parse_from(["folio", "deploy"]).is_err());
    }
}
