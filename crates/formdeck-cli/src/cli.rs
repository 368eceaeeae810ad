//! Command line definition

use clap::{Parser, Subcommand, ValueEnum};
use formdeck_core::ModalId;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "formdeck", version, about = "Validate and store form submissions")]
pub(crate) struct Cli {
    /// Debug-level logging
    #[arg(short, long, global = true)]
    pub(crate) verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub(crate) quiet: bool,

    /// Render output as JSON
    #[arg(long, global = true)]
    pub(crate) json: bool,

    /// TOML file overriding the form configuration
    #[arg(long, global = true, value_name = "PATH")]
    pub(crate) config: Option<PathBuf>,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Submit one candidate read from a JSON file
    Submit {
        /// Candidate JSON object
        candidate: PathBuf,

        /// Form variant used for the submission
        #[arg(long, value_enum, default_value_t = Variant::Manual)]
        variant: Variant,

        /// Image file to attach
        #[arg(long, value_name = "PATH")]
        image: Option<PathBuf>,
    },

    /// Submit a JSON array of candidates in order
    Batch {
        /// Candidate JSON array
        candidates: PathBuf,

        /// Form variant used for every submission
        #[arg(long, value_enum, default_value_t = Variant::Manual)]
        variant: Variant,
    },

    /// Score a password
    Strength {
        password: String,
    },

    /// List country suggestions
    Countries,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Variant {
    Manual,
    Schema,
}

impl Variant {
    pub(crate) const fn modal(self) -> ModalId {
        match self {
            Self::Manual => ModalId::Manual,
            Self::Schema => ModalId::Schema,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn submit_defaults_to_manual_variant() {
        let cli = Cli::try_parse_from(["formdeck", "submit", "john.json"]).unwrap();
        match cli.command {
            Command::Submit { variant, image, .. } => {
                assert_eq!(variant, Variant::Manual);
                assert_eq!(image, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::try_parse_from([
            "formdeck", "batch", "all.json", "--variant", "schema", "--json", "-v",
        ])
        .unwrap();
        assert!(cli.json);
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Command::Batch { variant: Variant::Schema, .. }
        ));
        assert_eq!(Variant::Schema.modal(), ModalId::Schema);
    }
}
