//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::domain::{NavStep, NavigationMode, StepPolicy};

/// Clinical-trial enrollment hierarchy navigator
#[derive(Parser, Debug)]
#[command(name = "trialnav")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub debug: u8,

    /// Study dataset (JSON); falls back to `data_file` from config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,

    /// Navigation variant: guided or free
    #[arg(long, global = true)]
    pub mode: Option<NavigationMode>,

    /// Step behavior after a missed selection: hold or advance
    #[arg(long, global = true)]
    pub miss_policy: Option<StepPolicy>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List research studies
    Studies,

    /// List CROs of a study
    Cros {
        /// Research study id
        study: String,
    },

    /// Show the study hierarchy as a tree
    Tree {
        /// Research study id
        study: String,
        /// Restrict to these CROs (default: all)
        #[arg(long = "cro")]
        cros: Vec<String>,
    },

    /// Replay navigation steps and print the resulting view
    ///
    /// Steps: cro:ID, hcf:ID, pcp:ID, patient:ID (append @OFFSET in free mode;
    /// a trailing numeric @suffix is always read as the offset),
    /// crumb:ROOT|CRO|HCF|PCP, open:INDEX, close
    Navigate {
        /// Research study id
        study: String,
        /// Restrict to these CROs (default: all)
        #[arg(long = "cro")]
        cros: Vec<String>,
        /// Print the view as JSON
        #[arg(long)]
        json: bool,
        /// Navigation steps, applied in order
        steps: Vec<NavStep>,
    },

    /// Show a candidate's detail record
    Detail {
        /// Research study id
        study: String,
        /// Candidate id
        candidate: String,
    },

    /// Update a candidate's enrollment status
    Consent {
        /// Candidate id
        candidate: String,
        #[command(subcommand)]
        action: ConsentAction,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConsentAction {
    /// Mark enrollment accepted
    Accept,
    /// Mark enrollment rejected
    Reject,
    /// Set an arbitrary status
    Set {
        /// New enrollment status
        status: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective settings
    Show,
    /// Show config file locations
    Path,
}
