//! Command-line interface for pawtrack.
//!
//! This module provides the CLI structure and command handlers for the
//! `pawtrack` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    ApptCommand, ConfigCommand, GenderArg, HealthCommand, KindArg, MealCommand, OutputFormat,
    PetCommand, SpeciesArg, StatusCommand, SummaryCommand, VaxCommand,
};

/// pawtrack - Keep track of your pets' care
///
/// A local pet-care tracker: pet profiles, health records, vaccinations,
/// feeding schedules, and appointments, with derived statuses and a
/// needs-attention summary.
#[derive(Debug, Parser)]
#[command(name = "pawtrack")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage pet profiles
    #[command(subcommand)]
    Pet(PetCommand),

    /// Manage health records
    #[command(subcommand)]
    Health(HealthCommand),

    /// Manage vaccinations
    #[command(subcommand)]
    Vax(VaxCommand),

    /// Manage meal schedules
    #[command(subcommand)]
    Meal(MealCommand),

    /// Manage appointments
    #[command(subcommand)]
    Appt(ApptCommand),

    /// Show the care dashboard: what needs attention now
    Summary(SummaryCommand),

    /// Show database statistics
    Status(StatusCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
