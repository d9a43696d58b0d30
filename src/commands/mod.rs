//! CLI command implementations
//!
//! This module contains implementations of the commands
//! supported by the CLI application using the Command pattern.

pub mod command_traits;
pub mod cli_config;
pub mod detect_command;
pub mod extract_command;

pub use command_traits::{Command, CommandFactory};
pub use detect_command::DetectCommand;
pub use extract_command::ExtractCommand;

use clap::ArgMatches;
use crate::errors::SpriteResult;
use crate::utils::logger::Logger;

/// Factory for creating command instances based on CLI arguments
pub struct SpriteCommandFactory;

impl SpriteCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        SpriteCommandFactory
    }
}

impl Default for SpriteCommandFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CommandFactory<'a> for SpriteCommandFactory {
    fn create_command(&self, args: &ArgMatches, logger: &'a Logger) -> SpriteResult<Box<dyn Command + 'a>> {
        if args.get_flag("detect") {
            Ok(Box::new(DetectCommand::new(args, logger)?))
        } else {
            // Default to extraction
            Ok(Box::new(ExtractCommand::new(args, logger)?))
        }
    }
}
