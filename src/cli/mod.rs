//! CLI Module
//!
//! Command-line interface for creating and inspecting stack files.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::layers::Coordinate;

/// Layer Stack - build, inspect and verify persisted layer stacks
#[derive(Parser, Debug)]
#[command(name = "layer-stack")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new model file holding only an input layer
    #[command(name = "new")]
    New {
        /// Path for the new model file
        path: PathBuf,

        /// Initial input layer size
        #[arg(short, long, default_value_t = 0)]
        input_size: usize,
    },

    /// Append a coordinatewise (add or multiply) layer
    #[command(name = "add-coordinatewise")]
    AddCoordinatewise {
        /// Path to the model file
        path: PathBuf,

        /// Operation: add (shift) or multiply (scale)
        #[arg(short, long)]
        operation: String,

        /// One value per input coordinate
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true, required = true)]
        values: Vec<f64>,

        /// Input coordinates as <layer>:<element>
        #[arg(long, value_delimiter = ',', required = true)]
        inputs: Vec<Coordinate>,
    },

    /// Append a sum layer with a single output summing the inputs
    #[command(name = "add-sum")]
    AddSum {
        /// Path to the model file
        path: PathBuf,

        /// Input coordinates as <layer>:<element>
        #[arg(long, value_delimiter = ',', required = true)]
        inputs: Vec<Coordinate>,
    },

    /// Print every layer with its output coordinates
    #[command(name = "inspect")]
    Inspect {
        /// Path to the model file
        path: PathBuf,
    },

    /// Load a model file and print its fingerprint
    #[command(name = "verify")]
    Verify {
        /// Path to the model file
        path: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add_coordinatewise() {
        let cli = Cli::try_parse_from([
            "layer-stack",
            "add-coordinatewise",
            "model.json",
            "--operation",
            "scale",
            "--values",
            "0.5,-2",
            "--inputs",
            "0:0,0:1",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::AddCoordinatewise { values, inputs, .. }) => {
                assert_eq!(values, vec![0.5, -2.0]);
                assert_eq!(inputs, vec![Coordinate::new(0, 0), Coordinate::new(0, 1)]);
            }
            other => panic!("Expected AddCoordinatewise, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_bad_coordinate() {
        let result = Cli::try_parse_from(["layer-stack", "add-sum", "m.json", "--inputs", "0-1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_no_command() {
        let cli = Cli::try_parse_from(["layer-stack", "--verbose"]).unwrap();
        assert!(cli.verbose);
        assert!(cli.command.is_none());
    }
}
