//! Launchpad CLI Library
//!
//! This crate provides the command-line front end for launchpad. It merges a
//! saved launch profile with command-line options, prints the exact command
//! that will run, asks for confirmation and launches it in a new terminal.
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing and merging over a profile
//! - [`profile`]: Loading and saving launch profiles
//! - [`confirmation`]: The yes/no prompt before launching
//! - [`output`]: Styled preview and launch result output
//!
//! # Examples
//!
//! ```bash
//! # Launch with the default profile
//! launchpad
//!
//! # Pick a model and an initial prompt
//! launchpad --model opus "explain this repository"
//!
//! # Only print the command, quoted for cmd.exe
//! launchpad --dry-run --quote-style windows --add-dir "C:\My Projects"
//!
//! # Save the merged options as a profile
//! launchpad --permission-mode plan --save-profile ~/.launchpad/plan.yml --dry-run
//! ```

pub mod cli_args;
pub mod confirmation;
pub mod output;
pub mod profile;
