//! Launchpad Core Library
//!
//! This crate turns a set of launch options into an exact, ordered argument
//! list for the `claude` command-line program, renders that list as a
//! copy-pasteable preview, and launches it in a visible terminal.
//!
//! # Key Features
//!
//! - **Command Building**: Deterministic flag ordering from a [`configuration::Configuration`]
//! - **Quoting**: POSIX and Windows display quoting that parses back to the same tokens
//! - **Launching**: A new console window, a detected terminal emulator, or a background fallback
//! - **Profiles**: YAML launch profiles with defaults for the executable and working directory
//! - **Error Handling**: One error type for every launch and file failure
//!
//! # Examples
//!
//! Previewing the command for a profile:
//!
//! ```no_run
//! use launchpad_core::config::get_profile_path;
//! use launchpad_core::file_handling::get_profile;
//! use launchpad_core::preview::preview_string;
//!
//! let profile = get_profile(&get_profile_path(&None))?.unwrap_or_default();
//! println!("{}", preview_string(&profile.configuration, "claude"));
//! # Ok::<(), launchpad_core::error::Error>(())
//! ```

pub mod command_builder;
pub mod config;
pub mod configuration;
pub mod discovery;
pub mod error;
pub mod execution;
pub mod file_handling;
pub mod launcher;
pub mod preview;
pub mod quoting;
pub mod terminal;
