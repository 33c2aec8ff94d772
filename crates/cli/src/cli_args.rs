//! Command-line argument parsing.
//!
//! Every launch option can come from a saved profile; flags given here
//! override it. Switches only ever turn an option on, repeated directory
//! flags add to the profile's directories.

use std::path::PathBuf;

use clap::Parser;
use launchpad_core::configuration::{
    ChromeIntegration, InputFormat, LaunchProfile, OutputFormat, PermissionMode,
};
use launchpad_core::quoting::Platform;

/// Command-line arguments for the `launchpad` binary.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use launchpad_cli::cli_args::Args;
///
/// let args = Args::parse_from(["launchpad", "--model", "opus", "fix the tests"]);
/// assert_eq!(args.prompt.as_deref(), Some("fix the tests"));
/// ```
#[derive(Parser, Debug)]
#[command(term_width = 0)] // Just to make testing across clap features easier
#[allow(clippy::struct_excessive_bools)]
pub struct Args {
    /// Path to the launch profile YAML.
    ///
    /// If not provided, defaults to `~/.launchpad/profile.yml`.
    #[arg(long = "profile", short = 'c')]
    pub profile_path: Option<String>,

    /// Write the merged options to this profile path before launching.
    #[arg(long)]
    pub save_profile: Option<String>,

    /// Print the command that would be launched and exit.
    #[arg(long, short = 'd', action)]
    pub dry_run: bool,

    /// Launch without asking for confirmation first.
    #[arg(long, short = 'f', action)]
    pub force: bool,

    /// Shell dialect for the printed command: `posix` or `windows`.
    ///
    /// Defaults to the dialect of the host OS.
    #[arg(long)]
    pub quote_style: Option<Platform>,

    /// Path or name of the program to launch.
    #[arg(long, short = 'e')]
    pub executable: Option<String>,

    /// Directory to launch in.
    #[arg(long, short = 'w')]
    pub working_dir: Option<String>,

    /// Initial prompt, passed as the final argument.
    #[arg(num_args(1))]
    pub prompt: Option<String>,

    #[arg(long)]
    pub model: Option<String>,

    #[arg(long)]
    pub fallback_model: Option<String>,

    /// Continue the most recent conversation.
    #[arg(long = "continue", action)]
    pub continue_session: bool,

    /// Resume a session by ID.
    #[arg(long)]
    pub resume: Option<String>,

    #[arg(long, action)]
    pub fork_session: bool,

    #[arg(long)]
    pub session_id: Option<String>,

    #[arg(long)]
    pub agent: Option<String>,

    /// Agent definitions, passed through unchanged.
    #[arg(long)]
    pub agents: Option<String>,

    /// Available tools. An empty value disables every tool.
    #[arg(long)]
    pub tools: Option<String>,

    #[arg(long)]
    pub allowed_tools: Option<String>,

    #[arg(long)]
    pub disallowed_tools: Option<String>,

    #[arg(long, action)]
    pub disable_slash_commands: bool,

    #[arg(long)]
    pub system_prompt: Option<String>,

    #[arg(long)]
    pub append_system_prompt: Option<String>,

    /// Print the response and exit instead of staying interactive.
    #[arg(long = "print", short = 'p', action)]
    pub print_mode: bool,

    #[arg(long)]
    pub input_format: Option<InputFormat>,

    #[arg(long)]
    pub output_format: Option<OutputFormat>,

    #[arg(long)]
    pub json_schema: Option<String>,

    #[arg(long, action)]
    pub include_partial_messages: bool,

    #[arg(long, action)]
    pub replay_user_messages: bool,

    #[arg(long)]
    pub mcp_config: Option<String>,

    #[arg(long, action)]
    pub strict_mcp_config: bool,

    /// Plugin directory. May be repeated.
    #[arg(long = "plugin-dir", action = clap::ArgAction::Append)]
    pub plugin_dirs: Vec<PathBuf>,

    #[arg(long)]
    pub permission_mode: Option<PermissionMode>,

    #[arg(long, action)]
    pub allow_dangerously_skip_permissions: bool,

    #[arg(long, action)]
    pub dangerously_skip_permissions: bool,

    /// Additional directory the program may access. May be repeated.
    #[arg(long = "add-dir", action = clap::ArgAction::Append)]
    pub add_dirs: Vec<PathBuf>,

    #[arg(long)]
    pub file: Option<String>,

    #[arg(long)]
    pub max_budget_usd: Option<String>,

    /// Debug filter, e.g. `api,hooks`.
    #[arg(long)]
    pub debug: Option<String>,

    #[arg(long)]
    pub debug_file: Option<String>,

    #[arg(long, action)]
    pub verbose: bool,

    #[arg(long)]
    pub chrome: Option<ChromeIntegration>,

    #[arg(long, action)]
    pub ide: bool,

    #[arg(long)]
    pub settings: Option<String>,

    /// Comma-separated setting sources to load.
    #[arg(
        long,
        value_delimiter = ',',
        value_parser = ["user", "project", "local"]
    )]
    pub setting_sources: Vec<String>,

    #[arg(long)]
    pub betas: Option<String>,

    #[arg(long, action)]
    pub no_session_persistence: bool,
}

fn override_with<T: Clone>(target: &mut Option<T>, value: &Option<T>) {
    if value.is_some() {
        target.clone_from(value);
    }
}

impl Args {
    /// Merges the command-line options over `profile`.
    pub fn apply_to(&self, profile: &mut LaunchProfile) {
        override_with(&mut profile.executable, &self.executable);
        override_with(&mut profile.working_directory, &self.working_dir);

        let c = &mut profile.configuration;

        override_with(&mut c.prompt, &self.prompt);
        override_with(&mut c.model, &self.model);
        override_with(&mut c.fallback_model, &self.fallback_model);

        c.continue_session |= self.continue_session;
        override_with(&mut c.resume, &self.resume);
        c.fork_session |= self.fork_session;
        override_with(&mut c.session_id, &self.session_id);

        override_with(&mut c.agent, &self.agent);
        override_with(&mut c.agents, &self.agents);

        override_with(&mut c.tools, &self.tools);
        override_with(&mut c.allowed_tools, &self.allowed_tools);
        override_with(&mut c.disallowed_tools, &self.disallowed_tools);
        c.disable_slash_commands |= self.disable_slash_commands;

        override_with(&mut c.system_prompt, &self.system_prompt);
        override_with(&mut c.append_system_prompt, &self.append_system_prompt);

        c.print_mode |= self.print_mode;
        if let Some(input_format) = self.input_format {
            c.input_format = input_format;
        }
        if let Some(output_format) = self.output_format {
            c.output_format = output_format;
        }
        override_with(&mut c.json_schema, &self.json_schema);
        c.include_partial_messages |= self.include_partial_messages;
        c.replay_user_messages |= self.replay_user_messages;

        override_with(&mut c.mcp_config, &self.mcp_config);
        c.strict_mcp_config |= self.strict_mcp_config;
        for plugin_dir in &self.plugin_dirs {
            c.add_plugin_dir(plugin_dir.clone());
        }

        if let Some(permission_mode) = self.permission_mode {
            c.permission_mode = permission_mode;
        }
        c.allow_dangerously_skip_permissions |= self.allow_dangerously_skip_permissions;
        c.dangerously_skip_permissions |= self.dangerously_skip_permissions;

        for add_dir in &self.add_dirs {
            c.add_dir(add_dir.clone());
        }
        override_with(&mut c.file, &self.file);
        override_with(&mut c.max_budget_usd, &self.max_budget_usd);
        override_with(&mut c.debug, &self.debug);
        override_with(&mut c.debug_file, &self.debug_file);
        c.verbose |= self.verbose;
        if let Some(chrome) = self.chrome {
            c.chrome = chrome;
        }
        c.ide |= self.ide;
        override_with(&mut c.settings, &self.settings);

        if !self.setting_sources.is_empty() {
            let selected = |name: &str| self.setting_sources.iter().any(|source| source == name);
            c.setting_sources.user = selected("user");
            c.setting_sources.project = selected("project");
            c.setting_sources.local = selected("local");
        }

        override_with(&mut c.betas, &self.betas);
        c.no_session_persistence |= self.no_session_persistence;
    }
}
