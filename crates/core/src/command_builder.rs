//! Translation of a [`Configuration`] into the argument vector of the
//! external program.
//!
//! Flags are always emitted in one canonical order, so identical
//! configurations produce byte-identical invocations. The free-form prompt is
//! positional and is always the final token.

use std::fmt::{Display, Formatter};
use std::path::Path;

use crate::configuration::{ChromeIntegration, Configuration};

/// An ordered, immutable argument vector. The first token is the executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    tokens: Vec<String>,
}

impl Invocation {
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn program(&self) -> &str {
        &self.tokens[0]
    }

    /// Every token after the executable.
    pub fn args(&self) -> &[String] {
        &self.tokens[1..]
    }

    pub fn into_tokens(self) -> Vec<String> {
        self.tokens
    }
}

impl Display for Invocation {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(&crate::preview::render(self, crate::quoting::Platform::host()))
    }
}

impl<'a> IntoIterator for &'a Invocation {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

struct TokenWriter {
    tokens: Vec<String>,
}

impl TokenWriter {
    fn switch(&mut self, enabled: bool, flag: &str) {
        if enabled {
            self.tokens.push(flag.to_string());
        }
    }

    fn pair(&mut self, flag: &str, value: impl Into<String>) {
        self.tokens.push(flag.to_string());
        self.tokens.push(value.into());
    }

    /// Emits `flag value` when the scalar is set and not empty.
    fn scalar(&mut self, flag: &str, value: &Option<String>) {
        if let Some(value) = value.as_deref().filter(|value| !value.is_empty()) {
            self.pair(flag, value);
        }
    }

    /// Emits `flag text` with the trimmed text when anything remains after trimming.
    fn text_block(&mut self, flag: &str, value: &Option<String>) {
        if let Some(text) = value.as_deref().map(str::trim).filter(|text| !text.is_empty()) {
            self.pair(flag, text);
        }
    }

    fn repeated<'a>(&mut self, flag: &str, values: impl IntoIterator<Item = &'a Path>) {
        for value in values {
            self.pair(flag, value.to_string_lossy());
        }
    }
}

/// Builds the invocation for `configuration` run through `executable`.
///
/// Never fails: unset fields and enumerations left at their default are
/// simply omitted.
///
/// # Examples
///
/// ```
/// use launchpad_core::command_builder::build;
/// use launchpad_core::configuration::Configuration;
///
/// let configuration = Configuration {
///     model: Some("opus".to_string()),
///     prompt: Some("hello".to_string()),
///     ..Configuration::default()
/// };
///
/// let invocation = build(&configuration, "claude");
/// assert_eq!(invocation.tokens(), ["claude", "--model", "opus", "hello"]);
/// ```
pub fn build(configuration: &Configuration, executable: &str) -> Invocation {
    let c = configuration;
    let mut out = TokenWriter {
        tokens: vec![executable.to_string()],
    };

    out.scalar("--model", &c.model);
    out.scalar("--fallback-model", &c.fallback_model);

    out.switch(c.continue_session, "-c");
    out.scalar("-r", &c.resume);
    out.switch(c.fork_session, "--fork-session");
    out.scalar("--session-id", &c.session_id);

    out.scalar("--agent", &c.agent);
    out.text_block("--agents", &c.agents);

    if let Some(tools) = &c.tools {
        // A whitespace-only value is the deliberate "no tools" marker.
        out.pair("--tools", tools.trim());
    }

    out.scalar("--allowedTools", &c.allowed_tools);
    out.scalar("--disallowedTools", &c.disallowed_tools);
    out.switch(c.disable_slash_commands, "--disable-slash-commands");

    out.text_block("--system-prompt", &c.system_prompt);
    out.text_block("--append-system-prompt", &c.append_system_prompt);

    out.switch(c.print_mode, "-p");

    if !c.input_format.is_default() {
        out.pair("--input-format", c.input_format.as_str());
    }
    if !c.output_format.is_default() {
        out.pair("--output-format", c.output_format.as_str());
    }

    out.text_block("--json-schema", &c.json_schema);
    out.switch(c.include_partial_messages, "--include-partial-messages");
    out.switch(c.replay_user_messages, "--replay-user-messages");

    out.scalar("--mcp-config", &c.mcp_config);
    out.switch(c.strict_mcp_config, "--strict-mcp-config");
    out.repeated("--plugin-dir", c.plugin_dirs.iter().map(|dir| dir.as_path()));

    if !c.permission_mode.is_default() {
        out.pair("--permission-mode", c.permission_mode.as_str());
    }
    out.switch(
        c.allow_dangerously_skip_permissions,
        "--allow-dangerously-skip-permissions",
    );
    out.switch(c.dangerously_skip_permissions, "--dangerously-skip-permissions");

    out.repeated("--add-dir", c.add_dirs.iter().map(|dir| dir.as_path()));
    out.scalar("--file", &c.file);
    out.scalar("--max-budget-usd", &c.max_budget_usd);

    out.scalar("--debug", &c.debug);
    out.scalar("--debug-file", &c.debug_file);
    out.switch(c.verbose, "--verbose");

    match c.chrome {
        ChromeIntegration::Enabled => out.switch(true, "--chrome"),
        ChromeIntegration::Disabled => out.switch(true, "--no-chrome"),
        ChromeIntegration::Default => {}
    }

    out.switch(c.ide, "--ide");

    out.scalar("--settings", &c.settings);
    if !c.setting_sources.is_empty() {
        out.pair("--setting-sources", c.setting_sources.selected().join(","));
    }

    out.scalar("--betas", &c.betas);
    out.switch(c.no_session_persistence, "--no-session-persistence");

    // Positional: the external program reads the first non-flag token as input.
    if let Some(prompt) = c.prompt.as_deref().filter(|prompt| !prompt.is_empty()) {
        out.tokens.push(prompt.to_string());
    }

    Invocation { tokens: out.tokens }
}
