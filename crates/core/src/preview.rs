//! Human-readable rendering of an [`Invocation`].
//!
//! The rendered string is for inspection and clipboard use. It must never be
//! handed to an API that interprets it through a shell.

use itertools::Itertools;

use crate::command_builder::{build, Invocation};
use crate::configuration::Configuration;
use crate::quoting::{quote_for_display, Platform};

/// Joins the display-quoted tokens of `invocation` with single spaces.
pub fn render(invocation: &Invocation, platform: Platform) -> String {
    invocation
        .tokens()
        .iter()
        .map(|token| quote_for_display(token, platform))
        .join(" ")
}

/// Builds the invocation for `configuration` and renders it for the host shell.
pub fn preview_string(configuration: &Configuration, executable: &str) -> String {
    render(&build(configuration, executable), Platform::host())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quoting::tests::split_windows;

    fn sample() -> Configuration {
        let mut configuration = Configuration {
            model: Some("opus".to_string()),
            system_prompt: Some("You are \"terse\".\nNo fluff; ever.".to_string()),
            allowed_tools: Some("Bash(git log:*) Edit".to_string()),
            prompt: Some("what's in $PWD & why?".to_string()),
            ..Configuration::default()
        };
        configuration.add_dir("/home/me/My Projects");
        configuration
    }

    #[test]
    fn test_render_simple_posix() {
        let configuration = Configuration {
            model: Some("opus".to_string()),
            prompt: Some("hello world".to_string()),
            ..Configuration::default()
        };
        let invocation = build(&configuration, "claude");
        assert_eq!(
            render(&invocation, Platform::Posix),
            "claude --model opus 'hello world'"
        );
        assert_eq!(
            render(&invocation, Platform::Windows),
            "claude --model opus \"hello world\""
        );
    }

    #[test]
    fn test_render_empty_token() {
        let configuration = Configuration {
            tools: Some(String::new()),
            ..Configuration::default()
        };
        let invocation = build(&configuration, "claude");
        assert_eq!(render(&invocation, Platform::Posix), "claude --tools ''");
        assert_eq!(render(&invocation, Platform::Windows), "claude --tools \"\"");
    }

    #[test]
    fn test_posix_preview_parses_back_to_tokens() {
        let invocation = build(&sample(), "/opt/claude code/bin/claude");
        let preview = render(&invocation, Platform::Posix);
        assert_eq!(shlex::split(&preview), Some(invocation.into_tokens()));
    }

    #[test]
    fn test_windows_preview_parses_back_to_tokens() {
        let invocation = build(&sample(), "C:\\Program Files\\claude\\claude.exe");
        let preview = render(&invocation, Platform::Windows);
        assert_eq!(split_windows(&preview), invocation.into_tokens());
    }

    #[test]
    fn test_preview_string_matches_display() {
        let configuration = sample();
        let invocation = build(&configuration, "claude");
        assert_eq!(preview_string(&configuration, "claude"), invocation.to_string());
    }
}
