//! Platform-aware quoting of single arguments for display.
//!
//! The quoted form is a copy/paste aid only. Processes are always created
//! from the raw argument vector, which needs no quoting at all.

use std::borrow::Cow;
use std::fmt::{Display, Formatter};
use std::iter::repeat;
use std::str::FromStr;

/// Characters that `cmd.exe` treats specially outside of double quotes.
const WINDOWS_METACHARACTERS: &[char] = &['&', '|', '<', '>', '^'];

/// The shell dialect a preview is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Posix,
    Windows,
}

impl Platform {
    pub fn host() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Posix
        }
    }
}

impl Display for Platform {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Posix => formatter.write_str("posix"),
            Platform::Windows => formatter.write_str("windows"),
        }
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "posix" | "unix" | "sh" => Ok(Platform::Posix),
            "windows" | "cmd" => Ok(Platform::Windows),
            _ => Err(format!(
                "unknown quote style `{value}`, expected `posix` or `windows`"
            )),
        }
    }
}

/// Quotes `token` so that pasting it into the platform's native shell yields
/// exactly `token` back.
///
/// # Examples
///
/// ```
/// use launchpad_core::quoting::{quote_for_display, Platform};
///
/// assert_eq!(quote_for_display("it's", Platform::Posix), r#"'it'"'"'s'"#);
/// assert_eq!(quote_for_display("a b", Platform::Windows), r#""a b""#);
/// assert_eq!(quote_for_display("plain", Platform::Windows), "plain");
/// ```
pub fn quote_for_display(token: &str, platform: Platform) -> Cow<'_, str> {
    match platform {
        Platform::Posix => quote_posix(token),
        Platform::Windows => quote_windows(token),
    }
}

fn is_posix_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || "@%+=:,./_-".contains(c)
}

fn quote_posix(token: &str) -> Cow<'_, str> {
    if token.is_empty() {
        return Cow::Borrowed("''");
    }

    if token.chars().all(is_posix_safe) {
        return Cow::Borrowed(token);
    }

    // Close the single-quoted run, emit a double-quoted ', reopen.
    Cow::Owned(format!("'{}'", token.replace('\'', r#"'"'"'"#)))
}

fn needs_windows_quotes(token: &str) -> bool {
    token
        .chars()
        .any(|c| c.is_whitespace() || c == '"' || WINDOWS_METACHARACTERS.contains(&c))
}

fn quote_windows(token: &str) -> Cow<'_, str> {
    if token.is_empty() {
        return Cow::Borrowed(r#""""#);
    }

    if !needs_windows_quotes(token) {
        return Cow::Borrowed(token);
    }

    // Backslashes are literal unless they precede a double quote, so only
    // runs that end at a quote (or at the closing quote) get doubled.
    let mut quoted = String::with_capacity(token.len() + 2);
    quoted.push('"');
    let mut backslashes = 0usize;
    for c in token.chars() {
        match c {
            '\\' => backslashes += 1,
            '"' => {
                quoted.extend(repeat('\\').take(backslashes * 2 + 1));
                quoted.push('"');
                backslashes = 0;
            }
            _ => {
                quoted.extend(repeat('\\').take(backslashes));
                quoted.push(c);
                backslashes = 0;
            }
        }
    }
    quoted.extend(repeat('\\').take(backslashes * 2));
    quoted.push('"');

    Cow::Owned(quoted)
}
