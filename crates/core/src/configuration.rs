//! The launch configuration data model.
//!
//! A [`Configuration`] is a flat record of independently optional fields. An
//! unset or empty field means "omit from the invocation"; it never means
//! "use a built-in value". The enumerations carry a default variant that is
//! itself defined as "no flag emitted".

use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::str::FromStr;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Declares an enumeration whose variants map one-to-one onto the values the
/// external program accepts for a flag.
macro_rules! flag_value_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$variant_meta:meta])* $variant:ident => $value:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            /// Every accepted value, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The token passed to the external program for this value.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }

            pub fn is_default(&self) -> bool {
                *self == Self::default()
            }
        }

        impl Display for $name {
            fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
                formatter.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
                match value {
                    $($value => Ok($name::$variant),)+
                    _ => Err(format!(
                        "unknown value `{}`, expected one of: {}",
                        value,
                        [$($value),+].join(", ")
                    )),
                }
            }
        }
    };
}

flag_value_enum! {
    /// Value of `--input-format`.
    pub enum InputFormat {
        #[default]
        Text => "text",
        StreamJson => "stream-json",
    }
}

flag_value_enum! {
    /// Value of `--output-format`.
    pub enum OutputFormat {
        #[default]
        Text => "text",
        Json => "json",
        StreamJson => "stream-json",
    }
}

flag_value_enum! {
    /// Value of `--permission-mode`.
    pub enum PermissionMode {
        #[default]
        Default => "default",
        AcceptEdits => "acceptEdits",
        BypassPermissions => "bypassPermissions",
        Delegate => "delegate",
        DontAsk => "dontAsk",
        Plan => "plan",
    }
}

flag_value_enum! {
    /// Tri-state for the browser integration: `--chrome`, `--no-chrome`, or nothing.
    pub enum ChromeIntegration {
        #[default]
        Default => "default",
        Enabled => "enabled",
        Disabled => "disabled",
    }
}

/// The setting source categories selected for `--setting-sources`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(default)]
pub struct SettingSources {
    pub user: bool,
    pub project: bool,
    pub local: bool,
}

impl SettingSources {
    /// Selected categories in their fixed order: user, project, local.
    pub fn selected(&self) -> Vec<&'static str> {
        [
            (self.user, "user"),
            (self.project, "project"),
            (self.local, "local"),
        ]
        .into_iter()
        .filter_map(|(selected, name)| selected.then_some(name))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        !(self.user || self.project || self.local)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Configuration {
    // Core
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_model: Option<String>,

    // Session
    pub continue_session: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume: Option<String>,
    pub fork_session: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    // Agents
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
    /// Structured agent definitions, passed through as text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agents: Option<String>,

    // Tools
    /// `None` omits `--tools`. `Some` with only whitespace is the deliberate
    /// empty marker and is passed as an empty value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_tools: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disallowed_tools: Option<String>,
    pub disable_slash_commands: bool,

    // Prompts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub append_system_prompt: Option<String>,

    // Input/output
    pub print_mode: bool,
    pub input_format: InputFormat,
    pub output_format: OutputFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_schema: Option<String>,
    pub include_partial_messages: bool,
    pub replay_user_messages: bool,

    // MCP and plugins
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mcp_config: Option<String>,
    pub strict_mcp_config: bool,
    #[serde(skip_serializing_if = "IndexSet::is_empty")]
    pub plugin_dirs: IndexSet<PathBuf>,

    // Permissions
    pub permission_mode: PermissionMode,
    pub allow_dangerously_skip_permissions: bool,
    pub dangerously_skip_permissions: bool,

    // Advanced
    #[serde(skip_serializing_if = "IndexSet::is_empty")]
    pub add_dirs: IndexSet<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_budget_usd: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_file: Option<String>,
    pub verbose: bool,
    pub chrome: ChromeIntegration,
    pub ide: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<String>,
    pub setting_sources: SettingSources,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub betas: Option<String>,
    pub no_session_persistence: bool,
}

impl Configuration {
    /// Adds a plugin directory. Returns `false` if it was already present.
    pub fn add_plugin_dir(&mut self, path: impl Into<PathBuf>) -> bool {
        self.plugin_dirs.insert(path.into())
    }

    pub fn remove_plugin_dir(&mut self, path: &PathBuf) -> bool {
        self.plugin_dirs.shift_remove(path)
    }

    /// Adds an extra accessible directory. Returns `false` if it was already present.
    pub fn add_dir(&mut self, path: impl Into<PathBuf>) -> bool {
        self.add_dirs.insert(path.into())
    }

    pub fn remove_dir(&mut self, path: &PathBuf) -> bool {
        self.add_dirs.shift_remove(path)
    }
}

/// A saved set of launch options: where and what to run, plus the flags.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct LaunchProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executable: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub working_directory: Option<String>,
    #[serde(flatten)]
    pub configuration: Configuration,
}
