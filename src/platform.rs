//! Target platforms and their per-platform profiles.
//!
//! Every supported assistant CLI is a variant of [`Platform`]. All platform
//! specific behaviour (render flags, frontmatter dialect, capability values,
//! prompt limits) is reached through an exhaustive `match` on that enum, so
//! adding or removing a platform is a compile-time checked change rather than
//! a string lookup that can silently miss.
//!
//! # Platforms
//!
//! | Platform | Array style | Command prefix | Root |
//! |----------|-------------|----------------|------|
//! | `claude` | block       | `/gsd-`        | `.claude` |
//! | `copilot`| flow        | `/gsd-`        | `.github` |
//! | `codex`  | flow        | `$gsd-`        | `.codex` |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::frontmatter::serializer::{ArrayStyle, FrontmatterSerializer, serializer_for};

/// An assistant CLI that compiled artifacts are produced for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Claude Code. Block-style sequences, exact-case tool names.
    Claude,
    /// GitHub Copilot CLI. Flow-style sequences, lowercase tool aliases.
    Copilot,
    /// OpenAI Codex CLI. Same frontmatter dialect as Copilot.
    Codex,
}

impl Platform {
    /// All platforms in their canonical order.
    pub const ALL: [Platform; 3] = [Platform::Claude, Platform::Copilot, Platform::Codex];

    /// Lowercase identifier used in config files, CLI flags and render contexts.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Platform::Claude => "claude",
            Platform::Copilot => "copilot",
            Platform::Codex => "codex",
        }
    }

    /// Human readable name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Platform::Claude => "Claude Code",
            Platform::Copilot => "GitHub Copilot CLI",
            Platform::Codex => "Codex CLI",
        }
    }

    /// Name of the boolean render flag that is true only for this platform.
    #[must_use]
    pub const fn flag_name(self) -> &'static str {
        match self {
            Platform::Claude => "isClaude",
            Platform::Copilot => "isCopilot",
            Platform::Codex => "isCodex",
        }
    }

    /// The implementation record for this platform.
    #[must_use]
    pub fn profile(self) -> PlatformProfile {
        match self {
            Platform::Claude => PlatformProfile {
                platform: self,
                array_style: ArrayStyle::Block,
                command_prefix: "/gsd-",
                platform_root: ".claude",
                capabilities: Capabilities {
                    supports_model: true,
                    supports_hooks: true,
                    supports_mcp: true,
                    supports_skills: true,
                    supports_wildcards: false,
                    char_limit: 200_000,
                },
                generates_metadata: false,
            },
            Platform::Copilot => PlatformProfile {
                platform: self,
                array_style: ArrayStyle::Flow,
                command_prefix: "/gsd-",
                platform_root: ".github",
                capabilities: Capabilities {
                    supports_model: false,
                    supports_hooks: false,
                    supports_mcp: true,
                    supports_skills: true,
                    supports_wildcards: true,
                    char_limit: 30_000,
                },
                generates_metadata: true,
            },
            Platform::Codex => PlatformProfile {
                platform: self,
                array_style: ArrayStyle::Flow,
                command_prefix: "$gsd-",
                platform_root: ".codex",
                capabilities: Capabilities {
                    supports_model: true,
                    supports_hooks: false,
                    supports_mcp: true,
                    supports_skills: true,
                    supports_wildcards: false,
                    char_limit: 100_000,
                },
                generates_metadata: true,
            },
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Error returned when a platform identifier is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported platform: '{0}'. Must be one of: claude, copilot, codex")]
pub struct UnknownPlatform(pub String);

impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "claude" | "claude-code" => Ok(Platform::Claude),
            "copilot" | "github-copilot" => Ok(Platform::Copilot),
            "codex" => Ok(Platform::Codex),
            other => Err(UnknownPlatform(other.to_string())),
        }
    }
}

/// Capability values exposed to templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub supports_model: bool,
    pub supports_hooks: bool,
    pub supports_mcp: bool,
    pub supports_skills: bool,
    pub supports_wildcards: bool,
    /// Maximum artifact length in characters the platform accepts.
    pub char_limit: usize,
}

/// Everything the compiler needs to know about one platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformProfile {
    pub platform: Platform,
    pub array_style: ArrayStyle,
    pub command_prefix: &'static str,
    pub platform_root: &'static str,
    pub capabilities: Capabilities,
    /// Whether a nested `metadata` block is injected into artifacts.
    pub generates_metadata: bool,
}

impl PlatformProfile {
    /// The frontmatter serializer for this platform's dialect.
    #[must_use]
    pub fn serializer(&self) -> &'static dyn FrontmatterSerializer {
        serializer_for(self.array_style)
    }
}
