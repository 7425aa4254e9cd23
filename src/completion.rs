//! Shell completion infrastructure.
//!
//! Detects the user's shell from `$SHELL` and generates completion scripts
//! for bash, zsh, and fish via clap_complete.

use crate::error::{Result, ShiftgrabError};
use clap::Command;
use clap_complete::{generate, Shell};
use std::io::Write;

/// Shells we can generate completion scripts for.
pub const SUPPORTED_SHELLS: &[&str] = &["bash", "zsh", "fish"];

/// Supported shell types for completion scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellType {
    Bash,
    Zsh,
    Fish,
}

impl ShellType {
    /// Convert to the `clap_complete::Shell` type.
    pub fn to_clap_shell(self) -> Shell {
        match self {
            ShellType::Bash => Shell::Bash,
            ShellType::Zsh => Shell::Zsh,
            ShellType::Fish => Shell::Fish,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ShellType::Bash => "bash",
            ShellType::Zsh => "zsh",
            ShellType::Fish => "fish",
        }
    }
}

impl std::fmt::Display for ShellType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for ShellType {
    type Err = ShiftgrabError;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "bash" => Ok(ShellType::Bash),
            "zsh" => Ok(ShellType::Zsh),
            "fish" => Ok(ShellType::Fish),
            other => Err(ShiftgrabError::ShellCompletion(format!(
                "Unsupported shell: '{}'. Supported shells are: {}.",
                other,
                SUPPORTED_SHELLS.join(", ")
            ))),
        }
    }
}

/// Detect the user's shell from the `$SHELL` environment variable.
pub fn detect_shell() -> Result<ShellType> {
    let shell_path = std::env::var("SHELL").map_err(|_| {
        ShiftgrabError::ShellCompletion(
            "$SHELL environment variable is not set. Please specify your shell manually."
                .to_string(),
        )
    })?;
    parse_shell_from_path(&shell_path)
}

/// Parse a shell type from a shell path like `/bin/zsh`.
pub fn parse_shell_from_path(shell_path: &str) -> Result<ShellType> {
    let shell_name = std::path::Path::new(shell_path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(shell_path);
    shell_name.parse()
}

/// Write the completion script for `shell` to `out`.
pub fn write_completion_script<W: Write>(shell: ShellType, command: &mut Command, out: &mut W) {
    generate(shell.to_clap_shell(), command, "shiftgrab", out);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_shell_from_path() {
        assert_eq!(parse_shell_from_path("/bin/bash").unwrap(), ShellType::Bash);
        assert_eq!(parse_shell_from_path("/usr/bin/zsh").unwrap(), ShellType::Zsh);
        assert_eq!(
            parse_shell_from_path("/usr/local/bin/fish").unwrap(),
            ShellType::Fish
        );
    }

    #[test]
    fn test_parse_shell_rejects_unknown() {
        assert!(parse_shell_from_path("/bin/tcsh").is_err());
    }

    #[test]
    fn test_shell_type_display() {
        assert_eq!(ShellType::Bash.to_string(), "bash");
        assert_eq!(ShellType::Zsh.to_string(), "zsh");
    }

    #[test]
    fn test_supported_shells_parse() {
        for name in SUPPORTED_SHELLS {
            assert!(name.parse::<ShellType>().is_ok());
        }
    }
}
