//! Toolchain pre-flight check
//!
//! The generated hooks rely on TypeScript 4.3 features, so the CLI checks the
//! installed `tsc` once before generating anything.

use hooks_core::{Error, Result};
use std::fmt;
use tracing::{debug, info};

/// Oldest TypeScript version the generated code compiles with
pub const REQUIRED_TYPESCRIPT: ToolchainVersion = ToolchainVersion { major: 4, minor: 3 };

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ToolchainVersion {
    pub major: u32,
    pub minor: u32,
}

impl ToolchainVersion {
    /// Parse the first `major.minor` pair of a version string such as
    /// `Version 5.0.4` or `4.3.2-beta`
    pub fn parse(reported: &str) -> Option<Self> {
        let start = reported.find(|c: char| c.is_ascii_digit())?;
        let mut parts = reported[start..].split(|c: char| !c.is_ascii_digit());

        let major = parts.next()?.parse().ok()?;
        let minor = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
        Some(Self { major, minor })
    }
}

impl fmt::Display for ToolchainVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Compare the version `tsc --version` reported against the requirement
pub fn check_typescript_version(reported: &str) -> Result<()> {
    let version = ToolchainVersion::parse(reported)
        .ok_or_else(|| Error::parse(format!("Unrecognised TypeScript version: {}", reported.trim())))?;

    if version < REQUIRED_TYPESCRIPT {
        return Err(Error::UnsupportedToolchain {
            required: REQUIRED_TYPESCRIPT.to_string(),
            found: version.to_string(),
        });
    }

    Ok(())
}

/// Output of `tsc --version`, or `None` when the compiler is not installed
pub async fn detect_typescript_version() -> Option<String> {
    let output = tokio::process::Command::new("tsc")
        .arg("--version")
        .output()
        .await
        .ok()?;

    if !output.status.success() {
        return None;
    }

    Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Fail when an installed TypeScript is too old. A missing `tsc` passes.
pub async fn ensure_supported_toolchain() -> Result<()> {
    match detect_typescript_version().await {
        Some(reported) => {
            check_typescript_version(&reported)?;
            info!(version = %reported, "TypeScript toolchain supported");
        }
        None => debug!("tsc not found, skipping version check"),
    }
    Ok(())
}
