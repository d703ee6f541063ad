//! Runtime version checks (Node.js, Bun)

use crate::error::EnvironmentError;
use crate::process::{self, Invocation};
use semver::Version;
use std::fmt;

/// A language runtime the generated project needs, with its minimum major version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeRequirement {
    /// Display name, e.g. "Node.js"
    pub name: &'static str,
    /// Binary used to probe the version
    pub program: &'static str,
    pub min_major: u64,
    pub install_url: &'static str,
}

impl RuntimeRequirement {
    pub const fn node(min_major: u64) -> Self {
        Self {
            name: "Node.js",
            program: "node",
            min_major,
            install_url: "https://nodejs.org/",
        }
    }

    pub const fn bun(min_major: u64) -> Self {
        Self {
            name: "Bun",
            program: "bun",
            min_major,
            install_url: "https://bun.sh/",
        }
    }
}

impl fmt::Display for RuntimeRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} v{}+", self.name, self.min_major)
    }
}

/// Runtime detection result
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub name: &'static str,
    pub version: Version,
}

/// Parse a runtime version string such as `v20.11.1` or `1.1.8`
///
/// Partial versions (`v22`, `21.4`) are padded with zeros.
pub fn parse_version(version_str: &str) -> Option<Version> {
    let cleaned = version_str.trim();
    let cleaned = cleaned.strip_prefix('v').unwrap_or(cleaned);

    if let Ok(version) = Version::parse(cleaned) {
        return Some(version);
    }

    let mut parts = cleaned.split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next().map_or(Some(0), |p| p.parse().ok())?;
    let patch = parts.next().map_or(Some(0), |p| p.parse().ok())?;
    Some(Version::new(major, minor, patch))
}

/// Check a reported version string against a minimum major version
///
/// Equality passes; anything below `min_major` or unreadable fails.
pub fn check_runtime_version(
    runtime: &str,
    version_str: &str,
    min_major: u64,
) -> Result<Version, EnvironmentError> {
    let version = parse_version(version_str).ok_or_else(|| EnvironmentError::UnreadableVersion {
        runtime: runtime.to_string(),
        found: version_str.trim().to_string(),
    })?;

    if version.major < min_major {
        return Err(EnvironmentError::RuntimeTooOld {
            runtime: runtime.to_string(),
            required: min_major,
            found: version.to_string(),
        });
    }

    Ok(version)
}

/// Probe the host runtime and check it satisfies the requirement
pub async fn check_runtime(requirement: &RuntimeRequirement) -> Result<RuntimeInfo, EnvironmentError> {
    let probe = Invocation::new(requirement.program).arg("--version");
    let reported = process::capture_stdout(&probe)
        .await
        .map_err(|_| EnvironmentError::ToolMissing {
            name: requirement.name.to_string(),
            hint: requirement.install_url.to_string(),
        })?;

    let version = check_runtime_version(requirement.name, &reported, requirement.min_major)?;
    Ok(RuntimeInfo {
        name: requirement.name,
        version,
    })
}
