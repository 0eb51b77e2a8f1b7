use anyhow::{Context, Result};
use std::process::Command;

/// Source of version-control describe metadata, injected so the build
/// orchestrator can be tested without spawning processes.
pub trait RevisionLookup {
    /// Return the raw describe output, `<tag>-<count>-<hash>\n`.
    fn describe(&self) -> Result<String>;
}

/// Queries `git describe --long` in the current working directory. Any
/// failure here is fatal: there is no fallback build identifier.
#[derive(Debug, Default)]
pub struct GitRevisionLookup;

impl RevisionLookup for GitRevisionLookup {
    fn describe(&self) -> Result<String> {
        let output = Command::new("git")
            .args(["describe", "--long"])
            .output()
            .context("Failed to run git describe")?;

        if !output.status.success() {
            anyhow::bail!(
                "git describe failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        String::from_utf8(output.stdout).context("git describe output was not valid UTF-8")
    }
}

/// The build identifier is the tag portion of the describe output, i.e.
/// everything before the first `-` in `<tag>-<count>-<hash>`.
pub fn build_info(describe: &str) -> &str {
    describe.trim_end().split('-').next().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_info_takes_tag_before_first_hyphen() {
        assert_eq!(build_info("v1.2.0-3-gabc1234\n"), "v1.2.0");
    }

    #[test]
    fn test_build_info_without_hyphen_is_whole_tag() {
        assert_eq!(build_info("v2\n"), "v2");
    }

    #[test]
    fn test_build_info_empty_describe() {
        assert_eq!(build_info(""), "");
    }
}
