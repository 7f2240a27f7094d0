//! Best-effort source-control provenance for result bundles.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::process::Command;
use tracing::warn;

/// Where the code that produced a result lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitProvenance {
    pub origin: String,
    pub commit: String,
}

impl GitProvenance {
    /// Read origin URL and HEAD commit of the repository containing `dir`
    /// (the current directory when `None`).
    ///
    /// Returns `None` and logs a warning if git is unavailable or `dir` is
    /// not inside a repository with an origin.
    pub fn capture(dir: Option<&Path>) -> Option<Self> {
        let origin = git(dir, &["config", "--get", "remote.origin.url"])?;
        let commit = git(dir, &["rev-parse", "HEAD"])?;
        Some(Self {
            origin: normalize_origin(&origin),
            commit,
        })
    }
}

fn git(dir: Option<&Path>, args: &[&str]) -> Option<String> {
    let mut cmd = Command::new("git");
    if let Some(dir) = dir {
        cmd.current_dir(dir);
    }
    match cmd.args(args).output() {
        Ok(out) if out.status.success() => {
            Some(String::from_utf8_lossy(&out.stdout).trim().to_string())
        }
        Ok(out) => {
            warn!(
                command = %args.join(" "),
                status = ?out.status.code(),
                "Failed to retrieve git information for the corpus attributes. Skipped."
            );
            None
        }
        Err(e) => {
            warn!(error = %e, "Failed to run git for the corpus attributes. Skipped.");
            None
        }
    }
}

/// SSH remotes become browsable https URLs.
fn normalize_origin(origin: &str) -> String {
    match origin.strip_prefix("git@github.com:") {
        Some(path) => format!("https://github.com/{path}"),
        None => origin.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ssh_origin_is_rewritten() {
        assert_eq!(
            normalize_origin("git@github.com:org/repo.git"),
            "https://github.com/org/repo.git"
        );
        assert_eq!(normalize_origin("https://example.org/r.git"), "https://example.org/r.git");
    }

    #[test]
    fn capture_outside_a_repository_degrades() {
        let dir = tempfile::tempdir().unwrap();
        if let Some(found) = GitProvenance::capture(Some(dir.path())) {
            assert!(!found.commit.is_empty());
        }
    }
}
