//! Thin boundary around the `git` CLI.
//!
//! The scanner only ever talks to git through [`GitRunner`], so staged,
//! since, and history modes are testable against a stub without a real
//! repository.

use std::{
    path::Path,
    process::{Command, Stdio},
};

use tracing::debug;

/// Errors from invoking the `git` binary itself. Non-zero exit statuses are
/// not errors at this layer; callers interpret [`GitOutput::code`] because
/// some invocations (notably `git grep` with no matches) exit non-zero in
/// ordinary operation.
#[derive(Debug, thiserror::Error)]
pub enum GitError {
    #[error("git execution failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Captured result of one git invocation.
#[derive(Debug, Clone)]
pub struct GitOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub code: Option<i32>,
}

impl GitOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    pub fn stderr_trimmed(&self) -> String {
        String::from_utf8_lossy(&self.stderr).trim().to_string()
    }

    /// Stdout as trimmed, non-empty lines (CRLF tolerated).
    pub fn stdout_lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.stdout)
            .lines()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect()
    }
}

pub trait GitRunner: Send + Sync {
    fn output(&self, cwd: &Path, args: &[&str]) -> Result<GitOutput, GitError>;
}

/// The real `git` binary, run with config and prompt hygiene so a scan can
/// never hang on a credential prompt or pick up surprising user config.
#[derive(Debug, Default, Clone, Copy)]
pub struct Git;

impl GitRunner for Git {
    fn output(&self, cwd: &Path, args: &[&str]) -> Result<GitOutput, GitError> {
        let mut cmd = Command::new("git");
        cmd.current_dir(cwd);
        cmd.env("GIT_CONFIG_GLOBAL", "/dev/null");
        cmd.env("GIT_CONFIG_NOSYSTEM", "1");
        cmd.env("GIT_TERMINAL_PROMPT", "0");
        cmd.args(args);
        cmd.stdin(Stdio::null());
        debug!("Running git {}", args.join(" "));

        let output = cmd.output()?;
        Ok(GitOutput {
            stdout: output.stdout,
            stderr: output.stderr,
            code: output.status.code(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stdout_lines_trims_and_drops_blanks() {
        let output = GitOutput {
            stdout: b"a.py\r\n\n  b.py  \n".to_vec(),
            stderr: Vec::new(),
            code: Some(0),
        };
        assert_eq!(output.stdout_lines(), vec!["a.py".to_string(), "b.py".to_string()]);
        assert!(output.success());
    }

    #[test]
    fn non_zero_exit_is_not_success() {
        let output = GitOutput { stdout: Vec::new(), stderr: b"fatal: x\n".to_vec(), code: Some(128) };
        assert!(!output.success());
        assert_eq!(output.stderr_trimmed(), "fatal: x");
    }
}
