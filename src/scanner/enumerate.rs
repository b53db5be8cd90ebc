//! Candidate file discovery for the working-tree scan modes.

use anyhow::{anyhow, Result};
use ignore::WalkBuilder;
use tracing::debug;

use super::ScanOptions;
use crate::git_binary::GitRunner;

/// Directory names that are never descended into, wherever they appear.
const SKIP_DIR_NAMES: &[&str] = &[".git", "node_modules", "vendor"];

/// Enumerates candidate files for the directory, staged, and since modes.
/// Paths are returned as produced (the per-file filter normalizes them).
pub(crate) fn discover_files(opts: &ScanOptions) -> Result<Vec<String>> {
    if opts.staged {
        return git_name_only(
            opts.git.as_ref(),
            opts,
            &["diff", "--cached", "--name-only", "--diff-filter=ACMR"],
        );
    }
    if let Some(since_ref) = &opts.since_ref {
        // Symmetric difference on purpose: changes on either side of the
        // merge base are candidates.
        let range = format!("{since_ref}...HEAD");
        return git_name_only(
            opts.git.as_ref(),
            opts,
            &["diff", "--name-only", &range, "--diff-filter=ACMR"],
        );
    }

    let mut files = Vec::new();
    let walker = WalkBuilder::new(&opts.target)
        .standard_filters(false)
        .follow_links(false)
        .filter_entry(|entry| {
            let skip = entry.file_type().map_or(false, |t| t.is_dir())
                && entry
                    .file_name()
                    .to_str()
                    .map_or(false, |name| SKIP_DIR_NAMES.contains(&name));
            !skip
        })
        .build();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                debug!("Skipping entry: {err}");
                continue;
            }
        };
        if entry.file_type().map_or(false, |t| t.is_file()) {
            files.push(entry.path().to_string_lossy().into_owned());
        }
    }
    Ok(files)
}

/// Runs a `git ... --name-only` style command and returns its stdout lines.
/// Any non-zero exit is an error carrying git's stderr.
pub(crate) fn git_name_only(
    git: &dyn GitRunner,
    opts: &ScanOptions,
    args: &[&str],
) -> Result<Vec<String>> {
    let output = git.output(&opts.target, args)?;
    if !output.success() {
        return Err(anyhow!("git {} failed: {}", args.join(" "), output.stderr_trimmed()));
    }
    Ok(output.stdout_lines())
}

/// POSIX-normalizes a path for findings, globs, and baseline keys.
pub(crate) fn normalize_path(path: &str) -> String {
    let posix = path.replace('\\', "/");
    posix.strip_prefix("./").unwrap_or(&posix).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git_binary::{GitError, GitOutput};
    use std::{fs, path::Path, sync::Mutex};
    use tempfile::TempDir;

    struct StubGit {
        calls: Mutex<Vec<Vec<String>>>,
        output: GitOutput,
    }

    impl StubGit {
        fn new(output: GitOutput) -> Self {
            StubGit { calls: Mutex::new(Vec::new()), output }
        }
    }

    impl GitRunner for StubGit {
        fn output(&self, _cwd: &Path, args: &[&str]) -> Result<GitOutput, GitError> {
            self.calls.lock().unwrap().push(args.iter().map(|s| s.to_string()).collect());
            Ok(self.output.clone())
        }
    }

    #[test]
    fn normalization_is_posix_and_strips_dot_slash() {
        assert_eq!(normalize_path("./config.py"), "config.py");
        assert_eq!(normalize_path("src\\sub\\a.py"), "src/sub/a.py");
        assert_eq!(normalize_path("plain.txt"), "plain.txt");
    }

    #[test]
    fn directory_walk_skips_vcs_and_vendor_dirs() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join(".git")).unwrap();
        fs::create_dir_all(tmp.path().join("node_modules/pkg")).unwrap();
        fs::create_dir_all(tmp.path().join("vendor")).unwrap();
        fs::create_dir_all(tmp.path().join("src")).unwrap();
        fs::write(tmp.path().join(".git/config"), "x").unwrap();
        fs::write(tmp.path().join("node_modules/pkg/index.js"), "x").unwrap();
        fs::write(tmp.path().join("vendor/lib.go"), "x").unwrap();
        fs::write(tmp.path().join("src/app.py"), "x").unwrap();
        fs::write(tmp.path().join("top.txt"), "x").unwrap();

        let opts = ScanOptions::new(tmp.path());
        let mut files = discover_files(&opts).unwrap();
        files.sort();
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("src/app.py"));
        assert!(files[1].ends_with("top.txt"));
    }

    #[test]
    fn staged_mode_shells_out_to_git_diff_cached() {
        let tmp = TempDir::new().unwrap();
        let stub = std::sync::Arc::new(StubGit::new(GitOutput {
            stdout: b"a.py\nb.py\n".to_vec(),
            stderr: Vec::new(),
            code: Some(0),
        }));
        let mut opts = ScanOptions::new(tmp.path());
        opts.staged = true;
        opts.git = stub.clone();

        let files = discover_files(&opts).unwrap();
        assert_eq!(files, vec!["a.py".to_string(), "b.py".to_string()]);
        let calls = stub.calls.lock().unwrap();
        assert_eq!(
            calls[0],
            vec!["diff", "--cached", "--name-only", "--diff-filter=ACMR"]
        );
    }

    #[test]
    fn since_mode_uses_symmetric_difference_range() {
        let tmp = TempDir::new().unwrap();
        let stub = std::sync::Arc::new(StubGit::new(GitOutput {
            stdout: b"changed.py\n".to_vec(),
            stderr: Vec::new(),
            code: Some(0),
        }));
        let mut opts = ScanOptions::new(tmp.path());
        opts.since_ref = Some("main".to_string());
        opts.git = stub.clone();

        discover_files(&opts).unwrap();
        let calls = stub.calls.lock().unwrap();
        assert!(calls[0].contains(&"main...HEAD".to_string()));
    }

    #[test]
    fn git_failure_surfaces_stderr() {
        let tmp = TempDir::new().unwrap();
        let stub = std::sync::Arc::new(StubGit::new(GitOutput {
            stdout: Vec::new(),
            stderr: b"fatal: not a git repository\n".to_vec(),
            code: Some(128),
        }));
        let mut opts = ScanOptions::new(tmp.path());
        opts.staged = true;
        opts.git = stub;

        let err = discover_files(&opts).unwrap_err();
        assert!(err.to_string().contains("not a git repository"));
    }
}
