//! Git plumbing for gotry.
//!
//! Only what the create and clone flows need: `init`, an initial commit, `clone`, and
//! turning a repository URL into a dated directory name. Everything shells out to the
//! `git` binary; the TUI itself never touches git.

use crate::core::error::{Error, Result};

use chrono::NaiveDate;
use tracing::{debug, warn};

use std::fs;
use std::path::Path;
use std::process::{Command, Stdio};

/// Message of the commit created right after `git init`.
pub const INITIAL_COMMIT_MESSAGE: &str = "✨ Let's try something new\n\n🤖 Created with gotry";

/// Host, owner and repository name parsed from a clone URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoTarget {
    host: String,
    owner: String,
    repo: String,
}

impl RepoTarget {
    #[inline]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[inline]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    #[inline]
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Parses SSH style `git@host:owner/repo[.git]` and `scheme://[user@]host[:port]/owner/repo[.git]`.
    ///
    /// Anything after the repository segment in an HTTP URL (`/tree/main`, ...) is ignored.
    pub fn parse(url: &str) -> Result<Self> {
        let invalid = || Error::InvalidUrl(url.to_string());

        if let Some(rest) = url.strip_prefix("git@") {
            let (host, path) = rest.split_once(':').ok_or_else(invalid)?;
            let (owner, repo) = path.split_once('/').ok_or_else(invalid)?;
            let repo = repo.strip_suffix(".git").unwrap_or(repo);
            if host.is_empty() || owner.is_empty() || repo.is_empty() {
                return Err(invalid());
            }
            return Ok(Self {
                host: host.to_string(),
                owner: owner.to_string(),
                repo: repo.to_string(),
            });
        }

        let (_, rest) = url.split_once("://").ok_or_else(invalid)?;
        let (authority, path) = rest.split_once('/').unwrap_or((rest, ""));
        let host = authority
            .rsplit_once('@')
            .map_or(authority, |(_, h)| h)
            .to_string();

        let mut segments = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .split('/')
            .filter(|s| !s.is_empty());
        let owner = segments.next().ok_or_else(invalid)?;
        let repo = segments.next().ok_or_else(invalid)?;
        let repo = repo.strip_suffix(".git").unwrap_or(repo);
        if host.is_empty() || repo.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            host,
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }

    /// `YYYY-MM-DD-owner-repo` for the given day.
    pub fn dir_name(&self, date: NaiveDate) -> String {
        format!("{}-{}-{}", date.format("%Y-%m-%d"), self.owner, self.repo)
    }
}

/// Heuristic check whether a CLI argument should be cloned rather than searched for.
///
/// `git@...`, GitHub/GitLab https URLs and any `http://` URL qualify unconditionally;
/// other `https://` URLs only when they contain `.git`.
pub fn is_repository_url(s: &str) -> bool {
    s.starts_with("git@")
        || s.starts_with("https://github.com")
        || s.starts_with("https://gitlab.com")
        || s.starts_with("http://")
        || (s.starts_with("https://") && s.contains(".git"))
}

/// `git init` inside `path`.
pub fn init(path: &Path) -> Result<()> {
    run("init", &["init", "--quiet"], Some(path))
}

/// Stages everything and commits with [INITIAL_COMMIT_MESSAGE].
///
/// An empty directory gets a `.gitkeep` first so the commit is not empty.
pub fn initial_commit(path: &Path) -> Result<()> {
    let is_empty = fs::read_dir(path)
        .map_err(|e| Error::io(path, e))?
        .filter_map(|e| e.ok())
        .all(|e| e.file_name() == ".git");
    if is_empty {
        let keep = path.join(".gitkeep");
        fs::write(&keep, b"").map_err(|e| Error::io(&keep, e))?;
    }

    run("add", &["add", "."], Some(path))?;
    run(
        "commit",
        &["commit", "--quiet", "-m", INITIAL_COMMIT_MESSAGE],
        Some(path),
    )
}

/// `git clone <url> <dest>`; progress goes to the user's terminal via stderr.
pub fn clone(url: &str, dest: &Path) -> Result<()> {
    let dest_str = dest.to_string_lossy();
    run("clone", &["clone", url, &dest_str], None)
}

fn run(action: &'static str, args: &[&str], cwd: Option<&Path>) -> Result<()> {
    let git = which::which("git").map_err(|_| Error::GitMissing)?;

    let mut cmd = Command::new(&git);
    cmd.args(args)
        .stdin(Stdio::null())
        // stdout is reserved for the path handed back to the shell
        .stdout(Stdio::null())
        .stderr(Stdio::inherit());
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    debug!(?args, cwd = ?cwd, "running git");
    let status = cmd.status().map_err(|e| Error::io(&git, e))?;

    if !status.success() {
        warn!(action, %status, "git failed");
        return Err(Error::Git { action, status });
    }
    Ok(())
}
