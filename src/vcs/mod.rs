use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Locates the git directory for `project_dir`.
///
/// `.git` is either the repository directory itself or, for worktrees and
/// submodules, a file containing `gitdir: <path>`.
pub fn find_git_dir(project_dir: &Path) -> Result<Option<PathBuf>> {
    let dot_git = project_dir.join(".git");

    if dot_git.is_dir() {
        return Ok(Some(dot_git));
    }

    if !dot_git.is_file() {
        return Ok(None);
    }

    let content = fs::read_to_string(&dot_git)
        .with_context(|| format!("Failed to read {}", dot_git.display()))?;
    let gitdir = content
        .lines()
        .find_map(|line| line.strip_prefix("gitdir:"))
        .map(str::trim)
        .with_context(|| format!("{} does not contain a gitdir entry", dot_git.display()))?;

    Ok(Some(project_dir.join(gitdir)))
}

pub fn is_repository(project_dir: &Path) -> bool {
    project_dir.join(".git").exists()
}

pub fn hooks_dir(project_dir: &Path) -> Result<PathBuf> {
    let git_dir = find_git_dir(project_dir)?.with_context(|| {
        format!(
            "{} is not a git repository. Set hooks.target in the config to install elsewhere.",
            project_dir.display()
        )
    })?;

    Ok(git_dir.join("hooks"))
}
