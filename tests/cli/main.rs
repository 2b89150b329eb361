use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
};

use anyhow::{Context, Ok, Result, bail};
use insta_cmd::get_cargo_bin;
use tempfile::TempDir;

mod check;
mod diff;

const BIN_NAME: &str = "intl-lint";

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    pub fn with_file(path: &str, content: &str) -> Result<Self> {
        let test = Self::new()?;
        test.write_file(path, content)?;
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn remove_file(&self, path: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);
        fs::remove_file(&file_path)
            .with_context(|| format!("Failed to remove file: {}", file_path.display()))
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    /// Keeps git from discovering a repository above the temp directory.
    fn ceiling(&self) -> &Path {
        self.project_dir.parent().unwrap_or(self.project_dir.as_path())
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd.env("GIT_CEILING_DIRECTORIES", self.ceiling());
        cmd
    }

    /// Run `git` in the project directory with a throwaway identity.
    pub fn git(&self, args: &[&str]) -> Result<()> {
        let output = Command::new("git")
            .args([
                "-c",
                "user.name=intl-lint",
                "-c",
                "user.email=intl-lint@example.com",
                "-c",
                "commit.gpgsign=false",
                "-c",
                "core.autocrlf=false",
            ])
            .args(args)
            .current_dir(&self.project_dir)
            .env("GIT_CEILING_DIRECTORIES", self.ceiling())
            .output()
            .context("Failed to run git")?;

        if !output.status.success() {
            bail!(
                "git {} failed: {}",
                args.join(" "),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        Ok(())
    }

    /// A git repository whose first commit contains `files`.
    pub fn git_repo(files: &[(&str, &str)]) -> Result<Self> {
        let test = Self::new()?;
        test.git(&["init", "--quiet"])?;
        for (path, content) in files {
            test.write_file(path, content)?;
        }
        test.git(&["add", "--all"])?;
        test.git(&["commit", "--quiet", "--allow-empty", "-m", "initial"])?;
        Ok(test)
    }
}
