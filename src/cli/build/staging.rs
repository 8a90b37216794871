//! Staging directory with an atomic-ish publish.
//!
//! A build writes into `.{output}.staging` next to the output directory.
//! Publishing moves the previous output to `.{output}.old`, renames the
//! staging directory into place, then removes the backup. A staging
//! directory dropped without publishing is deleted, so a failed build
//! leaves the previous output untouched.

use crate::{debug, log, utils::fs::remove_dir_if_exists};
use anyhow::{Context, Result, anyhow};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub struct Staging {
    dir: PathBuf,
    output: PathBuf,
    backup: PathBuf,
    published: bool,
}

impl Staging {
    /// Create a fresh staging directory for `output`.
    ///
    /// Leftovers of an interrupted build are removed first; `clean` only
    /// makes that visible.
    pub fn create(output: &Path, clean: bool) -> Result<Self> {
        let name = output
            .file_name()
            .ok_or_else(|| anyhow!("Invalid output directory {}", output.display()))?
            .to_string_lossy()
            .into_owned();
        let parent = output.parent().unwrap_or_else(|| Path::new("."));

        let staging = Self {
            dir: parent.join(format!(".{name}.staging")),
            output: output.to_path_buf(),
            backup: parent.join(format!(".{name}.old")),
            published: false,
        };

        for leftover in [&staging.dir, &staging.backup] {
            if leftover.exists() {
                if clean {
                    log!("build"; "removing stale {}", leftover.display());
                } else {
                    debug!("build"; "removing stale {}", leftover.display());
                }
                remove_dir_if_exists(leftover)?;
            }
        }

        fs::create_dir_all(&staging.dir)
            .with_context(|| format!("Failed to create {}", staging.dir.display()))?;
        Ok(staging)
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// Replace the output directory with the staged build.
    pub fn publish(mut self) -> Result<()> {
        let had_output = self.output.exists();
        if had_output {
            fs::rename(&self.output, &self.backup).with_context(|| {
                format!("Failed to move aside previous {}", self.output.display())
            })?;
        }

        if let Err(e) = fs::rename(&self.dir, &self.output) {
            if had_output {
                fs::rename(&self.backup, &self.output).ok();
            }
            return Err(e).with_context(|| format!("Failed to publish {}", self.output.display()));
        }
        self.published = true;

        if had_output && let Err(e) = remove_dir_if_exists(&self.backup) {
            log!("warning"; "{:#}", e);
        }
        Ok(())
    }
}

impl Drop for Staging {
    fn drop(&mut self) {
        if !self.published && remove_dir_if_exists(&self.dir).is_err() {
            log!("warning"; "failed to remove {}", self.dir.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::fs::write_file;
    use tempfile::TempDir;

    #[test]
    fn test_publish_replaces_output() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("dist");
        write_file(&output.join("stale.html"), "old").unwrap();

        let staging = Staging::create(&output, false).unwrap();
        assert_eq!(staging.path(), dir.path().join(".dist.staging"));
        write_file(&staging.path().join("index.html"), "new").unwrap();
        staging.publish().unwrap();

        assert_eq!(fs::read_to_string(output.join("index.html")).unwrap(), "new");
        assert!(!output.join("stale.html").exists());
        assert!(!dir.path().join(".dist.staging").exists());
        assert!(!dir.path().join(".dist.old").exists());
    }

    #[test]
    fn test_publish_without_previous_output() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("site/dist");
        fs::create_dir_all(output.parent().unwrap()).unwrap();

        let staging = Staging::create(&output, false).unwrap();
        write_file(&staging.path().join("index.html"), "new").unwrap();
        staging.publish().unwrap();

        assert!(output.join("index.html").is_file());
    }

    #[test]
    fn test_drop_discards_staging() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("dist");
        write_file(&output.join("index.html"), "old").unwrap();

        {
            let staging = Staging::create(&output, false).unwrap();
            write_file(&staging.path().join("index.html"), "partial").unwrap();
        }

        assert!(!dir.path().join(".dist.staging").exists());
        assert_eq!(fs::read_to_string(output.join("index.html")).unwrap(), "old");
    }

    #[test]
    fn test_stale_leftovers_removed() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("dist");
        write_file(&dir.path().join(".dist.staging/junk.html"), "x").unwrap();
        write_file(&dir.path().join(".dist.old/junk.html"), "x").unwrap();

        let staging = Staging::create(&output, true).unwrap();
        assert!(!staging.path().join("junk.html").exists());
        assert!(!dir.path().join(".dist.old").exists());
    }
}
