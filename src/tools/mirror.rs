use std::path::{Component, Path, PathBuf};

/// Local copy of files committed to the repository.
///
/// Paths are repository-relative and must stay under the mirror root.
pub struct LocalMirror {
    root: PathBuf,
}

impl LocalMirror {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Write `content` to `root/repo_path`, creating parent directories.
    /// Returns the written path.
    pub async fn write(&self, repo_path: &str, content: &str) -> std::io::Result<PathBuf> {
        let relative = Path::new(repo_path);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("'{repo_path}' is outside the mirror root"),
            ));
        }

        let target = self.root.join(relative);
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, content).await?;
        Ok(target)
    }
}
