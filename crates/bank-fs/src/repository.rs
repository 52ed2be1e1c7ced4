//! Project and file repositories over the storage root

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::path::validate_segment;
use crate::{Error, Result};

/// Access to the projects stored under the storage root.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// List the names of all projects, sorted.
    async fn list_projects(&self) -> Result<Vec<String>>;

    /// Whether a project directory exists.
    async fn project_exists(&self, name: &str) -> Result<bool>;

    /// Create the project directory if it is not already present.
    async fn ensure_project(&self, name: &str) -> Result<()>;
}

/// Access to the context files within a project.
#[async_trait]
pub trait FileRepository: Send + Sync {
    /// List the file names within a project, sorted. Empty when the project
    /// directory does not exist.
    async fn list_files(&self, project: &str) -> Result<Vec<String>>;

    /// Read a file's content, or `None` when it does not exist.
    async fn load_file(&self, project: &str, file: &str) -> Result<Option<String>>;

    /// Write a file's content, creating the project directory as needed and
    /// replacing any existing content.
    async fn store_file(&self, project: &str, file: &str, content: &str) -> Result<()>;

    /// Whether a file exists within a project.
    async fn file_exists(&self, project: &str, file: &str) -> Result<bool>;
}

/// Filesystem-backed project repository.
pub struct FsProjectRepository {
    root: PathBuf,
}

impl FsProjectRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn project_path(&self, name: &str) -> Result<PathBuf> {
        Ok(self.root.join(validate_segment(name)?))
    }
}

#[async_trait]
impl ProjectRepository for FsProjectRepository {
    async fn list_projects(&self) -> Result<Vec<String>> {
        list_dir(&self.root, EntryKind::Dir).await
    }

    async fn project_exists(&self, name: &str) -> Result<bool> {
        let path = self.project_path(name)?;
        Ok(tokio::fs::metadata(&path)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false))
    }

    async fn ensure_project(&self, name: &str) -> Result<()> {
        let path = self.project_path(name)?;
        tokio::fs::create_dir_all(&path)
            .await
            .map_err(|e| Error::io(&path, e))
    }
}

/// Filesystem-backed file repository.
pub struct FsFileRepository {
    root: PathBuf,
}

impl FsFileRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn file_path(&self, project: &str, file: &str) -> Result<PathBuf> {
        Ok(self
            .root
            .join(validate_segment(project)?)
            .join(validate_segment(file)?))
    }
}

#[async_trait]
impl FileRepository for FsFileRepository {
    async fn list_files(&self, project: &str) -> Result<Vec<String>> {
        let dir = self.root.join(validate_segment(project)?);
        list_dir(&dir, EntryKind::File).await
    }

    async fn load_file(&self, project: &str, file: &str) -> Result<Option<String>> {
        let path = self.file_path(project, file)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::io(&path, e)),
        }
    }

    async fn store_file(&self, project: &str, file: &str, content: &str) -> Result<()> {
        let path = self.file_path(project, file)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| Error::io(parent, e))?;
        }
        tracing::debug!(path = %path.display(), bytes = content.len(), "storing file");
        tokio::fs::write(&path, content)
            .await
            .map_err(|e| Error::io(&path, e))
    }

    async fn file_exists(&self, project: &str, file: &str) -> Result<bool> {
        let path = self.file_path(project, file)?;
        Ok(tokio::fs::metadata(&path)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false))
    }
}

enum EntryKind {
    Dir,
    File,
}

/// List entries of one kind in a directory, sorted by name. A missing
/// directory reads as empty so callers see unknown projects as projects
/// with no files.
async fn list_dir(dir: &Path, kind: EntryKind) -> Result<Vec<String>> {
    let mut read_dir = match tokio::fs::read_dir(dir).await {
        Ok(rd) => rd,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(Error::io(dir, e)),
    };

    let mut names = Vec::new();
    while let Some(entry) = read_dir.next_entry().await.map_err(|e| Error::io(dir, e))? {
        let file_type = entry.file_type().await.map_err(|e| Error::io(dir, e))?;
        let matches = match kind {
            EntryKind::Dir => file_type.is_dir(),
            EntryKind::File => file_type.is_file(),
        };
        if matches {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn repos(root: &Path) -> (FsProjectRepository, FsFileRepository) {
        (
            FsProjectRepository::new(root),
            FsFileRepository::new(root),
        )
    }

    #[tokio::test]
    async fn list_projects_empty_root() {
        let tmp = TempDir::new().unwrap();
        let (projects, _) = repos(tmp.path());
        assert!(projects.list_projects().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_projects_sees_only_directories() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join("beta")).unwrap();
        std::fs::create_dir(tmp.path().join("alpha")).unwrap();
        std::fs::write(tmp.path().join("stray.txt"), "x").unwrap();

        let (projects, _) = repos(tmp.path());
        assert_eq!(projects.list_projects().await.unwrap(), vec!["alpha", "beta"]);
    }

    #[tokio::test]
    async fn store_and_load_round_trip() {
        let tmp = TempDir::new().unwrap();
        let (_, files) = repos(tmp.path());

        files.store_file("demo", "notes.md", "hello").await.unwrap();
        let content = files.load_file("demo", "notes.md").await.unwrap();
        assert_eq!(content.as_deref(), Some("hello"));
        assert!(files.file_exists("demo", "notes.md").await.unwrap());
    }

    #[tokio::test]
    async fn load_missing_file_is_none() {
        let tmp = TempDir::new().unwrap();
        let (_, files) = repos(tmp.path());
        assert_eq!(files.load_file("demo", "absent.md").await.unwrap(), None);
    }

    #[tokio::test]
    async fn list_files_for_unknown_project_is_empty() {
        let tmp = TempDir::new().unwrap();
        let (_, files) = repos(tmp.path());
        assert!(files.list_files("ghost").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_files_sorted() {
        let tmp = TempDir::new().unwrap();
        let (_, files) = repos(tmp.path());
        files.store_file("demo", "b.md", "2").await.unwrap();
        files.store_file("demo", "a.md", "1").await.unwrap();
        assert_eq!(files.list_files("demo").await.unwrap(), vec!["a.md", "b.md"]);
    }

    #[tokio::test]
    async fn traversal_names_are_rejected() {
        let tmp = TempDir::new().unwrap();
        let (projects, files) = repos(tmp.path());

        assert!(matches!(
            files.load_file("..", "passwd").await,
            Err(Error::InvalidSegment { .. })
        ));
        assert!(matches!(
            files.store_file("demo", "../escape", "x").await,
            Err(Error::InvalidSegment { .. })
        ));
        assert!(matches!(
            projects.ensure_project("a/b").await,
            Err(Error::InvalidSegment { .. })
        ));
    }

    #[tokio::test]
    async fn ensure_project_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let (projects, _) = repos(tmp.path());
        projects.ensure_project("demo").await.unwrap();
        projects.ensure_project("demo").await.unwrap();
        assert!(projects.project_exists("demo").await.unwrap());
    }
}
