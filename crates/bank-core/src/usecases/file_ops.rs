//! Single-file read, create, and update operations

use std::sync::Arc;

use async_trait::async_trait;
use bank_fs::{FileRepository, ProjectRepository};

use super::{ReadFileUseCase, UpdateFileUseCase, WriteFileUseCase};
use crate::{Error, Result};

pub struct ReadFile {
    files: Arc<dyn FileRepository>,
}

impl ReadFile {
    pub fn new(files: Arc<dyn FileRepository>) -> Self {
        Self { files }
    }
}

#[async_trait]
impl ReadFileUseCase for ReadFile {
    async fn read_file(&self, project: &str, file: &str) -> Result<Option<String>> {
        Ok(self.files.load_file(project, file).await?)
    }
}

/// Creates a new context file. The project directory is created on demand;
/// an existing file with the same name is a caller error.
pub struct WriteFile {
    projects: Arc<dyn ProjectRepository>,
    files: Arc<dyn FileRepository>,
}

impl WriteFile {
    pub fn new(projects: Arc<dyn ProjectRepository>, files: Arc<dyn FileRepository>) -> Self {
        Self { projects, files }
    }
}

#[async_trait]
impl WriteFileUseCase for WriteFile {
    async fn write_file(&self, project: &str, file: &str, content: &str) -> Result<()> {
        if self.files.file_exists(project, file).await? {
            return Err(Error::FileAlreadyExists {
                project: project.to_string(),
                file: file.to_string(),
            });
        }
        self.projects.ensure_project(project).await?;
        self.files.store_file(project, file, content).await?;
        tracing::info!(project, file, "created context file");
        Ok(())
    }
}

/// Overwrites an existing context file. A missing file is a caller error;
/// creation goes through [`WriteFile`].
pub struct UpdateFile {
    files: Arc<dyn FileRepository>,
}

impl UpdateFile {
    pub fn new(files: Arc<dyn FileRepository>) -> Self {
        Self { files }
    }
}

#[async_trait]
impl UpdateFileUseCase for UpdateFile {
    async fn update_file(&self, project: &str, file: &str, content: &str) -> Result<()> {
        if !self.files.file_exists(project, file).await? {
            return Err(Error::FileNotFound {
                project: project.to_string(),
                file: file.to_string(),
            });
        }
        self.files.store_file(project, file, content).await?;
        tracing::info!(project, file, "updated context file");
        Ok(())
    }
}
