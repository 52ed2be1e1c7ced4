//! Project and file enumeration

use std::sync::Arc;

use async_trait::async_trait;
use bank_fs::{FileRepository, ProjectRepository};

use super::{ListProjectFilesUseCase, ListProjectsUseCase};
use crate::Result;

/// Enumerates the projects under the storage root.
pub struct ListProjects {
    projects: Arc<dyn ProjectRepository>,
}

impl ListProjects {
    pub fn new(projects: Arc<dyn ProjectRepository>) -> Self {
        Self { projects }
    }
}

#[async_trait]
impl ListProjectsUseCase for ListProjects {
    async fn list_projects(&self) -> Result<Vec<String>> {
        Ok(self.projects.list_projects().await?)
    }
}

/// Enumerates the files within one project. An unknown project reads as a
/// project with no files.
pub struct ListProjectFiles {
    files: Arc<dyn FileRepository>,
}

impl ListProjectFiles {
    pub fn new(files: Arc<dyn FileRepository>) -> Self {
        Self { files }
    }
}

#[async_trait]
impl ListProjectFilesUseCase for ListProjectFiles {
    async fn list_project_files(&self, project: &str) -> Result<Vec<String>> {
        Ok(self.files.list_files(project).await?)
    }
}
