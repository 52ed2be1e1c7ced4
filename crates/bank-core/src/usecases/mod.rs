//! Use cases over the context bank storage
//!
//! One trait per operation so controllers depend only on the operation they
//! serve and tests can substitute fakes per seam.

mod file_ops;
mod listing;
mod retrieve;

pub use file_ops::{ReadFile, UpdateFile, WriteFile};
pub use listing::{ListProjectFiles, ListProjects};
pub use retrieve::RetrieveContext;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

#[async_trait]
pub trait ListProjectsUseCase: Send + Sync {
    async fn list_projects(&self) -> Result<Vec<String>>;
}

#[async_trait]
pub trait ListProjectFilesUseCase: Send + Sync {
    async fn list_project_files(&self, project: &str) -> Result<Vec<String>>;
}

#[async_trait]
pub trait ReadFileUseCase: Send + Sync {
    /// Read one file's content; `None` when it does not exist.
    async fn read_file(&self, project: &str, file: &str) -> Result<Option<String>>;
}

#[async_trait]
pub trait WriteFileUseCase: Send + Sync {
    /// Create a new file. Refuses to clobber an existing one.
    async fn write_file(&self, project: &str, file: &str, content: &str) -> Result<()>;
}

#[async_trait]
pub trait UpdateFileUseCase: Send + Sync {
    /// Overwrite an existing file. The file must already exist.
    async fn update_file(&self, project: &str, file: &str, content: &str) -> Result<()>;
}

/// Parameters for retrieving a whole project to a local directory.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrieveContextParams {
    pub project_name: String,
    /// Defaults to `./context` when absent.
    pub local_path: Option<String>,
}

/// Outcome of a retrieve: how many files the project had, which ones were
/// written locally, and any per-file failures.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrieveContextResult {
    pub files_retrieved: usize,
    pub files_written: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

#[async_trait]
pub trait RetrieveContextUseCase: Send + Sync {
    async fn retrieve_context(
        &self,
        params: RetrieveContextParams,
    ) -> Result<RetrieveContextResult>;
}
