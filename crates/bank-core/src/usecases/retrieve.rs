//! Batch retrieval of a project's files to a local directory

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;

use super::{
    ListProjectFilesUseCase, ReadFileUseCase, RetrieveContextParams, RetrieveContextResult,
    RetrieveContextUseCase,
};
use crate::{Error, Result};

const DEFAULT_LOCAL_PATH: &str = "./context";

/// Copies every file of a project from the storage root to a local
/// directory, overwriting existing local files. Per-file failures are
/// collected rather than aborting the batch.
pub struct RetrieveContext {
    list_files: Arc<dyn ListProjectFilesUseCase>,
    read_file: Arc<dyn ReadFileUseCase>,
}

impl RetrieveContext {
    pub fn new(
        list_files: Arc<dyn ListProjectFilesUseCase>,
        read_file: Arc<dyn ReadFileUseCase>,
    ) -> Self {
        Self {
            list_files,
            read_file,
        }
    }
}

#[async_trait]
impl RetrieveContextUseCase for RetrieveContext {
    async fn retrieve_context(
        &self,
        params: RetrieveContextParams,
    ) -> Result<RetrieveContextResult> {
        let local_path = params
            .local_path
            .as_deref()
            .unwrap_or(DEFAULT_LOCAL_PATH);
        let local_dir = resolve_local_dir(local_path)?;

        tokio::fs::create_dir_all(&local_dir)
            .await
            .map_err(|e| Error::io(&local_dir, e))?;

        let file_names = self
            .list_files
            .list_project_files(&params.project_name)
            .await?;

        if file_names.is_empty() {
            return Ok(RetrieveContextResult {
                files_retrieved: 0,
                files_written: Vec::new(),
                errors: None,
            });
        }

        let mut files_written = Vec::new();
        let mut errors = Vec::new();

        for file_name in &file_names {
            match self.read_file.read_file(&params.project_name, file_name).await {
                Ok(Some(content)) => {
                    let target = local_dir.join(file_name);
                    match tokio::fs::write(&target, &content).await {
                        Ok(()) => files_written.push(file_name.clone()),
                        Err(e) => {
                            errors.push(format!("Error processing file {file_name}: {e}"))
                        }
                    }
                }
                Ok(None) => {
                    errors.push(format!("Failed to read file {file_name} from server"));
                }
                Err(e) => {
                    errors.push(format!("Error processing file {file_name}: {e}"));
                }
            }
        }

        tracing::info!(
            project = %params.project_name,
            retrieved = file_names.len(),
            written = files_written.len(),
            failed = errors.len(),
            "retrieved project context"
        );

        Ok(RetrieveContextResult {
            files_retrieved: file_names.len(),
            files_written,
            errors: if errors.is_empty() { None } else { Some(errors) },
        })
    }
}

fn resolve_local_dir(local_path: &str) -> Result<PathBuf> {
    let path = PathBuf::from(local_path);
    if path.is_absolute() {
        return Ok(path);
    }
    let cwd = std::env::current_dir().map_err(|e| Error::io(local_path, e))?;
    Ok(cwd.join(path))
}
