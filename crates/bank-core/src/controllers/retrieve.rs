//! context_retrieve controller

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use super::{require_str, respond_error};
use crate::http::{bad_request, ok, Controller, Request, Response};
use crate::usecases::{RetrieveContextParams, RetrieveContextUseCase};
use crate::validation::Validator;

/// Copy a whole project to a local directory and report what happened as a
/// human-readable summary.
pub struct RetrieveContextController {
    usecase: Arc<dyn RetrieveContextUseCase>,
    validator: Box<dyn Validator>,
}

impl RetrieveContextController {
    pub fn new(usecase: Arc<dyn RetrieveContextUseCase>, validator: Box<dyn Validator>) -> Self {
        Self { usecase, validator }
    }
}

#[async_trait]
impl Controller for RetrieveContextController {
    async fn handle(&self, request: Request) -> Response {
        if let Some(message) = self.validator.validate(&request.body) {
            return bad_request(message);
        }
        let project = match require_str(&request, "projectName") {
            Ok(p) => p,
            Err(response) => return response,
        };

        let params = RetrieveContextParams {
            project_name: project.to_string(),
            local_path: request.str_field("localPath").map(str::to_string),
        };

        match self.usecase.retrieve_context(params).await {
            Ok(result) => {
                let error_suffix = match &result.errors {
                    Some(errors) => format!(". {} error(s) occurred", errors.len()),
                    None => String::new(),
                };
                let message = format!(
                    "Retrieved {} file(s) from project {}. {} file(s) written to local directory{}. Files: {}",
                    result.files_retrieved,
                    project,
                    result.files_written.len(),
                    error_suffix,
                    result.files_written.join(", "),
                );
                ok(Value::String(message))
            }
            Err(e) => respond_error(e),
        }
    }
}
