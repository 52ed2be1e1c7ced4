//! list_projects and list_project_files controllers

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use super::{require_str, respond_error};
use crate::http::{ok, Controller, Request, Response};
use crate::usecases::{ListProjectFilesUseCase, ListProjectsUseCase};
use crate::validation::Validator;

/// Enumerate all projects. Takes no parameters.
pub struct ListProjectsController {
    usecase: Arc<dyn ListProjectsUseCase>,
}

impl ListProjectsController {
    pub fn new(usecase: Arc<dyn ListProjectsUseCase>) -> Self {
        Self { usecase }
    }
}

#[async_trait]
impl Controller for ListProjectsController {
    async fn handle(&self, _request: Request) -> Response {
        match self.usecase.list_projects().await {
            Ok(projects) => ok(Value::from(projects)),
            Err(e) => respond_error(e),
        }
    }
}

/// Enumerate the files of one project.
pub struct ListProjectFilesController {
    usecase: Arc<dyn ListProjectFilesUseCase>,
    validator: Box<dyn Validator>,
}

impl ListProjectFilesController {
    pub fn new(usecase: Arc<dyn ListProjectFilesUseCase>, validator: Box<dyn Validator>) -> Self {
        Self { usecase, validator }
    }
}

#[async_trait]
impl Controller for ListProjectFilesController {
    async fn handle(&self, request: Request) -> Response {
        if let Some(message) = self.validator.validate(&request.body) {
            return crate::http::bad_request(message);
        }
        let project = match require_str(&request, "projectName") {
            Ok(p) => p,
            Err(response) => return response,
        };

        match self.usecase.list_project_files(project).await {
            Ok(files) => ok(Value::from(files)),
            Err(e) => respond_error(e),
        }
    }
}
