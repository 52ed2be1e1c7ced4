//! context_read, context_write, and context_update controllers

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use super::{require_str, respond_error};
use crate::http::{bad_request, ok, Controller, Request, Response};
use crate::usecases::{ReadFileUseCase, UpdateFileUseCase, WriteFileUseCase};
use crate::validation::Validator;

/// Read one file's content.
pub struct ReadController {
    usecase: Arc<dyn ReadFileUseCase>,
    validator: Box<dyn Validator>,
}

impl ReadController {
    pub fn new(usecase: Arc<dyn ReadFileUseCase>, validator: Box<dyn Validator>) -> Self {
        Self { usecase, validator }
    }
}

#[async_trait]
impl Controller for ReadController {
    async fn handle(&self, request: Request) -> Response {
        if let Some(message) = self.validator.validate(&request.body) {
            return bad_request(message);
        }
        let (project, file) = match file_params(&request) {
            Ok(pair) => pair,
            Err(response) => return response,
        };

        match self.usecase.read_file(project, file).await {
            Ok(Some(content)) => ok(Value::String(content)),
            Ok(None) => bad_request(format!("File {file} not found in project {project}")),
            Err(e) => respond_error(e),
        }
    }
}

/// Create a new file. Fails when the file already exists.
pub struct WriteController {
    usecase: Arc<dyn WriteFileUseCase>,
    validator: Box<dyn Validator>,
}

impl WriteController {
    pub fn new(usecase: Arc<dyn WriteFileUseCase>, validator: Box<dyn Validator>) -> Self {
        Self { usecase, validator }
    }
}

#[async_trait]
impl Controller for WriteController {
    async fn handle(&self, request: Request) -> Response {
        if let Some(message) = self.validator.validate(&request.body) {
            return bad_request(message);
        }
        let (project, file) = match file_params(&request) {
            Ok(pair) => pair,
            Err(response) => return response,
        };
        let content = match require_str(&request, "content") {
            Ok(c) => c,
            Err(response) => return response,
        };

        match self.usecase.write_file(project, file, content).await {
            Ok(()) => ok(Value::String(format!(
                "File {file} created successfully in project {project}"
            ))),
            Err(e) => respond_error(e),
        }
    }
}

/// Overwrite an existing file. Fails when the file is missing.
pub struct UpdateController {
    usecase: Arc<dyn UpdateFileUseCase>,
    validator: Box<dyn Validator>,
}

impl UpdateController {
    pub fn new(usecase: Arc<dyn UpdateFileUseCase>, validator: Box<dyn Validator>) -> Self {
        Self { usecase, validator }
    }
}

#[async_trait]
impl Controller for UpdateController {
    async fn handle(&self, request: Request) -> Response {
        if let Some(message) = self.validator.validate(&request.body) {
            return bad_request(message);
        }
        let (project, file) = match file_params(&request) {
            Ok(pair) => pair,
            Err(response) => return response,
        };
        let content = match require_str(&request, "content") {
            Ok(c) => c,
            Err(response) => return response,
        };

        match self.usecase.update_file(project, file, content).await {
            Ok(()) => ok(Value::String(format!(
                "File {file} updated successfully in project {project}"
            ))),
            Err(e) => respond_error(e),
        }
    }
}

fn file_params(request: &Request) -> Result<(&str, &str), Response> {
    let project = require_str(request, "projectName")?;
    let file = require_str(request, "fileName")?;
    Ok((project, file))
}
