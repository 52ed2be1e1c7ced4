//! Controller factories
//!
//! Wires each controller to its fs-backed use cases and validators over a
//! storage root. The MCP route table calls these when registering tools.

use std::path::Path;
use std::sync::Arc;

use bank_fs::{FileRepository, FsFileRepository, FsProjectRepository, ProjectRepository};

use crate::controllers::{
    ListProjectFilesController, ListProjectsController, ReadController,
    RetrieveContextController, UpdateController, WriteController,
};
use crate::http::Controller;
use crate::usecases::{
    ListProjectFiles, ListProjects, ReadFile, RetrieveContext, UpdateFile, WriteFile,
};
use crate::validation::{RequiredFieldValidator, Validator, ValidatorComposite};

fn project_repository(root: &Path) -> Arc<dyn ProjectRepository> {
    Arc::new(FsProjectRepository::new(root))
}

fn file_repository(root: &Path) -> Arc<dyn FileRepository> {
    Arc::new(FsFileRepository::new(root))
}

/// Validator for tools taking projectName, fileName, and content.
fn file_content_validator() -> Box<dyn Validator> {
    let mut composite = ValidatorComposite::for_fields(&["projectName", "fileName"]);
    composite = ValidatorComposite::new(vec![
        Box::new(composite),
        Box::new(RequiredFieldValidator::new("content")),
    ]);
    Box::new(composite)
}

pub fn make_list_projects_controller(root: &Path) -> Arc<dyn Controller> {
    Arc::new(ListProjectsController::new(Arc::new(ListProjects::new(
        project_repository(root),
    ))))
}

pub fn make_list_project_files_controller(root: &Path) -> Arc<dyn Controller> {
    Arc::new(ListProjectFilesController::new(
        Arc::new(ListProjectFiles::new(file_repository(root))),
        Box::new(ValidatorComposite::for_fields(&["projectName"])),
    ))
}

pub fn make_read_controller(root: &Path) -> Arc<dyn Controller> {
    Arc::new(ReadController::new(
        Arc::new(ReadFile::new(file_repository(root))),
        Box::new(ValidatorComposite::for_fields(&["projectName", "fileName"])),
    ))
}

pub fn make_write_controller(root: &Path) -> Arc<dyn Controller> {
    Arc::new(WriteController::new(
        Arc::new(WriteFile::new(project_repository(root), file_repository(root))),
        file_content_validator(),
    ))
}

pub fn make_update_controller(root: &Path) -> Arc<dyn Controller> {
    Arc::new(UpdateController::new(
        Arc::new(UpdateFile::new(file_repository(root))),
        file_content_validator(),
    ))
}

pub fn make_retrieve_context_controller(root: &Path) -> Arc<dyn Controller> {
    let files = file_repository(root);
    let usecase = RetrieveContext::new(
        Arc::new(ListProjectFiles::new(files.clone())),
        Arc::new(ReadFile::new(files)),
    );
    Arc::new(RetrieveContextController::new(
        Arc::new(usecase),
        Box::new(ValidatorComposite::for_fields(&["projectName"])),
    ))
}
