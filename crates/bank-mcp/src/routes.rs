//! Tool registration table
//!
//! Declares every context-bank tool with its argument schema and wires it
//! to the matching controller over a storage root. Registration order here
//! is the order `tools/list` reports.

use std::path::Path;

use serde_json::json;

use bank_core::factory::{
    make_list_project_files_controller, make_list_projects_controller, make_read_controller,
    make_retrieve_context_controller, make_update_controller, make_write_controller,
};

use crate::adapter::adapt_controller;
use crate::router::McpRouter;
use crate::tools::ToolDescriptor;

/// Build the dispatcher with all six tools registered against `root`.
pub fn build_router(root: &Path) -> McpRouter {
    let mut router = McpRouter::new();

    router.register_tool(
        ToolDescriptor {
            name: "list_projects".to_string(),
            description: "List all projects in the context".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {},
                "required": [],
            }),
        },
        adapt_controller(make_list_projects_controller(root)),
    );

    router.register_tool(
        ToolDescriptor {
            name: "list_project_files".to_string(),
            description: "List all files within a specific project".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "projectName": {
                        "type": "string",
                        "description": "The name of the project",
                    },
                },
                "required": ["projectName"],
            }),
        },
        adapt_controller(make_list_project_files_controller(root)),
    );

    router.register_tool(
        ToolDescriptor {
            name: "context_read".to_string(),
            description: "Read a context file for a specific project".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "projectName": {
                        "type": "string",
                        "description": "The name of the project",
                    },
                    "fileName": {
                        "type": "string",
                        "description": "The name of the file",
                    },
                },
                "required": ["projectName", "fileName"],
            }),
        },
        adapt_controller(make_read_controller(root)),
    );

    router.register_tool(
        ToolDescriptor {
            name: "context_write".to_string(),
            description: "Create a new context file for a specific project".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "projectName": {
                        "type": "string",
                        "description": "The name of the project",
                    },
                    "fileName": {
                        "type": "string",
                        "description": "The name of the file",
                    },
                    "content": {
                        "type": "string",
                        "description": "The content of the file",
                    },
                },
                "required": ["projectName", "fileName", "content"],
            }),
        },
        adapt_controller(make_write_controller(root)),
    );

    router.register_tool(
        ToolDescriptor {
            name: "context_update".to_string(),
            description: "Update an existing context file for a specific project".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "projectName": {
                        "type": "string",
                        "description": "The name of the project",
                    },
                    "fileName": {
                        "type": "string",
                        "description": "The name of the file",
                    },
                    "content": {
                        "type": "string",
                        "description": "The content of the file",
                    },
                },
                "required": ["projectName", "fileName", "content"],
            }),
        },
        adapt_controller(make_update_controller(root)),
    );

    router.register_tool(
        ToolDescriptor {
            name: "context_retrieve".to_string(),
            description: "Retrieve all context files from a project on the server and save them \
                          to local workspace, overriding existing local files"
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "projectName": {
                        "type": "string",
                        "description": "The name of the project to retrieve files from",
                    },
                    "localPath": {
                        "type": "string",
                        "description": "Optional local path where files should be saved. Defaults to './context'",
                    },
                },
                "required": ["projectName"],
            }),
        },
        adapt_controller(make_retrieve_context_controller(root)),
    );

    router
}
