//! Filesystem storage layer for Context Bank
//!
//! Projects are directories directly under a configured storage root;
//! context files are regular files inside a project directory. This crate
//! owns the path hygiene for both levels and the repository traits the
//! application layer programs against:
//!
//! ```text
//! <root>/
//!   <project>/
//!     <file>
//! ```
//!
//! All I/O goes through [`ProjectRepository`] and [`FileRepository`] so the
//! use cases above this crate stay testable against in-memory fakes.

pub mod error;
pub mod path;
pub mod repository;

pub use error::{Error, Result};
pub use path::validate_segment;
pub use repository::{
    FileRepository, FsFileRepository, FsProjectRepository, ProjectRepository,
};
