//! Error types for OBJTool

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for OBJTool operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unable to open {path}: {source}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to create {path}: {source}")]
    FileCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid face reference '{token}' on line {line}")]
    InvalidFaceReference { line: usize, token: String },

    #[error("Vertex index {index} is out of range (mesh has {count} vertices)")]
    VertexOutOfRange { index: usize, count: usize },

    #[error("Face index {index} is out of range (mesh has {count} faces)")]
    FaceOutOfRange { index: usize, count: usize },

    #[error("Files don't have the same number of vertices! {base} != {other}")]
    VertexCountMismatch { base: usize, other: usize },

    #[error("Files don't have the same number of faces! {base} != {other}")]
    FaceCountMismatch { base: usize, other: usize },

    #[error("No faces with material '{material}'!")]
    MaterialNotFound { material: String },

    #[error("Operation '{operation}' requires a second input mesh")]
    MissingSecondInput { operation: &'static str },
}

/// Result type alias for OBJTool operations
pub type Result<T> = std::result::Result<T, Error>;
