//! Core data structures for OBJTool
//!
//! This crate provides the in-memory model of an OBJ document: vertices that
//! keep their source text, faces tagged with material and group, 1-based
//! element indices and a vertex to face adjacency index.

pub mod adjacency;
pub mod error;
pub mod index;
pub mod mesh;
pub mod vertex;

pub use adjacency::*;
pub use error::*;
pub use index::*;
pub use mesh::*;
pub use vertex::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::Point3;
