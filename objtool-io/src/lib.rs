//! I/O operations for OBJTool meshes
//!
//! This crate reads and writes the OBJ subset OBJTool works with. Vertex lines
//! are written back from their source text, so saving a loaded mesh never
//! changes the precision of untouched coordinates.

pub mod obj;

pub use obj::{ObjReader, ObjWriteOptions, ObjWriter};

use objtool_core::{Mesh, Result};
use std::path::Path;

/// Trait for reading meshes from files
pub trait MeshReader {
    fn read_mesh<P: AsRef<Path>>(path: P) -> Result<Mesh>;
}

/// Trait for writing meshes to files
pub trait MeshWriter {
    fn write_mesh<P: AsRef<Path>>(mesh: &Mesh, path: P) -> Result<()>;
}

/// Read a mesh from an OBJ file
pub fn read_mesh<P: AsRef<Path>>(path: P) -> Result<Mesh> {
    ObjReader::read_mesh(path)
}

/// Write a mesh to an OBJ file with the default header
pub fn write_mesh<P: AsRef<Path>>(mesh: &Mesh, path: P) -> Result<()> {
    ObjWriter::write_mesh(mesh, path)
}

#[cfg(test)]
mod tests;
