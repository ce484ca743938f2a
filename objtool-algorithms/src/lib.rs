//! # OBJTool Algorithms
//!
//! Operations on two corresponding meshes: meshes sharing vertex and face
//! numbering, typically a model and a morphed or re-textured copy of it.
//!
//! - differencing: which vertices moved, and a minimal mesh holding them
//! - colorizing: flag the faces around moved vertices with a material
//! - merging: take the vertices of faces with a material from the other mesh
//! - material copying: take the face materials of the other mesh

pub mod diff;
pub mod merge;
pub mod operation;
pub mod pair;

// Re-export commonly used items
pub use diff::*;
pub use merge::*;
pub use operation::*;
pub use pair::*;
