//! Single operation dispatch

use crate::MeshPair;
use objtool_core::{Error, Mesh, Result};
use tracing::{info, warn};

/// One OBJTool run: what to do with the input mesh
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Save the input again, keeping only geometry, materials and objects
    Simplify,
    /// Keep only what moved between the input and the second mesh
    Diff,
    /// Recolor the input faces that moved in the second mesh
    ColorDiff { material: String },
    /// Take from the second mesh the vertices of faces with a material
    Merge { material: String },
    /// Copy the face materials of the second mesh
    AddMaterials,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Simplify => "simplify",
            Operation::Diff => "diff",
            Operation::ColorDiff { .. } => "colordiff",
            Operation::Merge { .. } => "merge",
            Operation::AddMaterials => "addmaterials",
        }
    }

    pub fn needs_second_input(&self) -> bool {
        !matches!(self, Operation::Simplify)
    }

    /// Run the operation and return the mesh to save.
    ///
    /// `use_adjacency` builds the adjacency index of `base` before any face
    /// lookup; results are the same without it.
    pub fn apply(&self, mut base: Mesh, other: Option<&Mesh>, use_adjacency: bool) -> Result<Mesh> {
        if !self.needs_second_input() {
            return Ok(base);
        }

        let other = other.ok_or(Error::MissingSecondInput {
            operation: self.name(),
        })?;

        let mut pair = MeshPair::new(&mut base, other)?;
        if use_adjacency {
            pair.build_adjacency();
        }

        match self {
            Operation::Diff => return pair.differences(),
            Operation::ColorDiff { material } => {
                if !pair.colorize_differences(material)? {
                    warn!("No different vertices, nothing to colorize");
                }
            }
            Operation::Merge { material } => {
                if !pair.merge_faces_by_material(material)? {
                    return Err(Error::MaterialNotFound {
                        material: material.clone(),
                    });
                }
            }
            Operation::AddMaterials => {
                if !pair.add_materials_from()? {
                    info!("Materials already match, nothing copied");
                }
            }
            Operation::Simplify => {}
        }

        Ok(base)
    }
}
