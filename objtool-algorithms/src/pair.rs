//! Corresponding mesh pairs

use crate::{diff, merge};
use objtool_core::{Error, Mesh, Result, VertexIndex};

/// Two meshes with matching vertex and face counts.
///
/// Element `i` of `base` and element `i` of `other` are the same element in two
/// variants of a model. Construction checks the counts, so the operations
/// below never compare unrelated elements. Mutating operations modify `base`.
#[derive(Debug)]
pub struct MeshPair<'a> {
    base: &'a mut Mesh,
    other: &'a Mesh,
}

impl<'a> MeshPair<'a> {
    pub fn new(base: &'a mut Mesh, other: &'a Mesh) -> Result<Self> {
        if !base.has_same_vertex_count(other) {
            return Err(Error::VertexCountMismatch {
                base: base.vertex_count(),
                other: other.vertex_count(),
            });
        }

        if !base.has_same_face_count(other) {
            return Err(Error::FaceCountMismatch {
                base: base.face_count(),
                other: other.face_count(),
            });
        }

        Ok(Self { base, other })
    }

    pub fn base(&self) -> &Mesh {
        self.base
    }

    pub fn other(&self) -> &Mesh {
        self.other
    }

    /// Build the adjacency index of `base`, used by every face lookup
    pub fn build_adjacency(&mut self) {
        self.base.build_adjacency();
    }

    pub fn different_vertices(&self) -> Vec<VertexIndex> {
        diff::different_vertices(self.base, self.other)
    }

    pub fn differences(&self) -> Result<Mesh> {
        diff::differences(self.base, self.other)
    }

    pub fn colorize_differences(&mut self, material: &str) -> Result<bool> {
        diff::colorize_differences(self.base, self.other, material)
    }

    pub fn merge_faces_by_material(&mut self, material: &str) -> Result<bool> {
        merge::merge_faces_by_material(self.base, self.other, material)
    }

    pub fn add_materials_from(&mut self) -> Result<bool> {
        merge::add_materials_from(self.base, self.other)
    }
}
