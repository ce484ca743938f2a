//! Mesh data structures and functionality

use crate::adjacency::AdjacencyIndex;
use crate::error::{Error, Result};
use crate::index::{FaceIndex, VertexIndex};
use crate::vertex::Vertex;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use tracing::debug;

/// A polygon referencing vertices by their 1-based index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Face {
    pub indices: Vec<VertexIndex>,
    /// Material of the last `usemtl` record before this face, empty if none
    pub material: String,
    /// Group of the last `g` record before this face, never written back
    pub group: String,
}

impl Face {
    pub fn new(
        indices: Vec<VertexIndex>,
        material: impl Into<String>,
        group: impl Into<String>,
    ) -> Self {
        Self {
            indices,
            material: material.into(),
            group: group.into(),
        }
    }

    /// Check if the face references a vertex
    pub fn contains(&self, vertex: VertexIndex) -> bool {
        self.indices.contains(&vertex)
    }
}

impl fmt::Display for Face {
    /// Space separated vertex indices, the body of an `f` record
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.indices.iter().join(" "))
    }
}

/// An OBJ document: ordered vertices and faces plus document level tags.
///
/// Vertices and faces are addressed through [`VertexIndex`] and [`FaceIndex`].
/// The adjacency index is derived from the face list; it is dropped whenever
/// the face list changes in a way that can alter vertex references.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    /// First `o` name seen while loading
    pub name: Option<String>,
    /// First `usemtl` name seen while loading
    pub material: Option<String>,
    vertices: Vec<Vertex>,
    faces: Vec<Face>,
    adjacency: Option<AdjacencyIndex>,
}

/// Counts describing a mesh
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeshStats {
    pub vertices: usize,
    pub faces: usize,
    pub materials: usize,
    pub objects: usize,
}

impl Mesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mesh from vertices and faces
    pub fn from_vertices_and_faces(vertices: Vec<Vertex>, faces: Vec<Face>) -> Self {
        Self {
            vertices,
            faces,
            ..Self::default()
        }
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of faces
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if the mesh is empty
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.faces.is_empty()
    }

    pub fn has_same_vertex_count(&self, other: &Mesh) -> bool {
        self.vertex_count() == other.vertex_count()
    }

    pub fn has_same_face_count(&self, other: &Mesh) -> bool {
        self.face_count() == other.face_count()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Vertices paired with their index
    pub fn indexed_vertices(&self) -> impl Iterator<Item = (VertexIndex, &Vertex)> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .map(|(slot, vertex)| (VertexIndex::from_slot(slot), vertex))
    }

    /// Faces paired with their index
    pub fn indexed_faces(&self) -> impl Iterator<Item = (FaceIndex, &Face)> + '_ {
        self.faces
            .iter()
            .enumerate()
            .map(|(slot, face)| (FaceIndex::from_slot(slot), face))
    }

    pub fn vertex(&self, index: VertexIndex) -> Result<&Vertex> {
        self.vertices
            .get(index.slot())
            .ok_or(Error::VertexOutOfRange {
                index: index.get(),
                count: self.vertices.len(),
            })
    }

    pub fn face(&self, index: FaceIndex) -> Result<&Face> {
        self.faces.get(index.slot()).ok_or(Error::FaceOutOfRange {
            index: index.get(),
            count: self.faces.len(),
        })
    }

    /// Add a vertex, returning its index
    pub fn push_vertex(&mut self, vertex: Vertex) -> VertexIndex {
        self.vertices.push(vertex);
        VertexIndex::from_slot(self.vertices.len() - 1)
    }

    /// Add a face, returning its index. Drops the adjacency index.
    pub fn push_face(&mut self, face: Face) -> FaceIndex {
        self.invalidate_adjacency();
        self.faces.push(face);
        FaceIndex::from_slot(self.faces.len() - 1)
    }

    /// Overwrite a vertex in place
    pub fn replace_vertex(&mut self, index: VertexIndex, vertex: Vertex) -> Result<()> {
        let count = self.vertices.len();
        let slot = self
            .vertices
            .get_mut(index.slot())
            .ok_or(Error::VertexOutOfRange {
                index: index.get(),
                count,
            })?;
        *slot = vertex;
        Ok(())
    }

    /// Change the material of a face. Vertex references are untouched so the
    /// adjacency index stays valid.
    pub fn set_face_material(&mut self, index: FaceIndex, material: &str) -> Result<()> {
        let count = self.faces.len();
        let face = self
            .faces
            .get_mut(index.slot())
            .ok_or(Error::FaceOutOfRange {
                index: index.get(),
                count,
            })?;
        if face.material != material {
            face.material = material.to_string();
        }
        Ok(())
    }

    /// Faces with the given material, in ascending order
    pub fn faces_by_material(&self, material: &str) -> Vec<FaceIndex> {
        self.indexed_faces()
            .filter(|(_, face)| face.material == material)
            .map(|(index, _)| index)
            .collect()
    }

    /// Build the vertex to face index used by [`Mesh::faces_using_vertex`].
    ///
    /// Does nothing if the index already exists.
    pub fn build_adjacency(&mut self) {
        if self.adjacency.is_some() {
            return;
        }

        let index = AdjacencyIndex::build(&self.faces);
        debug!(
            "Built adjacency index: {} vertices referenced by {} faces",
            index.len(),
            self.faces.len()
        );
        self.adjacency = Some(index);
    }

    pub fn adjacency(&self) -> Option<&AdjacencyIndex> {
        self.adjacency.as_ref()
    }

    pub fn has_adjacency(&self) -> bool {
        self.adjacency.is_some()
    }

    /// Drop the adjacency index, the next [`Mesh::build_adjacency`] rebuilds it
    pub fn invalidate_adjacency(&mut self) {
        if self.adjacency.take().is_some() {
            debug!("Adjacency index invalidated by face list change");
        }
    }

    /// Faces referencing a vertex, in ascending order.
    ///
    /// Uses the adjacency index when it has been built and scans every face
    /// otherwise; both give the same answer.
    pub fn faces_using_vertex(&self, vertex: VertexIndex) -> Vec<FaceIndex> {
        match &self.adjacency {
            Some(index) => index.faces_for_vertex(vertex).to_vec(),
            None => self
                .indexed_faces()
                .filter(|(_, face)| face.contains(vertex))
                .map(|(index, _)| index)
                .collect(),
        }
    }

    pub fn stats(&self) -> MeshStats {
        let materials: BTreeSet<&str> = self
            .faces
            .iter()
            .map(|face| face.material.as_str())
            .filter(|material| !material.is_empty())
            .collect();
        let objects: BTreeSet<&str> = self
            .vertices
            .iter()
            .map(|vertex| vertex.object.as_str())
            .filter(|object| !object.is_empty())
            .collect();

        MeshStats {
            vertices: self.vertices.len(),
            faces: self.faces.len(),
            materials: materials.len(),
            objects: objects.len(),
        }
    }

    /// Clear the mesh
    pub fn clear(&mut self) {
        self.name = None;
        self.material = None;
        self.vertices.clear();
        self.faces.clear();
        self.adjacency = None;
    }
}

impl fmt::Display for MeshStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} vertices, {} faces, {} materials, {} objects",
            self.vertices, self.faces, self.materials, self.objects
        )
    }
}
