//! Vertex to face adjacency

use crate::{Face, FaceIndex, VertexIndex};
use std::collections::HashMap;

/// Maps each referenced vertex to the faces using it.
///
/// Face lists are in ascending order and hold each face once, even when a
/// face references the same vertex twice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdjacencyIndex {
    vertex_to_faces: HashMap<VertexIndex, Vec<FaceIndex>>,
}

impl AdjacencyIndex {
    /// Build the index from a face list
    pub fn build(faces: &[Face]) -> Self {
        let mut vertex_to_faces: HashMap<VertexIndex, Vec<FaceIndex>> = HashMap::new();

        for (slot, face) in faces.iter().enumerate() {
            let face_index = FaceIndex::from_slot(slot);

            for &vertex in &face.indices {
                let entry = vertex_to_faces.entry(vertex).or_default();
                if entry.last() != Some(&face_index) {
                    entry.push(face_index);
                }
            }
        }

        Self { vertex_to_faces }
    }

    /// Faces using a vertex, empty if no face references it
    pub fn faces_for_vertex(&self, vertex: VertexIndex) -> &[FaceIndex] {
        self.vertex_to_faces
            .get(&vertex)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of distinct vertices referenced by at least one face
    pub fn len(&self) -> usize {
        self.vertex_to_faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertex_to_faces.is_empty()
    }
}
