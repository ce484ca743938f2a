//! Differencing algorithms
//!
//! Both meshes are expected to share their topology: vertex `i` of one mesh is
//! the same vertex as vertex `i` of the other, only possibly moved.

use objtool_core::{Face, Mesh, Result, VertexIndex};
use std::collections::HashMap;
use tracing::{debug, info};

/// Vertices whose position differs between `base` and `other`, ascending.
///
/// Only the common prefix is compared when the vertex counts differ.
pub fn different_vertices(base: &Mesh, other: &Mesh) -> Vec<VertexIndex> {
    base.indexed_vertices()
        .zip(other.vertices())
        .filter(|((_, a), b)| !a.is_close(b))
        .map(|((index, _), _)| index)
        .collect()
}

/// Build a mesh holding only what changed between `base` and `other`.
///
/// Every moved vertex is emitted with the position it has in `other`, followed
/// by each `base` face using it, rewritten against the new vertex numbering.
/// Neighbouring vertices of those faces are pulled in as needed. A face
/// touching several moved vertices is emitted once per moved vertex, and a
/// moved vertex already pulled in as a neighbour is emitted again.
///
/// Faces are looked up through `base`'s adjacency index when it exists.
pub fn differences(base: &Mesh, other: &Mesh) -> Result<Mesh> {
    let mut result = Mesh::new();
    result.name = other.name.clone();
    result.material = other.material.clone();

    // old index -> new index
    let mut remap: HashMap<VertexIndex, VertexIndex> = HashMap::new();

    let moved = different_vertices(base, other);
    debug!("{} vertices differ", moved.len());

    for old_vertex in moved {
        let new_vertex = result.push_vertex(other.vertex(old_vertex)?.clone());
        remap.insert(old_vertex, new_vertex);

        for face_index in base.faces_using_vertex(old_vertex) {
            let face = base.face(face_index)?;
            let mut indices = Vec::with_capacity(face.indices.len());

            for &old_reference in &face.indices {
                let new_reference = match remap.get(&old_reference) {
                    Some(&index) => index,
                    None => {
                        let index = result.push_vertex(other.vertex(old_reference)?.clone());
                        remap.insert(old_reference, index);
                        index
                    }
                };
                indices.push(new_reference);
            }

            result.push_face(Face::new(indices, face.material.as_str(), ""));
        }
    }

    info!(
        "Differences: {} vertices, {} faces",
        result.vertex_count(),
        result.face_count()
    );

    Ok(result)
}

/// Give `material` to every `base` face using a vertex that moved in `other`.
///
/// Returns `false`, leaving `base` untouched, when no vertex moved.
pub fn colorize_differences(base: &mut Mesh, other: &Mesh, material: &str) -> Result<bool> {
    let moved = different_vertices(base, other);
    if moved.is_empty() {
        return Ok(false);
    }

    let mut recolored = 0;
    for vertex in &moved {
        for face in base.faces_using_vertex(*vertex) {
            base.set_face_material(face, material)?;
            recolored += 1;
        }
    }

    info!(
        "Colorized {} face references around {} moved vertices with '{}'",
        recolored,
        moved.len(),
        material
    );

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use objtool_core::{FaceIndex, Point3d, Vertex};

    fn vi(i: usize) -> VertexIndex {
        VertexIndex::new(i).unwrap()
    }

    fn fi(i: usize) -> FaceIndex {
        FaceIndex::new(i).unwrap()
    }

    /// Two triangles sharing the edge 2-3
    fn strip(offsets: &[(usize, f64)]) -> Mesh {
        let positions = [
            Point3d::new(0.0, 0.0, 0.0),
            Point3d::new(1.0, 0.0, 0.0),
            Point3d::new(0.0, 1.0, 0.0),
            Point3d::new(1.0, 1.0, 0.0),
        ];

        let mut mesh = Mesh::new();
        mesh.name = Some("strip".to_string());
        mesh.material = Some("skin".to_string());
        for (slot, position) in positions.iter().enumerate() {
            let mut position = *position;
            for &(vertex, offset) in offsets {
                if vertex == slot + 1 {
                    position.z += offset;
                }
            }
            mesh.push_vertex(Vertex::from_position(position));
        }
        mesh.push_face(Face::new(vec![vi(1), vi(2), vi(3)], "skin", "front"));
        mesh.push_face(Face::new(vec![vi(2), vi(4), vi(3)], "lips", "front"));
        mesh
    }

    #[test]
    fn test_identical_meshes_have_no_differences() {
        let mesh = strip(&[]);
        assert!(different_vertices(&mesh, &mesh).is_empty());

        let diff = differences(&mesh, &mesh).unwrap();
        assert_eq!(diff.vertex_count(), 0);
        assert_eq!(diff.face_count(), 0);
    }

    #[test]
    fn test_tolerance_is_respected() {
        let base = strip(&[]);
        let other = strip(&[(1, 0.0005), (4, 0.002)]);
        assert_eq!(different_vertices(&base, &other), vec![vi(4)]);
    }

    #[test]
    fn test_prefix_only_when_counts_differ() {
        let base = strip(&[(4, 1.0)]);
        let mut other = strip(&[]);
        other.push_vertex(Vertex::from_position(Point3d::new(5.0, 5.0, 5.0)));

        assert_eq!(different_vertices(&base, &other), vec![vi(4)]);
    }

    #[test]
    fn test_differences_single_moved_vertex() {
        let base = strip(&[]);
        let other = strip(&[(4, 0.5)]);

        let diff = differences(&base, &other).unwrap();

        // vertex 4, then 2 and 3 pulled in by face 2
        assert_eq!(diff.vertex_count(), 3);
        assert_eq!(diff.vertices()[0], other.vertices()[3]);
        assert_eq!(diff.vertices()[1], other.vertices()[1]);
        assert_eq!(diff.vertices()[2], other.vertices()[2]);

        assert_eq!(diff.face_count(), 1);
        let face = &diff.faces()[0];
        assert_eq!(face.indices, vec![vi(2), vi(1), vi(3)]);
        assert_eq!(face.material, "lips");
        assert!(face.group.is_empty());

        assert_eq!(diff.name.as_deref(), Some("strip"));
        assert_eq!(diff.material.as_deref(), Some("skin"));
    }

    #[test]
    fn test_differences_repeats_shared_faces() {
        let base = strip(&[]);
        let other = strip(&[(2, 0.5), (3, 0.5)]);

        let diff = differences(&base, &other).unwrap();

        // vertex 2: faces 1 and 2 -> vertices 2, 1, 3, 4
        // vertex 3: re-emitted, faces 1 and 2 again
        assert_eq!(diff.vertex_count(), 5);
        assert_eq!(diff.face_count(), 4);
        assert_eq!(diff.faces()[0].indices, vec![vi(2), vi(1), vi(3)]);
        assert_eq!(diff.faces()[1].indices, vec![vi(1), vi(4), vi(3)]);
        assert_eq!(diff.faces()[2].indices, vec![vi(2), vi(1), vi(5)]);
        assert_eq!(diff.faces()[3].indices, vec![vi(1), vi(4), vi(5)]);
    }

    #[test]
    fn test_differences_same_with_and_without_adjacency() {
        let mut base = strip(&[]);
        let other = strip(&[(1, 0.1), (4, -0.1)]);

        let scanned = differences(&base, &other).unwrap();
        base.build_adjacency();
        let indexed = differences(&base, &other).unwrap();

        assert_eq!(scanned.vertices(), indexed.vertices());
        assert_eq!(scanned.faces(), indexed.faces());
    }

    #[test]
    fn test_differences_out_of_range_reference_fails() {
        let mut base = strip(&[]);
        base.push_face(Face::new(vec![vi(4), vi(9)], "", ""));
        let other = strip(&[(4, 1.0)]);

        assert!(differences(&base, &other).is_err());
    }

    #[test]
    fn test_colorize_differences() {
        let mut base = strip(&[]);
        let other = strip(&[(1, 0.01)]);

        assert!(colorize_differences(&mut base, &other, "eyes").unwrap());
        assert_eq!(base.face(fi(1)).unwrap().material, "eyes");
        assert_eq!(base.face(fi(2)).unwrap().material, "lips");
    }

    #[test]
    fn test_colorize_without_differences() {
        let mut base = strip(&[]);
        let other = strip(&[]);

        assert!(!colorize_differences(&mut base, &other, "eyes").unwrap());
        assert_eq!(base.faces_by_material("eyes"), vec![]);
    }
}
