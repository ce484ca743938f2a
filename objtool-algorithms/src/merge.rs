//! Merging data from a corresponding mesh

use objtool_core::{Mesh, Result, Vertex, VertexIndex};
use tracing::{debug, info};

/// Copy into `base` the vertices of every `other` face with `material`.
///
/// Faces are not copied: since both meshes share their numbering, replacing
/// the vertices they reference is enough. Returns `false`, leaving `base`
/// untouched, when `material` is empty or no face of `other` uses it.
pub fn merge_faces_by_material(base: &mut Mesh, other: &Mesh, material: &str) -> Result<bool> {
    if material.is_empty() {
        return Ok(false);
    }

    let faces = other.faces_by_material(material);
    if faces.is_empty() {
        debug!("No faces with material '{}'", material);
        return Ok(false);
    }

    // resolve everything first so a bad reference leaves base untouched
    let mut replacements: Vec<(VertexIndex, Vertex)> = Vec::new();
    for &face in &faces {
        for &vertex in &other.face(face)?.indices {
            base.vertex(vertex)?;
            replacements.push((vertex, other.vertex(vertex)?.clone()));
        }
    }

    for (vertex, replacement) in replacements {
        base.replace_vertex(vertex, replacement)?;
    }

    info!("Merged {} faces with material '{}'", faces.len(), material);

    Ok(true)
}

/// Copy the face materials of `other` onto the corresponding faces of `base`.
///
/// Faces of `other` without a material are ignored. When `base` has no
/// document material it takes the one of `other`. Returns `true` if any face
/// changed material.
pub fn add_materials_from(base: &mut Mesh, other: &Mesh) -> Result<bool> {
    let changes: Vec<_> = other
        .indexed_faces()
        .zip(base.faces())
        .filter(|((_, theirs), ours)| !theirs.material.is_empty() && theirs.material != ours.material)
        .map(|((index, theirs), _)| (index, theirs.material.clone()))
        .collect();

    for (face, material) in &changes {
        base.set_face_material(*face, material)?;
    }

    if base.material.is_none() {
        base.material = other.material.clone();
    }

    info!("Copied materials onto {} faces", changes.len());

    Ok(!changes.is_empty())
}
