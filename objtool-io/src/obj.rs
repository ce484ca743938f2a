//! OBJ format support
//!
//! Only the records OBJTool works with are understood: `v`, `f`, `usemtl`, `o`
//! and `g`. Everything else (comments, `vt`, `vn`, `s`, `mtllib`) is skipped on
//! read and not written back.

use crate::{MeshReader, MeshWriter};
use objtool_core::{Coordinates, Error, Face, Mesh, Result, Vertex, VertexIndex};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{debug, warn};

/// Characters stripped from the end of every record
const LINE_TRAILER: &[char] = &['\n', '\r', '\t', ' '];

pub struct ObjReader;
pub struct ObjWriter;

/// Options for writing OBJ files
#[derive(Debug, Clone)]
pub struct ObjWriteOptions {
    /// Text of the comment line opening the file
    pub header: String,
}

impl Default for ObjWriteOptions {
    fn default() -> Self {
        Self {
            header: format!("OBJTool v{} File", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ObjWriteOptions {
    /// Replace the header comment
    pub fn with_header<S: Into<String>>(mut self, header: S) -> Self {
        self.header = header.into();
        self
    }
}

/// Tags in effect while reading, set by the last matching record
#[derive(Debug, Default)]
struct ParseState {
    material: String,
    group: String,
    object: String,
    line: usize,
    skipped_vertices: usize,
}

impl ObjReader {
    /// Read a mesh from any buffered source
    pub fn read_from<R: BufRead>(mut reader: R) -> Result<Mesh> {
        let mut mesh = Mesh::new();
        let mut state = ParseState::default();
        let mut buffer = Vec::new();

        loop {
            buffer.clear();
            if reader.read_until(b'\n', &mut buffer)? == 0 {
                break;
            }
            state.line += 1;

            // blank or near-empty lines
            if buffer.len() < 3 {
                continue;
            }

            let line = String::from_utf8_lossy(&buffer);
            let Some(header_end) = line.find(' ') else {
                continue;
            };

            let header = &line[..header_end];
            let content = line[header_end + 1..].trim_end_matches(LINE_TRAILER);

            Self::parse_record(&mut mesh, &mut state, header, content)?;
        }

        if state.skipped_vertices > 0 {
            warn!("Skipped {} malformed vertex lines", state.skipped_vertices);
        }

        debug!(
            "OBJ parsed: {} lines, {} vertices, {} faces",
            state.line,
            mesh.vertex_count(),
            mesh.face_count()
        );

        Ok(mesh)
    }

    fn parse_record(
        mesh: &mut Mesh,
        state: &mut ParseState,
        header: &str,
        content: &str,
    ) -> Result<()> {
        match header {
            "v" => match Coordinates::parse(content) {
                Some(coordinates) => {
                    mesh.push_vertex(Vertex::new(coordinates, state.object.as_str()));
                }
                None => {
                    debug!("Line {}: malformed vertex '{}'", state.line, content);
                    state.skipped_vertices += 1;
                }
            },
            "f" => {
                let indices = Self::parse_face_indices(content, state.line)?;
                if indices.is_empty() {
                    debug!("Line {}: face without vertices", state.line);
                } else {
                    mesh.push_face(Face::new(
                        indices,
                        state.material.as_str(),
                        state.group.as_str(),
                    ));
                }
            }
            "usemtl" => {
                if mesh.material.is_none() && !content.is_empty() {
                    mesh.material = Some(content.to_string());
                }
                state.material = content.to_string();
            }
            "o" => {
                if mesh.name.is_none() && !content.is_empty() {
                    mesh.name = Some(content.to_string());
                }
                state.object = content.to_string();
            }
            "g" => {
                state.group = content.to_string();
            }
            _ => {}
        }

        Ok(())
    }

    /// Parse the references of an `f` record.
    ///
    /// `idx/tex/norm` references keep only `idx`; a reference that is not a
    /// positive integer fails the whole read.
    fn parse_face_indices(content: &str, line: usize) -> Result<Vec<VertexIndex>> {
        content
            .split_whitespace()
            .map(|token| {
                let vertex = token.split_once('/').map_or(token, |(vertex, _)| vertex);
                vertex
                    .parse::<usize>()
                    .ok()
                    .and_then(VertexIndex::new)
                    .ok_or_else(|| Error::InvalidFaceReference {
                        line,
                        token: token.to_string(),
                    })
            })
            .collect()
    }
}

impl MeshReader for ObjReader {
    fn read_mesh<P: AsRef<Path>>(path: P) -> Result<Mesh> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;

        let mesh = Self::read_from(BufReader::new(file))?;
        debug!(
            "Loaded {:?}: {} vertices, {} faces",
            path,
            mesh.vertex_count(),
            mesh.face_count()
        );

        Ok(mesh)
    }
}

impl ObjWriter {
    /// Write a mesh to any sink
    pub fn write_to<W: Write>(mesh: &Mesh, writer: &mut W, options: &ObjWriteOptions) -> Result<()> {
        writeln!(writer, "# {}", options.header)?;

        let mut current_object = "";
        for vertex in mesh.vertices() {
            if !vertex.object.is_empty() && vertex.object != current_object {
                writeln!(writer, "o {}", vertex.object)?;
                current_object = vertex.object.as_str();
            }

            // source text, never reformatted
            writeln!(writer, "v {}", vertex.coordinates.text())?;
        }

        writeln!(writer, "usemtl {}", mesh.material.as_deref().unwrap_or_default())?;
        writeln!(writer, "s off")?;

        let mut current_material = "";
        for face in mesh.faces() {
            if !face.material.is_empty() && face.material != current_material {
                writeln!(writer, "usemtl {}", face.material)?;
                current_material = face.material.as_str();
            }

            writeln!(writer, "f {}", face)?;
        }

        Ok(())
    }

    /// Write a mesh to a file with explicit options
    pub fn write_mesh_with_options<P: AsRef<Path>>(
        mesh: &Mesh,
        path: P,
        options: &ObjWriteOptions,
    ) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| Error::FileCreate {
            path: path.to_path_buf(),
            source,
        })?;

        let mut writer = BufWriter::new(file);
        Self::write_to(mesh, &mut writer, options)?;
        writer.flush()?;

        debug!(
            "Saved {:?}: {} vertices, {} faces",
            path,
            mesh.vertex_count(),
            mesh.face_count()
        );

        Ok(())
    }
}

impl MeshWriter for ObjWriter {
    fn write_mesh<P: AsRef<Path>>(mesh: &Mesh, path: P) -> Result<()> {
        Self::write_mesh_with_options(mesh, path, &ObjWriteOptions::default())
    }
}
