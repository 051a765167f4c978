//! Reader for the line-oriented mesh format:
//!
//! ```text
//! <num_meshes>
//! <R> <G> <B>
//! <num_faces>
//! v <x> <y> <z>      (three lines per face)
//! ...
//! ```
//!
//! Blank lines and lines starting with `#` are ignored. Any structural problem aborts
//! the whole parse; no partial mesh list is ever returned.

use crate::core::color::Color;
use crate::core::geometry::Vertex;
use crate::error::{Error, Result};
use crate::scene::face::Face;
use crate::scene::mesh::Mesh;
use log::{debug, info, warn};
use std::fs;
use std::path::Path;
use std::str::Lines;

/// Upper bound on up-front allocation driven by counts read from the file.
const MAX_PREALLOCATION: usize = 4096;

/// Loads every mesh from a file on disk.
pub fn load_meshes<P: AsRef<Path>>(path: P) -> Result<Vec<Mesh>> {
    let path = path.as_ref();
    info!("Loading mesh file: {}", path.display());

    let content = fs::read_to_string(path)?;
    let meshes = parse_meshes(&content)?;

    info!(
        "Mesh file loaded. Meshes: {}, Faces: {}",
        meshes.len(),
        meshes.iter().map(Mesh::len).sum::<usize>()
    );
    Ok(meshes)
}

/// Parses meshes from the text of a mesh file.
///
/// Each mesh's faces are painted with its header color via [`Mesh::set_color`].
pub fn parse_meshes(input: &str) -> Result<Vec<Mesh>> {
    let mut lines = DataLines::new(input);

    let num_meshes = lines.next_count("mesh count")?;
    let mut meshes = Vec::with_capacity(num_meshes.min(MAX_PREALLOCATION));

    for mesh_index in 0..num_meshes {
        let (line_no, header) = lines.next_line("RGB header")?;
        let color = parse_rgb(line_no, header)?;

        let num_faces = lines.next_count("face count")?;
        let mut mesh = Mesh::with_capacity(num_faces.min(MAX_PREALLOCATION));

        for _ in 0..num_faces {
            let mut vertices = [Vertex::origin(); 3];
            for vertex in &mut vertices {
                let (line_no, line) = lines.next_line("face vertex")?;
                *vertex = parse_vertex(line_no, line)?;
            }
            mesh.add(Face::from_vertices(vertices, Color::BLACK));
        }

        mesh.set_color(color);
        debug!("Mesh {mesh_index}: {} faces, color {color}", mesh.len());
        meshes.push(mesh);
    }

    if let Some((line_no, _)) = lines.next_data() {
        warn!("Ignoring trailing data starting at line {line_no}");
    }

    Ok(meshes)
}

fn format_error(line: usize, message: impl Into<String>) -> Error {
    Error::MeshFormat {
        line,
        message: message.into(),
    }
}

/// Walks the meaningful lines of the input, tracking 1-based line numbers.
struct DataLines<'a> {
    lines: Lines<'a>,
    line_no: usize,
}

impl<'a> DataLines<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            lines: input.lines(),
            line_no: 0,
        }
    }

    fn next_data(&mut self) -> Option<(usize, &'a str)> {
        for raw in self.lines.by_ref() {
            self.line_no += 1;
            let line = raw.trim();
            if !line.is_empty() && !line.starts_with('#') {
                return Some((self.line_no, line));
            }
        }
        None
    }

    fn next_line(&mut self, expected: &str) -> Result<(usize, &'a str)> {
        self.next_data().ok_or_else(|| {
            format_error(
                self.line_no + 1,
                format!("unexpected end of file, expected {expected}"),
            )
        })
    }

    fn next_count(&mut self, expected: &str) -> Result<usize> {
        let (line_no, line) = self.next_line(expected)?;
        line.parse()
            .map_err(|_| format_error(line_no, format!("expected {expected}, got {line:?}")))
    }
}

fn parse_rgb(line_no: usize, line: &str) -> Result<Color> {
    let parts = line
        .split_whitespace()
        .map(|token| {
            token.parse::<i32>().map_err(|_| {
                format_error(line_no, format!("expected integer RGB component, got {token:?}"))
            })
        })
        .collect::<Result<Vec<i32>>>()?;

    let [r, g, b] = parts[..] else {
        return Err(format_error(
            line_no,
            format!("expected 3 ints for RGB, got {}", parts.len()),
        ));
    };
    Color::new(r, g, b).map_err(|e| format_error(line_no, e.to_string()))
}

fn parse_vertex(line_no: usize, line: &str) -> Result<Vertex> {
    let mut tokens = line.split_whitespace();
    if tokens.next() != Some("v") {
        return Err(format_error(
            line_no,
            format!("expected line starting with 'v', got {line:?}"),
        ));
    }

    // Only the first three coordinates count; anything after them is ignored.
    let coords = tokens
        .by_ref()
        .take(3)
        .map(|token| {
            token.parse::<f64>().map_err(|_| {
                format_error(line_no, format!("expected vertex coordinate, got {token:?}"))
            })
        })
        .collect::<Result<Vec<f64>>>()?;

    let [x, y, z] = coords[..] else {
        return Err(format_error(
            line_no,
            format!("expected 3 vertex coordinates, got {}", coords.len()),
        ));
    };
    if tokens.next().is_some() {
        debug!("Line {line_no}: ignoring extra tokens after vertex coordinates");
    }
    Ok(Vertex::new(x, y, z))
}
