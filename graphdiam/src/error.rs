//! Error types for graph construction and edge-list loading.

use std::path::PathBuf;

use thiserror::Error;

use crate::graph::Vertex;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{}:{line}: expected two whitespace-separated vertex names", .path.display())]
    MalformedLine { path: PathBuf, line: usize },

    #[error("vertex {vertex} out of range for graph with {nvertices} vertices")]
    VertexOutOfRange { vertex: Vertex, nvertices: usize },
}
