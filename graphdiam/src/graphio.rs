//! Edge-list reader and writer.
//!
//! Each line holds two whitespace-separated vertex names, one undirected
//! edge per line. Blank lines and lines starting with `#` are skipped.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use bstr::ByteSlice;
use rayon::iter::ParallelIterator;
use serde_json::json;

use crate::error::Error;
use crate::symbols::GraphBuilder;
use crate::Scanner;

type NamedEdge = (Vec<u8>, Vec<u8>);

fn parse_line(path: &Path, line: usize, bytes: &[u8]) -> Result<Option<NamedEdge>, Error> {
    let mut fields = bytes.fields();
    let a = match fields.next() {
        None => return Ok(None),
        Some(a) if a.starts_with(b"#") => return Ok(None),
        Some(a) => a,
    };
    match (fields.next(), fields.next()) {
        (Some(b), None) => Ok(Some((a.to_vec(), b.to_vec()))),
        _ => Err(Error::MalformedLine {
            path: path.to_owned(),
            line,
        }),
    }
}

/// Reads every file behind the scanner into a graph builder.
///
/// Files are parsed in parallel; names are interned afterwards in path
/// order, so vertex ids do not depend on thread scheduling.
pub fn read_edges(scanner: &Scanner) -> Result<GraphBuilder, Error> {
    let parse_start = Instant::now();
    let per_file: Vec<Vec<NamedEdge>> = scanner
        .fold(
            |_| Vec::new(),
            |mut edges, path, line, bytes| -> Result<_, Error> {
                if let Some(edge) = parse_line(path, line, bytes)? {
                    edges.push(edge);
                }
                Ok(edges)
            },
        )
        .collect::<Result<_, Error>>()?;
    let parse_time = format!("{:.0?}", Instant::now().duration_since(parse_start));

    let intern_start = Instant::now();
    let nlines: usize = per_file.iter().map(Vec::len).sum();
    let mut builder = GraphBuilder::new(nlines);
    for (a, b) in per_file.iter().flatten() {
        builder.add_edge(a, b);
    }
    let intern_time = format!("{:.0?}", Instant::now().duration_since(intern_start));

    println!(
        "{}",
        json!({
            "nfiles": scanner.paths().len(),
            "nlines": nlines,
            "parse_time": parse_time,
            "intern_time": intern_time,
        })
    );

    Ok(builder)
}

/// Writes one `a b` line per edge.
pub fn write_edges<'a, I>(path: &Path, edges: I) -> Result<(), Error>
where
    I: IntoIterator<Item = (&'a [u8], &'a [u8])>,
{
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    for (a, b) in edges {
        writer.write_all(a)?;
        writer.write_all(b" ")?;
        writer.write_all(b)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}
