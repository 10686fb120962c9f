//! This module helps us efficiently read from sequences of text files
//! line-by-line, and in parallel.
//!
//! The chief advantage of this over unix utilities is that it
//! can refer to shared structures in common memory between
//! processing threads.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use rayon::iter::{IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator};

const BUFSIZE: usize = 64 * 1024;

/// A `Scanner` provides efficient line-level access to underlying files.
///
/// Outside of that, you're on your own: splitting lines into words is
/// up to the caller.
pub struct Scanner {
    paths: Vec<PathBuf>,
}

impl Scanner {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Fold over the lines in the associated files to this scanner
    /// and combine the results.
    ///
    /// Every file is folded over once, on its own task, and a parallel
    /// iterator over the per-file results is returned in path order once
    /// collected. `fold` sees the file path, the 1-based line number and the
    /// line without its trailing newline; the first error ends that file.
    ///
    /// The `id` function is passed the index of the file getting folded over.
    pub(crate) fn fold<'a, U, E, Id, Fold>(
        &'a self,
        id: Id,
        fold: Fold,
    ) -> impl IndexedParallelIterator<Item = Result<U, E>> + 'a
    where
        U: Send,
        E: From<io::Error> + Send,
        Id: Fn(usize) -> U + Sync + Send + 'a,
        Fold: Fn(U, &Path, usize, &[u8]) -> Result<U, E> + Sync + Send + 'a,
    {
        self.paths.par_iter().enumerate().map(move |(i, path)| -> Result<U, E> {
            let file = File::open(path)?;
            let reader = BufReader::with_capacity(BUFSIZE, file);
            let mut acc = id(i);
            for (lineno, line) in reader.split(b'\n').enumerate() {
                let mut line = line?;
                if line.last() == Some(&b'\r') {
                    line.pop();
                }
                acc = fold(acc, path, lineno + 1, &line)?;
            }
            Ok(acc)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "graphdiam-scanner-{}-{}",
            std::process::id(),
            name
        ));
        let mut file = File::create(&path).expect("create");
        file.write_all(contents.as_bytes()).expect("write");
        path
    }

    #[test]
    fn test_fold_counts_lines_per_file() {
        let a = write_temp("a", "1\n2\n3\n");
        let b = write_temp("b", "x\r\ny");
        let scanner = Scanner::new(vec![a.clone(), b.clone()]);
        let results: Vec<Result<Vec<(usize, Vec<u8>)>, io::Error>> = scanner
            .fold(
                |_| Vec::new(),
                |mut acc, _, lineno, line| {
                    acc.push((lineno, line.to_vec()));
                    Ok(acc)
                },
            )
            .collect();
        let results: Vec<_> = results.into_iter().map(|r| r.expect("read")).collect();
        assert_eq!(results[0].len(), 3);
        assert_eq!(results[1], vec![(1, b"x".to_vec()), (2, b"y".to_vec())]);
        std::fs::remove_file(a).ok();
        std::fs::remove_file(b).ok();
    }

    #[test]
    fn test_fold_missing_file() {
        let scanner = Scanner::new(vec![PathBuf::from("/nonexistent/graphdiam/edges.txt")]);
        let results: Vec<Result<(), io::Error>> =
            scanner.fold(|_| (), |acc, _, _, _| Ok(acc)).collect();
        assert!(results[0].is_err());
    }
}
