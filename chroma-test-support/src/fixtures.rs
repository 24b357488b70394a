//! Writers for the plain-text inputs the chroma tools consume.

use std::{
    fmt::Write as _,
    fs, io,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

/// Renders an edge list with its header line.
///
/// # Examples
/// ```
/// use chroma_test_support::fixtures::edge_list_text;
///
/// assert_eq!(edge_list_text(&[(1, 2, 1)]), "node1\tnode2\tweight\n1\t2\t1\n");
/// ```
#[must_use]
pub fn edge_list_text(edges: &[(u64, u64, u32)]) -> String {
    let mut text = String::from("node1\tnode2\tweight\n");
    for (n1, n2, weight) in edges {
        let _ = writeln!(text, "{n1}\t{n2}\t{weight}");
    }
    text
}

/// Renders a k-mer list, appending the color id when one is given.
///
/// # Examples
/// ```
/// use chroma_test_support::fixtures::kmer_list_text;
///
/// assert_eq!(kmer_list_text(&[("ACG", None), ("CGT", Some(4))]), "ACG\nCGT 4\n");
/// ```
#[must_use]
pub fn kmer_list_text(entries: &[(&str, Option<u64>)]) -> String {
    let mut text = String::new();
    for (kmer, color) in entries {
        match color {
            Some(color) => {
                let _ = writeln!(text, "{kmer} {color}");
            }
            None => {
                let _ = writeln!(text, "{kmer}");
            }
        }
    }
    text
}

/// Temporary directory that is removed when dropped.
#[derive(Debug)]
pub struct FixtureDir {
    dir: TempDir,
}

impl FixtureDir {
    /// Creates an empty directory.
    ///
    /// # Errors
    /// Returns any error raised while creating the directory.
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    /// Root of the directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of `name` inside the directory, whether or not it exists.
    #[must_use]
    pub fn child(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Writes `contents` to `name` and returns its path.
    ///
    /// # Errors
    /// Returns any error raised while writing the file.
    pub fn write(&self, name: &str, contents: &str) -> io::Result<PathBuf> {
        let path = self.child(name);
        fs::write(&path, contents)?;
        Ok(path)
    }

    /// Writes an edge list rendered by [`edge_list_text`].
    ///
    /// # Errors
    /// Returns any error raised while writing the file.
    pub fn write_edge_list(&self, name: &str, edges: &[(u64, u64, u32)]) -> io::Result<PathBuf> {
        self.write(name, &edge_list_text(edges))
    }

    /// Writes a k-mer list rendered by [`kmer_list_text`].
    ///
    /// # Errors
    /// Returns any error raised while writing the file.
    pub fn write_kmer_list(&self, name: &str, entries: &[(&str, Option<u64>)]) -> io::Result<PathBuf> {
        self.write(name, &kmer_list_text(entries))
    }
}
