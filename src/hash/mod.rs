use blake3::Hasher;
use std::fmt;
use std::fs::{self, File};
use std::io::{BufReader, ErrorKind, Read};
use std::path::{Path, PathBuf};

use crate::error::{HookError, IoContext, Result};

const CHUNK_SIZE: usize = 8192;

/// Deterministic fingerprint of a hooks directory.
///
/// One `name:hexhash` line per file, sorted by name, joined with `\n` and
/// without a trailing newline. An empty directory yields the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Signature(String);

impl Signature {
    pub fn new(raw: impl Into<String>) -> Self {
        Signature(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of files the signature was computed over.
    pub fn entry_count(&self) -> usize {
        self.0.lines().count()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A direct child file of the source directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    pub name: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDigest {
    pub name: String,
    pub hash: String,
    pub size: u64,
}

/// Lists the files of a flat source directory, sorted by name.
///
/// A missing directory has no entries. Subdirectories are rejected with
/// [`HookError::NestedEntry`].
pub fn source_entries(dir: &Path) -> Result<Vec<SourceEntry>> {
    let read_dir = match fs::read_dir(dir) {
        Ok(read_dir) => read_dir,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(HookError::io("read directory", dir, e)),
    };

    let mut entries = Vec::new();
    for entry in read_dir {
        let entry = entry.io_context("read directory", dir)?;
        let path = entry.path();

        // Follows symlinks so a linked script counts as the file it points to.
        let metadata = fs::metadata(&path).io_context("stat", &path)?;
        if metadata.is_dir() {
            return Err(HookError::NestedEntry { path });
        }

        entries.push(SourceEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            path,
        });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

pub fn hash_file(path: &Path) -> Result<FileDigest> {
    let file = File::open(path).io_context("open", path)?;

    let mut reader = BufReader::new(file);
    let mut hasher = Hasher::new();
    let mut buffer = [0; CHUNK_SIZE];
    let mut size = 0u64;

    loop {
        let bytes_read = reader.read(&mut buffer).io_context("read", path)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
        size += bytes_read as u64;
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(FileDigest {
        name,
        hash: hasher.finalize().to_hex().to_string(),
        size,
    })
}

pub fn compute_signature(dir: &Path) -> Result<Signature> {
    signature_of(&source_entries(dir)?)
}

/// Signature over an already listed, name-sorted set of entries.
pub fn signature_of(entries: &[SourceEntry]) -> Result<Signature> {
    let lines = entries
        .iter()
        .map(|entry| -> Result<String> {
            let digest = hash_file(&entry.path)?;
            Ok(format!("{}:{}", entry.name, digest.hash))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Signature(lines.join("\n")))
}
