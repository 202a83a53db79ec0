//! Pre-trained word vectors loaded from a word2vec artifact.

use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use memmap2::Mmap;
use tracing::{debug, info, warn};

use super::error::VectorSpaceError;

/// On-disk layout of the word-vector artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorFormat {
    /// `"<vocab> <dim>"` header, then `token v1 .. vD` per line.
    Text,
    /// Same header, then `token ` followed by `dim` little-endian `f32`s per word.
    Binary,
}

impl VectorFormat {
    /// Infers the format from a file extension (`.bin` is binary, anything else text).
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("bin") => Self::Binary,
            _ => Self::Text,
        }
    }
}

impl std::str::FromStr for VectorFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "binary" | "bin" => Ok(Self::Binary),
            _ => Err(format!("Unknown vector format: {}", s)),
        }
    }
}

#[derive(Debug, Clone)]
/// Loader settings for [`VectorSpace::load`].
pub struct VectorSpaceConfig {
    /// Path to the artifact.
    pub path: PathBuf,
    /// Explicit format; `None` infers from the extension.
    pub format: Option<VectorFormat>,
    /// If set, loading fails unless the artifact has exactly this dimension.
    pub expected_dim: Option<usize>,
}

impl VectorSpaceConfig {
    /// Creates a config for `path` with an inferred format.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            format: None,
            expected_dim: None,
        }
    }

    /// Forces a specific artifact format.
    pub fn format(mut self, format: VectorFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Requires the artifact to have dimension `dim`.
    pub fn expect_dim(mut self, dim: usize) -> Self {
        self.expected_dim = Some(dim);
        self
    }

    /// Returns the explicit format, or the one implied by the file extension.
    pub fn resolved_format(&self) -> VectorFormat {
        self.format
            .unwrap_or_else(|| VectorFormat::from_path(&self.path))
    }
}

/// Immutable token → vector mapping with a fixed dimension.
///
/// Vectors are stored row-major in one contiguous buffer. Share it behind an
/// `Arc`; a reload means constructing a new instance.
pub struct VectorSpace {
    name: String,
    dim: usize,
    index: HashMap<String, usize>,
    data: Vec<f32>,
}

impl std::fmt::Debug for VectorSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VectorSpace")
            .field("name", &self.name)
            .field("dim", &self.dim)
            .field("vocab_size", &self.index.len())
            .finish()
    }
}

impl VectorSpace {
    /// Loads a vector space from the artifact described by `config`.
    pub fn load(config: &VectorSpaceConfig) -> Result<Self, VectorSpaceError> {
        let path = &config.path;
        if !path.exists() {
            return Err(VectorSpaceError::NotFound { path: path.clone() });
        }

        let format = config.resolved_format();
        debug!(path = %path.display(), ?format, "Loading vector space");

        let mut builder = match format {
            VectorFormat::Text => parse_text(path)?,
            VectorFormat::Binary => parse_binary(path)?,
        };
        builder.name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let space = builder.finish();

        if let Some(expected) = config.expected_dim
            && expected != space.dim
        {
            return Err(VectorSpaceError::DimensionMismatch {
                expected,
                actual: space.dim,
            });
        }

        info!(
            name = %space.name,
            vocab_size = space.len(),
            dim = space.dim,
            "Vector space loaded"
        );

        Ok(space)
    }

    /// Builds an in-memory vector space from `(token, vector)` pairs.
    pub fn from_vectors<I, S>(dim: usize, entries: I) -> Result<Self, VectorSpaceError>
    where
        I: IntoIterator<Item = (S, Vec<f32>)>,
        S: Into<String>,
    {
        if dim == 0 {
            return Err(VectorSpaceError::Invalid {
                reason: "dimension must be greater than zero".to_string(),
            });
        }

        let mut builder = SpaceBuilder::new("in-memory", dim);
        for (token, vector) in entries {
            let token = token.into();
            if vector.len() != dim {
                return Err(VectorSpaceError::DimensionMismatch {
                    expected: dim,
                    actual: vector.len(),
                });
            }
            builder.push(token, &vector);
        }

        Ok(builder.finish())
    }

    /// Artifact name (file stem) or `"in-memory"`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Vector dimension `D`.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of vocabulary entries.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.index.contains_key(token)
    }

    /// Returns the vector for `token`, if it is in the vocabulary.
    pub fn get(&self, token: &str) -> Option<&[f32]> {
        self.index.get(token).map(|&row| {
            let start = row * self.dim;
            &self.data[start..start + self.dim]
        })
    }
}

struct SpaceBuilder {
    name: String,
    dim: usize,
    index: HashMap<String, usize>,
    data: Vec<f32>,
    rows: usize,
}

impl SpaceBuilder {
    fn new(name: &str, dim: usize) -> Self {
        Self {
            name: name.to_string(),
            dim,
            index: HashMap::new(),
            data: Vec::new(),
            rows: 0,
        }
    }

    /// Reserves room for `rows` rows. Callers bound `rows` by what the file
    /// can hold, never by the header alone.
    fn with_capacity(dim: usize, rows: usize) -> Self {
        let mut builder = Self::new("", dim);
        builder.index.reserve(rows);
        builder.data.reserve(rows.saturating_mul(dim));
        builder
    }

    /// Appends a row. The first occurrence of a token wins.
    fn push(&mut self, token: String, vector: &[f32]) {
        self.rows += 1;
        if self.index.contains_key(&token) {
            warn!(token = %token, "Duplicate token in vector space; keeping first vector");
            return;
        }
        let row = self.index.len();
        self.index.insert(token, row);
        self.data.extend_from_slice(vector);
    }

    fn finish(self) -> VectorSpace {
        VectorSpace {
            name: self.name,
            dim: self.dim,
            index: self.index,
            data: self.data,
        }
    }
}

fn parse_header(path: &Path, line: &str) -> Result<(usize, usize), VectorSpaceError> {
    let mut parts = line.split_whitespace();
    let (Some(vocab), Some(dim), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(VectorSpaceError::corrupt(
            path,
            format!("expected '<vocab> <dim>' header, got '{}'", line.trim()),
        ));
    };

    let vocab: usize = vocab
        .parse()
        .map_err(|_| VectorSpaceError::corrupt(path, format!("invalid vocab size '{vocab}'")))?;
    let dim: usize = dim
        .parse()
        .map_err(|_| VectorSpaceError::corrupt(path, format!("invalid dimension '{dim}'")))?;

    if dim == 0 {
        return Err(VectorSpaceError::corrupt(path, "dimension is zero"));
    }

    Ok((vocab, dim))
}

fn read_error(path: &Path, source: std::io::Error) -> VectorSpaceError {
    VectorSpaceError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn parse_text(path: &Path) -> Result<SpaceBuilder, VectorSpaceError> {
    let content = std::fs::read_to_string(path).map_err(|e| read_error(path, e))?;
    let mut lines = content
        .lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty());

    let Some((_, header)) = lines.next() else {
        return Err(VectorSpaceError::corrupt(path, "file is empty"));
    };
    let (vocab, dim) = parse_header(path, header)?;

    // A text row spends at least two bytes per component.
    let min_row_bytes = dim.saturating_mul(2);
    let rows = vocab.min(content.len() / min_row_bytes);
    let mut builder = SpaceBuilder::with_capacity(dim, rows);
    let mut vector = Vec::with_capacity(dim.min(content.len()));

    for (line_no, line) in lines {
        let mut parts = line.split_whitespace();
        let Some(token) = parts.next() else {
            continue;
        };

        vector.clear();
        for component in parts {
            let value: f32 = component.parse().map_err(|_| {
                VectorSpaceError::corrupt(
                    path,
                    format!("line {}: non-numeric component '{component}'", line_no + 1),
                )
            })?;
            if !value.is_finite() {
                return Err(VectorSpaceError::corrupt(
                    path,
                    format!("line {}: non-finite component '{component}'", line_no + 1),
                ));
            }
            vector.push(value);
        }

        if vector.len() != dim {
            return Err(VectorSpaceError::corrupt(
                path,
                format!(
                    "line {}: token '{token}' has {} components, expected {dim}",
                    line_no + 1,
                    vector.len()
                ),
            ));
        }

        builder.push(token.to_string(), &vector);
    }

    check_row_count(path, vocab, builder.rows)?;
    Ok(builder)
}

fn parse_binary(path: &Path) -> Result<SpaceBuilder, VectorSpaceError> {
    let file = File::open(path).map_err(|e| read_error(path, e))?;
    let len = file.metadata().map_err(|e| read_error(path, e))?.len();
    if len == 0 {
        return Err(VectorSpaceError::corrupt(path, "file is empty"));
    }

    // SAFETY: the mapping is read-only and dropped before this function returns;
    // the artifact is not expected to be modified while the process starts up.
    let mmap = unsafe { Mmap::map(&file) }.map_err(|e| read_error(path, e))?;
    let bytes: &[u8] = &mmap;

    let header_end = bytes
        .iter()
        .position(|&b| b == b'\n')
        .ok_or_else(|| VectorSpaceError::corrupt(path, "missing header line"))?;
    let header = std::str::from_utf8(&bytes[..header_end])
        .map_err(|_| VectorSpaceError::corrupt(path, "header is not valid UTF-8"))?;
    let (vocab, dim) = parse_header(path, header)?;

    let row_bytes = dim
        .checked_mul(std::mem::size_of::<f32>())
        .ok_or_else(|| VectorSpaceError::corrupt(path, format!("dimension {dim} is too large")))?;
    let rows = vocab.min(bytes.len() / row_bytes.saturating_add(1));
    let mut builder = SpaceBuilder::with_capacity(dim, rows);
    let mut vector = Vec::with_capacity(dim.min(bytes.len() / std::mem::size_of::<f32>()));
    let mut pos = header_end + 1;

    for word_index in 0..vocab {
        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }

        let token_end = bytes[pos..]
            .iter()
            .position(|&b| b == b' ')
            .map(|offset| pos + offset)
            .ok_or_else(|| {
                VectorSpaceError::corrupt(path, format!("word {word_index}: truncated token"))
            })?;
        let token = std::str::from_utf8(&bytes[pos..token_end]).map_err(|_| {
            VectorSpaceError::corrupt(path, format!("word {word_index}: token is not valid UTF-8"))
        })?;

        let start = token_end + 1;
        let end = start.saturating_add(row_bytes);
        if end > bytes.len() {
            return Err(VectorSpaceError::corrupt(
                path,
                format!("word {word_index} ('{token}'): truncated vector"),
            ));
        }

        vector.clear();
        vector.extend(
            bytes[start..end]
                .chunks_exact(4)
                .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]])),
        );
        if vector.iter().any(|v| !v.is_finite()) {
            return Err(VectorSpaceError::corrupt(
                path,
                format!("word {word_index} ('{token}'): non-finite component"),
            ));
        }

        builder.push(token.to_string(), &vector);
        pos = end;
    }

    check_row_count(path, vocab, builder.rows)?;
    Ok(builder)
}

fn check_row_count(path: &Path, declared: usize, actual: usize) -> Result<(), VectorSpaceError> {
    if declared != actual {
        return Err(VectorSpaceError::VocabularyCount {
            path: path.to_path_buf(),
            declared,
            actual,
        });
    }
    Ok(())
}
