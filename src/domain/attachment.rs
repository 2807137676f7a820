use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

#[derive(Debug, thiserror::Error)]
pub enum AttachmentError {
    /// A file with the same name is already attached to this message.
    #[error("file is already attached: {name}")]
    Duplicate { name: String },

    /// The file name could not be derived from the given path.
    #[error("path has no usable file name: {path}")]
    NoFileName { path: String },

    /// Reading the file contents failed.
    #[error("failed to read attachment {name}: {source}")]
    Read {
        name: String,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// File name → base64 content, as sent in `attachment` and `inline_image`.
///
/// Files are read fully into memory; no size limit is applied here.
pub struct Attachments(BTreeMap<String, String>);

impl Attachments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `reader` to the end and store its base64 encoding under `name`.
    ///
    /// Fails with [`AttachmentError::Duplicate`] without touching the reader if
    /// `name` is already present.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        mut reader: impl Read,
    ) -> Result<(), AttachmentError> {
        let name = name.into();
        if self.0.contains_key(&name) {
            return Err(AttachmentError::Duplicate { name });
        }

        let mut buffer = Vec::new();
        if let Err(source) = reader.read_to_end(&mut buffer) {
            return Err(AttachmentError::Read { name, source });
        }

        let encoded = STANDARD.encode(&buffer);
        tracing::debug!(name = %name, bytes = buffer.len(), "encoded attachment");
        self.0.insert(name, encoded);
        Ok(())
    }

    /// Open `path` and attach it under its file name. Returns that name.
    pub fn add_path(&mut self, path: impl AsRef<Path>) -> Result<String, AttachmentError> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_owned)
            .ok_or_else(|| AttachmentError::NoFileName {
                path: path.display().to_string(),
            })?;

        if self.0.contains_key(&name) {
            return Err(AttachmentError::Duplicate { name });
        }

        let file = File::open(path).map_err(|source| AttachmentError::Read {
            name: name.clone(),
            source,
        })?;
        self.add(name.clone(), file)?;
        Ok(name)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(name, data)| (name.as_str(), data.as_str()))
    }

    pub(crate) fn as_map(&self) -> &BTreeMap<String, String> {
        &self.0
    }
}
