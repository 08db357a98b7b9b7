//! Document sources feeding the batch aggregator.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::DocumentError;
use crate::models::config::PdfConfig;
use crate::pdf::{PdfExtractor, PdfProcessor};

/// Anything that can yield the text of one invoice document.
pub trait DocumentSource {
    /// Display name used in logs and errors.
    fn name(&self) -> &str;

    /// Read the full document text.
    fn read_text(&self) -> Result<String, DocumentError>;
}

impl<T: DocumentSource + ?Sized> DocumentSource for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn read_text(&self) -> Result<String, DocumentError> {
        (**self).read_text()
    }
}

impl<T: DocumentSource + ?Sized> DocumentSource for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn read_text(&self) -> Result<String, DocumentError> {
        (**self).read_text()
    }
}

/// Text that has already been extracted.
#[derive(Debug, Clone)]
pub struct TextDocument {
    name: String,
    text: String,
}

impl TextDocument {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

impl DocumentSource for TextDocument {
    fn name(&self) -> &str {
        &self.name
    }

    fn read_text(&self) -> Result<String, DocumentError> {
        Ok(self.text.clone())
    }
}

/// A `.pdf` or `.txt` file on disk.
#[derive(Debug, Clone)]
pub struct FileDocument {
    path: PathBuf,
    name: String,
    config: PdfConfig,
}

impl FileDocument {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self {
            path,
            name,
            config: PdfConfig::default(),
        }
    }

    pub fn with_config(mut self, config: PdfConfig) -> Self {
        self.config = config;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentSource for FileDocument {
    fn name(&self) -> &str {
        &self.name
    }

    fn read_text(&self) -> Result<String, DocumentError> {
        read_document_text(&self.path, &self.config)
    }
}

/// Read the text of a `.pdf` or `.txt` file.
///
/// A PDF whose text layer holds fewer than `min_text_length` non-whitespace
/// characters (typically a scan) is reported as [`DocumentError::NoText`].
pub fn read_document_text(path: &Path, config: &PdfConfig) -> Result<String, DocumentError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "pdf" => {
            let data = fs::read(path)?;
            let mut extractor =
                PdfExtractor::new().with_empty_password_decryption(config.decrypt_empty_password);
            extractor.load(&data)?;

            let text = extractor.extract_text()?;
            let visible = text.chars().filter(|c| !c.is_whitespace()).count();
            debug!(
                "Extracted {} characters from {} ({} pages)",
                visible,
                path.display(),
                extractor.page_count()
            );
            if visible < config.min_text_length.max(1) {
                return Err(DocumentError::NoText);
            }
            Ok(text)
        }
        "txt" => Ok(fs::read_to_string(path)?),
        _ => Err(DocumentError::UnsupportedFormat(path.to_path_buf())),
    }
}
