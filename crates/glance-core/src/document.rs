//! In-memory document staged for upload.

use std::fmt;
use std::sync::Arc;

use crate::enums::DocumentKind;
use crate::errors::CoreError;

/// A user-selected file whose media type passed the allow-list.
///
/// The bytes are shared so the same staged file can be submitted again
/// (retry, different length) without copying.
#[derive(Clone, PartialEq, Eq)]
pub struct Document {
    pub name: String,
    pub kind: DocumentKind,
    pub bytes: Arc<[u8]>,
}

impl Document {
    /// Validate `media_type` and build a document.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the media type is not PDF, DOC, or DOCX.
    pub fn new(
        name: impl Into<String>,
        media_type: &str,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Result<Self, CoreError> {
        let kind = DocumentKind::from_media_type(media_type).ok_or_else(|| {
            CoreError::Validation(format!("unsupported media type '{media_type}'"))
        })?;
        Ok(Self {
            name: name.into(),
            kind,
            bytes: bytes.into(),
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("len", &self.bytes.len())
            .finish()
    }
}
