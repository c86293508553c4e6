use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{ContentType, Document};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// `.txt` uploads, read as UTF-8.
pub struct PlainTextAdapter;

impl PlainTextAdapter {
    fn decode(data: &[u8]) -> String {
        let body = data.strip_prefix(UTF8_BOM).unwrap_or(data);
        // Undecodable bytes become U+FFFD instead of failing the upload.
        String::from_utf8_lossy(body).into_owned()
    }
}

#[async_trait]
impl FileLoader for PlainTextAdapter {
    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, FileLoaderError> {
        if document.content_type != ContentType::Text {
            return Err(FileLoaderError::UnsupportedContentType(
                document.content_type.as_mime().to_string(),
            ));
        }

        let text = Self::decode(data);
        let replaced = text.chars().filter(|c| *c == char::REPLACEMENT_CHARACTER).count();
        if replaced > 0 {
            tracing::warn!(
                filename = %document.filename,
                replaced,
                "Text upload is not valid UTF-8, invalid bytes replaced"
            );
        }

        Ok(text)
    }
}
