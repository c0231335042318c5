//! Media introspection helpers
//!
//! Documents carry their declared attributes inside the raw TL object; this
//! module extracts the few fields the processor cares about.

use grammers_client::grammers_tl_types as tl;
use grammers_client::types::Media;

/// Declared attributes of a document attachment
#[derive(Debug, Clone)]
pub struct DocumentInfo {
    /// Server-side document identifier
    pub id: i64,
    /// Declared MIME type, when non-empty
    pub mime_type: Option<String>,
    /// Declared filename attribute, when present
    pub file_name: Option<String>,
}

/// Extract document attributes from a media payload.
///
/// Returns `None` for non-document media (inline photos, stickers, ...),
/// which the service does not handle.
pub fn document_info(media: &Media) -> Option<DocumentInfo> {
    let doc_media = match media {
        Media::Document(doc) => doc,
        _ => return None,
    };

    let document = doc_media.raw.document.clone()?;
    let document = match document {
        tl::enums::Document::Document(doc) => doc,
        tl::enums::Document::Empty(_) => return None,
    };

    let file_name = document.attributes.iter().find_map(|attr| match attr {
        tl::enums::DocumentAttribute::Filename(name) if !name.file_name.is_empty() => {
            Some(name.file_name.clone())
        }
        _ => None,
    });

    let mime_type = if document.mime_type.is_empty() {
        None
    } else {
        Some(document.mime_type.clone())
    };

    Some(DocumentInfo {
        id: document.id,
        mime_type,
        file_name,
    })
}
