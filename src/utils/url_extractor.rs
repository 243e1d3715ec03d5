//! Candidate URL extraction from chat messages.

use crate::domain::entities::{EntityKind, MessageEntity};

/// Collects candidate URLs from message entities, in entity order.
///
/// - `url` entities yield the text covered by the span. Offsets are UTF-16
///   code units, so the text is re-encoded before slicing.
/// - `text_link` entities yield their explicit target URL verbatim.
/// - Every other entity kind is ignored.
///
/// Raw text without entities is never scanned heuristically. Spans reaching
/// past the end of the text are skipped.
pub fn extract_urls(text: &str, entities: &[MessageEntity]) -> Vec<String> {
    if entities.is_empty() {
        return Vec::new();
    }

    let units: Vec<u16> = text.encode_utf16().collect();
    let mut urls = Vec::new();

    for entity in entities {
        match entity.kind {
            EntityKind::Url => {
                let span = entity
                    .offset
                    .checked_add(entity.length)
                    .and_then(|end| units.get(entity.offset..end));

                match span {
                    Some(span) => urls.push(String::from_utf16_lossy(span)),
                    None => tracing::warn!(
                        offset = entity.offset,
                        length = entity.length,
                        text_units = units.len(),
                        "url entity outside message text, skipping"
                    ),
                }
            }
            EntityKind::TextLink => match &entity.url {
                Some(url) => urls.push(url.clone()),
                None => tracing::debug!(offset = entity.offset, "text_link entity without url"),
            },
            _ => {}
        }
    }

    urls
}
