//! Page lookup and page-tree attribute resolution

use lopdf::{Dictionary, Document, Object, ObjectId};
use crate::error::{Error, Result};
use crate::layout::MediaBox;

/// Maximum number of `/Parent` hops followed when resolving inherited attributes
const MAX_TREE_DEPTH: usize = 32;

/// Resolve a zero-based page index to its page object ID
pub fn page_id(doc: &Document, index: usize) -> Result<ObjectId> {
    let pages = doc.get_pages();
    let count = pages.len();
    pages
        .into_values()
        .nth(index)
        .ok_or(Error::PageOutOfRange { index, count })
}

/// Number of pages reachable from the document's page tree
pub fn page_count(doc: &Document) -> usize {
    doc.get_pages().len()
}

/// Find an attribute on the page or the nearest ancestor `/Pages` node
///
/// `/MediaBox` and `/Resources` are inheritable, so a page that omits them
/// uses whatever its parent chain declares.
pub fn inherited_attribute<'a>(
    doc: &'a Document,
    page_id: ObjectId,
    key: &[u8],
) -> Result<Option<&'a Object>> {
    let mut node: &Dictionary = doc.get_dictionary(page_id)?;

    for _ in 0..MAX_TREE_DEPTH {
        if let Ok(value) = node.get(key) {
            return Ok(Some(value));
        }
        match node.get(b"Parent") {
            Ok(Object::Reference(parent_id)) => node = doc.get_dictionary(*parent_id)?,
            _ => return Ok(None),
        }
    }

    Ok(None)
}

/// Read a page's media box, falling back to US Letter when none is declared
pub fn media_box(doc: &Document, page_id: ObjectId) -> Result<MediaBox> {
    let media_box_obj = match inherited_attribute(doc, page_id, b"MediaBox")? {
        Some(obj) => obj,
        None => return Ok(MediaBox::letter()),
    };

    // Resolve indirect reference if needed
    let array = match media_box_obj {
        Object::Array(arr) => arr,
        Object::Reference(id) => doc.get_object(*id)?.as_array()?,
        other => other.as_array()?,
    };

    let values: Vec<f64> = array
        .iter()
        .filter_map(|o| o.as_float().ok())
        .map(f64::from)
        .collect();

    if values.len() != 4 {
        log::warn!(
            "Page {:?} has a malformed MediaBox ({} numeric entries), assuming US Letter",
            page_id,
            values.len()
        );
        return Ok(MediaBox::letter());
    }

    Ok(MediaBox::new(values[0], values[1], values[2], values[3]))
}
