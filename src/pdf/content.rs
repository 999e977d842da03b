//! Page content stream editing
//!
//! A page is opened by decoding its content into an operation list, edited by
//! splicing new operations into that list, and closed by encoding the list
//! back into the page's `/Contents`. Content that lopdf cannot decode in full
//! is kept as raw bytes instead, and new blocks are spliced in after the last
//! `ET` keyword so nothing else in the stream is touched.

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use crate::error::{Error, Result};
use crate::pdf::lexer::{after_last_text_object, operator_spans};

/// How an open page's content is held while it is edited
#[derive(Debug)]
pub enum PageContent {
    /// Fully decoded operations, in stream order
    Operations(Vec<Operation>),
    /// Original bytes with new blocks spliced in at `splice_at`
    Raw { bytes: Vec<u8>, splice_at: usize },
}

/// The content of one open page
#[derive(Debug)]
pub struct OpenPage {
    /// Zero-based page index
    pub index: usize,
    /// Page object ID
    pub page_id: ObjectId,
    pub content: PageContent,
}

impl OpenPage {
    /// Read a page's content streams for editing
    ///
    /// Pages with several content streams are read as one concatenated sequence.
    pub fn load(doc: &Document, index: usize, page_id: ObjectId) -> Result<Self> {
        let bytes = doc.get_page_content(page_id)?;
        let content = read_content(bytes).map_err(|offset| Error::MalformedContent { index, offset })?;

        match &content {
            PageContent::Operations(operations) => log::debug!(
                "Opened page {} ({:?}) with {} operations",
                index,
                page_id,
                operations.len()
            ),
            PageContent::Raw { bytes, splice_at } => log::warn!(
                "Page {} content is not fully decodable; editing {} raw bytes, inserting at byte {}",
                index,
                bytes.len(),
                splice_at
            ),
        }

        Ok(Self { index, page_id, content })
    }

    /// Decoded operations, or `None` when the page is held as raw bytes
    pub fn operations(&self) -> Option<&[Operation]> {
        match &self.content {
            PageContent::Operations(operations) => Some(operations),
            PageContent::Raw { .. } => None,
        }
    }

    /// Splice `new` operations in after the last text object
    pub fn insert(&mut self, new: Vec<Operation>) -> Result<()> {
        match &mut self.content {
            PageContent::Operations(operations) => {
                let at = insertion_index(operations);
                log::debug!("Inserting {} operations at {} on page {}", new.len(), at, self.index);
                operations.splice(at..at, new);
            }
            PageContent::Raw { bytes, splice_at } => {
                let mut block = vec![b'\n'];
                block.extend(Content { operations: new }.encode()?);
                block.push(b'\n');
                log::debug!("Inserting {} bytes at {} on page {}", block.len(), splice_at, self.index);
                let at = *splice_at;
                *splice_at += block.len();
                bytes.splice(at..at, block);
            }
        }
        Ok(())
    }

    /// Store the edited content as the page's content
    pub fn store(self, doc: &mut Document) -> Result<()> {
        let bytes = match self.content {
            PageContent::Operations(operations) => Content { operations }.encode()?,
            PageContent::Raw { bytes, .. } => bytes,
        };
        log::debug!("Closing page {} with {} content bytes", self.index, bytes.len());
        write_page_content(doc, self.page_id, bytes)
    }
}

/// Decode raw content bytes, falling back to raw splicing
///
/// Blank content is an empty sequence. The decode is only trusted when it
/// produced one operation per operator keyword in the bytes; lopdf stops
/// quietly at tokens it cannot parse. `Err` holds the offset of a string or
/// inline image that never ends, where not even the last `ET` can be found.
fn read_content(bytes: Vec<u8>) -> std::result::Result<PageContent, usize> {
    if bytes.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(PageContent::Operations(Vec::new()));
    }

    let spans = operator_spans(&bytes)?;
    match Content::decode(&bytes) {
        Ok(content) if content.operations.len() == spans.len() => {
            Ok(PageContent::Operations(content.operations))
        }
        _ => {
            let splice_at = after_last_text_object(&bytes, &spans);
            Ok(PageContent::Raw { bytes, splice_at })
        }
    }
}

/// Position right after the last `ET`, or the start of the stream if there is none
///
/// New text lands after every existing text object but ahead of any drawing
/// that follows the final one.
pub fn insertion_index(operations: &[Operation]) -> usize {
    operations
        .iter()
        .rposition(|op| op.operator == "ET")
        .map_or(0, |i| i + 1)
}

/// Whether any page other than `page_id` draws from the stream `content_id`
fn shared_with_other_pages(doc: &Document, page_id: ObjectId, content_id: ObjectId) -> bool {
    doc.get_pages()
        .into_values()
        .filter(|id| *id != page_id)
        .any(|id| match doc.get_dictionary(id).and_then(|page| page.get(b"Contents")) {
            Ok(Object::Reference(other)) => *other == content_id,
            Ok(Object::Array(streams)) => streams
                .iter()
                .any(|stream| stream.as_reference().ok() == Some(content_id)),
            _ => false,
        })
}

/// Replace a page's content with `bytes`
///
/// A page with a single referenced stream that no other page uses has that
/// stream rewritten in place. Any other layout gets a fresh stream object as
/// its `/Contents`.
fn write_page_content(doc: &mut Document, page_id: ObjectId, bytes: Vec<u8>) -> Result<()> {
    let existing = match doc.get_dictionary(page_id)?.get(b"Contents") {
        Ok(Object::Reference(id)) => Some(*id),
        Ok(Object::Array(arr)) if arr.len() == 1 => arr[0].as_reference().ok(),
        _ => None,
    };

    if let Some(content_id) = existing {
        if shared_with_other_pages(doc, page_id, content_id) {
            log::debug!("Content stream {:?} is shared; page {:?} gets its own", content_id, page_id);
        } else if let Ok(Object::Stream(stream)) = doc.get_object_mut(content_id) {
            stream.set_plain_content(bytes);
            return Ok(());
        }
    }

    let content_id = doc.add_object(Stream::new(Dictionary::new(), bytes));
    doc.get_dictionary_mut(page_id)?
        .set("Contents", Object::Reference(content_id));

    Ok(())
}
