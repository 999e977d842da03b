//! Text editing session over one PDF document
//!
//! A [`TextSession`] owns the document and at most one open page. Text can
//! only be placed while a page is open; closing the page writes the edited
//! operations back into the document.

use std::path::Path;

use lopdf::Document;

use crate::error::{Error, Result};
use crate::font::StandardFont;
use crate::layout::{to_points, Length, MediaBox, Unit};
use crate::pdf::content::OpenPage;
use crate::pdf::instructions::TextPlacement;
use crate::pdf::{page, resources};

/// Default text size in points
pub const DEFAULT_FONT_SIZE: f32 = 11.0;

/// Default font key
pub const DEFAULT_FONT: &str = "timesroman";

/// Page editing state
#[derive(Debug)]
enum PageState {
    Closed,
    Open(OpenPage),
}

/// Editing session for placing text on the pages of one document
///
/// # Example
///
/// ```no_run
/// use pdf_quicktext::TextSession;
/// use std::path::Path;
///
/// let mut session = TextSession::load(Path::new("form.pdf"))?;
/// session.open_page(0)?;
/// session.add_text("Jane Doe", 1.25, 2.0, 11.0, "helvetica")?;
/// session.close_page()?;
/// session.save(Path::new("filled.pdf"))?;
/// # Ok::<(), pdf_quicktext::Error>(())
/// ```
#[derive(Debug)]
pub struct TextSession {
    doc: Document,
    state: PageState,
}

impl TextSession {
    /// Start a session on an already parsed document
    pub fn new(doc: Document) -> Self {
        Self { doc, state: PageState::Closed }
    }

    /// Parse a document from raw PDF bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(Self::new(Document::load_mem(bytes)?))
    }

    /// Load a document from a file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }
        Ok(Self::new(Document::load(path)?))
    }

    /// Serialize the document to PDF bytes
    ///
    /// Fails with [`Error::PageAlreadyOpen`] while a page is still open, since
    /// its edits have not been written back yet.
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        self.assert_closed()?;
        self.doc.compress();
        let mut bytes = Vec::new();
        self.doc.save_to(&mut bytes)?;
        Ok(bytes)
    }

    /// Save the document to a file
    pub fn save(&mut self, path: &Path) -> Result<()> {
        self.assert_closed()?;
        self.doc.compress();
        self.doc.save(path)?;
        Ok(())
    }

    /// The underlying document
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Give up the session and return the document
    ///
    /// A page that is still open is closed first so its edits are kept.
    pub fn into_document(mut self) -> Result<Document> {
        if self.current_page().is_some() {
            self.close_page()?;
        }
        Ok(self.doc)
    }

    /// Number of pages in the document
    pub fn page_count(&self) -> usize {
        page::page_count(&self.doc)
    }

    /// Index of the open page, if any
    pub fn current_page(&self) -> Option<usize> {
        match &self.state {
            PageState::Open(open) => Some(open.index),
            PageState::Closed => None,
        }
    }

    /// Open a page (zero-based) for editing
    pub fn open_page(&mut self, index: usize) -> Result<()> {
        self.assert_closed()?;
        let page_id = page::page_id(&self.doc, index)?;
        self.state = PageState::Open(OpenPage::load(&self.doc, index, page_id)?);
        Ok(())
    }

    /// Write the open page's operations back into the document and close it
    pub fn close_page(&mut self) -> Result<()> {
        match std::mem::replace(&mut self.state, PageState::Closed) {
            PageState::Open(open) => open.store(&mut self.doc),
            PageState::Closed => Err(Error::NoPageOpen),
        }
    }

    /// Open a page, run `edit`, and close the page again
    ///
    /// The page is closed on every exit path. If `edit` fails its error is
    /// returned even when closing also fails.
    pub fn edit_page<T, F>(&mut self, index: usize, edit: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        self.open_page(index)?;
        let result = edit(self);

        // The closure may already have closed the page itself
        let closed = if self.current_page().is_some() {
            self.close_page()
        } else {
            Ok(())
        };

        match (result, closed) {
            (Ok(value), Ok(())) => Ok(value),
            (Err(e), _) | (Ok(_), Err(e)) => Err(e),
        }
    }

    /// The open page's media box, or US Letter if the page declares none
    pub fn page_dimensions(&self) -> Result<MediaBox> {
        let open = self.open_page_ref()?;
        page::media_box(&self.doc, open.page_id)
    }

    /// Make sure `font` is available in the open page's font resources
    ///
    /// Returns the resource name used to select the font.
    pub fn ensure_font(&mut self, font: &str) -> Result<String> {
        let page_id = self.open_page_ref()?.page_id;
        let font: StandardFont = font.parse()?;
        resources::ensure_font(&mut self.doc, page_id, font)
    }

    /// Add text measured in inches from the top-left corner of the page
    pub fn add_text(
        &mut self,
        text: &str,
        inches_from_left: f64,
        inches_from_top: f64,
        size: f32,
        font: &str,
    ) -> Result<()> {
        self.add_text_in(text, inches_from_left, inches_from_top, Unit::Inches, size, font)
    }

    /// Add text measured in centimeters from the top-left corner of the page
    pub fn add_text_cm(
        &mut self,
        text: &str,
        cm_from_left: f64,
        cm_from_top: f64,
        size: f32,
        font: &str,
    ) -> Result<()> {
        self.add_text_in(text, cm_from_left, cm_from_top, Unit::Centimeters, size, font)
    }

    /// Add text measured from the top-left corner in the given unit
    pub fn add_text_in(
        &mut self,
        text: &str,
        from_left: f64,
        from_top: f64,
        unit: Unit,
        size: f32,
        font: &str,
    ) -> Result<()> {
        let media_box = self.page_dimensions()?;
        let (x, y) = to_points(Length::new(from_left, unit), Length::new(from_top, unit), &media_box);
        self.add_text_points(text, x, y, size, font)
    }

    /// Add text at `(x, y)` in PDF points from the bottom-left corner
    pub fn add_text_points(&mut self, text: &str, x: f64, y: f64, size: f32, font: &str) -> Result<()> {
        self.open_page_ref()?;
        let placement = TextPlacement {
            text: text.to_string(),
            x,
            y,
            size,
            font: font.parse()?,
        };
        self.place(placement)
    }

    /// Register the placement's font and splice its operators into the open page
    pub fn place(&mut self, placement: TextPlacement) -> Result<()> {
        let page_id = self.open_page_ref()?.page_id;
        let font_resource = resources::ensure_font(&mut self.doc, page_id, placement.font)?;
        let operations = placement.to_operations(&font_resource);
        self.open_page_mut()?.insert(operations)
    }

    /// Single check point for operations that need an open page
    fn open_page_ref(&self) -> Result<&OpenPage> {
        match &self.state {
            PageState::Open(open) => Ok(open),
            PageState::Closed => Err(Error::NoPageOpen),
        }
    }

    fn open_page_mut(&mut self) -> Result<&mut OpenPage> {
        match &mut self.state {
            PageState::Open(open) => Ok(open),
            PageState::Closed => Err(Error::NoPageOpen),
        }
    }

    fn assert_closed(&self) -> Result<()> {
        match &self.state {
            PageState::Open(open) => Err(Error::PageAlreadyOpen { index: open.index }),
            PageState::Closed => Ok(()),
        }
    }

    /// Operations of the open page, in stream order
    ///
    /// Fails with `RawContent` when the page could not be fully decoded and
    /// is being edited as raw bytes.
    pub fn operations(&self) -> Result<&[lopdf::content::Operation]> {
        let open = self.open_page_ref()?;
        open.operations().ok_or(Error::RawContent { index: open.index })
    }
}
