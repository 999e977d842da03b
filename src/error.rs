//! Error types for the PDF quick-text library

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the PDF quick-text library
#[derive(Error, Debug)]
pub enum Error {
    /// An operation that needs an open page ran while no page was open
    #[error("A page must be opened prior to this operation")]
    NoPageOpen,

    /// A page was opened while another one was still open
    #[error("Page {index} is already open and must be closed prior to opening a new page")]
    PageAlreadyOpen { index: usize },

    /// Font key is not one of the 14 standard fonts
    #[error("Unknown font: {0:?} is not a standard PDF font key")]
    UnknownFont(String),

    /// Page index past the end of the document
    #[error("Page index {index} out of range (document has {count} pages)")]
    PageOutOfRange { index: usize, count: usize },

    /// Page content has a string or inline image that never ends
    #[error("Page {index} content is malformed at byte {offset}")]
    MalformedContent { index: usize, offset: usize },

    /// The open page is edited as raw bytes and has no decoded operations
    #[error("Page {index} content could not be fully decoded and is edited as raw bytes")]
    RawContent { index: usize },

    /// PDF processing error
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),
}
