//! PDF Quick Text Library
//!
//! Places text onto existing PDF pages by editing the page content streams
//! directly instead of re-rendering the page. This library provides
//! functionality to:
//! - Open one page at a time and decode its content stream
//! - Convert inch or centimeter positions into PDF points
//! - Register any of the 14 standard fonts in a page's resources
//! - Splice self-contained text objects into the page and write it back
//!
//! # Example
//!
//! ```no_run
//! use pdf_quicktext::{TextSession, DEFAULT_FONT, DEFAULT_FONT_SIZE};
//! use std::path::Path;
//!
//! let mut session = TextSession::load(Path::new("invoice.pdf"))?;
//! session.edit_page(0, |page| {
//!     page.add_text("PAID", 6.5, 1.0, 18.0, "helveticabold")?;
//!     page.add_text_cm("2026-10-18", 16.5, 3.5, DEFAULT_FONT_SIZE, DEFAULT_FONT)
//! })?;
//! session.save(Path::new("invoice-paid.pdf"))?;
//! # Ok::<(), pdf_quicktext::Error>(())
//! ```

pub mod error;
pub mod font;
pub mod layout;
pub mod pdf;
pub mod session;

// Re-export commonly used items
pub use error::{Error, Result};
pub use font::StandardFont;
pub use layout::{Length, MediaBox, Unit};
pub use session::{TextSession, DEFAULT_FONT, DEFAULT_FONT_SIZE};
