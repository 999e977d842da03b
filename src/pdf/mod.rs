//! PDF page editing built on lopdf

pub mod content;
pub mod instructions;
pub mod lexer;
pub mod page;
pub mod resources;

// Re-export commonly used items
pub use content::{insertion_index, OpenPage, PageContent};
pub use instructions::{text_operations, TextPlacement};
pub use page::{media_box, page_count, page_id};
pub use resources::ensure_font;
