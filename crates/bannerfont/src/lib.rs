//! bannerfont: FIGlet banner rendering.
//! Features: `.flf`/`.tlf` parsing (plain or zipped), kerning and smushing,
//! word wrapping, justification and banner post-processing.

mod banner;
mod builder;
mod error;
pub mod font;
mod render;
pub mod repository;
pub mod smush;

pub use banner::Banner;
pub use error::{FontError, ParseError, Result};
pub use font::{FigletFont, Glyph, PrintDirection};
pub use render::{render, resolve_direction, resolve_justify, Direction, Justify, RenderOptions};
pub use repository::FontRepository;
pub use smush::SmushMode;

// Test utilities
pub mod test_support;
