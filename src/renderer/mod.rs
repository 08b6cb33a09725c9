pub mod atlas;
pub mod pipeline;
pub mod cursor;
pub mod text;

pub use atlas::GlyphAtlas;
pub use pipeline::{GlyphVertex, RenderState};
pub use cursor::CursorBlink;
pub use text::TextBatch;
