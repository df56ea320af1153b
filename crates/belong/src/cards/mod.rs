//! Expandable content cards: per-view expansion state, masonry placement,
//! brand-word title highlighting, and virtual tour galleries.

pub mod board;
pub mod gallery;
pub mod masonry;
pub mod registry;
pub mod router;
pub mod title;

pub use board::{BoardError, BoardStore, BoardView, CardBoard, CardSpec, CardView, ViewId};
pub use gallery::{Gallery, GalleryImage, GalleryView, Thumbnail};
pub use masonry::{masonry_span, Axis, Breakpoint, GridSpan};
pub use registry::{CardId, ExpansionRegistry};
pub use router::board_router;
pub use title::{highlight_title, TitleSegment};
