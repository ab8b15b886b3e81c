/// Depth TUI - Market-Depth Ladder
///
/// The core of this crate is `PriceCell`: a stateful table cell that tracks
/// the price it rendered last and encodes each new price as a movement
/// relative to it (green ▲ up, red ▼ down, neutral unchanged), or as a
/// percentage change when percentage view is enabled.
///
/// Around the cell:
/// - `depth::ladder` owns one bid cell and one offer cell per visible book
///   level, tying cell lifecycle to row lifecycle
/// - `depth::widget` renders a ladder snapshot as a ratatui panel
/// - `feed` provides the demo collaborators (simulated walk, JSONL replay)
///   that supply prices; cells never fetch or validate data themselves
pub mod depth;
pub mod error;
pub mod feed;

// Re-export commonly used types for convenience
pub use depth::ladder::{DepthLadder, RowView};
pub use depth::price_cell::{Direction, DisplayMode, PriceCell, PriceView, Side};
pub use depth::widget::render_depth_panel;
pub use error::DepthError;
pub use feed::{BookLevel, BookSnapshot, FeedConfig};
