//! Market-depth ladder: price cells, row state, and the ratatui panel.

pub mod ladder;
pub mod price_cell;
pub mod widget;

pub use ladder::{DepthLadder, RowView};
pub use price_cell::{Direction, DisplayMode, PriceCell, PriceView, Side};
pub use widget::render_depth_panel;
