//! Price cell: per-instance value tracking and display encoding.
//!
//! Every cell in the depth ladder remembers the price it rendered on its
//! previous update and encodes the transition to the new price as a color
//! plus a directional glyph, or as a percentage change when percentage view
//! is enabled. The retained value lives exactly as long as the cell
//! instance, so a remounted cell starts over with no direction shown.

use ratatui::style::Color;
use tracing::debug;

/// Movement colors, shared with the ladder widget palette.
pub const C_UP: Color = Color::Rgb(100, 220, 100);
pub const C_DOWN: Color = Color::Rgb(220, 100, 100);
pub const C_FLAT: Color = Color::Rgb(220, 220, 220);

/// Which side of the book the cell represents.
///
/// Side selects the glyph placement and the side class only; direction and
/// color logic are identical for both sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    Bid,
    #[default]
    Offer,
}

impl Side {
    /// Class-list fragment for this side.
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Bid => "bid",
            Side::Offer => "offer",
        }
    }

    pub fn is_bid(&self) -> bool {
        matches!(self, Side::Bid)
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Price movement relative to the previously rendered value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Unchanged,
}

impl Direction {
    fn from_diff(diff: f64) -> Self {
        if diff > 0.0 {
            Direction::Up
        } else if diff < 0.0 {
            Direction::Down
        } else {
            Direction::Unchanged
        }
    }

    /// Directional glyph, or None when the value is unchanged.
    pub fn glyph(&self) -> Option<&'static str> {
        match self {
            Direction::Up => Some("▲"),
            Direction::Down => Some("▼"),
            Direction::Unchanged => None,
        }
    }

    /// Color encoding, uniform across price and percentage views.
    pub fn color(&self) -> Color {
        match self {
            Direction::Up => C_UP,
            Direction::Down => C_DOWN,
            Direction::Unchanged => C_FLAT,
        }
    }
}

/// Render shape derived from the side and percentage flags.
///
/// Percentage view is side-independent; side only matters when the raw
/// price is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    PriceBid,
    PriceOffer,
    Percentage,
}

/// One table cell of the market-depth ladder.
#[derive(Debug, Clone)]
pub struct PriceCell {
    side: Side,
    show_percentage: bool,
    class: Option<String>,
    /// Price shown on the previous completed render. None until the first
    /// observation (Uninitialized), Some thereafter (Tracking).
    last: Option<f64>,
}

impl PriceCell {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            show_percentage: false,
            class: None,
            last: None,
        }
    }

    /// Select percentage-change view instead of the raw price.
    pub fn show_percentage(mut self, show: bool) -> Self {
        self.show_percentage = show;
        self
    }

    /// Extra class appended verbatim to the cell's class list. No effect on
    /// direction or formatting logic.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Flip the view flag in place. Tracking state is tied to the cell
    /// instance, not to the flag, so the retained price survives.
    pub fn set_show_percentage(&mut self, show: bool) {
        self.show_percentage = show;
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// True once the cell has rendered at least one price. Never reverts.
    pub fn is_tracking(&self) -> bool {
        self.last.is_some()
    }

    fn mode(&self) -> DisplayMode {
        if self.show_percentage {
            DisplayMode::Percentage
        } else if self.side.is_bid() {
            DisplayMode::PriceBid
        } else {
            DisplayMode::PriceOffer
        }
    }

    /// Class list: base class, side class, then any caller-supplied class,
    /// in every display mode.
    pub fn classes(&self) -> String {
        match &self.class {
            Some(class) => format!("price-cell {} {}", self.side.as_str(), class),
            None => format!("price-cell {}", self.side.as_str()),
        }
    }

    /// Observe the next price and produce the view for this render.
    ///
    /// The diff and percentage are computed against the retained value from
    /// the previous render before it is overwritten, so the first
    /// observation shows no direction. A retained price of zero defines the
    /// percentage change as 0% rather than dividing by zero.
    ///
    /// Non-finite prices are outside the contract and are ignored: the cell
    /// re-renders its last tracked value as Unchanged.
    pub fn observe(&mut self, price: f64) -> PriceView {
        if !price.is_finite() {
            debug!(price, "ignoring non-finite price update");
            return self.view(self.last.unwrap_or(0.0), 0.0, 0.0);
        }

        // Read before write: the diff for this render must compare against
        // the previous render, never against the incoming value.
        let prev = self.last.unwrap_or(price);
        let diff = price - prev;
        let percentage = if prev == 0.0 { 0.0 } else { diff / prev * 100.0 };
        self.last = Some(price);

        self.view(price, diff, percentage)
    }

    fn view(&self, price: f64, diff: f64, percentage: f64) -> PriceView {
        PriceView {
            price,
            diff,
            percentage,
            direction: Direction::from_diff(diff),
            mode: self.mode(),
            classes: self.classes(),
        }
    }
}

/// Renderable outcome of one observation.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceView {
    pub price: f64,
    pub diff: f64,
    pub percentage: f64,
    pub direction: Direction,
    pub mode: DisplayMode,
    pub classes: String,
}

impl PriceView {
    /// Display text for the cell.
    ///
    /// Percentage view renders `(±X.XX%)` with no glyph. Price view renders
    /// the two-decimal price with the glyph before it on the bid side and
    /// after it on the offer side.
    pub fn text(&self) -> String {
        match (self.mode, self.direction.glyph()) {
            (DisplayMode::Percentage, _) => format!("({:.2}%)", self.percentage),
            (DisplayMode::PriceBid, Some(glyph)) => format!("{}{:.2}", glyph, self.price),
            (DisplayMode::PriceOffer, Some(glyph)) => format!("{:.2}{}", self.price, glyph),
            (_, None) => format!("{:.2}", self.price),
        }
    }

    pub fn color(&self) -> Color {
        self.direction.color()
    }
}
