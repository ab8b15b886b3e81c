//! Ladder rows: one bid cell and one offer cell per visible price level.
//!
//! Cell instances live exactly as long as their row. Shrinking the book
//! drops rows together with their tracking state; rows added back later
//! start untracked and show no direction on their first render.

use crate::feed::BookSnapshot;

use super::price_cell::{PriceCell, PriceView, Side};

/// One visible price level: a bid cell and an offer cell.
#[derive(Debug, Clone)]
pub struct LadderRow {
    bid: PriceCell,
    offer: PriceCell,
}

impl LadderRow {
    fn new(show_percentage: bool) -> Self {
        Self {
            bid: PriceCell::new(Side::Bid).show_percentage(show_percentage),
            offer: PriceCell::new(Side::Offer).show_percentage(show_percentage),
        }
    }
}

/// Rendered outcome of one ladder row. A side is None when the book had no
/// level at this depth on the current update.
#[derive(Debug, Clone)]
pub struct RowView {
    pub bid: Option<PriceView>,
    pub bid_qty: Option<f64>,
    pub offer: Option<PriceView>,
    pub offer_qty: Option<f64>,
}

/// Display state for the market-depth ladder.
#[derive(Debug, Clone)]
pub struct DepthLadder {
    rows: Vec<LadderRow>,
    show_percentage: bool,
}

impl DepthLadder {
    pub fn new(show_percentage: bool) -> Self {
        Self {
            rows: Vec::new(),
            show_percentage,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn show_percentage(&self) -> bool {
        self.show_percentage
    }

    /// Switch every cell between price view and percentage view. Cells are
    /// mutated in place so their retained prices survive the toggle.
    pub fn toggle_percentage(&mut self) {
        self.show_percentage = !self.show_percentage;
        for row in &mut self.rows {
            row.bid.set_show_percentage(self.show_percentage);
            row.offer.set_show_percentage(self.show_percentage);
        }
    }

    /// Feed one book snapshot through the ladder and collect the row views.
    ///
    /// Rows are resized to the snapshot's depth first: dropped rows take
    /// their cells (and tracking state) with them, new rows start fresh.
    pub fn apply(&mut self, book: &BookSnapshot) -> Vec<RowView> {
        let depth = book.bids.len().max(book.offers.len());
        self.rows.truncate(depth);
        while self.rows.len() < depth {
            self.rows.push(LadderRow::new(self.show_percentage));
        }

        self.rows
            .iter_mut()
            .enumerate()
            .map(|(level, row)| RowView {
                bid: book
                    .bids
                    .get(level)
                    .map(|l| row.bid.observe(l.price_f64())),
                bid_qty: book.bids.get(level).map(|l| l.amount_f64()),
                offer: book
                    .offers
                    .get(level)
                    .map(|l| row.offer.observe(l.price_f64())),
                offer_qty: book.offers.get(level).map(|l| l.amount_f64()),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::depth::price_cell::Direction;
    use crate::feed::BookLevel;
    use chrono::Utc;

    fn level(price: &str, amount: &str) -> BookLevel {
        BookLevel {
            price: price.parse().unwrap(),
            amount: amount.parse().unwrap(),
        }
    }

    fn book(bids: &[(&str, &str)], offers: &[(&str, &str)]) -> BookSnapshot {
        BookSnapshot {
            time: Utc::now(),
            bids: bids.iter().map(|(p, a)| level(p, a)).collect(),
            offers: offers.iter().map(|(p, a)| level(p, a)).collect(),
        }
    }

    #[test]
    fn test_first_apply_shows_no_direction() {
        let mut ladder = DepthLadder::new(false);
        let rows = ladder.apply(&book(
            &[("100.00", "5.0"), ("99.95", "3.0")],
            &[("100.05", "4.0"), ("100.10", "2.0")],
        ));

        assert_eq!(rows.len(), 2);
        for row in &rows {
            assert_eq!(row.bid.as_ref().unwrap().direction, Direction::Unchanged);
            assert_eq!(row.offer.as_ref().unwrap().direction, Direction::Unchanged);
        }
        assert_eq!(rows[0].bid.as_ref().unwrap().text(), "100.00");
        assert_eq!(rows[0].bid_qty, Some(5.0));
    }

    #[test]
    fn test_second_apply_tracks_per_level_movement() {
        let mut ladder = DepthLadder::new(false);
        ladder.apply(&book(&[("100.00", "1")], &[("100.10", "1")]));
        let rows = ladder.apply(&book(&[("100.05", "1")], &[("100.05", "1")]));

        assert_eq!(rows[0].bid.as_ref().unwrap().direction, Direction::Up);
        assert_eq!(rows[0].bid.as_ref().unwrap().text(), "▲100.05");
        assert_eq!(rows[0].offer.as_ref().unwrap().direction, Direction::Down);
        assert_eq!(rows[0].offer.as_ref().unwrap().text(), "100.05▼");
    }

    #[test]
    fn test_removed_row_loses_tracking_state() {
        let mut ladder = DepthLadder::new(false);
        ladder.apply(&book(
            &[("100.00", "1"), ("99.00", "1")],
            &[("101.00", "1"), ("102.00", "1")],
        ));

        // Book shrinks to one level: row 1 is dropped.
        ladder.apply(&book(&[("100.00", "1")], &[("101.00", "1")]));
        assert_eq!(ladder.len(), 1);

        // Regrown row 1 is a fresh cell: a changed price shows no direction.
        let rows = ladder.apply(&book(
            &[("100.00", "1"), ("98.00", "1")],
            &[("101.00", "1"), ("103.00", "1")],
        ));
        assert_eq!(rows[1].bid.as_ref().unwrap().direction, Direction::Unchanged);
        assert_eq!(rows[1].offer.as_ref().unwrap().direction, Direction::Unchanged);
    }

    #[test]
    fn test_lopsided_book_renders_missing_side_as_none() {
        let mut ladder = DepthLadder::new(false);
        let rows = ladder.apply(&book(&[("100.00", "1"), ("99.00", "2")], &[("101.00", "1")]));

        assert_eq!(rows.len(), 2);
        assert!(rows[1].bid.is_some());
        assert!(rows[1].offer.is_none());
        assert!(rows[1].offer_qty.is_none());
    }

    #[test]
    fn test_toggle_percentage_keeps_retained_prices() {
        let mut ladder = DepthLadder::new(false);
        ladder.apply(&book(&[("100.00", "1")], &[("101.00", "1")]));

        ladder.toggle_percentage();
        let rows = ladder.apply(&book(&[("101.50", "1")], &[("101.00", "1")]));

        let bid = rows[0].bid.as_ref().unwrap();
        assert_eq!(bid.text(), "(1.50%)");
        assert_eq!(bid.direction, Direction::Up);

        let offer = rows[0].offer.as_ref().unwrap();
        assert_eq!(offer.text(), "(0.00%)");
    }
}
