//! Ratatui widget for the market-depth ladder panel.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::ladder::RowView;
use super::price_cell::{C_DOWN, PriceView};

const C_DIM: Color = Color::Rgb(120, 120, 120);
const C_ACCENT: Color = Color::Rgb(100, 180, 220);

const CELL_WIDTH: usize = 12;
const QTY_WIDTH: usize = 10;

/// Render the market-depth ladder: bids on the left, offers on the right,
/// one line per visible level.
pub fn render_depth_panel(f: &mut Frame, area: Rect, rows: &[RowView], connected: bool) {
    let border_color = if connected { C_ACCENT } else { C_DOWN };

    let block = Block::default()
        .title(" MARKET DEPTH ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner = block.inner(area);
    f.render_widget(block, area);

    if rows.is_empty() {
        let placeholder = vec![Line::from(Span::styled(
            "Waiting for book data...",
            Style::default().fg(C_DIM),
        ))];
        f.render_widget(Paragraph::new(placeholder), inner);
        return;
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(Line::from(vec![
        Span::styled(format!(" {:>QTY_WIDTH$}  ", "QTY"), Style::default().fg(C_DIM)),
        Span::styled(
            format!("{:>CELL_WIDTH$}", "BID"),
            Style::default().fg(C_DIM).add_modifier(Modifier::BOLD),
        ),
        Span::styled("  |  ", Style::default().fg(C_DIM)),
        Span::styled(
            format!("{:<CELL_WIDTH$}", "OFFER"),
            Style::default().fg(C_DIM).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {:<QTY_WIDTH$}", "QTY"), Style::default().fg(C_DIM)),
    ]));

    let visible = inner.height.saturating_sub(1) as usize;
    for row in rows.iter().take(visible) {
        lines.push(Line::from(vec![
            qty_span(row.bid_qty, true),
            cell_span(row.bid.as_ref(), true),
            Span::styled("  |  ", Style::default().fg(C_DIM)),
            cell_span(row.offer.as_ref(), false),
            qty_span(row.offer_qty, false),
        ]));
    }

    f.render_widget(Paragraph::new(lines), inner);
}

fn cell_span(view: Option<&PriceView>, right_align: bool) -> Span<'static> {
    match view {
        Some(view) => {
            let text = if right_align {
                format!("{:>CELL_WIDTH$}", view.text())
            } else {
                format!("{:<CELL_WIDTH$}", view.text())
            };
            Span::styled(
                text,
                Style::default()
                    .fg(view.color())
                    .add_modifier(Modifier::BOLD),
            )
        }
        None => {
            let text = if right_align {
                format!("{:>CELL_WIDTH$}", "--")
            } else {
                format!("{:<CELL_WIDTH$}", "--")
            };
            Span::styled(text, Style::default().fg(C_DIM))
        }
    }
}

fn qty_span(qty: Option<f64>, right_align: bool) -> Span<'static> {
    let text = match qty {
        Some(qty) => format!("{:.4}", qty),
        None => "--".to_string(),
    };
    let padded = if right_align {
        format!(" {:>QTY_WIDTH$}  ", text)
    } else {
        format!("  {:<QTY_WIDTH$}", text)
    };
    Span::styled(padded, Style::default().fg(C_DIM))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::depth::ladder::DepthLadder;
    use crate::feed::{BookLevel, BookSnapshot};
    use chrono::Utc;
    use ratatui::{Terminal, backend::TestBackend};

    fn book(bid: &str, offer: &str) -> BookSnapshot {
        BookSnapshot {
            time: Utc::now(),
            bids: vec![BookLevel {
                price: bid.parse().unwrap(),
                amount: "3.5".parse().unwrap(),
            }],
            offers: vec![BookLevel {
                price: offer.parse().unwrap(),
                amount: "1.25".parse().unwrap(),
            }],
        }
    }

    fn rendered(rows: &[RowView]) -> String {
        let backend = TestBackend::new(70, 8);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| render_depth_panel(f, f.area(), rows, true))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_panel_shows_glyph_and_price() {
        let mut ladder = DepthLadder::new(false);
        ladder.apply(&book("100.00", "100.10"));
        let rows = ladder.apply(&book("101.50", "100.05"));

        let content = rendered(&rows);
        assert!(content.contains("▲101.50"));
        assert!(content.contains("100.05▼"));
        assert!(content.contains("3.5000"));
    }

    #[test]
    fn test_panel_placeholder_when_empty() {
        let content = rendered(&[]);
        assert!(content.contains("Waiting for book data..."));
    }
}
