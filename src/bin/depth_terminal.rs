/// Market Depth Terminal
///
/// Renders a simulated (or replayed) order book as a ladder where every
/// price cell tracks the value it showed last and displays the movement
/// since: green ▲ up, red ▼ down, neutral when unchanged. `p` switches the
/// cells to percentage-change view.
use std::{error::Error, io, path::Path, time::Duration};

use chrono::{DateTime, Utc};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use depth_tui::{
    DepthLadder, FeedConfig, RowView,
    feed::{self, BookSnapshot},
    render_depth_panel,
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    let config = FeedConfig::from_env();
    let (tx, rx) = mpsc::channel(64);

    // REPLAY_FILE switches from the simulated walk to a recorded book.
    if let Ok(path) = std::env::var("REPLAY_FILE") {
        let snapshots = feed::load_replay(Path::new(&path))?;
        feed::spawn_replay_feed(snapshots, config.tick_interval, tx);
    } else {
        feed::spawn_sim_feed(config, tx);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, rx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

/// Env-filtered fmt subscriber on stderr so log lines never corrupt the
/// alternate screen.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::builder()
                .with_default_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(io::stderr)
        .init();
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut rx: mpsc::Receiver<BookSnapshot>,
) -> Result<(), Box<dyn Error>> {
    let tick_rate = Duration::from_millis(100);

    let mut ladder = DepthLadder::new(false);
    let mut rows: Vec<RowView> = Vec::new();
    let mut connected = false;
    let mut last_update = Utc::now();

    loop {
        // Drain pending snapshots in arrival order; every cell must observe
        // each one so the retained values stay in step with the feed.
        while let Ok(snapshot) = rx.try_recv() {
            last_update = snapshot.time;
            rows = ladder.apply(&snapshot);
            connected = true;
        }

        terminal.draw(|f| ui(f, &rows, connected, last_update, ladder.show_percentage()))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char('p') => ladder.toggle_percentage(),
                    _ => {}
                }
            }
        }
    }
}

fn ui(
    f: &mut Frame,
    rows: &[RowView],
    connected: bool,
    last_update: DateTime<Utc>,
    percentage: bool,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(f.area());

    render_status_bar(f, chunks[0], connected, last_update, percentage);
    render_depth_panel(f, chunks[1], rows, connected);
}

fn render_status_bar(
    f: &mut Frame,
    area: Rect,
    connected: bool,
    last_update: DateTime<Utc>,
    percentage: bool,
) {
    let status_symbol = if connected { "●" } else { "○" };
    let status_color = if connected {
        Color::Rgb(0, 255, 127)
    } else {
        Color::Rgb(255, 69, 58)
    };
    let status_text = if connected { "LIVE" } else { "WAITING" };
    let mode_text = if percentage { "% CHANGE" } else { "PRICE" };

    let status_line = Line::from(vec![
        Span::styled(
            format!(" {} {} ", status_symbol, status_text),
            Style::default()
                .fg(status_color)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" ⏱  {} ", last_update.format("%H:%M:%S%.3f")),
            Style::default().fg(Color::Rgb(100, 149, 237)),
        ),
        Span::styled(
            " ◆ MARKET DEPTH TERMINAL ◆ ",
            Style::default()
                .fg(Color::Rgb(255, 215, 0))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" [{}] ", mode_text),
            Style::default().fg(Color::Rgb(200, 200, 220)),
        ),
        Span::styled(
            " [P] Toggle % [Q] Quit ",
            Style::default().fg(Color::Rgb(128, 128, 128)),
        ),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Rgb(138, 43, 226)));

    let paragraph = Paragraph::new(status_line)
        .block(block)
        .alignment(Alignment::Center);

    f.render_widget(paragraph, area);
}
