//! Demo feeds that drive the ladder: a simulated random-walk book and a
//! JSONL replay of recorded snapshots.
//!
//! The ladder and its cells never touch this module directly; feeds only
//! publish [`BookSnapshot`]s into a channel the host consumes.

use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::{Rng, SeedableRng, rngs::StdRng};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::error::DepthError;

/// Price/quantity level in the demo book.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BookLevel {
    pub price: Decimal,
    pub amount: Decimal,
}

impl BookLevel {
    /// Convert price to f64 for cell arithmetic.
    pub fn price_f64(&self) -> f64 {
        self.price.to_string().parse().unwrap_or(0.0)
    }

    /// Convert amount to f64 for display.
    pub fn amount_f64(&self) -> f64 {
        self.amount.to_string().parse().unwrap_or(0.0)
    }
}

/// One book snapshot delivered to the ladder. Bids are ordered best-first
/// (descending), offers best-first (ascending).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BookSnapshot {
    pub time: DateTime<Utc>,
    pub bids: Vec<BookLevel>,
    pub offers: Vec<BookLevel>,
}

/// Feed configuration, read from the environment with defaults.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Visible ladder depth per side.
    pub depth: usize,
    /// Interval between published snapshots.
    pub tick_interval: Duration,
    /// Starting mid price for the simulated walk.
    pub mid: f64,
}

impl FeedConfig {
    /// Read DEPTH_LEVELS, TICK_MS, and DEPTH_MID from the environment.
    pub fn from_env() -> Self {
        let depth = std::env::var("DEPTH_LEVELS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);
        let tick_ms = std::env::var("TICK_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(250);
        let mid = std::env::var("DEPTH_MID")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(100.0);

        Self {
            depth,
            tick_interval: Duration::from_millis(tick_ms),
            mid,
        }
    }
}

/// Spawn the simulated feed: a random walk of the mid price with a fixed
/// level grid around it. Stops when the receiver is dropped.
pub fn spawn_sim_feed(
    config: FeedConfig,
    tx: mpsc::Sender<BookSnapshot>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        info!(depth = config.depth, mid = config.mid, "starting simulated book feed");

        let mut rng = StdRng::from_os_rng();
        let mut mid = config.mid;
        let mut interval = tokio::time::interval(config.tick_interval);

        loop {
            interval.tick().await;

            mid += rng.random_range(-0.25..0.25);
            if mid < 1.0 {
                mid = 1.0;
            }
            let snapshot = make_snapshot(mid, config.depth, &mut rng);

            if tx.send(snapshot).await.is_err() {
                debug!("snapshot receiver dropped, stopping simulated feed");
                break;
            }
        }
    })
}

/// Spawn a feed that plays back pre-loaded snapshots at a fixed interval,
/// then ends.
pub fn spawn_replay_feed(
    snapshots: Vec<BookSnapshot>,
    tick_interval: Duration,
    tx: mpsc::Sender<BookSnapshot>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        info!(count = snapshots.len(), "starting replay feed");

        let mut interval = tokio::time::interval(tick_interval);
        for snapshot in snapshots {
            interval.tick().await;
            if tx.send(snapshot).await.is_err() {
                debug!("snapshot receiver dropped, stopping replay feed");
                return;
            }
        }

        info!("replay feed finished");
    })
}

/// Load a JSONL replay file: one [`BookSnapshot`] per non-empty line.
pub fn load_replay(path: &Path) -> Result<Vec<BookSnapshot>, DepthError> {
    let raw = std::fs::read_to_string(path)?;

    raw.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str(line).map_err(|err| DepthError::Replay {
                line: idx + 1,
                reason: err.to_string(),
            })
        })
        .collect()
}

fn make_snapshot(mid: f64, depth: usize, rng: &mut StdRng) -> BookSnapshot {
    let half_spread = (mid * 0.0001).max(0.01);

    let bids = (0..depth)
        .map(|level| make_level(mid - half_spread - level as f64 * 0.05, rng))
        .collect();
    let offers = (0..depth)
        .map(|level| make_level(mid + half_spread + level as f64 * 0.05, rng))
        .collect();

    BookSnapshot {
        time: Utc::now(),
        bids,
        offers,
    }
}

fn make_level(price: f64, rng: &mut StdRng) -> BookLevel {
    BookLevel {
        price: Decimal::try_from(price).unwrap_or_default().round_dp(2),
        amount: Decimal::try_from(rng.random_range(0.1..25.0))
            .unwrap_or_default()
            .round_dp(4),
    }
}
