use crate::contracts::fetch_timings::TimingsFetcher;
use crate::contracts::next_prayer::{resolve_next, NextPrayer};
use crate::timings::TimingsRecord;
use anyhow::{anyhow, Context};
use chrono::NaiveDateTime;
use shared_kernel::clock::Clock;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

pub const UNAVAILABLE_LABEL: &str = "Data tidak tersedia";

/// What the display shows at a given moment.
#[derive(Clone, Debug, PartialEq)]
pub struct PrayerBoard {
    /// Region the held record belongs to. Without a record, the region that
    /// was last requested.
    pub region: String,
    pub record: Option<Arc<TimingsRecord>>,
    pub next_prayer: Option<NextPrayer>,
    /// Local wall-clock time, `HH:MM:SS`.
    pub local_time: String,
}

impl PrayerBoard {
    fn render(slot: &RecordSlot, now: NaiveDateTime) -> Self {
        Self {
            region: slot.region.clone(),
            record: slot.record.clone(),
            next_prayer: resolve_next(slot.record.as_deref(), now),
            local_time: now.format("%H:%M:%S").to_string(),
        }
    }

    pub fn headline(&self) -> String {
        match &self.record {
            Some(record) => format!("Jadwal Sholat {} - {}", self.region, record.date),
            None => UNAVAILABLE_LABEL.to_string(),
        }
    }
}

/// The single record the board holds. A failed fetch for another region
/// clears it; a failed refetch for the same region keeps it.
struct RecordSlot {
    region: String,
    record: Option<Arc<TimingsRecord>>,
}

type FetchOutcome = (String, Option<TimingsRecord>);

/// Keeps a [`PrayerBoard`] current: fetches timings when the region or the
/// day changes and re-resolves the next prayer on every tick.
pub struct BoardScheduler {
    fetcher: Arc<TimingsFetcher>,
    clock: Arc<dyn Clock>,
    interval: Duration,
}

impl BoardScheduler {
    pub fn new(fetcher: Arc<TimingsFetcher>, clock: Arc<dyn Clock>, interval: Duration) -> Self {
        Self {
            fetcher,
            clock,
            interval,
        }
    }

    pub fn start(self, region: String) -> BoardHandle {
        let slot = RecordSlot {
            region: region.clone(),
            record: None,
        };
        let (board_sender, board) = watch::channel(PrayerBoard::render(&slot, self.clock.now()));
        let (region_changes, region_receiver) = mpsc::unbounded_channel();
        let cancellation = CancellationToken::new();

        let task = tokio::spawn(self.run(
            slot,
            region_receiver,
            board_sender,
            cancellation.clone(),
        ));

        BoardHandle {
            board,
            region_changes,
            cancellation,
            task,
        }
    }

    async fn run(
        self,
        mut slot: RecordSlot,
        mut region_changes: mpsc::UnboundedReceiver<String>,
        board: watch::Sender<PrayerBoard>,
        cancellation: CancellationToken,
    ) {
        let mut fetches = JoinSet::new();
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut selected_region = slot.region.clone();
        let mut fetched_for = self.clock.today();
        self.spawn_fetch(&mut fetches, selected_region.clone());

        loop {
            tokio::select! {
                _ = cancellation.cancelled() => break,
                change = region_changes.recv() => {
                    // Every handle is gone.
                    let Some(region) = change else { break };
                    tracing::info!(region = %region, "Region changed");
                    selected_region = region;
                    fetched_for = self.clock.today();
                    self.spawn_fetch(&mut fetches, selected_region.clone());
                }
                Some(joined) = fetches.join_next() => {
                    match joined {
                        Ok((region, Some(record))) => {
                            slot.region = region;
                            slot.record = Some(Arc::new(record));
                        }
                        Ok((region, None)) if region == slot.region => {
                            tracing::warn!(
                                region = %region,
                                "Keeping held timings after failed refetch"
                            );
                        }
                        Ok((region, None)) => {
                            slot.region = region;
                            slot.record = None;
                        }
                        Err(err) => tracing::error!(error = ?err, "Timings fetch task failed"),
                    }
                    board.send_replace(PrayerBoard::render(&slot, self.clock.now()));
                }
                _ = ticker.tick() => {
                    let today = self.clock.today();
                    if today != fetched_for {
                        tracing::info!(%today, "Day changed, fetching new timings");
                        fetched_for = today;
                        self.spawn_fetch(&mut fetches, selected_region.clone());
                    }
                    board.send_replace(PrayerBoard::render(&slot, self.clock.now()));
                }
            }
        }

        fetches.shutdown().await;
        tracing::info!("Board scheduler stopped");
    }

    fn spawn_fetch(&self, fetches: &mut JoinSet<FetchOutcome>, region: String) {
        let fetcher = self.fetcher.clone();
        fetches.spawn(async move {
            let record = fetcher.fetch_timings(&region, None).await;
            (region, record)
        });
    }
}

pub struct BoardHandle {
    board: watch::Receiver<PrayerBoard>,
    region_changes: mpsc::UnboundedSender<String>,
    cancellation: CancellationToken,
    task: JoinHandle<()>,
}

impl BoardHandle {
    pub fn subscribe(&self) -> watch::Receiver<PrayerBoard> {
        self.board.clone()
    }

    pub fn current(&self) -> PrayerBoard {
        self.board.borrow().clone()
    }

    /// Starts a fetch for `region`. Whichever fetch completes last wins.
    pub fn change_region(&self, region: impl Into<String>) -> anyhow::Result<()> {
        self.region_changes
            .send(region.into())
            .map_err(|_| anyhow!("Board scheduler is no longer running"))
    }

    /// Cancels the ticker and any in-flight fetches.
    pub async fn shutdown(self) -> anyhow::Result<()> {
        self.cancellation.cancel();
        self.task.await.context("Board scheduler task failed")
    }
}
