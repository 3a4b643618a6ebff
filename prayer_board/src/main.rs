use anyhow::Context;
use itertools::Itertools;
use prayer_times::config::Settings;
use prayer_times::contracts::detect_region::RegionDetector;
use prayer_times::contracts::fetch_timings::TimingsFetcher;
use prayer_times::contracts::refresh_board::{BoardScheduler, PrayerBoard};
use prayer_times::notifications::{Notifier, TracingNotifier};
use prayer_times::regions::RegionTable;
use shared_kernel::clock::{Clock, SystemClock};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    shared_kernel::tracing::config_telemetry("prayer_board")?;
    start().await
}

async fn start() -> anyhow::Result<()> {
    let settings = Settings::parse()?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let notifier: Arc<dyn Notifier> = Arc::new(TracingNotifier);
    let regions = Arc::new(RegionTable::central_java());

    let region = match settings.board.position {
        Some(position) => RegionDetector::new(regions.clone(), notifier.clone())
            .detect(Some(position))
            .map(|region| region.name())
            .unwrap_or_else(|| settings.board.region.clone()),
        None => settings.board.region.clone(),
    };

    let fetcher = TimingsFetcher::new(
        settings.timings_provider.clone(),
        regions,
        clock.clone(),
        notifier,
    )?;
    let handle = BoardScheduler::new(
        Arc::new(fetcher),
        clock,
        settings.board.refresh_interval(),
    )
    .start(region);

    let mut boards = handle.subscribe();
    loop {
        tokio::select! {
            signal = tokio::signal::ctrl_c() => {
                signal.context("Failed to listen for ctrl-c")?;
                break;
            }
            changed = boards.changed() => {
                if changed.is_err() {
                    break;
                }
                let board = boards.borrow_and_update().clone();
                log_board(&board);
            }
        }
    }

    handle.shutdown().await
}

fn log_board(board: &PrayerBoard) {
    let schedule = board
        .record
        .as_ref()
        .map(|record| {
            record
                .schedule()
                .into_iter()
                .map(|(prayer, time)| format!("{prayer} {time}"))
                .join(", ")
        })
        .unwrap_or_default();
    let next = board
        .next_prayer
        .as_ref()
        .map(|next| format!("{} {}", next.name, next.time))
        .unwrap_or_default();

    tracing::info!(
        local_time = %board.local_time,
        headline = %board.headline(),
        schedule = %schedule,
        next_prayer = %next,
        "Prayer board"
    );
}
