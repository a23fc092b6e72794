//! Flush event replay: the CLI acting as trigger dispatcher.

mod reader;
mod stats;

pub use reader::{parse_events, FlushEvent};
pub use stats::{ReplayReport, ReplayStats};

use std::time::Instant;

use contracts::{DataSink, PluginLogger};
use insights::InsightAggregator;
use tracing::{error, info, instrument, warn};

/// Invoke the aggregator once per event, in order
///
/// A failed event is reported and counted; later events still run, the same
/// way the host keeps delivering flushes after a failed callback.
#[instrument(name = "replay_events", skip_all, fields(events = events.len(), sink = %sink.name()))]
pub fn replay_events<S, L>(
    aggregator: &InsightAggregator,
    sink: &mut S,
    logger: &L,
    events: &[FlushEvent],
) -> ReplayStats
where
    S: DataSink + ?Sized,
    L: PluginLogger + ?Sized,
{
    let started = Instant::now();
    let mut stats = ReplayStats::default();

    for (idx, event) in events.iter().enumerate() {
        stats.events_total += 1;

        match aggregator.handle_flush(sink, logger, event) {
            Ok(summary) => stats.summary.merge(&summary),
            Err(e) => {
                stats.events_failed += 1;
                stats
                    .failed_tables
                    .extend(e.failed_tables().into_iter().map(str::to_string));
                stats.summary.merge(e.summary());
                error!(event = idx + 1, error = %e, "Flush event failed");
            }
        }
    }

    if let Err(e) = sink.flush() {
        warn!(error = %e, "Final sink flush failed");
        stats.flush_error = Some(e.to_string());
    }

    stats.duration = started.elapsed();
    info!(
        events = stats.events_total,
        failed = stats.events_failed,
        records = stats.summary.records_written,
        "Replay finished"
    );
    stats
}
