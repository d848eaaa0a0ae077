//! End-to-end conversion.
//!
//! Feed events become line data sets ([`build_lines`]), each line is
//! converted on its own ([`Converter::convert_line`]), and the results are
//! collected in a [`ConversionReport`]. A failing line is reported and
//! skipped; the other lines still convert.

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use futures::future::join_all;
use tokio::task::JoinError;
use tracing::{error, info, warn};

use crate::config::{AppConfig, ConverterConfig};
use crate::domain::{FlightEvent, known_airports};
use crate::feed::{FeedError, JsonFeedSource, TimeWindow, collect_events};
use crate::netex::{ConversionError, PublicationDelivery, compose_common, compose_line};
use crate::schedule::{AvailabilityPeriod, LineDataSet, assemble, chain_all, group_lines};
use crate::sink::{DocumentSink, JsonDirectorySink, SinkError};
use crate::stops::{
    DerivedStopRegistry, JsonStopRegistry, StopError, StopReferenceData, StopRegistry,
    load_quay_map,
};

/// Errors that abort a whole run.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("feed: {0}")]
    Feed(#[from] FeedError),

    #[error("stop registry: {0}")]
    Stops(#[from] StopError),

    #[error("output: {0}")]
    Sink(#[from] SinkError),
}

/// A converted line.
#[derive(Debug, Clone)]
pub struct LineDocument {
    /// Line local id, e.g. "DY_OSL-BGO"
    pub line_id: String,
    pub document: PublicationDelivery,
}

/// Outcome of converting a batch of lines.
#[derive(Debug, Default)]
pub struct ConversionReport {
    pub documents: Vec<LineDocument>,
    pub failures: Vec<(String, ConversionError)>,
}

impl ConversionReport {
    fn record(&mut self, line_id: String, result: Result<LineDocument, ConversionError>) {
        match result {
            Ok(document) => self.documents.push(document),
            Err(e) => {
                warn!(line = %line_id, error = %e, "line conversion failed");
                self.failures.push((line_id, e));
            }
        }
    }

    /// Record the outcome of a conversion task; a panicked task fails its line.
    fn record_joined(
        &mut self,
        line_id: String,
        joined: Result<Result<LineDocument, ConversionError>, JoinError>,
    ) {
        match joined {
            Ok(result) => self.record(line_id, result),
            Err(e) => {
                error!(line = %line_id, error = %e, "line conversion task panicked");
                self.failures
                    .push((line_id, ConversionError::Aborted(e.to_string())));
            }
        }
    }
}

/// Assemble, chain and group feed events into line data sets.
pub fn build_lines(events: &[FlightEvent], config: &ConverterConfig) -> Vec<LineDataSet> {
    let legs = assemble(events);
    let itineraries = chain_all(&legs, &config.chain);
    let itinerary_count = itineraries.len();
    let lines = group_lines(itineraries, config.period);
    info!(
        events = events.len(),
        legs = legs.len(),
        itineraries = itinerary_count,
        lines = lines.len(),
        "built line data sets"
    );
    lines
}

/// Converts lines against shared stop reference data.
#[derive(Debug, Clone)]
pub struct Converter {
    config: ConverterConfig,
    stops: Arc<StopReferenceData>,
    published_at: DateTime<Utc>,
}

impl Converter {
    pub fn new(
        config: ConverterConfig,
        stops: Arc<StopReferenceData>,
        published_at: DateTime<Utc>,
    ) -> Self {
        Self {
            config,
            stops,
            published_at,
        }
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    pub fn convert_line(&self, line: &LineDataSet) -> Result<LineDocument, ConversionError> {
        let document = compose_line(line, &self.stops, &self.config.document, self.published_at)?;
        Ok(LineDocument {
            line_id: line.local_id(),
            document,
        })
    }

    /// Convert the common document. Its validity covers the configured
    /// period, or else every line's period.
    pub fn convert_common(
        &self,
        lines: &[LineDataSet],
    ) -> Result<PublicationDelivery, ConversionError> {
        let period = self
            .config
            .period
            .or_else(|| span(lines))
            .unwrap_or_else(|| {
                let today = self.published_at.date_naive();
                AvailabilityPeriod::new(today, today)
            });
        compose_common(&self.stops, &self.config.document, period, self.published_at)
    }

    /// Convert lines one after another.
    pub fn convert_all(&self, lines: &[LineDataSet]) -> ConversionReport {
        let mut report = ConversionReport::default();
        for line in lines {
            report.record(line.local_id(), self.convert_line(line));
        }
        report
    }
}

fn span(lines: &[LineDataSet]) -> Option<AvailabilityPeriod> {
    let from = lines.iter().map(|l| l.availability_period.from).min()?;
    let to = lines.iter().map(|l| l.availability_period.to).max()?;
    Some(AvailabilityPeriod::new(from, to))
}

/// Convert each line on a blocking worker. The report keeps input order.
pub async fn convert_concurrently(
    converter: Arc<Converter>,
    lines: Vec<LineDataSet>,
) -> ConversionReport {
    let mut line_ids = Vec::with_capacity(lines.len());
    let tasks: Vec<_> = lines
        .into_iter()
        .map(|line| {
            line_ids.push(line.local_id());
            let converter = Arc::clone(&converter);
            tokio::task::spawn_blocking(move || converter.convert_line(&line))
        })
        .collect();

    let mut report = ConversionReport::default();
    for (line_id, joined) in line_ids.into_iter().zip(join_all(tasks).await) {
        report.record_joined(line_id, joined);
    }
    report
}

/// Feed query window: local midnight at the start of the period to the
/// last second of its final day. Unbounded without a period.
pub fn feed_window(period: Option<AvailabilityPeriod>, tz: Tz) -> TimeWindow {
    let Some(period) = period else {
        return TimeWindow::new(DateTime::<Utc>::MIN_UTC, DateTime::<Utc>::MAX_UTC);
    };
    let midnight = |d: NaiveDate| {
        let naive = d.and_time(NaiveTime::MIN);
        tz.from_local_datetime(&naive)
            .earliest()
            .map_or_else(|| naive.and_utc(), |t| t.with_timezone(&Utc))
    };
    let end = period
        .to
        .succ_opt()
        .map_or(DateTime::<Utc>::MAX_UTC, |d| midnight(d) - Duration::seconds(1));
    TimeWindow::new(midnight(period.from), end)
}

/// Summary of a finished run.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub lines_written: usize,
    /// Lines that failed to convert or to be written
    pub failed_lines: Vec<String>,
    pub common_written: bool,
}

impl RunSummary {
    /// True when the common document and every line were written.
    pub fn is_complete(&self) -> bool {
        self.common_written && self.failed_lines.is_empty()
    }
}

/// Load input, convert every line and write all documents.
///
/// Only input loading and creating the output directory abort the run. A
/// failure of the common document or of a single line is logged, recorded
/// in the summary and does not stop the other documents.
pub async fn run(config: &AppConfig, published_at: DateTime<Utc>) -> Result<RunSummary, RunError> {
    let document = &config.converter.document;
    let source = JsonFeedSource::load(&config.feed_path)?;
    let airports: Vec<_> = known_airports().collect();
    let window = feed_window(config.converter.period, document.time_zone);
    let events = collect_events(&source, &airports, &window, document.time_zone)?;

    let lines = build_lines(&events, &config.converter);

    let registry: Box<dyn StopRegistry> = match &config.stop_registry_path {
        Some(path) => Box::new(JsonStopRegistry::load(path)?),
        None => Box::new(DerivedStopRegistry::new(document.codespace.clone())),
    };
    let mut stops = StopReferenceData::build(registry.as_ref(), known_airports());
    if let Some(path) = &config.quay_map_path {
        stops = stops.with_quays(&load_quay_map(path)?);
    }

    let sink = JsonDirectorySink::new(&config.output_dir, document.codespace.xmlns.clone())?;
    let converter = Arc::new(Converter::new(
        config.converter.clone(),
        Arc::new(stops),
        published_at,
    ));

    let common_written = match converter.convert_common(&lines) {
        Ok(common) => match sink.write_common(&common) {
            Ok(()) => true,
            Err(e) => {
                error!(error = %e, "failed to write common data");
                false
            }
        },
        Err(e) => {
            error!(error = %e, "common data conversion failed");
            false
        }
    };

    let report = convert_concurrently(converter, lines).await;
    let mut summary = RunSummary {
        common_written,
        failed_lines: report.failures.into_iter().map(|(id, _)| id).collect(),
        ..RunSummary::default()
    };
    for document in &report.documents {
        match sink.write_line(document) {
            Ok(()) => summary.lines_written += 1,
            Err(e) => {
                warn!(line = %document.line_id, error = %e, "failed to write line");
                summary.failed_lines.push(document.line_id.clone());
            }
        }
    }

    info!(
        written = summary.lines_written,
        failed = summary.failed_lines.len(),
        common = summary.common_written,
        output = %sink.dir().display(),
        "conversion finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod pipeline_tests;
