use std::fs::File;
use std::io::{self, BufReader, Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use thiserror::Error;

use crate::config::PipelineConfig;
use crate::geo_point_extractor::{GeoPointExtractor, SkippedPoints};
use crate::point_aggregator::{self, TimelineClusterItem};
use crate::timeline_data::{JsonTimelineParser, TimelineParser};

#[derive(Error, Debug)]
pub enum IngestionError {
    #[error("unable to open {source_name}: {cause}")]
    StreamUnavailable {
        source_name: String,
        #[source]
        cause: io::Error,
    },
    // `{cause:#}` prints the whole context chain, down to serde's line/column.
    #[error("unable to parse {source_name}: {cause:#}")]
    ParseFailure {
        source_name: String,
        cause: anyhow::Error,
    },
}

/// Something the user picked that can be opened for reading, once per run.
pub trait TimelineSource {
    fn open(&self) -> io::Result<Box<dyn Read + '_>>;

    fn describe(&self) -> String;
}

impl TimelineSource for Path {
    fn open(&self) -> io::Result<Box<dyn Read + '_>> {
        Ok(Box::new(BufReader::new(File::open(self)?)))
    }

    fn describe(&self) -> String {
        self.display().to_string()
    }
}

impl TimelineSource for PathBuf {
    fn open(&self) -> io::Result<Box<dyn Read + '_>> {
        self.as_path().open()
    }

    fn describe(&self) -> String {
        self.as_path().describe()
    }
}

impl TimelineSource for [u8] {
    fn open(&self) -> io::Result<Box<dyn Read + '_>> {
        Ok(Box::new(Cursor::new(self)))
    }

    fn describe(&self) -> String {
        format!("<{} bytes in memory>", self.len())
    }
}

impl TimelineSource for Vec<u8> {
    fn open(&self) -> io::Result<Box<dyn Read + '_>> {
        self.as_slice().open()
    }

    fn describe(&self) -> String {
        self.as_slice().describe()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IngestionReport {
    pub items: Vec<TimelineClusterItem>,
    pub raw_signal_count: usize,
    pub semantic_segment_count: usize,
    pub skipped: SkippedPoints,
}

pub struct IngestionPipeline {
    parser: Box<dyn TimelineParser + Send + Sync>,
    config: PipelineConfig,
}

impl IngestionPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self::with_parser(Box::new(JsonTimelineParser), config)
    }

    pub fn with_parser(
        parser: Box<dyn TimelineParser + Send + Sync>,
        config: PipelineConfig,
    ) -> Self {
        IngestionPipeline { parser, config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn run<S: TimelineSource + ?Sized>(
        &self,
        source: &S,
    ) -> Result<Vec<TimelineClusterItem>, IngestionError> {
        Ok(self.ingest(source)?.items)
    }

    /// Same as `run`, plus the counts a caller may want to show the user.
    pub fn ingest<S: TimelineSource + ?Sized>(
        &self,
        source: &S,
    ) -> Result<IngestionReport, IngestionError> {
        let source_name = source.describe();
        info!("ingesting timeline from {source_name}");

        let timeline_data = {
            let mut reader = source.open().map_err(|cause| {
                error!("failed to open {source_name}: {cause}");
                IngestionError::StreamUnavailable {
                    source_name: source_name.clone(),
                    cause,
                }
            })?;
            // `reader` is dropped at the end of this block on every path.
            self.parser.parse(&mut reader).map_err(|cause| {
                error!("failed to parse {source_name}: {cause:#}");
                IngestionError::ParseFailure {
                    source_name: source_name.clone(),
                    cause,
                }
            })?
        };

        let extractor = GeoPointExtractor::with_log_limit(self.config.skipped_point_log_limit);
        let mut points = extractor.extract(&timeline_data);
        if self.config.dedupe_coincident {
            points = points.dedupe_coincident();
        }
        let items = point_aggregator::aggregate_extracted(&points);

        info!(
            "loaded {} map items from {} raw signals and {} semantic segments",
            items.len(),
            timeline_data.raw_signals.len(),
            timeline_data.semantic_segments.len()
        );

        Ok(IngestionReport {
            items,
            raw_signal_count: timeline_data.raw_signals.len(),
            semantic_segment_count: timeline_data.semantic_segments.len(),
            skipped: points.skipped,
        })
    }
}

/// Issued by `RunSequencer::begin`, identifies one run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RunTicket(u64);

/// Caller-side guard so that only the latest file selection gets to publish
/// its result. The pipeline itself keeps no state between runs.
#[derive(Debug, Default)]
pub struct RunSequencer {
    generation: AtomicU64,
}

impl RunSequencer {
    pub fn new() -> Self {
        RunSequencer {
            generation: AtomicU64::new(0),
        }
    }

    /// Starts a new run, superseding every ticket handed out before.
    pub fn begin(&self) -> RunTicket {
        RunTicket(self.generation.fetch_add(1, Ordering::AcqRel) + 1)
    }

    pub fn is_current(&self, ticket: RunTicket) -> bool {
        self.generation.load(Ordering::Acquire) == ticket.0
    }

    /// Hands `result` back only if `ticket` is still the latest one.
    pub fn accept<T>(&self, ticket: RunTicket, result: T) -> Option<T> {
        if self.is_current(ticket) {
            Some(result)
        } else {
            debug!("discarding result of superseded run {}", ticket.0);
            None
        }
    }
}
