#![allow(clippy::new_without_default)]

#[macro_use]
extern crate log;

pub mod config;
pub mod coordinate;
pub mod geo_point_extractor;
pub mod ingestion;
pub mod logs;
pub mod point_aggregator;
pub mod timeline_data;

pub use config::PipelineConfig;
pub use coordinate::{Coordinate, DecodeError};
pub use ingestion::{IngestionError, IngestionPipeline, IngestionReport, RunSequencer};
pub use point_aggregator::TimelineClusterItem;
pub use timeline_data::{TimelineData, TimelineParser};
