//! Shape of the on-device timeline export, limited to the fields we read.
//!
//! Every other key (timestamps, accuracies, probabilities, wifi scans,
//! activity records, the user location profile, ...) is ignored by serde, so an
//! odd value there never fails a run. Coordinates stay as the exporter's
//! strings here; decoding them is `geo_point_extractor`'s job.

use std::io::Read;

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineData {
    #[serde(default)]
    pub raw_signals: Vec<RawSignal>,
    #[serde(default)]
    pub semantic_segments: Vec<SemanticSegment>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSignal {
    pub position: Option<Position>,
}

impl RawSignal {
    pub fn lat_lng(&self) -> Option<&str> {
        self.position.as_ref()?.lat_lng.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Position {
    // The exporter writes `LatLng` here, unlike everywhere else.
    #[serde(rename = "LatLng", alias = "latLng")]
    pub lat_lng: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticSegment {
    pub visit: Option<Visit>,
    #[serde(default)]
    pub timeline_path: Vec<TimelinePathPoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    pub top_candidate: Option<PlaceCandidate>,
}

impl Visit {
    /// `topCandidate.placeLocation.latLng`, if every link is present.
    pub fn lat_lng(&self) -> Option<&str> {
        self.top_candidate
            .as_ref()?
            .place_location
            .as_ref()?
            .lat_lng
            .as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceCandidate {
    pub place_location: Option<PlaceLocation>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceLocation {
    pub lat_lng: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TimelinePathPoint {
    pub point: String,
}

pub trait TimelineParser {
    /// Empty record lists are valid data, not an error.
    fn parse(&self, reader: &mut dyn Read) -> Result<TimelineData>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct JsonTimelineParser;

impl TimelineParser for JsonTimelineParser {
    fn parse(&self, reader: &mut dyn Read) -> Result<TimelineData> {
        let data: TimelineData =
            serde_json::from_reader(reader).context("invalid timeline export")?;
        debug!(
            "parsed timeline export: {} raw signals, {} semantic segments",
            data.raw_signals.len(),
            data.semantic_segments.len()
        );
        Ok(data)
    }
}
