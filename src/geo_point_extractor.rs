use std::collections::HashSet;

use strum_macros::{Display, EnumIter};

use crate::coordinate::{self, Coordinate};
use crate::timeline_data::TimelineData;

pub const DEFAULT_SKIPPED_POINT_LOG_LIMIT: usize = 20;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum SourceKind {
    Visit,
    Path,
    Signal,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MapPoint {
    pub coordinate: Coordinate,
    pub source_kind: SourceKind,
}

/// Malformed coordinates dropped during extraction, per source.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SkippedPoints {
    pub visits: usize,
    pub paths: usize,
    pub signals: usize,
}

impl SkippedPoints {
    pub fn total(&self) -> usize {
        self.visits + self.paths + self.signals
    }

    pub fn of(&self, kind: SourceKind) -> usize {
        match kind {
            SourceKind::Visit => self.visits,
            SourceKind::Path => self.paths,
            SourceKind::Signal => self.signals,
        }
    }

    fn bump(&mut self, kind: SourceKind) {
        match kind {
            SourceKind::Visit => self.visits += 1,
            SourceKind::Path => self.paths += 1,
            SourceKind::Signal => self.signals += 1,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExtractedPoints {
    pub visits: Vec<MapPoint>,
    pub paths: Vec<MapPoint>,
    pub signals: Vec<MapPoint>,
    pub skipped: SkippedPoints,
}

impl ExtractedPoints {
    pub fn len(&self) -> usize {
        self.visits.len() + self.paths.len() + self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every point whose coordinate exactly matches one already seen,
    /// walking visits, then paths, then signals. The first occurrence wins, so
    /// a visit always survives over a coincident path point or signal.
    pub fn dedupe_coincident(mut self) -> Self {
        let mut seen = HashSet::new();
        let before = self.len();
        for stream in [&mut self.visits, &mut self.paths, &mut self.signals] {
            stream.retain(|p| seen.insert(p.coordinate.bits_key()));
        }
        debug!("dedupe removed {} coincident points", before - self.len());
        self
    }
}

pub struct GeoPointExtractor {
    log_limit: usize,
}

impl GeoPointExtractor {
    pub fn new() -> Self {
        Self::with_log_limit(DEFAULT_SKIPPED_POINT_LOG_LIMIT)
    }

    /// `log_limit` caps the number of per-point warnings; the totals are
    /// always logged.
    pub fn with_log_limit(log_limit: usize) -> Self {
        GeoPointExtractor { log_limit }
    }

    /// Never fails: malformed coordinates are counted in `skipped` and left out.
    pub fn extract(&self, data: &TimelineData) -> ExtractedPoints {
        let mut skipped = SkippedPoints::default();

        let visits = data
            .semantic_segments
            .iter()
            .filter_map(|segment| segment.visit.as_ref()?.lat_lng());
        let visits = self.decode_all(visits, SourceKind::Visit, &mut skipped);

        let paths = data
            .semantic_segments
            .iter()
            .flat_map(|segment| segment.timeline_path.iter())
            .map(|path_point| path_point.point.as_str());
        let paths = self.decode_all(paths, SourceKind::Path, &mut skipped);

        let signals = data.raw_signals.iter().filter_map(|signal| signal.lat_lng());
        let signals = self.decode_all(signals, SourceKind::Signal, &mut skipped);

        if skipped.total() > 0 {
            info!(
                "skipped {} malformed coordinates (visits: {}, paths: {}, signals: {})",
                skipped.total(),
                skipped.visits,
                skipped.paths,
                skipped.signals
            );
        }

        ExtractedPoints {
            visits,
            paths,
            signals,
            skipped,
        }
    }

    fn decode_all<'a>(
        &self,
        texts: impl Iterator<Item = &'a str>,
        source_kind: SourceKind,
        skipped: &mut SkippedPoints,
    ) -> Vec<MapPoint> {
        texts
            .filter_map(|text| match coordinate::decode(text) {
                Ok(coordinate) => Some(MapPoint {
                    coordinate,
                    source_kind,
                }),
                Err(e) => {
                    if skipped.total() < self.log_limit {
                        warn!("skipping {source_kind} point: {e}");
                    }
                    skipped.bump(source_kind);
                    None
                }
            })
            .collect()
    }
}

pub fn extract(data: &TimelineData) -> ExtractedPoints {
    GeoPointExtractor::new().extract(data)
}
