use crate::coordinate::Coordinate;
use crate::geo_point_extractor::{ExtractedPoints, MapPoint};

#[derive(Clone, Debug, PartialEq)]
pub struct TimelineClusterItem {
    pub position: Coordinate,
    pub title: String,
    pub snippet: String,
    pub z_index: f32,
}

impl TimelineClusterItem {
    fn at_index(index: usize, position: Coordinate) -> Self {
        TimelineClusterItem {
            position,
            title: format!("Item {index}"),
            snippet: format!("Snippet {index}"),
            z_index: 0.0,
        }
    }

    pub fn position(&self) -> Coordinate {
        self.position
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn snippet(&self) -> &str {
        &self.snippet
    }

    pub fn z_index(&self) -> f32 {
        self.z_index
    }
}

/// Concatenates visits, paths and signals (always in that order) and numbers
/// the result continuously from 0. Nothing is dropped or reordered.
pub fn aggregate(
    visits: &[MapPoint],
    paths: &[MapPoint],
    signals: &[MapPoint],
) -> Vec<TimelineClusterItem> {
    visits
        .iter()
        .chain(paths)
        .chain(signals)
        .enumerate()
        .map(|(index, point)| TimelineClusterItem::at_index(index, point.coordinate))
        .collect()
}

pub fn aggregate_extracted(points: &ExtractedPoints) -> Vec<TimelineClusterItem> {
    aggregate(&points.visits, &points.paths, &points.signals)
}
