pub mod test_utils;

use strum::IntoEnumIterator;
use test_utils::*;
use timeline_core::coordinate::Coordinate;
use timeline_core::geo_point_extractor::{
    self, ExtractedPoints, GeoPointExtractor, MapPoint, SkippedPoints, SourceKind,
};
use timeline_core::timeline_data::{PlaceCandidate, RawSignal, SemanticSegment, Visit};

fn coordinates(points: &[MapPoint]) -> Vec<(f64, f64)> {
    points
        .iter()
        .map(|p| (p.coordinate.latitude, p.coordinate.longitude))
        .collect()
}

#[test]
fn empty_timeline() {
    let points = geo_point_extractor::extract(&timeline(vec![], vec![]));
    assert_eq!(points, ExtractedPoints::default());
    assert!(points.is_empty());
}

#[test]
fn each_source_is_tagged() {
    let data = timeline(
        vec![signal("1°, 2°")],
        vec![visit_segment("3°, 4°"), path_segment(&["5°, 6°"])],
    );
    let points = geo_point_extractor::extract(&data);
    assert_eq!(coordinates(&points.visits), vec![(3.0, 4.0)]);
    assert_eq!(coordinates(&points.paths), vec![(5.0, 6.0)]);
    assert_eq!(coordinates(&points.signals), vec![(1.0, 2.0)]);
    assert!(points.visits.iter().all(|p| p.source_kind == SourceKind::Visit));
    assert!(points.paths.iter().all(|p| p.source_kind == SourceKind::Path));
    assert!(points.signals.iter().all(|p| p.source_kind == SourceKind::Signal));
    assert_eq!(points.len(), 3);
}

#[test]
fn path_order_is_preserved_across_segments() {
    let data = timeline(
        vec![],
        vec![
            path_segment(&["1°, 1°", "2°, 2°"]),
            path_segment(&[]),
            visit_segment("50°, 50°"),
            path_segment(&["3°, 3°", "4°, 4°", "5°, 5°"]),
        ],
    );
    let points = geo_point_extractor::extract(&data);
    assert_eq!(
        coordinates(&points.paths),
        vec![(1.0, 1.0), (2.0, 2.0), (3.0, 3.0), (4.0, 4.0), (5.0, 5.0)]
    );
    assert_eq!(points.visits.len(), 1);
    assert_eq!(points.skipped.total(), 0);
}

#[test]
fn malformed_entries_are_skipped_and_counted() {
    init_logging();
    let data = timeline(
        vec![
            signal("43.26, -80.09"),
            signal("10°, 20°"),
            signal("95°, 20°"),
        ],
        vec![
            visit_segment("43.2606921°, -80.0979546°"),
            visit_segment("43.2606921°,-80.0979546°"),
            path_segment(&["1°, 1°", "garbage", "2°, 2°"]),
        ],
    );
    let points = geo_point_extractor::extract(&data);
    assert_eq!(coordinates(&points.visits), vec![(43.2606921, -80.0979546)]);
    assert_eq!(coordinates(&points.paths), vec![(1.0, 1.0), (2.0, 2.0)]);
    assert_eq!(coordinates(&points.signals), vec![(10.0, 20.0)]);
    assert_eq!(
        points.skipped,
        SkippedPoints {
            visits: 1,
            paths: 1,
            signals: 2,
        }
    );
    assert_eq!(points.skipped.total(), 4);
    let per_kind: usize = SourceKind::iter().map(|k| points.skipped.of(k)).sum();
    assert_eq!(per_kind, 4);
}

#[test]
fn absent_coordinates_are_not_malformed() {
    let data = timeline(
        vec![RawSignal { position: None }, RawSignal::default()],
        vec![
            SemanticSegment {
                visit: Some(Visit {
                    top_candidate: Some(PlaceCandidate::default()),
                }),
                ..Default::default()
            },
            SemanticSegment {
                visit: Some(Visit::default()),
                ..Default::default()
            },
        ],
    );
    let points = geo_point_extractor::extract(&data);
    assert!(points.is_empty());
    assert_eq!(points.skipped.total(), 0);
}

#[test]
fn log_limit_does_not_change_counts() {
    let data = timeline(vec![signal("bad"); 50], vec![]);
    let quiet = GeoPointExtractor::with_log_limit(0).extract(&data);
    let chatty = GeoPointExtractor::with_log_limit(100).extract(&data);
    assert_eq!(quiet, chatty);
    assert_eq!(quiet.skipped.signals, 50);
}

#[test]
fn dedupe_keeps_first_in_precedence_order() {
    let data = timeline(
        vec![signal("1°, 1°"), signal("9°, 9°"), signal("9°, 9°")],
        vec![
            visit_segment("1°, 1°"),
            path_segment(&["1°, 1°", "2°, 2°", "1°, 1.0000001°"]),
        ],
    );
    let points = geo_point_extractor::extract(&data);
    assert_eq!(points.len(), 7);
    let deduped = points.clone().dedupe_coincident();
    assert_eq!(coordinates(&deduped.visits), vec![(1.0, 1.0)]);
    assert_eq!(
        coordinates(&deduped.paths),
        vec![(2.0, 2.0), (1.0, 1.0000001)]
    );
    assert_eq!(coordinates(&deduped.signals), vec![(9.0, 9.0)]);
    assert_eq!(deduped.skipped, points.skipped);
}

#[test]
fn sample_export() {
    let data: timeline_core::TimelineData =
        serde_json::from_slice(&load_sample_bytes()).unwrap();
    let points = geo_point_extractor::extract(&data);
    assert_eq!(
        coordinates(&points.visits),
        vec![(43.2606921, -80.0979546), (43.6532, -79.3832)]
    );
    assert_eq!(
        coordinates(&points.paths),
        vec![(43.261, -80.098), (43.262, -80.099), (43.654, -79.384)]
    );
    assert_eq!(
        coordinates(&points.signals),
        vec![(43.2606921, -80.0979546), (43.7, -79.4)]
    );
    assert_eq!(points.skipped.paths, 1);
    assert_eq!(points.skipped.signals, 1);
    assert_eq!(points.skipped.visits, 0);
    assert_eq!(
        points.visits[0].coordinate,
        Coordinate::new(43.2606921, -80.0979546).unwrap()
    );
}
