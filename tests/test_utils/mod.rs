#![allow(dead_code)]

use std::fs;

use timeline_core::timeline_data::{
    PlaceCandidate, PlaceLocation, Position, RawSignal, SemanticSegment, TimelineData,
    TimelinePathPoint, Visit,
};

pub const SAMPLE_PATH: &str = "./tests/data/timeline_sample.json";

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn load_sample_bytes() -> Vec<u8> {
    fs::read(SAMPLE_PATH).unwrap()
}

pub fn signal(lat_lng: &str) -> RawSignal {
    RawSignal {
        position: Some(Position {
            lat_lng: Some(lat_lng.to_owned()),
        }),
    }
}

pub fn visit_segment(lat_lng: &str) -> SemanticSegment {
    SemanticSegment {
        visit: Some(Visit {
            top_candidate: Some(PlaceCandidate {
                place_location: Some(PlaceLocation {
                    lat_lng: Some(lat_lng.to_owned()),
                }),
            }),
        }),
        ..Default::default()
    }
}

pub fn path_segment(points: &[&str]) -> SemanticSegment {
    SemanticSegment {
        timeline_path: points
            .iter()
            .map(|point| TimelinePathPoint {
                point: point.to_string(),
            })
            .collect(),
        ..Default::default()
    }
}

pub fn timeline(signals: Vec<RawSignal>, segments: Vec<SemanticSegment>) -> TimelineData {
    TimelineData {
        raw_signals: signals,
        semantic_segments: segments,
    }
}
