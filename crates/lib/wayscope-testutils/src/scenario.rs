//! Builders for synthetic wire-format scenario messages.

use wayscope_wire::schema as wire;
use wayscope_wire::schema::map_feature::FeatureData;

pub fn point(x: f64, y: f64, z: f64) -> wire::MapPoint {
    wire::MapPoint {
        x: Some(x),
        y: Some(y),
        z: Some(z),
    }
}

/// A fully populated valid state at the given position.
pub fn valid_state_at(x: f64, y: f64) -> wire::ObjectState {
    wire::ObjectState {
        center_x: Some(x),
        center_y: Some(y),
        center_z: Some(0.5),
        length: Some(4.8),
        width: Some(2.1),
        height: Some(1.6),
        heading: Some(0.25),
        velocity_x: Some(3.0),
        velocity_y: Some(-0.5),
        valid: Some(true),
    }
}

pub fn invalid_state() -> wire::ObjectState {
    wire::ObjectState {
        valid: Some(false),
        ..Default::default()
    }
}

pub fn track(id: i32, object_type: i32, states: Vec<wire::ObjectState>) -> wire::Track {
    wire::Track {
        id: Some(id),
        object_type: Some(object_type),
        states,
    }
}

pub fn boundary_segment(
    start: i32,
    end: i32,
    boundary_feature_id: i64,
    boundary_type: i32,
) -> wire::BoundarySegment {
    wire::BoundarySegment {
        lane_start_index: Some(start),
        lane_end_index: Some(end),
        boundary_feature_id: Some(boundary_feature_id),
        boundary_type: Some(boundary_type),
    }
}

pub fn lane_feature(id: i64, polyline: &[(f64, f64, f64)]) -> wire::MapFeature {
    wire::MapFeature {
        id: Some(id),
        feature_data: Some(FeatureData::Lane(wire::LaneCenter {
            polyline: polyline.iter().map(|&(x, y, z)| point(x, y, z)).collect(),
            ..Default::default()
        })),
    }
}

pub fn road_edge_feature(id: i64, polyline: &[(f64, f64, f64)]) -> wire::MapFeature {
    wire::MapFeature {
        id: Some(id),
        feature_data: Some(FeatureData::RoadEdge(wire::RoadEdge {
            r#type: Some(1),
            polyline: polyline.iter().map(|&(x, y, z)| point(x, y, z)).collect(),
        })),
    }
}

/// One signal frame; each entry is `(lane_id, state_code, stop_point)`.
pub fn signal_frame(lanes: &[(i64, i32, Option<(f64, f64)>)]) -> wire::DynamicMapState {
    wire::DynamicMapState {
        lane_states: lanes
            .iter()
            .map(|&(lane, state, stop_point)| wire::TrafficSignalLaneState {
                lane: Some(lane),
                state: Some(state),
                stop_point: stop_point.map(|(x, y)| point(x, y, 0.0)),
            })
            .collect(),
    }
}

/// A small but complete scenario: two timesteps, an SDC track with a valid
/// then invalid state, one vehicle, one lane with a left boundary, and a
/// signal frame per timestep (the first with no stop point).
pub fn synthetic_scenario(scenario_id: &str) -> wire::Scenario {
    let mut lane = lane_feature(10, &[(0.0, 0.0, 0.0), (1.0, 0.5, 0.0), (2.0, 1.0, 0.0)]);
    if let Some(FeatureData::Lane(lane_data)) = lane.feature_data.as_mut() {
        lane_data.left_boundaries = vec![boundary_segment(0, 2, 11, 1)];
        lane_data.speed_limit_mph = Some(25.0);
    }
    wire::Scenario {
        scenario_id: Some(scenario_id.to_owned()),
        timestamps_seconds: vec![0.0, 0.1],
        current_time_index: Some(0),
        sdc_track_index: Some(0),
        objects_of_interest: vec![1],
        tracks_to_predict: vec![wire::RequiredPrediction {
            track_index: Some(1),
            difficulty: Some(1),
        }],
        tracks: vec![
            track(100, 1, vec![valid_state_at(0.0, 0.0), invalid_state()]),
            track(
                101,
                1,
                vec![valid_state_at(5.0, 1.0), valid_state_at(5.5, 1.0)],
            ),
        ],
        map_features: vec![lane, road_edge_feature(20, &[(0.0, -2.0, 0.0), (2.0, -2.0, 0.0)])],
        dynamic_map_states: vec![
            signal_frame(&[(10, 4, None)]),
            signal_frame(&[(10, 6, Some((1.5, 0.75)))]),
        ],
    }
}
