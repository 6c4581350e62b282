//! Normalization of one wire-format scenario message into the decoded model.
//!
//! Decoding is a pure function: no I/O, no shared state, and no failure on a
//! well-formed message. Unset optional fields become `None` or the proto
//! default, and unknown map-feature variants are skipped on purpose.

use wayscope_wire::schema as wire;
use wayscope_wire::schema::map_feature::FeatureData;

use crate::scenario::{
    BoundarySegment, Crosswalk, Driveway, Lane, LaneNeighbor, MapFeatures, PredictionTarget,
    RoadEdge, RoadLine, Scenario, SpeedBump, StopSign, Track, TrackBuckets, TrackState,
    TrafficLightState,
};
use crate::signal::signal_state_name;

const OBJECT_TYPE_VEHICLE: i32 = 1;
const OBJECT_TYPE_PEDESTRIAN: i32 = 2;
const OBJECT_TYPE_CYCLIST: i32 = 3;

/// Decodes one scenario message into the render-ready model.
pub fn decode_scenario(message: &wire::Scenario) -> Scenario {
    Scenario {
        scenario_id: message.scenario_id().to_owned(),
        timestamps: message.timestamps_seconds.clone(),
        current_time_index: message.current_time_index(),
        sdc_track_index: message.sdc_track_index(),
        objects_of_interest: message.objects_of_interest.clone(),
        tracks_to_predict: message
            .tracks_to_predict
            .iter()
            .map(|prediction| PredictionTarget {
                track_index: prediction.track_index(),
                difficulty: prediction.difficulty(),
            })
            .collect(),
        map_features: decode_map_features(&message.map_features),
        tracks: decode_tracks(&message.tracks, message.sdc_track_index()),
        traffic_lights: decode_traffic_lights(&message.dynamic_map_states),
    }
}

fn decode_map_features(features: &[wire::MapFeature]) -> MapFeatures {
    let mut buckets = MapFeatures::default();
    for feature in features {
        let id = feature.id();
        // Exactly one bucket per feature; features with an unset or
        // unrecognized variant are skipped rather than rejected.
        match &feature.feature_data {
            Some(FeatureData::Lane(lane)) => buckets.lanes.push(decode_lane(id, lane)),
            Some(FeatureData::RoadLine(line)) => buckets.road_lines.push(RoadLine {
                id,
                polyline: decode_points(&line.polyline),
                line_type: line.r#type(),
            }),
            Some(FeatureData::RoadEdge(edge)) => buckets.road_edges.push(RoadEdge {
                id,
                polyline: decode_points(&edge.polyline),
                edge_type: edge.r#type(),
            }),
            Some(FeatureData::StopSign(sign)) => {
                let position = sign
                    .position
                    .as_ref()
                    .map(|point| [point.x(), point.y(), point.z()])
                    .unwrap_or([0.0, 0.0, 0.0]);
                buckets.stop_signs.push(StopSign {
                    id,
                    position,
                    lane_ids: sign.lane.clone(),
                });
            }
            Some(FeatureData::Crosswalk(crosswalk)) => buckets.crosswalks.push(Crosswalk {
                id,
                polygon: decode_points(&crosswalk.polygon),
            }),
            Some(FeatureData::SpeedBump(bump)) => buckets.speed_bumps.push(SpeedBump {
                id,
                polygon: decode_points(&bump.polygon),
            }),
            Some(FeatureData::Driveway(driveway)) => buckets.driveways.push(Driveway {
                id,
                polygon: decode_points(&driveway.polygon),
            }),
            None => {}
        }
    }
    buckets
}

fn decode_lane(id: i64, lane: &wire::LaneCenter) -> Lane {
    Lane {
        id,
        polyline: decode_points(&lane.polyline),
        lane_type: lane.r#type(),
        speed_limit_mph: lane.speed_limit_mph,
        interpolating: lane.interpolating(),
        entry_lanes: lane.entry_lanes.clone(),
        exit_lanes: lane.exit_lanes.clone(),
        left_boundaries: decode_boundaries(&lane.left_boundaries),
        right_boundaries: decode_boundaries(&lane.right_boundaries),
        left_neighbors: decode_neighbors(&lane.left_neighbors),
        right_neighbors: decode_neighbors(&lane.right_neighbors),
    }
}

fn decode_points(points: &[wire::MapPoint]) -> Vec<[f64; 3]> {
    points
        .iter()
        .map(|point| [point.x(), point.y(), point.z()])
        .collect()
}

fn decode_boundaries(segments: &[wire::BoundarySegment]) -> Vec<BoundarySegment> {
    segments
        .iter()
        .map(|segment| BoundarySegment {
            lane_start_index: segment.lane_start_index(),
            lane_end_index: segment.lane_end_index(),
            boundary_feature_id: segment.boundary_feature_id(),
            boundary_type: segment.boundary_type(),
        })
        .collect()
}

fn decode_neighbors(neighbors: &[wire::LaneNeighbor]) -> Vec<LaneNeighbor> {
    neighbors
        .iter()
        .map(|neighbor| LaneNeighbor {
            feature_id: neighbor.feature_id(),
            self_start_index: neighbor.self_start_index(),
            self_end_index: neighbor.self_end_index(),
            neighbor_start_index: neighbor.neighbor_start_index(),
            neighbor_end_index: neighbor.neighbor_end_index(),
        })
        .collect()
}

fn decode_tracks(tracks: &[wire::Track], sdc_track_index: i32) -> TrackBuckets {
    let mut buckets = TrackBuckets::default();
    for (track_index, track) in tracks.iter().enumerate() {
        let decoded = decode_track(track);
        // The SDC is picked by index, not type, and never doubles into a
        // class bucket. Non-SDC tracks with a code other than 1/2/3 are
        // dropped from every bucket.
        if track_index as i32 == sdc_track_index {
            buckets.sdc = Some(decoded);
        } else {
            match track.object_type() {
                OBJECT_TYPE_VEHICLE => buckets.vehicles.push(decoded),
                OBJECT_TYPE_PEDESTRIAN => buckets.pedestrians.push(decoded),
                OBJECT_TYPE_CYCLIST => buckets.cyclists.push(decoded),
                _ => {}
            }
        }
    }
    buckets
}

fn decode_track(track: &wire::Track) -> Track {
    Track {
        id: track.id(),
        object_type: track.object_type(),
        states: track.states.iter().map(decode_state).collect(),
    }
}

fn decode_state(state: &wire::ObjectState) -> TrackState {
    if state.valid() {
        TrackState::Valid {
            x: state.center_x(),
            y: state.center_y(),
            z: state.center_z(),
            heading: state.heading(),
            velocity_x: state.velocity_x(),
            velocity_y: state.velocity_y(),
            length: state.length(),
            width: state.width(),
            height: state.height(),
            valid: true,
        }
    } else {
        TrackState::Invalid { valid: false }
    }
}

fn decode_traffic_lights(dynamic_states: &[wire::DynamicMapState]) -> Vec<Vec<TrafficLightState>> {
    dynamic_states
        .iter()
        .map(|frame| {
            frame
                .lane_states
                .iter()
                .map(|lane_state| TrafficLightState {
                    lane_id: lane_state.lane(),
                    state: lane_state.state(),
                    state_name: signal_state_name(lane_state.state()).to_owned(),
                    stop_point: lane_state
                        .stop_point
                        .as_ref()
                        .map(|point| [point.x(), point.y()]),
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use wayscope_testutils::scenario::{
        boundary_segment, invalid_state, lane_feature, point, signal_frame, synthetic_scenario,
        track, valid_state_at,
    };
    use wayscope_wire::schema as wire;
    use wayscope_wire::schema::map_feature::FeatureData;

    use super::decode_scenario;
    use crate::scenario::TrackState;

    #[test]
    fn round_trip_synthetic_scenario() {
        let message = synthetic_scenario("round-trip");
        let decoded = decode_scenario(&message);

        assert_eq!(decoded.scenario_id, "round-trip");
        assert_eq!(decoded.map_features.lanes.len(), 1);
        let lane = &decoded.map_features.lanes[0];
        assert_eq!(
            lane.polyline,
            vec![[0.0, 0.0, 0.0], [1.0, 0.5, 0.0], [2.0, 1.0, 0.0]]
        );
        assert_eq!(lane.left_boundaries.len(), 1);

        let sdc = decoded.tracks.sdc.as_ref().expect("sdc track present");
        assert_eq!(sdc.states.len(), 2);
        assert_eq!(
            serde_json::to_value(&sdc.states[1]).unwrap(),
            json!({"valid": false})
        );

        assert_eq!(decoded.traffic_lights.len(), 2);
        assert!(decoded.traffic_lights[0][0].stop_point.is_none());
    }

    #[test]
    fn valid_state_populates_every_numeric_field() {
        let message = wire::Scenario {
            sdc_track_index: Some(0),
            tracks: vec![track(7, 1, vec![valid_state_at(1.5, -2.5)])],
            ..Default::default()
        };
        let decoded = decode_scenario(&message);
        let state = &decoded.tracks.sdc.as_ref().unwrap().states[0];
        let value = serde_json::to_value(state).unwrap();
        let object = value.as_object().unwrap();
        for key in [
            "x",
            "y",
            "z",
            "heading",
            "velocity_x",
            "velocity_y",
            "length",
            "width",
            "height",
        ] {
            assert!(object[key].is_number(), "missing numeric field {key}");
        }
        assert_eq!(object["valid"], json!(true));
        assert_eq!(object.len(), 10);
    }

    #[test]
    fn invalid_state_serializes_to_bare_invalid_marker() {
        let state = TrackState::Invalid { valid: false };
        assert_eq!(serde_json::to_value(&state).unwrap(), json!({"valid": false}));
    }

    #[test]
    fn state_and_signal_counts_align_with_timestamps() {
        let message = synthetic_scenario("aligned");
        let decoded = decode_scenario(&message);
        assert_eq!(decoded.traffic_lights.len(), decoded.timestamps.len());
        let sdc = decoded.tracks.sdc.as_ref().unwrap();
        assert_eq!(sdc.states.len(), decoded.timestamps.len());
        for vehicle in &decoded.tracks.vehicles {
            assert_eq!(vehicle.states.len(), decoded.timestamps.len());
        }
    }

    #[test]
    fn sdc_classification_beats_object_type() {
        let message = wire::Scenario {
            sdc_track_index: Some(1),
            tracks: vec![
                track(1, 1, vec![valid_state_at(0.0, 0.0)]),
                // A pedestrian-coded track at the SDC index must still land
                // in the sdc slot and nowhere else.
                track(2, 2, vec![valid_state_at(1.0, 1.0)]),
                track(3, 2, vec![valid_state_at(2.0, 2.0)]),
            ],
            ..Default::default()
        };
        let decoded = decode_scenario(&message);
        assert_eq!(decoded.tracks.sdc.as_ref().unwrap().id, 2);
        assert_eq!(decoded.tracks.vehicles.len(), 1);
        assert_eq!(decoded.tracks.pedestrians.len(), 1);
        assert_eq!(decoded.tracks.pedestrians[0].id, 3);
        assert!(decoded.tracks.cyclists.is_empty());
    }

    #[test]
    fn unrecognized_object_types_are_dropped() {
        let message = wire::Scenario {
            sdc_track_index: Some(0),
            tracks: vec![
                track(1, 1, vec![]),
                track(2, 4, vec![]),
                track(3, 0, vec![]),
                track(4, 3, vec![]),
            ],
            ..Default::default()
        };
        let decoded = decode_scenario(&message);
        assert!(decoded.tracks.sdc.is_some());
        assert!(decoded.tracks.vehicles.is_empty());
        assert!(decoded.tracks.pedestrians.is_empty());
        assert_eq!(decoded.tracks.cyclists.len(), 1);
    }

    #[test]
    fn lane_boundary_and_neighbor_order_is_preserved() {
        let mut feature = lane_feature(10, &[(0.0, 0.0, 0.0), (5.0, 0.0, 0.0)]);
        if let Some(FeatureData::Lane(lane)) = feature.feature_data.as_mut() {
            lane.left_boundaries = vec![
                boundary_segment(0, 3, 101, 1),
                boundary_segment(4, 9, 102, 2),
                boundary_segment(10, 12, 103, 1),
            ];
            lane.right_neighbors = vec![
                wire::LaneNeighbor {
                    feature_id: Some(201),
                    self_start_index: Some(0),
                    self_end_index: Some(4),
                    neighbor_start_index: Some(1),
                    neighbor_end_index: Some(5),
                },
                wire::LaneNeighbor {
                    feature_id: Some(202),
                    self_start_index: Some(5),
                    self_end_index: Some(9),
                    neighbor_start_index: Some(6),
                    neighbor_end_index: Some(10),
                },
            ];
        }
        let message = wire::Scenario {
            map_features: vec![feature],
            ..Default::default()
        };
        let decoded = decode_scenario(&message);
        let lane = &decoded.map_features.lanes[0];
        let boundary_ids: Vec<i64> = lane
            .left_boundaries
            .iter()
            .map(|segment| segment.boundary_feature_id)
            .collect();
        assert_eq!(boundary_ids, vec![101, 102, 103]);
        let neighbor_ids: Vec<i64> = lane
            .right_neighbors
            .iter()
            .map(|neighbor| neighbor.feature_id)
            .collect();
        assert_eq!(neighbor_ids, vec![201, 202]);
    }

    #[test]
    fn feature_without_variant_is_skipped() {
        let message = wire::Scenario {
            map_features: vec![
                wire::MapFeature {
                    id: Some(1),
                    feature_data: None,
                },
                lane_feature(2, &[(0.0, 0.0, 0.0)]),
            ],
            ..Default::default()
        };
        let decoded = decode_scenario(&message);
        assert_eq!(decoded.map_features.lanes.len(), 1);
        assert_eq!(decoded.map_features.lanes[0].id, 2);
        assert!(decoded.map_features.road_lines.is_empty());
        assert!(decoded.map_features.road_edges.is_empty());
    }

    #[test]
    fn out_of_range_signal_codes_name_as_unknown() {
        let message = wire::Scenario {
            timestamps_seconds: vec![0.0],
            dynamic_map_states: vec![signal_frame(&[(55, 42, None), (56, 6, Some((3.0, 4.0)))])],
            ..Default::default()
        };
        let decoded = decode_scenario(&message);
        let frame = &decoded.traffic_lights[0];
        assert_eq!(frame[0].state_name, "UNKNOWN");
        assert_eq!(frame[0].state, 42);
        assert_eq!(frame[1].state_name, "GO");
        assert_eq!(frame[1].stop_point, Some([3.0, 4.0]));
    }

    #[test]
    fn unset_optional_lane_fields_decode_to_defaults() {
        let message = wire::Scenario {
            map_features: vec![wire::MapFeature {
                id: Some(9),
                feature_data: Some(FeatureData::Lane(wire::LaneCenter {
                    polyline: vec![point(1.0, 2.0, 3.0)],
                    ..Default::default()
                })),
            }],
            ..Default::default()
        };
        let decoded = decode_scenario(&message);
        let lane = &decoded.map_features.lanes[0];
        assert_eq!(lane.speed_limit_mph, None);
        assert!(!lane.interpolating);
        assert_eq!(lane.lane_type, 0);
        assert!(lane.entry_lanes.is_empty());
    }

    #[test]
    fn prediction_targets_and_envelope_fields_pass_through() {
        let message = wire::Scenario {
            scenario_id: Some("envelope".to_owned()),
            timestamps_seconds: vec![0.0, 0.1, 0.2],
            current_time_index: Some(1),
            objects_of_interest: vec![4, 7],
            tracks_to_predict: vec![wire::RequiredPrediction {
                track_index: Some(4),
                difficulty: Some(2),
            }],
            ..Default::default()
        };
        let decoded = decode_scenario(&message);
        assert_eq!(decoded.current_time_index, 1);
        assert_eq!(decoded.objects_of_interest, vec![4, 7]);
        assert_eq!(decoded.tracks_to_predict.len(), 1);
        assert_eq!(decoded.tracks_to_predict[0].track_index, 4);
        assert_eq!(decoded.tracks_to_predict[0].difficulty, 2);
    }

    #[test]
    fn invalid_states_interleave_with_valid_ones() {
        let message = wire::Scenario {
            sdc_track_index: Some(0),
            tracks: vec![track(
                1,
                1,
                vec![
                    valid_state_at(0.0, 0.0),
                    invalid_state(),
                    valid_state_at(2.0, 0.0),
                ],
            )],
            ..Default::default()
        };
        let decoded = decode_scenario(&message);
        let states = &decoded.tracks.sdc.as_ref().unwrap().states;
        assert!(states[0].is_valid());
        assert!(!states[1].is_valid());
        assert!(states[2].is_valid());
    }
}
