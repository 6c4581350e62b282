//! Decoded, render-ready scenario model.
//!
//! These types are what the API serializes for the browser: map features
//! bucketed by category, tracks bucketed by object class, and one
//! traffic-light frame per timestep. A scenario is built once by the decoder
//! and never mutated afterwards.

use serde::Serialize;

/// One decoded driving episode.
#[derive(Debug, Clone, Serialize)]
pub struct Scenario {
    pub scenario_id: String,
    pub timestamps: Vec<f64>,
    pub current_time_index: i32,
    pub sdc_track_index: i32,
    pub objects_of_interest: Vec<i32>,
    pub tracks_to_predict: Vec<PredictionTarget>,
    pub map_features: MapFeatures,
    pub tracks: TrackBuckets,
    pub traffic_lights: Vec<Vec<TrafficLightState>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictionTarget {
    pub track_index: i32,
    pub difficulty: i32,
}

/// Static map geometry, one bucket per feature category.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MapFeatures {
    pub lanes: Vec<Lane>,
    pub road_lines: Vec<RoadLine>,
    pub road_edges: Vec<RoadEdge>,
    pub crosswalks: Vec<Crosswalk>,
    pub stop_signs: Vec<StopSign>,
    pub speed_bumps: Vec<SpeedBump>,
    pub driveways: Vec<Driveway>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Lane {
    pub id: i64,
    pub polyline: Vec<[f64; 3]>,
    #[serde(rename = "type")]
    pub lane_type: i32,
    pub speed_limit_mph: Option<f64>,
    pub interpolating: bool,
    pub entry_lanes: Vec<i64>,
    pub exit_lanes: Vec<i64>,
    pub left_boundaries: Vec<BoundarySegment>,
    pub right_boundaries: Vec<BoundarySegment>,
    pub left_neighbors: Vec<LaneNeighbor>,
    pub right_neighbors: Vec<LaneNeighbor>,
}

/// Index range of the owning lane's polyline covered by one boundary
/// feature. The indices are range markers for the renderer, never
/// dereferenced here.
#[derive(Debug, Clone, Serialize)]
pub struct BoundarySegment {
    pub lane_start_index: i32,
    pub lane_end_index: i32,
    pub boundary_feature_id: i64,
    pub boundary_type: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct LaneNeighbor {
    pub feature_id: i64,
    pub self_start_index: i32,
    pub self_end_index: i32,
    pub neighbor_start_index: i32,
    pub neighbor_end_index: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoadLine {
    pub id: i64,
    pub polyline: Vec<[f64; 3]>,
    #[serde(rename = "type")]
    pub line_type: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoadEdge {
    pub id: i64,
    pub polyline: Vec<[f64; 3]>,
    #[serde(rename = "type")]
    pub edge_type: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Crosswalk {
    pub id: i64,
    pub polygon: Vec<[f64; 3]>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StopSign {
    pub id: i64,
    pub position: [f64; 3],
    pub lane_ids: Vec<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SpeedBump {
    pub id: i64,
    pub polygon: Vec<[f64; 3]>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Driveway {
    pub id: i64,
    pub polygon: Vec<[f64; 3]>,
}

/// Tracks partitioned by object class. The self-driving car is identified
/// by track index and always lands in `sdc`, never in a class bucket.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TrackBuckets {
    pub sdc: Option<Track>,
    pub vehicles: Vec<Track>,
    pub pedestrians: Vec<Track>,
    pub cyclists: Vec<Track>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Track {
    pub id: i32,
    pub object_type: i32,
    pub states: Vec<TrackState>,
}

/// One timestep of a track. An invalid state carries no kinematics at all;
/// absence tells the renderer "do not draw or interpolate", whereas zero is
/// a legitimate coordinate.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum TrackState {
    Valid {
        x: f64,
        y: f64,
        z: f64,
        heading: f64,
        velocity_x: f64,
        velocity_y: f64,
        length: f64,
        width: f64,
        height: f64,
        valid: bool,
    },
    Invalid {
        valid: bool,
    },
}

impl TrackState {
    pub fn is_valid(&self) -> bool {
        matches!(self, TrackState::Valid { .. })
    }
}

/// The signal state of one lane at one timestep.
#[derive(Debug, Clone, Serialize)]
pub struct TrafficLightState {
    pub lane_id: i64,
    pub state: i32,
    pub state_name: String,
    pub stop_point: Option<[f64; 2]>,
}
