//! Wire-schema message structs for the scenario record format.
//!
//! Committed mirror of the upstream proto2 schema, kept in prost's generated
//! shape: optional fields are `Option`, typed accessors supply the proto
//! defaults. Enum-valued fields stay `i32` so that out-of-range codes survive
//! decoding and can be handled by the normalization layer.

/// A single 3D map point, in meters.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MapPoint {
    #[prost(double, optional, tag = "1")]
    pub x: ::core::option::Option<f64>,
    #[prost(double, optional, tag = "2")]
    pub y: ::core::option::Option<f64>,
    #[prost(double, optional, tag = "3")]
    pub z: ::core::option::Option<f64>,
}

/// A segment of a lane's own polyline together with the road line or edge
/// that bounds it over that index range.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BoundarySegment {
    #[prost(int32, optional, tag = "1")]
    pub lane_start_index: ::core::option::Option<i32>,
    #[prost(int32, optional, tag = "2")]
    pub lane_end_index: ::core::option::Option<i32>,
    #[prost(int64, optional, tag = "3")]
    pub boundary_feature_id: ::core::option::Option<i64>,
    #[prost(int32, optional, tag = "4")]
    pub boundary_type: ::core::option::Option<i32>,
}

/// An adjacent lane and the index ranges over which the two run parallel.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct LaneNeighbor {
    #[prost(int64, optional, tag = "1")]
    pub feature_id: ::core::option::Option<i64>,
    #[prost(int32, optional, tag = "2")]
    pub self_start_index: ::core::option::Option<i32>,
    #[prost(int32, optional, tag = "3")]
    pub self_end_index: ::core::option::Option<i32>,
    #[prost(int32, optional, tag = "4")]
    pub neighbor_start_index: ::core::option::Option<i32>,
    #[prost(int32, optional, tag = "5")]
    pub neighbor_end_index: ::core::option::Option<i32>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct LaneCenter {
    #[prost(double, optional, tag = "1")]
    pub speed_limit_mph: ::core::option::Option<f64>,
    #[prost(int32, optional, tag = "2")]
    pub r#type: ::core::option::Option<i32>,
    #[prost(bool, optional, tag = "3")]
    pub interpolating: ::core::option::Option<bool>,
    #[prost(message, repeated, tag = "8")]
    pub polyline: ::prost::alloc::vec::Vec<MapPoint>,
    #[prost(int64, repeated, packed = "false", tag = "9")]
    pub entry_lanes: ::prost::alloc::vec::Vec<i64>,
    #[prost(int64, repeated, packed = "false", tag = "10")]
    pub exit_lanes: ::prost::alloc::vec::Vec<i64>,
    #[prost(message, repeated, tag = "11")]
    pub left_neighbors: ::prost::alloc::vec::Vec<LaneNeighbor>,
    #[prost(message, repeated, tag = "12")]
    pub right_neighbors: ::prost::alloc::vec::Vec<LaneNeighbor>,
    #[prost(message, repeated, tag = "13")]
    pub left_boundaries: ::prost::alloc::vec::Vec<BoundarySegment>,
    #[prost(message, repeated, tag = "14")]
    pub right_boundaries: ::prost::alloc::vec::Vec<BoundarySegment>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RoadLine {
    #[prost(int32, optional, tag = "1")]
    pub r#type: ::core::option::Option<i32>,
    #[prost(message, repeated, tag = "2")]
    pub polyline: ::prost::alloc::vec::Vec<MapPoint>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RoadEdge {
    #[prost(int32, optional, tag = "1")]
    pub r#type: ::core::option::Option<i32>,
    #[prost(message, repeated, tag = "2")]
    pub polyline: ::prost::alloc::vec::Vec<MapPoint>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct StopSign {
    #[prost(int64, repeated, packed = "false", tag = "1")]
    pub lane: ::prost::alloc::vec::Vec<i64>,
    #[prost(message, optional, tag = "2")]
    pub position: ::core::option::Option<MapPoint>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Crosswalk {
    #[prost(message, repeated, tag = "1")]
    pub polygon: ::prost::alloc::vec::Vec<MapPoint>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SpeedBump {
    #[prost(message, repeated, tag = "1")]
    pub polygon: ::prost::alloc::vec::Vec<MapPoint>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Driveway {
    #[prost(message, repeated, tag = "1")]
    pub polygon: ::prost::alloc::vec::Vec<MapPoint>,
}

/// One static map element; exactly one of the feature variants is set.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MapFeature {
    #[prost(int64, optional, tag = "1")]
    pub id: ::core::option::Option<i64>,
    #[prost(oneof = "map_feature::FeatureData", tags = "3, 4, 5, 7, 8, 9, 10")]
    pub feature_data: ::core::option::Option<map_feature::FeatureData>,
}

pub mod map_feature {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum FeatureData {
        #[prost(message, tag = "3")]
        Lane(super::LaneCenter),
        #[prost(message, tag = "4")]
        RoadLine(super::RoadLine),
        #[prost(message, tag = "5")]
        RoadEdge(super::RoadEdge),
        #[prost(message, tag = "7")]
        StopSign(super::StopSign),
        #[prost(message, tag = "8")]
        Crosswalk(super::Crosswalk),
        #[prost(message, tag = "9")]
        SpeedBump(super::SpeedBump),
        #[prost(message, tag = "10")]
        Driveway(super::Driveway),
    }
}

/// The signal state of one lane at one timestep.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TrafficSignalLaneState {
    #[prost(int64, optional, tag = "1")]
    pub lane: ::core::option::Option<i64>,
    #[prost(int32, optional, tag = "2")]
    pub state: ::core::option::Option<i32>,
    #[prost(message, optional, tag = "3")]
    pub stop_point: ::core::option::Option<MapPoint>,
}

/// All lane signal states at one timestep.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DynamicMapState {
    #[prost(message, repeated, tag = "1")]
    pub lane_states: ::prost::alloc::vec::Vec<TrafficSignalLaneState>,
}

/// One tracked object's pose and extent at one timestep.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ObjectState {
    #[prost(double, optional, tag = "2")]
    pub center_x: ::core::option::Option<f64>,
    #[prost(double, optional, tag = "3")]
    pub center_y: ::core::option::Option<f64>,
    #[prost(double, optional, tag = "4")]
    pub center_z: ::core::option::Option<f64>,
    #[prost(double, optional, tag = "5")]
    pub length: ::core::option::Option<f64>,
    #[prost(double, optional, tag = "6")]
    pub width: ::core::option::Option<f64>,
    #[prost(double, optional, tag = "7")]
    pub height: ::core::option::Option<f64>,
    #[prost(double, optional, tag = "8")]
    pub heading: ::core::option::Option<f64>,
    #[prost(double, optional, tag = "9")]
    pub velocity_x: ::core::option::Option<f64>,
    #[prost(double, optional, tag = "10")]
    pub velocity_y: ::core::option::Option<f64>,
    #[prost(bool, optional, tag = "11")]
    pub valid: ::core::option::Option<bool>,
}

/// One tracked object across all timesteps. `object_type` codes:
/// 1 = vehicle, 2 = pedestrian, 3 = cyclist; other codes are reserved.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Track {
    #[prost(int32, optional, tag = "1")]
    pub id: ::core::option::Option<i32>,
    #[prost(int32, optional, tag = "2")]
    pub object_type: ::core::option::Option<i32>,
    #[prost(message, repeated, tag = "3")]
    pub states: ::prost::alloc::vec::Vec<ObjectState>,
}

/// A track the dataset marks as a prediction target.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RequiredPrediction {
    #[prost(int32, optional, tag = "1")]
    pub track_index: ::core::option::Option<i32>,
    #[prost(int32, optional, tag = "2")]
    pub difficulty: ::core::option::Option<i32>,
}

/// One full driving episode: map, agent trajectories, and signal states.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Scenario {
    #[prost(double, repeated, packed = "false", tag = "1")]
    pub timestamps_seconds: ::prost::alloc::vec::Vec<f64>,
    #[prost(message, repeated, tag = "2")]
    pub tracks: ::prost::alloc::vec::Vec<Track>,
    #[prost(int32, repeated, packed = "false", tag = "4")]
    pub objects_of_interest: ::prost::alloc::vec::Vec<i32>,
    #[prost(string, optional, tag = "5")]
    pub scenario_id: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(int32, optional, tag = "6")]
    pub sdc_track_index: ::core::option::Option<i32>,
    #[prost(message, repeated, tag = "7")]
    pub dynamic_map_states: ::prost::alloc::vec::Vec<DynamicMapState>,
    #[prost(message, repeated, tag = "8")]
    pub map_features: ::prost::alloc::vec::Vec<MapFeature>,
    #[prost(int32, optional, tag = "10")]
    pub current_time_index: ::core::option::Option<i32>,
    #[prost(message, repeated, tag = "11")]
    pub tracks_to_predict: ::prost::alloc::vec::Vec<RequiredPrediction>,
}
