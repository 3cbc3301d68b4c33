// src/dtos/customer.rs
use serde::Serialize;
use sqlx::FromRow;

use crate::analytics::rfm::RfmSegment;

#[derive(Debug, Serialize, FromRow)]
pub struct CustomerLocation {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Serialize)]
pub struct CustomerLocationsResponse {
    pub customer_locations: Vec<CustomerLocation>,
}

#[derive(Debug, Serialize)]
pub struct StoreRfm {
    pub storeid: String,
    pub rfm_data: Vec<RfmSegment>,
}

#[derive(Debug, Serialize)]
pub struct RfmSegmentsResponse {
    pub rfm_segments: Vec<StoreRfm>,
}
