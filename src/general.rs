//! Connectivity endpoints shared by every API area.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::Timestamp;
use crate::auth::SecurityLevel;
use crate::request::Endpoint;

/// `GET /api/v3/ping`
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct PingRequest;

impl Endpoint for PingRequest {
    const METHOD: Method = Method::GET;
    const PATH: &'static str = "/api/v3/ping";
    const SECURITY: SecurityLevel = SecurityLevel::None;

    type Response = serde_json::Value;
}

/// `GET /api/v3/time`
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ServerTimeRequest;

impl Endpoint for ServerTimeRequest {
    const METHOD: Method = Method::GET;
    const PATH: &'static str = "/api/v3/time";
    const SECURITY: SecurityLevel = SecurityLevel::None;

    type Response = ServerTimeResponse;
}

#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerTimeResponse {
    pub server_time: Timestamp,
}
