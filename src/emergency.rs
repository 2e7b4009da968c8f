use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::capabilities::AlertTransport;
use crate::utils::Coordinate;

pub const EMERGENCY_MESSAGE: &str = "Emergency assistance requested";
pub const EMERGENCY_PATH: &str = "/api/emergency";

// This is the only payload that leaves the device; keep the field names
// stable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyPayload {
    pub user_id: String,
    pub location: Coordinate,
    pub message: String,
}

impl EmergencyPayload {
    pub fn new(user_id: String, location: Coordinate) -> Self {
        EmergencyPayload {
            user_id,
            location,
            message: EMERGENCY_MESSAGE.to_string(),
        }
    }

    /// There are no accounts, so the user id is derived from the current time.
    pub fn for_now(location: Coordinate) -> Self {
        Self::new(format!("user_{}", Utc::now().timestamp_millis()), location)
    }
}

pub struct HttpAlertTransport {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl HttpAlertTransport {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(HttpAlertTransport {
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), EMERGENCY_PATH),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl AlertTransport for HttpAlertTransport {
    fn send_emergency(&self, payload: &EmergencyPayload) -> Result<()> {
        info!("sending emergency alert to {}", self.endpoint);
        let response = self.client.post(&self.endpoint).json(payload).send()?;
        let status = response.status();
        if !status.is_success() {
            bail!("emergency endpoint answered {status}");
        }
        Ok(())
    }
}
