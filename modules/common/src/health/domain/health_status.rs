use serde::Serialize;

/// Health report of one service process.
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: HealthState,
    pub service_name: String,
    pub version: String,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    Healthy,
    Degraded,
    Unhealthy,
}

impl HealthStatus {
    pub fn new(
        status: HealthState,
        service_name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            status,
            service_name: service_name.into(),
            version: version.into(),
        }
    }

    pub fn healthy(service_name: impl Into<String>, version: impl Into<String>) -> Self {
        Self::new(HealthState::Healthy, service_name, version)
    }

    pub fn is_healthy(&self) -> bool {
        self.status == HealthState::Healthy
    }
}
