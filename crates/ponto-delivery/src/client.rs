//! Outbound delivery of attendance records.
//!
//! One HTTP POST per accepted event, bounded by a fixed timeout, no retry.
//! Every outcome — remote status, remote rejection, transport failure — is
//! folded into a [`DeliveryResult`] so the intake loop can route feedback
//! without unwinding.

use ponto_core::BadgeId;
use ponto_core::constants::DELIVERY_TIMEOUT_SECS;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Result type alias for delivery-client construction.
pub type Result<T> = std::result::Result<T, DeliveryError>;

/// Errors raised while constructing the delivery client.
///
/// Delivery itself never errors; see [`DeliveryResult`].
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    /// The underlying HTTP client could not be initialized.
    #[error("HTTP client initialization failed: {0}")]
    ClientInit(#[from] reqwest::Error),
}

/// Which payload shape to send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PayloadMode {
    /// Serial number, full name and the theory-day flag.
    #[default]
    Full,

    /// Legacy minimal payload: serial number and full name only.
    Legacy,
}

/// The JSON body POSTed to the collection endpoint.
///
/// Field names are fixed by the endpoint's contract and must not change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendancePayload {
    #[serde(rename = "SerialNumber")]
    pub serial_number: String,

    #[serde(rename = "NomeCompleto")]
    pub nome_completo: String,

    /// Absent entirely in the legacy minimal payload.
    #[serde(rename = "IsDiaTeoria", default, skip_serializing_if = "Option::is_none")]
    pub is_dia_teoria: Option<bool>,
}

/// Outcome of one delivery attempt.
///
/// `status` is absent on transport failure (DNS, TCP, TLS, timeout). The
/// body is surfaced to the operator but never parsed.
#[derive(Debug, Clone)]
pub struct DeliveryResult {
    pub status: Option<u16>,
    pub body: String,
    pub error: Option<String>,
}

impl DeliveryResult {
    /// Success criterion: the endpoint answered with status 200 exactly.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == Some(200)
    }
}

/// HTTP client for the attendance-collection endpoint.
pub struct AttendanceClient {
    http: reqwest::Client,
    endpoint: String,
    mode: PayloadMode,
}

impl AttendanceClient {
    /// Build a client for the given endpoint.
    ///
    /// The underlying HTTP client is created once and reused across
    /// deliveries (connection pooling); the whole request is bounded by a
    /// 10 second timeout.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(endpoint: impl Into<String>, mode: PayloadMode) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(DELIVERY_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
            mode,
        })
    }

    /// The configured endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Deliver one classified, resolved event.
    ///
    /// Never returns an error: transport failures are captured in the
    /// result with an absent status code, and the event is dropped by the
    /// caller either way (no retry, no queue).
    pub async fn deliver(
        &self,
        badge: &BadgeId,
        display_name: &str,
        is_theory_day: bool,
    ) -> DeliveryResult {
        let payload = AttendancePayload {
            serial_number: badge.as_str().to_string(),
            nome_completo: display_name.to_string(),
            is_dia_teoria: match self.mode {
                PayloadMode::Full => Some(is_theory_day),
                PayloadMode::Legacy => None,
            },
        };

        debug!(badge = %badge, endpoint = %self.endpoint, "delivery_post");

        match self.http.post(&self.endpoint).json(&payload).send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                match response.text().await {
                    Ok(body) => DeliveryResult {
                        status: Some(status),
                        body,
                        error: None,
                    },
                    Err(e) => DeliveryResult {
                        status: Some(status),
                        body: String::new(),
                        error: Some(e.to_string()),
                    },
                }
            }
            Err(e) => DeliveryResult {
                status: None,
                body: String::new(),
                error: Some(e.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_field_names_are_fixed() {
        let payload = AttendancePayload {
            serial_number: "1601873172".to_string(),
            nome_completo: "Thiago Dias Santos".to_string(),
            is_dia_teoria: Some(true),
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["SerialNumber"], "1601873172");
        assert_eq!(json["NomeCompleto"], "Thiago Dias Santos");
        assert_eq!(json["IsDiaTeoria"], true);
    }

    #[test]
    fn test_legacy_payload_omits_theory_flag() {
        let payload = AttendancePayload {
            serial_number: "1601873172".to_string(),
            nome_completo: "Thiago Dias Santos".to_string(),
            is_dia_teoria: None,
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("IsDiaTeoria").is_none());
        assert_eq!(
            serde_json::to_string(&payload).unwrap(),
            r#"{"SerialNumber":"1601873172","NomeCompleto":"Thiago Dias Santos"}"#
        );
    }

    #[test]
    fn test_delivery_result_success_criterion() {
        let ok = DeliveryResult {
            status: Some(200),
            body: "registrado".to_string(),
            error: None,
        };
        assert!(ok.is_success());

        let rejected = DeliveryResult {
            status: Some(500),
            body: String::new(),
            error: None,
        };
        assert!(!rejected.is_success());

        let transport = DeliveryResult {
            status: None,
            body: String::new(),
            error: Some("connection refused".to_string()),
        };
        assert!(!transport.is_success());
    }
}
