use configs::RelayConfig;
use serde_json::Value;
use tracing::{debug, error, info, instrument};

use super::domain::{ContactSubmission, RelayPayload};
use super::errors::RelayError;

/// Longest slice of a relay body kept in errors and logs.
const BODY_EXCERPT: usize = 200;

fn excerpt(body: &str) -> String {
    body.chars().take(BODY_EXCERPT).collect()
}

/// Client for the third-party relay that turns a submission into an email.
#[derive(Clone)]
pub struct ContactRelay {
    client: reqwest::Client,
    endpoint: String,
    access_key: Option<String>,
}

impl ContactRelay {
    pub fn new(cfg: &RelayConfig) -> Self {
        Self { client: reqwest::Client::new(), endpoint: cfg.endpoint.clone(), access_key: cfg.access_key.clone() }
    }

    pub fn is_configured(&self) -> bool { self.access_key.is_some() }

    /// Forward one submission. Success means a 2xx answer whose JSON has `success: true`.
    #[instrument(skip(self, submission), fields(email = %submission.email))]
    pub async fn send(&self, submission: &ContactSubmission) -> Result<(), RelayError> {
        let key = self.access_key.as_deref().ok_or_else(|| {
            error!("relay access key missing");
            RelayError::MissingAccessKey
        })?;

        let resp = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&RelayPayload::new(key, submission))
            .send()
            .await
            .map_err(|e| RelayError::Network(e.to_string()))?;
        let status = resp.status();
        let body = resp.text().await.map_err(|e| RelayError::Network(e.to_string()))?;
        debug!(status = status.as_u16(), body = %excerpt(&body), "relay_response");

        let parsed: Value = match serde_json::from_str(&body) {
            Ok(v) => v,
            Err(_) if !status.is_success() => {
                return Err(RelayError::Status { status: status.as_u16(), body: excerpt(&body) });
            }
            Err(_) => return Err(RelayError::MalformedResponse(excerpt(&body))),
        };
        if !status.is_success() {
            return Err(RelayError::Status { status: status.as_u16(), body: excerpt(&body) });
        }
        if parsed.get("success").and_then(Value::as_bool) != Some(true) {
            let reason = parsed.get("message").and_then(Value::as_str).unwrap_or("unknown").to_string();
            return Err(RelayError::Rejected(reason));
        }
        info!("contact_relayed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn submission() -> ContactSubmission {
        ContactSubmission {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            phone: "555".into(),
            service: "Reels".into(),
            budget: "$500".into(),
            message: "Hi".into(),
        }
    }

    fn relay_for(server: &MockServer, key: Option<&str>) -> ContactRelay {
        let cfg = RelayConfig { endpoint: server.url("/submit"), access_key: key.map(str::to_string) };
        ContactRelay::new(&cfg)
    }

    #[tokio::test]
    async fn success_on_2xx_with_success_true() {
        let server = MockServer::start_async().await;
        let m = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/submit")
                    .json_body_partial(r#"{"access_key":"k","subject":"New Reels Inquiry - $500","replyto":"ana@example.com"}"#);
                then.status(200).json_body(json!({"success": true, "message": "Email sent"}));
            })
            .await;
        relay_for(&server, Some("k")).send(&submission()).await.unwrap();
        m.assert_async().await;
    }

    #[tokio::test]
    async fn server_error_is_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/submit");
                then.status(500).json_body(json!({"success": false}));
            })
            .await;
        let err = relay_for(&server, Some("k")).send(&submission()).await.unwrap_err();
        assert!(matches!(err, RelayError::Status { status: 500, .. }));
    }

    #[tokio::test]
    async fn success_false_is_rejected() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/submit");
                then.status(200).json_body(json!({"success": false, "message": "Invalid access key"}));
            })
            .await;
        let err = relay_for(&server, Some("k")).send(&submission()).await.unwrap_err();
        assert!(matches!(err, RelayError::Rejected(ref m) if m == "Invalid access key"));
    }

    #[tokio::test]
    async fn html_body_is_malformed() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/submit");
                then.status(200).body("<html>maintenance</html>");
            })
            .await;
        let err = relay_for(&server, Some("k")).send(&submission()).await.unwrap_err();
        assert!(matches!(err, RelayError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn missing_key_never_calls_out() {
        let server = MockServer::start_async().await;
        let m = server
            .mock_async(|when, then| {
                when.method(POST).path("/submit");
                then.status(200).json_body(json!({"success": true}));
            })
            .await;
        let err = relay_for(&server, None).send(&submission()).await.unwrap_err();
        assert!(matches!(err, RelayError::MissingAccessKey));
        assert_eq!(m.hits_async().await, 0);
    }

    #[tokio::test]
    async fn unreachable_is_network() {
        let cfg = RelayConfig { endpoint: "http://127.0.0.1:9/submit".into(), access_key: Some("k".into()) };
        let err = ContactRelay::new(&cfg).send(&submission()).await.unwrap_err();
        assert!(matches!(err, RelayError::Network(_)));
    }
}
