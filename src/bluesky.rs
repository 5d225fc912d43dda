use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;
use tracing::{error, info};

pub const DEFAULT_SERVICE_URL: &str = "https://bsky.social";

/// Minimal Bluesky client: app-password session, then one feed post.
#[derive(Debug, Clone)]
pub struct Bluesky {
    service_url: String,
    identifier: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct Session {
    #[serde(rename = "accessJwt")]
    access_jwt: String,
    did: String,
}

impl Bluesky {
    /// Create a client against the default service with the provided
    /// identifier and app password.
    pub fn new(identifier: String, password: String) -> Self {
        Self::with_service_url(identifier, password, DEFAULT_SERVICE_URL.to_string())
    }

    pub fn with_service_url(identifier: String, password: String, service_url: String) -> Self {
        Self {
            service_url,
            identifier,
            password,
        }
    }

    fn create_session(&self) -> Result<Session, String> {
        let url = format!("{}/xrpc/com.atproto.server.createSession", self.service_url);
        let payload = serde_json::json!({
            "identifier": self.identifier,
            "password": self.password,
        });
        match ureq::post(&url).send_json(payload) {
            Ok(response) => {
                let mut body_reader = response.into_body();
                match body_reader.read_to_string() {
                    Ok(body) => serde_json::from_str::<Session>(&body)
                        .map_err(|e| format!("Failed to parse session response: {}", e)),
                    Err(e) => Err(format!("Failed to read session response: {}", e)),
                }
            }
            Err(e) => Err(format!("Failed to create Bluesky session: {}", e)),
        }
    }

    /// Publish a text post. A fresh session is created per call; ticks are
    /// rare enough that tokens are not worth caching.
    /// Returns Ok(()) on success, or Err(String) with a description on failure.
    pub fn post(&self, text: &str, now: DateTime<Utc>) -> Result<(), String> {
        let session = self.create_session()?;
        let url = format!("{}/xrpc/com.atproto.repo.createRecord", self.service_url);
        let payload = serde_json::json!({
            "repo": session.did,
            "collection": "app.bsky.feed.post",
            "record": {
                "$type": "app.bsky.feed.post",
                "text": text,
                "createdAt": now.to_rfc3339_opts(SecondsFormat::Millis, true),
            }
        });
        let bearer = format!("Bearer {}", session.access_jwt);
        match ureq::post(&url)
            .header("Authorization", bearer.as_str())
            .send_json(payload)
        {
            Ok(resp) => {
                info!(status = resp.status().as_u16(), "Posted message to Bluesky");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Failed to post to Bluesky");
                Err(format!("Failed to post to Bluesky: {}", e))
            }
        }
    }
}
