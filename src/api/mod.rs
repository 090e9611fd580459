use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
}

#[derive(Deserialize)]
pub struct ChatReply {
    pub response: String,
}

#[derive(Deserialize)]
pub struct ChatFailure {
    pub error: String,
}

/// Terminal outcome of one turn. There is no retry path: whatever comes
/// back here is what lands in the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatOutcome {
    /// OK status with a reply body.
    Reply(String),
    /// Error status with the server-supplied error text.
    ServerError(String),
    /// No usable response at all (connect failure, bad body).
    ConnectionFailed,
}

/// Sends one user turn to the relay. No timeout is set; the request
/// resolves or fails per platform default.
pub async fn send_chat_request(client: &Client, base_url: &str, message: &str) -> ChatOutcome {
    let url = format!("{}/chat", base_url.trim_end_matches('/'));
    debug!(%url, "sending chat request");

    let response = match client
        .post(&url)
        .json(&ChatRequest { message })
        .send()
        .await
    {
        Ok(response) => response,
        Err(e) => {
            debug!(error = %e, "chat request failed to send");
            return ChatOutcome::ConnectionFailed;
        }
    };

    let status = response.status();
    debug!(%status, "chat response received");

    if status.is_success() {
        match response.json::<ChatReply>().await {
            Ok(body) => ChatOutcome::Reply(body.response),
            Err(e) => {
                debug!(error = %e, "malformed reply body");
                ChatOutcome::ConnectionFailed
            }
        }
    } else {
        match response.json::<ChatFailure>().await {
            Ok(body) => ChatOutcome::ServerError(body.error),
            Err(e) => {
                debug!(error = %e, "malformed error body");
                ChatOutcome::ConnectionFailed
            }
        }
    }
}
