use contracts::payload::{Dashboard, Payload};
use gloo_net::http::Request;

const API_BASE: &str = "/api/payloads";

/// Fetch the most recent analytics payload and normalize it.
///
/// Any failure (network, auth, empty store, malformed body) surfaces as an
/// error string; the caller renders an explicit failed-to-load state and
/// never a partial dashboard.
pub async fn fetch_latest_payload(access_token: &str) -> Result<Dashboard, String> {
    let response = Request::get(&format!("{}/latest", API_BASE))
        .header("Authorization", &format!("Bearer {}", access_token))
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP error: {}", response.status()));
    }

    let payload: Payload = response
        .json()
        .await
        .map_err(|e| format!("Failed to parse payload: {}", e))?;

    Ok(Dashboard::from_payload(payload))
}
