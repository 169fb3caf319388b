//! HTTP API Client
//!
//! Functions for communicating with the HealthFlow REST API.

use gloo_net::http::Request;

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(Some(url)) = storage.get_item("healthflow_api_url") {
                url
            } else {
                DEFAULT_API_BASE.to_string()
            }
        } else {
            DEFAULT_API_BASE.to_string()
        }
    } else {
        DEFAULT_API_BASE.to_string()
    };
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

/// Derive the WebSocket base URL from the HTTP base.
pub fn get_ws_base() -> String {
    get_api_base()
        .replace("https://", "wss://")
        .replace("http://", "ws://")
}

// ============ Response Types ============

/// One hospital directory record from the wait-time snapshot.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct HospitalRecord {
    pub name: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub wait_time: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct ApiError {
    detail: String,
}

// ============ API Functions ============

/// Fetch the hospital directory (the cached snapshot of the live feed).
pub async fn fetch_hospitals() -> Result<Vec<HospitalRecord>, String> {
    let api_base = get_api_base();

    let response = Request::get(&format!("{}/ed-waits/", api_base))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        let error: ApiError = response.json().await.unwrap_or(ApiError {
            detail: "Unknown error".to_string(),
        });
        return Err(error.detail);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_tolerates_missing_optional_fields() {
        let record: HospitalRecord =
            serde_json::from_str(r#"{"name":"Foothills Medical Centre"}"#).unwrap();
        assert_eq!(record.name, "Foothills Medical Centre");
        assert_eq!(record.region, "");
        assert_eq!(record.wait_time, None);
    }
}
