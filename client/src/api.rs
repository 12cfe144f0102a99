use std::fmt;

use floodmap_shared::MapPayload;

use crate::scenario::Scenario;

pub const MAP_DATA_ENDPOINT: &str = "/api/real-time/map-data";

/// The only explicit error kind in the client: a failed payload fetch.
/// Surfaced once through the notice banner; never retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Transport-level failure (request never produced a response).
    Request(String),
    /// Response arrived with a non-success status.
    Status { status: u16, status_text: String },
    /// Response body was not a well-formed payload.
    Parse(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Request(detail) => write!(f, "fetch error: {detail}"),
            FetchError::Status {
                status,
                status_text,
            } => write!(f, "HTTP {status}: {status_text}"),
            FetchError::Parse(detail) => write!(f, "parse error: {detail}"),
        }
    }
}

/// Percent-encode a query value (RFC 3986 unreserved characters pass through).
pub fn encode_query_value(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            _ => {
                out.push_str(&format!("%{byte:02X}"));
            }
        }
    }
    out
}

/// Build the query string encoding the scenario and city for the risk API.
pub fn build_map_query(scenario: Scenario, city: &str) -> String {
    format!(
        "rainfall={}&drainage={}&night={}&city={}",
        scenario.rainfall,
        scenario.drainage,
        scenario.is_night,
        encode_query_value(city)
    )
}

/// Fetch the map payload for the given scenario and city.
/// No retries and no timeout; callers decide what a failure means.
pub async fn fetch_map_data(scenario: Scenario, city: &str) -> Result<MapPayload, FetchError> {
    let url = format!("{MAP_DATA_ENDPOINT}?{}", build_map_query(scenario, city));
    let resp = gloo_net::http::Request::get(&url)
        .send()
        .await
        .map_err(|e| FetchError::Request(e.to_string()))?;

    if !resp.ok() {
        return Err(FetchError::Status {
            status: resp.status(),
            status_text: resp.status_text(),
        });
    }

    resp.json::<MapPayload>()
        .await
        .map_err(|e| FetchError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_encodes_scenario_and_city() {
        let scenario = Scenario {
            rainfall: 1.5,
            drainage: 0.95,
            is_night: false,
        };
        assert_eq!(
            build_map_query(scenario, "Mumbai"),
            "rainfall=1.5&drainage=0.95&night=false&city=Mumbai"
        );
    }

    #[test]
    fn query_formats_whole_multipliers_without_trailing_zero() {
        let scenario = Scenario::default();
        assert_eq!(
            build_map_query(scenario, "Tokyo"),
            "rainfall=1&drainage=1&night=false&city=Tokyo"
        );
    }

    #[test]
    fn multi_word_city_is_percent_encoded() {
        let query = build_map_query(Scenario::default(), "New York");
        assert!(query.ends_with("city=New%20York"));
    }

    #[test]
    fn encode_query_value_passes_unreserved_bytes() {
        assert_eq!(encode_query_value("Miami"), "Miami");
        assert_eq!(encode_query_value("a b&c"), "a%20b%26c");
    }

    #[test]
    fn status_error_displays_like_http_failure() {
        let err = FetchError::Status {
            status: 503,
            status_text: "Service Unavailable".into(),
        };
        assert_eq!(err.to_string(), "HTTP 503: Service Unavailable");
    }
}
