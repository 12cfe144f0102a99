use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::risk::RiskLevel;

/// One response body from `/api/real-time/map-data`.
///
/// `areas` and `hospitals` are parsed leniently: an entry that fails to
/// deserialize is dropped rather than failing the whole payload, so one
/// malformed record never blanks the map.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MapPayload {
    #[serde(default, deserialize_with = "lenient_vec")]
    pub areas: Vec<Area>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub hospitals: Vec<Hospital>,
    #[serde(default)]
    pub statistics: Statistics,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub id: String,
    pub name: String,
    /// `[lat, lng]`
    pub center: [f64; 2],
    pub risk_assessment: RiskAssessment,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub land_type: Option<String>,
    #[serde(default)]
    pub elevation: Option<f64>,
    #[serde(default)]
    pub coastal: Option<bool>,
    #[serde(default)]
    pub population_density: Option<f64>,
    #[serde(default)]
    pub river_distance: Option<f64>,
    #[serde(default)]
    pub drainage_score: Option<f64>,
    #[serde(default)]
    pub historical_floods: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Normalized score in `[0, 1]`.
    pub final_score: f64,
    pub risk_level: RiskLevel,
    /// Per-factor breakdown, component name -> normalized contribution.
    /// Ordered map so detail bars render in a stable order.
    #[serde(default)]
    pub components: Option<BTreeMap<String, f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hospital {
    pub name: String,
    #[serde(rename = "type")]
    pub hospital_type: String,
    /// `[lat, lng]`
    pub location: [f64; 2],
    #[serde(default)]
    pub beds: u32,
    #[serde(default)]
    pub emergency_beds: u32,
    #[serde(default)]
    pub flood_resistant: bool,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Statistics {
    #[serde(default)]
    pub total_areas: u32,
    #[serde(default)]
    pub high_risk: u32,
    #[serde(default)]
    pub medium_risk: u32,
    #[serde(default)]
    pub low_risk: u32,
    #[serde(default)]
    pub avg_risk_score: f64,
}

/// Deserialize a JSON array element-by-element, skipping entries that do not
/// match `T`.
fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let raw: Vec<serde_json::Value> = Vec::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|value| serde_json::from_value(value).ok())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_full_area_record() {
        let payload: MapPayload = serde_json::from_value(json!({
            "areas": [{
                "id": "district_0_0",
                "name": "District A1",
                "city": "Mumbai",
                "center": [19.07, 72.88],
                "elevation": 4.2,
                "coastal": true,
                "population_density": 14500.0,
                "river_distance": 1.2,
                "drainage_score": 0.45,
                "historical_floods": 3,
                "risk_assessment": {
                    "final_score": 0.82,
                    "risk_level": "High",
                    "components": { "elevation": 0.9, "drainage": 0.55 }
                }
            }],
            "hospitals": [],
            "statistics": {
                "total_areas": 1,
                "high_risk": 1,
                "medium_risk": 0,
                "low_risk": 0,
                "avg_risk_score": 0.82
            }
        }))
        .unwrap();

        let area = &payload.areas[0];
        assert_eq!(area.name, "District A1");
        assert_eq!(area.risk_assessment.risk_level, RiskLevel::High);
        let components = area.risk_assessment.components.as_ref().unwrap();
        assert_eq!(components.len(), 2);
        assert_eq!(payload.statistics.total_areas, 1);
    }

    #[test]
    fn tolerates_absent_optional_fields() {
        let area: Area = serde_json::from_value(json!({
            "id": "a1",
            "name": "Zone A",
            "center": [19.07, 72.88],
            "risk_assessment": { "final_score": 0.82, "risk_level": "High" }
        }))
        .unwrap();

        assert_eq!(area.elevation, None);
        assert_eq!(area.population_density, None);
        assert_eq!(area.risk_assessment.components, None);
    }

    #[test]
    fn malformed_entries_are_skipped_not_fatal() {
        let payload: MapPayload = serde_json::from_value(json!({
            "areas": [
                { "id": "a1", "name": "Zone A", "center": [1.0, 2.0],
                  "risk_assessment": { "final_score": 0.5, "risk_level": "Medium" } },
                { "id": "broken" }
            ],
            "hospitals": [
                { "name": "City General", "type": "General", "location": [1.0, 2.0] },
                { "name": "no location" }
            ],
            "statistics": {}
        }))
        .unwrap();

        assert_eq!(payload.areas.len(), 1);
        assert_eq!(payload.hospitals.len(), 1);
    }

    #[test]
    fn hospital_type_maps_from_wire_name() {
        let hospital: Hospital = serde_json::from_value(json!({
            "name": "Riverside Medical Center",
            "type": "Emergency",
            "location": [25.76, -80.19],
            "beds": 320,
            "emergency_beds": 40,
            "flood_resistant": true,
            "phone": "+1-305-555-0142"
        }))
        .unwrap();

        assert_eq!(hospital.hospital_type, "Emergency");
        assert_eq!(hospital.phone.as_deref(), Some("+1-305-555-0142"));
    }

    #[test]
    fn missing_statistics_defaults_to_zeroes() {
        let payload: MapPayload =
            serde_json::from_value(json!({ "areas": [], "hospitals": [] })).unwrap();
        assert_eq!(payload.statistics.total_areas, 0);
        assert_eq!(payload.statistics.avg_risk_score, 0.0);
    }
}
