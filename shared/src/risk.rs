use serde::{Deserialize, Serialize};

/// Categorical risk tier assigned upstream by the scoring API.
///
/// Unrecognized tier strings deserialize to `Unknown` instead of failing the
/// whole payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    High,
    Medium,
    Low,
    #[serde(other)]
    Unknown,
}

impl RiskLevel {
    /// Marker fill color for this tier.
    pub fn color(&self) -> &'static str {
        match self {
            RiskLevel::High => "#ff0000",
            RiskLevel::Medium => "#ff9900",
            RiskLevel::Low => "#00cc00",
            RiskLevel::Unknown => "#999999",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::High => "High",
            RiskLevel::Medium => "Medium",
            RiskLevel::Low => "Low",
            RiskLevel::Unknown => "Unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_known_tiers() {
        assert_eq!(
            serde_json::from_str::<RiskLevel>("\"High\"").unwrap(),
            RiskLevel::High
        );
        assert_eq!(
            serde_json::from_str::<RiskLevel>("\"Medium\"").unwrap(),
            RiskLevel::Medium
        );
        assert_eq!(
            serde_json::from_str::<RiskLevel>("\"Low\"").unwrap(),
            RiskLevel::Low
        );
    }

    #[test]
    fn unknown_tier_falls_back_instead_of_failing() {
        assert_eq!(
            serde_json::from_str::<RiskLevel>("\"Catastrophic\"").unwrap(),
            RiskLevel::Unknown
        );
    }

    #[test]
    fn tier_colors_match_marker_palette() {
        assert_eq!(RiskLevel::High.color(), "#ff0000");
        assert_eq!(RiskLevel::Medium.color(), "#ff9900");
        assert_eq!(RiskLevel::Low.color(), "#00cc00");
        assert_eq!(RiskLevel::Unknown.color(), "#999999");
    }
}
