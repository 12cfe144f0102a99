use floodmap_shared::{Area, Hospital, RiskAssessment};

/// Placeholder for absent optional payload fields. Every optional scalar in
/// the popups and panels renders this instead of failing.
pub const MISSING: &str = "N/A";

pub fn format_percent(score: f64) -> String {
    format!("{:.1}%", score * 100.0)
}

/// Badge text shown next to an area name.
pub fn risk_badge_text(risk: &RiskAssessment) -> String {
    format!(
        "{} Risk ({})",
        risk.risk_level.label(),
        format_percent(risk.final_score)
    )
}

pub fn fmt_opt_f64(value: Option<f64>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| format!("{v}"))
}

pub fn fmt_opt_u32(value: Option<u32>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| format!("{v}"))
}

pub fn fmt_opt_str(value: Option<&str>) -> String {
    value.unwrap_or(MISSING).to_string()
}

pub fn yes_no(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}

/// Population density with thousands separators, e.g. 14500 -> "14,500".
pub fn format_density(value: Option<f64>) -> String {
    let Some(value) = value else {
        return MISSING.to_string();
    };
    let whole = value.round() as i64;
    let digits = whole.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if whole < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Friendly name for a risk component key; unknown keys get a generic
/// underscores-to-spaces upper-cased form.
pub fn component_label(key: &str) -> String {
    match key {
        "elevation" => "Low Elevation".to_string(),
        "river_proximity" => "River Proximity".to_string(),
        "coastal" => "Coastal Area".to_string(),
        "population" => "Population Density".to_string(),
        "drainage" => "Poor Drainage".to_string(),
        "history" => "Flood History".to_string(),
        other => other.replace('_', " ").to_uppercase(),
    }
}

/// One bar in the risk-component breakdown. `percent` doubles as the fill
/// width of the bar.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentBar {
    pub label: String,
    pub percent: f64,
    pub display: String,
}

/// Bars for the detail view; empty when the payload carried no breakdown.
pub fn component_bars(risk: &RiskAssessment) -> Vec<ComponentBar> {
    let Some(components) = &risk.components else {
        return Vec::new();
    };
    components
        .iter()
        .map(|(key, value)| ComponentBar {
            label: component_label(key),
            percent: value * 100.0,
            display: format_percent(*value),
        })
        .collect()
}

/// Floating tooltip shown while hovering an area marker.
pub fn tooltip_html(area: &Area) -> String {
    let risk = &area.risk_assessment;
    let color = risk.risk_level.color();
    format!(
        r#"<div style="font-weight: bold; color: {color};">{}</div><div style="font-size: 0.9em;">{}</div>"#,
        area.name,
        risk_badge_text(risk),
    )
}

/// Full popup bound to an area marker.
pub fn area_popup_html(area: &Area) -> String {
    let risk = &area.risk_assessment;
    let color = risk.risk_level.color();
    format!(
        r#"<div style="padding: 15px; max-width: 300px;">
  <div style="display: flex; justify-content: space-between; align-items: center; margin-bottom: 10px;">
    <h3 style="margin: 0; color: #333;">{name}</h3>
    <div style="background: {color}; color: white; padding: 4px 12px; border-radius: 20px; font-size: 0.9em; font-weight: bold;">{level}</div>
  </div>
  <div style="margin-bottom: 15px; font-size: 1.2em; text-align: center; padding: 10px; background: #f5f5f5; border-radius: 8px;">
    <strong style="color: {color}; font-size: 1.4em;">{score}</strong>
    <div style="font-size: 0.9em; color: #666;">Risk Score</div>
  </div>
  <div style="margin-bottom: 15px;">
    <div style="font-weight: bold; margin-bottom: 5px; color: #555;">Location Info:</div>
    <div style="display: grid; grid-template-columns: 1fr 1fr; gap: 8px; font-size: 0.9em;">
      <div><strong>City:</strong> {city}</div>
      <div><strong>Region:</strong> {region}</div>
      <div><strong>Land Type:</strong> {land_type}</div>
      <div><strong>Elevation:</strong> {elevation}m</div>
    </div>
  </div>
  <div style="margin-bottom: 15px;">
    <div style="font-weight: bold; margin-bottom: 5px; color: #555;">Population &amp; Infrastructure:</div>
    <div style="display: grid; grid-template-columns: 1fr 1fr; gap: 8px; font-size: 0.9em;">
      <div><strong>Population Density:</strong> {density}/km&#178;</div>
      <div><strong>River Distance:</strong> {river}km</div>
      <div><strong>Coastal:</strong> {coastal}</div>
      <div><strong>Drainage Score:</strong> {drainage}/1.0</div>
    </div>
  </div>
  <div style="margin-bottom: 10px;">
    <div style="font-weight: bold; margin-bottom: 5px; color: #555;">Historical Data:</div>
    <div style="font-size: 0.9em;"><strong>Past Floods:</strong> {floods} incidents</div>
  </div>
  <div style="text-align: center; margin-top: 15px; padding-top: 10px; border-top: 1px solid #eee; font-size: 0.8em; color: #888;">Click for detailed analysis</div>
</div>"#,
        name = area.name,
        color = color,
        level = risk.risk_level.label(),
        score = format_percent(risk.final_score),
        city = fmt_opt_str(area.city.as_deref()),
        region = fmt_opt_str(area.region.as_deref()),
        land_type = fmt_opt_str(area.land_type.as_deref()),
        elevation = fmt_opt_f64(area.elevation),
        density = format_density(area.population_density),
        river = fmt_opt_f64(area.river_distance),
        coastal = yes_no(area.coastal.unwrap_or(false)),
        drainage = fmt_opt_f64(area.drainage_score),
        floods = area.historical_floods.unwrap_or(0),
    )
}

/// Popup bound to a hospital marker; phone row only when present.
pub fn hospital_popup_html(hospital: &Hospital) -> String {
    let phone_row = hospital
        .phone
        .as_deref()
        .map(|phone| format!(r#"<div><strong>Phone:</strong> {phone}</div>"#))
        .unwrap_or_default();
    format!(
        r#"<div style="padding: 10px; max-width: 250px;">
  <h3 style="margin: 0 0 10px 0; color: #0066ff;">{name}</h3>
  <div style="margin-bottom: 8px;"><strong>Type:</strong> {kind}</div>
  <div style="margin-bottom: 8px;"><strong>Total Beds:</strong> {beds}</div>
  <div style="margin-bottom: 8px;"><strong>Emergency Beds:</strong> {emergency}</div>
  <div style="margin-bottom: 8px;"><strong>Flood Resistant:</strong> {resistant}</div>
  {phone_row}
</div>"#,
        name = hospital.name,
        kind = hospital.hospital_type,
        beds = hospital.beds,
        emergency = hospital.emergency_beds,
        resistant = yes_no(hospital.flood_resistant),
        phone_row = phone_row,
    )
}

/// Static emergency-info placeholder keyed by area id.
pub fn emergency_info_text(area_id: &str) -> String {
    format!(
        "Emergency information for area {area_id} would be displayed here.\n\n\
         This would include:\n\
         \u{2022} Nearest hospitals\n\
         \u{2022} Evacuation routes\n\
         \u{2022} Emergency shelters\n\
         \u{2022} Contact numbers"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use floodmap_shared::RiskLevel;

    fn bare_area() -> Area {
        Area {
            id: "a1".into(),
            name: "Zone A".into(),
            center: [19.07, 72.88],
            risk_assessment: RiskAssessment {
                final_score: 0.82,
                risk_level: RiskLevel::High,
                components: None,
            },
            city: None,
            region: None,
            land_type: None,
            elevation: None,
            coastal: None,
            population_density: None,
            river_distance: None,
            drainage_score: None,
            historical_floods: None,
        }
    }

    #[test]
    fn badge_text_combines_tier_and_percent() {
        assert_eq!(risk_badge_text(&bare_area().risk_assessment), "High Risk (82.0%)");
    }

    #[test]
    fn known_component_keys_get_friendly_labels() {
        assert_eq!(component_label("elevation"), "Low Elevation");
        assert_eq!(component_label("river_proximity"), "River Proximity");
        assert_eq!(component_label("coastal"), "Coastal Area");
        assert_eq!(component_label("population"), "Population Density");
        assert_eq!(component_label("drainage"), "Poor Drainage");
        assert_eq!(component_label("history"), "Flood History");
    }

    #[test]
    fn unknown_component_keys_fall_back_to_generic_form() {
        assert_eq!(component_label("storm_surge"), "STORM SURGE");
    }

    #[test]
    fn component_bars_follow_breakdown_order() {
        let mut components = BTreeMap::new();
        components.insert("drainage".to_string(), 0.55);
        components.insert("elevation".to_string(), 0.9);
        let risk = RiskAssessment {
            final_score: 0.7,
            risk_level: RiskLevel::High,
            components: Some(components),
        };
        let bars = component_bars(&risk);
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].label, "Poor Drainage");
        assert!((bars[0].percent - 55.0).abs() < 1e-9);
        assert_eq!(bars[1].display, "90.0%");
    }

    #[test]
    fn no_breakdown_yields_no_bars() {
        assert!(component_bars(&bare_area().risk_assessment).is_empty());
    }

    #[test]
    fn popup_shows_placeholders_for_absent_fields() {
        let html = area_popup_html(&bare_area());
        assert!(html.contains("Zone A"));
        assert!(html.contains("<strong>Region:</strong> N/A"));
        assert!(html.contains("<strong>Elevation:</strong> N/Am"));
        assert!(html.contains("<strong>Past Floods:</strong> 0 incidents"));
    }

    #[test]
    fn hospital_popup_omits_missing_phone() {
        let hospital = Hospital {
            name: "City General".into(),
            hospital_type: "General".into(),
            location: [1.0, 2.0],
            beds: 320,
            emergency_beds: 40,
            flood_resistant: false,
            phone: None,
        };
        let html = hospital_popup_html(&hospital);
        assert!(html.contains("Total Beds:</strong> 320"));
        assert!(html.contains("Flood Resistant:</strong> No"));
        assert!(!html.contains("Phone"));
    }

    #[test]
    fn density_groups_thousands() {
        assert_eq!(format_density(Some(14500.0)), "14,500");
        assert_eq!(format_density(Some(850.0)), "850");
        assert_eq!(format_density(None), "N/A");
    }

    #[test]
    fn tooltip_names_area_and_risk() {
        let html = tooltip_html(&bare_area());
        assert!(html.contains("Zone A"));
        assert!(html.contains("High Risk (82.0%)"));
        assert!(html.contains("#ff0000"));
    }

    #[test]
    fn emergency_placeholder_is_keyed_by_area_id() {
        let text = emergency_info_text("district_3_4");
        assert!(text.starts_with("Emergency information for area district_3_4"));
        assert!(text.contains("Evacuation routes"));
    }
}
