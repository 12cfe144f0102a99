use serde::Serialize;

use floodmap_shared::Area;

/// Heat layer rendering constants. One weighted point per area; the weight
/// scale keeps a 0.95-score area just below the gradient ceiling at city zoom.
pub const HEAT_WEIGHT_SCALE: f64 = 25.0;
pub const HEAT_RADIUS: f64 = 35.0;
pub const HEAT_BLUR: f64 = 25.0;
pub const HEAT_MAX_ZOOM: f64 = 18.0;
pub const HEAT_MIN_OPACITY: f64 = 0.6;

/// Gradient stops, intensity -> CSS color.
pub const HEAT_GRADIENT: &[(f64, &str)] = &[
    (0.0, "#00ff00"),
    (0.3, "#ffff00"),
    (0.6, "#ff9900"),
    (0.8, "#ff3300"),
    (1.0, "#ff0000"),
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatOptions {
    pub radius: f64,
    pub blur: f64,
    pub max_zoom: f64,
    pub min_opacity: f64,
}

pub fn heat_options() -> HeatOptions {
    HeatOptions {
        radius: HEAT_RADIUS,
        blur: HEAT_BLUR,
        max_zoom: HEAT_MAX_ZOOM,
        min_opacity: HEAT_MIN_OPACITY,
    }
}

/// `[lat, lng, weight]` triples consumed by the heat layer.
pub fn heat_points(areas: &[Area]) -> Vec<[f64; 3]> {
    areas
        .iter()
        .map(|area| {
            [
                area.center[0],
                area.center[1],
                area.risk_assessment.final_score * HEAT_WEIGHT_SCALE,
            ]
        })
        .collect()
}

/// Circle marker style, shaped to pass straight through to the mapping
/// library's `setStyle`/option object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerStyle {
    pub radius: f64,
    pub fill_color: &'static str,
    pub color: &'static str,
    pub weight: f64,
    pub opacity: f64,
    pub fill_opacity: f64,
}

pub const BASE_BORDER_WEIGHT: f64 = 1.5;
pub const HOVER_BORDER_WEIGHT: f64 = 3.0;
pub const SELECTED_BORDER_WEIGHT: f64 = 4.0;
pub const SELECTED_BORDER_COLOR: &str = "#ffff00";

pub fn marker_radius(final_score: f64) -> f64 {
    6.0 + final_score * 8.0
}

/// Resting style for an area marker: risk-tinted fill, thin white border.
pub fn area_base_style(area: &Area) -> MarkerStyle {
    MarkerStyle {
        radius: marker_radius(area.risk_assessment.final_score),
        fill_color: area.risk_assessment.risk_level.color(),
        color: "#ffffff",
        weight: BASE_BORDER_WEIGHT,
        opacity: 0.9,
        fill_opacity: 0.6,
    }
}

/// Hover: thicker border, raised fill opacity; everything else untouched.
pub fn hovered_style(base: MarkerStyle) -> MarkerStyle {
    MarkerStyle {
        weight: HOVER_BORDER_WEIGHT,
        fill_opacity: 0.9,
        ..base
    }
}

/// Selection: bold yellow border; exactly one marker carries this at a time.
pub fn selected_style(base: MarkerStyle) -> MarkerStyle {
    MarkerStyle {
        weight: SELECTED_BORDER_WEIGHT,
        color: SELECTED_BORDER_COLOR,
        fill_opacity: 0.9,
        ..base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use floodmap_shared::{RiskAssessment, RiskLevel};

    fn area(score: f64, level: RiskLevel) -> Area {
        Area {
            id: "a1".into(),
            name: "Zone A".into(),
            center: [19.07, 72.88],
            risk_assessment: RiskAssessment {
                final_score: score,
                risk_level: level,
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
    fn heat_point_weight_scales_final_score() {
        let points = heat_points(&[area(0.82, RiskLevel::High)]);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0][0], 19.07);
        assert_eq!(points[0][1], 72.88);
        assert!((points[0][2] - 20.5).abs() < 1e-9);
    }

    #[test]
    fn marker_radius_scales_with_score() {
        assert!((marker_radius(0.82) - 12.56).abs() < 1e-9);
        assert_eq!(marker_radius(0.0), 6.0);
    }

    #[test]
    fn base_style_uses_risk_tier_color() {
        let style = area_base_style(&area(0.82, RiskLevel::High));
        assert_eq!(style.fill_color, "#ff0000");
        assert_eq!(style.color, "#ffffff");
        assert_eq!(style.weight, BASE_BORDER_WEIGHT);
        assert!((style.radius - 12.56).abs() < 1e-9);
    }

    #[test]
    fn hover_thickens_border_and_raises_opacity() {
        let base = area_base_style(&area(0.5, RiskLevel::Medium));
        let hover = hovered_style(base);
        assert_eq!(hover.weight, HOVER_BORDER_WEIGHT);
        assert_eq!(hover.fill_opacity, 0.9);
        assert_eq!(hover.fill_color, base.fill_color);
        assert_eq!(hover.radius, base.radius);
    }

    #[test]
    fn selection_highlights_with_yellow_border() {
        let base = area_base_style(&area(0.2, RiskLevel::Low));
        let selected = selected_style(base);
        assert_eq!(selected.weight, SELECTED_BORDER_WEIGHT);
        assert_eq!(selected.color, SELECTED_BORDER_COLOR);
        assert_eq!(selected.fill_color, "#00cc00");
    }

    #[test]
    fn gradient_stops_span_green_to_red() {
        assert_eq!(HEAT_GRADIENT.first(), Some(&(0.0, "#00ff00")));
        assert_eq!(HEAT_GRADIENT.last(), Some(&(1.0, "#ff0000")));
        assert_eq!(HEAT_GRADIENT.len(), 5);
    }

    #[test]
    fn heat_options_serialize_with_camel_case_keys() {
        let value = serde_json::to_value(heat_options()).unwrap();
        assert_eq!(value["maxZoom"], 18.0);
        assert_eq!(value["minOpacity"], 0.6);
    }
}
