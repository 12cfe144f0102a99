/// User-adjustable simulation inputs sent to the scoring API.
///
/// Owned by the client and mutated only by the control panel handlers; never
/// persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scenario {
    pub rainfall: f64,
    pub drainage: f64,
    pub is_night: bool,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            rainfall: 1.0,
            drainage: 1.0,
            is_night: false,
        }
    }
}

pub const SLIDER_MIN: f64 = 0.0;
pub const SLIDER_MAX: f64 = 3.0;
pub const SLIDER_STEP: f64 = 0.1;

pub fn rainfall_label(value: f64) -> &'static str {
    if value < 0.8 {
        "Light"
    } else if value < 1.3 {
        "Normal"
    } else if value < 2.0 {
        "Heavy"
    } else {
        "Extreme"
    }
}

pub fn drainage_label(value: f64) -> &'static str {
    if value < 0.9 {
        "Excellent"
    } else if value < 1.1 {
        "Normal"
    } else if value < 1.5 {
        "Poor"
    } else {
        "Very Poor"
    }
}

/// Display string for a slider: label plus the multiplier at one decimal.
pub fn slider_display(label: &str, value: f64) -> String {
    format!("{label} ({value:.1}x)")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rainfall_labels_follow_thresholds() {
        assert_eq!(rainfall_label(0.0), "Light");
        assert_eq!(rainfall_label(0.79), "Light");
        assert_eq!(rainfall_label(0.8), "Normal");
        assert_eq!(rainfall_label(1.29), "Normal");
        assert_eq!(rainfall_label(1.3), "Heavy");
        assert_eq!(rainfall_label(1.99), "Heavy");
        assert_eq!(rainfall_label(2.0), "Extreme");
        assert_eq!(rainfall_label(3.0), "Extreme");
    }

    #[test]
    fn drainage_labels_follow_thresholds() {
        assert_eq!(drainage_label(0.0), "Excellent");
        assert_eq!(drainage_label(0.89), "Excellent");
        assert_eq!(drainage_label(0.9), "Normal");
        assert_eq!(drainage_label(1.09), "Normal");
        assert_eq!(drainage_label(1.1), "Poor");
        assert_eq!(drainage_label(1.49), "Poor");
        assert_eq!(drainage_label(1.5), "Very Poor");
        assert_eq!(drainage_label(2.5), "Very Poor");
    }

    #[test]
    fn slider_display_rounds_to_one_decimal() {
        assert_eq!(slider_display(rainfall_label(1.5), 1.5), "Heavy (1.5x)");
        assert_eq!(slider_display(drainage_label(0.95), 0.95), "Normal (0.9x)");
        assert_eq!(slider_display(rainfall_label(1.0), 1.0), "Normal (1.0x)");
    }

    #[test]
    fn default_scenario_is_neutral() {
        let scenario = Scenario::default();
        assert_eq!(scenario.rainfall, 1.0);
        assert_eq!(scenario.drainage, 1.0);
        assert!(!scenario.is_night);
    }
}
