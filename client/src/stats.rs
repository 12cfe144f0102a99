use floodmap_shared::Statistics;

/// Pre-formatted statistics panel content.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsView {
    pub total_areas: u32,
    pub high_risk: u32,
    pub medium_risk: u32,
    pub low_risk: u32,
    pub avg_risk_percent: String,
    pub high_risk_percent: String,
    pub medium_risk_percent: String,
    pub low_risk_percent: String,
}

fn tier_percent(count: u32, total: u32) -> String {
    // Zero total is treated as 1 so the panel never divides by zero.
    let total = total.max(1);
    format!("{:.1}%", count as f64 / total as f64 * 100.0)
}

impl StatsView {
    pub fn from_statistics(stats: &Statistics) -> Self {
        Self {
            total_areas: stats.total_areas,
            high_risk: stats.high_risk,
            medium_risk: stats.medium_risk,
            low_risk: stats.low_risk,
            avg_risk_percent: format!("{:.1}%", stats.avg_risk_score * 100.0),
            high_risk_percent: tier_percent(stats.high_risk, stats.total_areas),
            medium_risk_percent: tier_percent(stats.medium_risk, stats.total_areas),
            low_risk_percent: tier_percent(stats.low_risk, stats.total_areas),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_high_risk_area_reads_one_hundred_percent() {
        let view = StatsView::from_statistics(&Statistics {
            total_areas: 1,
            high_risk: 1,
            medium_risk: 0,
            low_risk: 0,
            avg_risk_score: 0.82,
        });
        assert_eq!(view.total_areas, 1);
        assert_eq!(view.high_risk_percent, "100.0%");
        assert_eq!(view.medium_risk_percent, "0.0%");
        assert_eq!(view.avg_risk_percent, "82.0%");
    }

    #[test]
    fn zero_total_never_divides_by_zero() {
        let view = StatsView::from_statistics(&Statistics::default());
        assert_eq!(view.high_risk_percent, "0.0%");
        assert_eq!(view.avg_risk_percent, "0.0%");
    }

    #[test]
    fn tier_percentages_sum_to_one_hundred() {
        let view = StatsView::from_statistics(&Statistics {
            total_areas: 144,
            high_risk: 31,
            medium_risk: 64,
            low_risk: 49,
            avg_risk_score: 0.47,
        });
        let sum: f64 = [
            &view.high_risk_percent,
            &view.medium_risk_percent,
            &view.low_risk_percent,
        ]
        .iter()
        .map(|p| p.trim_end_matches('%').parse::<f64>().unwrap())
        .sum();
        assert!((sum - 100.0).abs() < 0.2, "sum was {sum}");
    }
}
