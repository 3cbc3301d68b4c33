use super::quantile::quantile;

/// Relative change in percent. A zero baseline reports no change.
pub fn percent_change(previous: f64, current: f64) -> f64 {
    if previous == 0.0 {
        return 0.0;
    }
    (current - previous) / previous * 100.0
}

pub fn median(values: &[f64]) -> Option<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    quantile(&sorted, 0.5)
}

/// Mean that treats an empty population as zero.
pub fn average(total: f64, count: i64) -> f64 {
    if count <= 0 {
        return 0.0;
    }
    total / count as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_change_handles_growth_decline_and_zero_baseline() {
        assert_eq!(percent_change(200.0, 250.0), 25.0);
        assert_eq!(percent_change(200.0, 150.0), -25.0);
        assert_eq!(percent_change(0.0, 150.0), 0.0);
    }

    #[test]
    fn median_of_even_and_odd_counts() {
        assert_eq!(median(&[9.0, 1.0, 5.0]), Some(5.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn average_of_empty_population_is_zero() {
        assert_eq!(average(100.0, 4), 25.0);
        assert_eq!(average(100.0, 0), 0.0);
    }
}
