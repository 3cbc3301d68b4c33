use std::collections::BTreeMap;

use serde::Serialize;

use super::quantile::quantile;

const WHISKER_FACTOR: f64 = 1.5;

/// Five-number summary plus Tukey whiskers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxplotStats {
    pub min: f64,
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
    pub max: f64,
    pub iqr: f64,
}

pub fn boxplot_stats(values: &[f64]) -> Option<BoxplotStats> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let min = *sorted.first()?;
    let max = *sorted.last()?;
    let q1 = quantile(&sorted, 0.25)?;
    let median = quantile(&sorted, 0.5)?;
    let q3 = quantile(&sorted, 0.75)?;
    let iqr = q3 - q1;

    Some(BoxplotStats {
        min,
        lower_whisker: min.max(q1 - WHISKER_FACTOR * iqr),
        q1,
        median,
        q3,
        upper_whisker: max.min(q3 + WHISKER_FACTOR * iqr),
        max,
        iqr,
    })
}

/// Group `(label, value)` pairs and summarize each group.
pub fn boxplot_by_group<I>(rows: I) -> BTreeMap<String, BoxplotStats>
where
    I: IntoIterator<Item = (String, f64)>,
{
    let mut groups: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for (label, value) in rows {
        groups.entry(label).or_default().push(value);
    }

    groups
        .into_iter()
        .filter_map(|(label, values)| boxplot_stats(&values).map(|stats| (label, stats)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whiskers_are_clamped_to_the_data_range() {
        let stats = boxplot_stats(&[2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(stats.q1, 3.0);
        assert_eq!(stats.median, 4.0);
        assert_eq!(stats.q3, 5.0);
        assert_eq!(stats.iqr, 2.0);
        assert_eq!(stats.lower_whisker, 2.0);
        assert_eq!(stats.upper_whisker, 6.0);
    }

    #[test]
    fn outliers_stay_outside_the_whiskers() {
        let stats = boxplot_stats(&[2.0, 2.0, 3.0, 3.0, 3.0, 4.0, 4.0, 40.0]).unwrap();
        assert_eq!(stats.q1, 2.75);
        assert_eq!(stats.q3, 4.0);
        assert_eq!(stats.upper_whisker, 4.0 + 1.5 * 1.25);
        assert_eq!(stats.max, 40.0);
        assert_eq!(stats.lower_whisker, 2.0);
    }

    #[test]
    fn groups_are_summarized_separately() {
        let rows = vec![
            ("Hawaiian Pizza".to_string(), 2.0),
            ("Margherita Pizza".to_string(), 5.0),
            ("Hawaiian Pizza".to_string(), 4.0),
        ];
        let grouped = boxplot_by_group(rows);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped["Hawaiian Pizza"].median, 3.0);
        assert_eq!(grouped["Margherita Pizza"].iqr, 0.0);
        assert!(boxplot_stats(&[]).is_none());
    }
}
