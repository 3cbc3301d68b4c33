//! Quantiles with linear interpolation between closest ranks.

const QUARTILE_EDGES: [f64; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];

/// Quantile `q` (0..=1) of an ascending slice. `None` when the slice is empty.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let pos = q.clamp(0.0, 1.0) * last as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let (lo, hi) = (sorted.get(lower)?, sorted.get(upper)?);
    Some(lo + (hi - lo) * (pos - lower as f64))
}

/// 1-based ranks; equal values are ranked in order of appearance.
pub fn rank_first(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; values.len()];
    for (position, index) in order.into_iter().enumerate() {
        ranks[index] = (position + 1) as f64;
    }
    ranks
}

/// Assign every value a quartile bin in `1..=4`.
///
/// The lowest bin is closed on both sides, the others are `(lo, hi]`. When
/// ties collapse two edges into one the values' ranks are binned instead, so
/// each bin stays reachable. A lone value lands in bin 1.
pub fn quartile_bins(values: &[f64]) -> Vec<u8> {
    if values.len() < 2 {
        return vec![1; values.len()];
    }
    bin_by_edges(values)
        .or_else(|| bin_by_edges(&rank_first(values)))
        .unwrap_or_else(|| vec![1; values.len()])
}

fn bin_by_edges(values: &[f64]) -> Option<Vec<u8>> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let edges = QUARTILE_EDGES
        .iter()
        .map(|&q| quantile(&sorted, q))
        .collect::<Option<Vec<f64>>>()?;
    if edges.windows(2).any(|pair| pair[0] >= pair[1]) {
        return None;
    }

    let upper_edges = &edges[1..];
    Some(
        values
            .iter()
            .map(|v| {
                upper_edges
                    .iter()
                    .position(|edge| v <= edge)
                    .map_or(4, |i| i as u8 + 1)
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantile_interpolates_between_ranks() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&sorted, 0.0), Some(1.0));
        assert_eq!(quantile(&sorted, 0.25), Some(1.75));
        assert_eq!(quantile(&sorted, 0.5), Some(2.5));
        assert_eq!(quantile(&sorted, 0.75), Some(3.25));
        assert_eq!(quantile(&sorted, 1.0), Some(4.0));
        assert_eq!(quantile(&[7.0], 0.3), Some(7.0));
        assert_eq!(quantile(&[], 0.5), None);
    }

    #[test]
    fn rank_first_breaks_ties_by_position() {
        assert_eq!(rank_first(&[3.0, 1.0, 3.0, 2.0]), vec![3.0, 1.0, 4.0, 2.0]);
        assert!(rank_first(&[]).is_empty());
    }

    #[test]
    fn eight_distinct_values_split_two_per_bin() {
        let values = [8.0, 1.0, 7.0, 2.0, 6.0, 3.0, 5.0, 4.0];
        assert_eq!(quartile_bins(&values), vec![4, 1, 4, 1, 3, 2, 3, 2]);
    }

    #[test]
    fn lowest_value_is_included_in_first_bin() {
        assert_eq!(quartile_bins(&[10.0, 20.0]), vec![1, 4]);
    }

    #[test]
    fn ties_fall_back_to_ranks() {
        // Edges would be 1,1,1,1.25,2: not unique.
        let bins = quartile_bins(&[1.0, 1.0, 1.0, 1.0, 2.0]);
        assert_eq!(bins, vec![1, 1, 2, 3, 4]);
    }

    #[test]
    fn degenerate_inputs() {
        assert!(quartile_bins(&[]).is_empty());
        assert_eq!(quartile_bins(&[42.0]), vec![1]);
        assert_eq!(quartile_bins(&[5.0, 5.0]), vec![1, 4]);
    }
}
