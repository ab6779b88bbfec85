use super::super::metric::StatisticSummary;

/// Reduce a timer's samples to minimum, maximum, sum and count.
///
/// Returns `None` when there are no samples, in which case nothing gets
/// exported for the timer.
pub fn reduce(samples: &[f64]) -> Option<StatisticSummary> {
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let (minimum, maximum) = match (sorted.first(), sorted.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return None,
    };

    // Running total over the sorted samples, seeded with the minimum.
    let sum = sorted[1..].iter().fold(minimum, |sum, value| sum + value);

    Some(StatisticSummary {
        minimum,
        maximum,
        sum,
        sample_count: sorted.len(),
    })
}
