//! Minute conversion, offense thresholding, and percentage aggregation.

use std::time::Duration;

use super::departure::DelayRecord;

/// Convert a delay to whole minutes, truncating toward zero. 119 seconds is
/// 1 minute, not 2.
pub fn to_whole_minutes(delay: Duration) -> u64 {
    delay.as_secs() / 60
}

/// Convert every record's delay to whole minutes, preserving order.
pub fn convert_minutes(records: &[DelayRecord]) -> Vec<u64> {
    records.iter().map(|r| to_whole_minutes(r.delay)).collect()
}

/// Flag each whole-minute delay that meets or exceeds the threshold.
///
/// A threshold of 0 flags every non-early departure, since a whole-minute
/// delay of 0 still satisfies `0 >= 0`.
pub fn compare_to_threshold(minutes: &[u64], threshold: u32) -> Vec<bool> {
    minutes.iter().map(|&m| m >= u64::from(threshold)).collect()
}

/// Percentage of flags that are offenders.
///
/// Truncated to an integer, not rounded; the downstream comparison against
/// thresholds is integer-based and the boundary behavior depends on it.
/// An empty input is the vacuous case and yields 0.
pub fn percentage_of_offenders(flags: &[bool]) -> u8 {
    let total = flags.len();
    let offenders = flags.iter().filter(|&&f| f).count();

    if total == 0 {
        return 0;
    }
    (100 * offenders / total) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_whole_minutes_truncates() {
        assert_eq!(to_whole_minutes(Duration::from_secs(0)), 0);
        assert_eq!(to_whole_minutes(Duration::from_secs(59)), 0);
        assert_eq!(to_whole_minutes(Duration::from_secs(60)), 1);
        assert_eq!(to_whole_minutes(Duration::from_secs(119)), 1);
        assert_eq!(to_whole_minutes(Duration::from_secs(120)), 2);
        assert_eq!(to_whole_minutes(Duration::from_secs(150)), 2);
    }

    #[test]
    fn test_to_whole_minutes_is_monotonic() {
        let samples = [0u64, 1, 59, 60, 61, 119, 120, 3599, 3600];
        let minutes: Vec<u64> = samples
            .iter()
            .map(|&s| to_whole_minutes(Duration::from_secs(s)))
            .collect();
        assert!(minutes.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_compare_to_threshold() {
        assert_eq!(compare_to_threshold(&[0, 2, 0], 0), vec![true, true, true]);
        assert_eq!(
            compare_to_threshold(&[0, 2, 0], 1),
            vec![false, true, false]
        );
        assert_eq!(
            compare_to_threshold(&[0, 2, 0], 2),
            vec![false, true, false]
        );
        assert_eq!(
            compare_to_threshold(&[0, 2, 0], 3),
            vec![false, false, false]
        );
    }

    #[test]
    fn test_percentage_of_offenders() {
        assert_eq!(percentage_of_offenders(&[true, true, true]), 100);
        assert_eq!(percentage_of_offenders(&[true, true, false, false]), 50);
        assert_eq!(percentage_of_offenders(&[false, false]), 0);
    }

    #[test]
    fn test_percentage_truncates_not_rounds() {
        // 2 of 3 is 66.67%; the contract requires 66.
        assert_eq!(percentage_of_offenders(&[true, true, false]), 66);
    }

    #[test]
    fn test_percentage_of_empty_is_zero() {
        assert_eq!(percentage_of_offenders(&[]), 0);
    }

    #[test]
    fn test_percentage_stays_in_bounds() {
        for n in 0..8usize {
            for k in 0..=n {
                let mut flags = vec![true; k];
                flags.extend(vec![false; n - k]);
                let pct = percentage_of_offenders(&flags);
                assert!(pct <= 100);
            }
        }
    }
}
