/// Enforce a minimum spacing of `min_distance` samples between peaks.
///
/// Peaks are visited from the tallest down; each surviving peak removes every
/// remaining neighbour closer than `min_distance`. Which peak survives a
/// cluster therefore depends on height, not on which came first.
pub(crate) fn time_threshold(input: &[f64], peaks: Vec<usize>, min_distance: usize) -> Vec<usize> {
    let mut keep = vec![true; peaks.len()];

    let mut by_height = (0..peaks.len()).collect::<Vec<_>>();
    by_height.sort_by(|&left, &right| input[peaks[left]].total_cmp(&input[peaks[right]]));

    for &current in by_height.iter().rev() {
        if !keep[current] {
            continue;
        }

        for before in (0..current).rev() {
            if peaks[current] - peaks[before] >= min_distance {
                break;
            }
            keep[before] = false;
        }

        for after in current + 1..peaks.len() {
            if peaks[after] - peaks[current] >= min_distance {
                break;
            }
            keep[after] = false;
        }
    }

    peaks
        .into_iter()
        .zip(keep)
        .filter_map(|(peak, keep)| keep.then_some(peak))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signal_with(peaks: &[(usize, f64)], len: usize) -> Vec<f64> {
        let mut signal = vec![0.0; len];
        for &(index, height) in peaks {
            signal[index] = height;
        }
        signal
    }

    #[test]
    fn tallest_wins_over_first() {
        let input = signal_with(&[(10, 1.0), (13, 2.0)], 30);

        assert_eq!(time_threshold(&input, vec![10, 13], 5), vec![13]);
    }

    #[test]
    fn far_apart_peaks_are_kept() {
        let input = signal_with(&[(10, 1.0), (20, 2.0), (30, 1.5)], 40);

        assert_eq!(time_threshold(&input, vec![10, 20, 30], 10), vec![10, 20, 30]);
    }

    #[test]
    fn suppressed_peak_does_not_suppress_others() {
        // 14 is removed by 18, so it can no longer remove 10
        let input = signal_with(&[(10, 2.0), (14, 1.0), (18, 3.0)], 30);

        assert_eq!(time_threshold(&input, vec![10, 14, 18], 5), vec![10, 18]);
    }

    #[test]
    fn spacing_equal_to_distance_is_allowed() {
        let input = signal_with(&[(10, 1.0), (15, 2.0)], 30);

        assert_eq!(time_threshold(&input, vec![10, 15], 5), vec![10, 15]);
    }

    #[test]
    fn empty() {
        assert!(time_threshold(&[], Vec::new(), 5).is_empty());
    }
}
