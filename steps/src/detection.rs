/// Adaptive peak height: `mean + factor * std` over the whole filtered trace.
pub(crate) fn threshold(filtered: &[f64], std_factor: f64) -> f64 {
    signal::mean(filtered) + std_factor * signal::std_dev(filtered)
}

/// Indices of local maxima at or above `min_height`.
///
/// A maximum needs a strictly lower neighbour on both sides, so the first and
/// last samples never qualify. A flat top is reported once, at its middle
/// sample (rounding towards the left edge).
pub(crate) fn detection(input: &[f64], min_height: f64) -> Vec<usize> {
    let mut peaks = Vec::new();

    if input.len() < 3 {
        return peaks;
    }

    let last = input.len() - 1;
    let mut i = 1;

    while i < last {
        if input[i - 1] < input[i] {
            let mut ahead = i + 1;

            while ahead < last && input[ahead] == input[i] {
                ahead += 1;
            }

            if input[ahead] < input[i] {
                let middle = (i + ahead - 1) / 2;

                if input[middle] >= min_height {
                    peaks.push(middle);
                }

                i = ahead;
            }
        }

        i += 1;
    }

    peaks
}
