//! Differencing utilities used to stationarize a series for ARIMA

/// Apply `order` rounds of first-differencing to a value sequence.
///
/// Each round shortens the sequence by one: `diff[i] = values[i+1] - values[i]`.
pub fn difference(values: &[f64], order: usize) -> Vec<f64> {
    let mut result = values.to_vec();
    for _ in 0..order {
        result = result.windows(2).map(|pair| pair[1] - pair[0]).collect();
    }
    result
}

/// Invert a `d`-order difference, seeding each reconstruction round with the
/// last value of the original series.
///
/// Given forecasts produced in the differenced domain, returns the
/// corresponding level forecasts.
pub fn undifference(diff_values: &[f64], original: &[f64], d: usize) -> Vec<f64> {
    if d == 0 || original.is_empty() {
        return diff_values.to_vec();
    }

    let mut result = diff_values.to_vec();
    let last_value = original[original.len() - 1];

    for _ in 0..d {
        let mut cumulative = Vec::with_capacity(result.len());
        let mut running = last_value;
        for &delta in &result {
            running += delta;
            cumulative.push(running);
        }
        result = cumulative;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_difference_of_linear_series_is_constant() {
        let values = [10.0, 12.0, 14.0, 16.0];
        assert_eq!(difference(&values, 1), vec![2.0, 2.0, 2.0]);
    }

    #[test]
    fn second_difference_shortens_by_two() {
        let values = [1.0, 4.0, 9.0, 16.0, 25.0];
        assert_eq!(difference(&values, 2), vec![2.0, 2.0, 2.0]);
    }

    #[test]
    fn zero_order_is_identity() {
        let values = [3.0, 1.0, 4.0];
        assert_eq!(difference(&values, 0), values.to_vec());
        assert_eq!(undifference(&values, &[9.0], 0), values.to_vec());
    }

    #[test]
    fn undifference_reconstructs_levels_from_tail() {
        let original = [100.0, 110.0, 120.0];
        let deltas = [10.0, 10.0, 10.0];
        assert_eq!(
            undifference(&deltas, &original, 1),
            vec![130.0, 140.0, 150.0]
        );
    }
}
