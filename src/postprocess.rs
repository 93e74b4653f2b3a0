/// The pipeline output: a category name and a probability in [0,1].
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: String,
    pub confidence: f32,
}

/// Converts raw logits into a probability distribution summing to 1.
///
/// The maximum is subtracted before exponentiation so large logits do not
/// overflow.
pub fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|&v| (v - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.into_iter().map(|v| v / sum).collect()
}

/// Index of the maximum score. Ties resolve to the first occurring index;
/// `None` only for an empty slice.
pub fn argmax(scores: &[f32]) -> Option<usize> {
    scores
        .iter()
        .copied()
        .enumerate()
        .reduce(|best, candidate| if candidate.1 > best.1 { candidate } else { best })
        .map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_softmax_sums_to_one() {
        let scores = softmax(&[1.0, 2.0, 3.0, 4.0]);
        let sum: f32 = scores.iter().sum();

        assert!((sum - 1.0).abs() < 1e-5);
        assert!(scores.iter().all(|&p| (0.0..=1.0).contains(&p)));
    }

    #[test]
    fn test_softmax_is_stable_for_large_logits() {
        let scores = softmax(&[1000.0, 1001.0]);
        let sum: f32 = scores.iter().sum();

        assert!((sum - 1.0).abs() < 1e-5);
        assert!(scores[1] > scores[0]);
    }

    #[test]
    fn test_softmax_of_equal_logits_is_uniform() {
        let scores = softmax(&[0.5, 0.5]);
        assert!((scores[0] - 0.5).abs() < 1e-5);
        assert!((scores[1] - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_argmax_picks_first_on_ties() {
        assert_eq!(argmax(&[1.0, 3.0, 3.0, 2.0]), Some(1));
        assert_eq!(argmax(&[0.2, 0.1, 0.7]), Some(2));
        assert_eq!(argmax(&[]), None);
    }
}
