use crate::math::Matrix;

/// Squared error between prediction and label, reduced by mean over the
/// batch dimension (dimension 0).
pub struct MseLoss;

impl MseLoss {
    /// Scalar loss for a [batch, 1] prediction/label pair.
    pub fn loss(predicted: &Matrix, expected: &Matrix) -> f64 {
        assert_eq!(predicted.rows, expected.rows, "batch size mismatch");
        assert_eq!(predicted.cols, expected.cols, "output width mismatch");
        let n = predicted.rows as f64;
        predicted
            .iter()
            .zip(expected.iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f64>()
            / n
    }

    /// Gradient of the loss with respect to the prediction: 2 (p - y) / batch.
    pub fn derivative(predicted: &Matrix, expected: &Matrix) -> Matrix {
        let n = predicted.rows as f64;
        (predicted - expected).map(|d| 2.0 * d / n)
    }
}
