use rand::Rng;

use crate::math::Matrix;

/// The four XOR samples.
const SAMPLES: [([f64; 2], f64); 4] = [
    ([1.0, 1.0], 0.0),
    ([0.0, 1.0], 1.0),
    ([1.0, 0.0], 1.0),
    ([0.0, 0.0], 0.0),
];

/// The full truth table as an ([4, 2] inputs, [4, 1] labels) pair.
pub fn truth_table() -> (Matrix, Matrix) {
    let inputs = SAMPLES.iter().map(|(x, _)| x.to_vec()).collect();
    let labels = SAMPLES.iter().map(|(_, y)| vec![*y]).collect();
    (Matrix::from_rows(inputs), Matrix::from_rows(labels))
}

/// Draws a batch of `batch_size` rows uniformly at random from the truth
/// table, with replacement.
pub fn sample_batch<R: Rng>(rng: &mut R, batch_size: usize) -> (Matrix, Matrix) {
    let mut inputs = Vec::with_capacity(batch_size);
    let mut labels = Vec::with_capacity(batch_size);
    for _ in 0..batch_size {
        let (x, y) = SAMPLES[rng.gen_range(0..SAMPLES.len())];
        inputs.push(x.to_vec());
        labels.push(vec![y]);
    }
    (Matrix::from_rows(inputs), Matrix::from_rows(labels))
}
