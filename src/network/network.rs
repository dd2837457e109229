use rand::Rng;

use crate::error::Result;
use crate::math::matrix::Matrix;
use crate::network::activation::sigmoid;

/// Two-layer feed-forward network: input → hidden → output, with a fixed
/// logistic-sigmoid activation after each weight stage.
///
/// The network holds exactly two weight matrices whose shapes are fixed at
/// construction time. It has no other mutable state and no phase tracking:
/// `query` is read-only inference, `train` is one mutating gradient step.
///
/// Weights are not synchronized for concurrent access; callers must serialize
/// concurrent `train` / `query` / `set_*` calls on the same instance.
pub struct Network {
    learning_rate: f64,
    /// Shape I×H: `hidden = sigmoid(input · input_hidden)`.
    input_hidden: Matrix,
    /// Shape H×O: `output = sigmoid(hidden · hidden_output)`.
    hidden_output: Matrix,
    activation: fn(f64) -> f64,
}

impl Network {
    /// Builds a network with Gaussian-initialized weights.
    ///
    /// `input_hidden` is drawn from N(0, hidden_nodes^-0.5) and
    /// `hidden_output` from N(0, output_nodes^-0.5), matching the usual
    /// fan-based sigmoid initialization. The rng is passed in so that
    /// construction is reproducible under a seeded generator.
    ///
    /// # Panics
    /// Panics if `learning_rate` is not strictly positive.
    pub fn new<R: Rng>(
        input_nodes: usize,
        hidden_nodes: usize,
        output_nodes: usize,
        learning_rate: f64,
        rng: &mut R,
    ) -> Network {
        assert!(learning_rate > 0.0, "learning_rate must be positive");

        let input_hidden = Matrix::gaussian(
            input_nodes,
            hidden_nodes,
            0.0,
            (hidden_nodes as f64).powf(-0.5),
            rng,
        );
        let hidden_output = Matrix::gaussian(
            hidden_nodes,
            output_nodes,
            0.0,
            (output_nodes as f64).powf(-0.5),
            rng,
        );

        Network {
            learning_rate,
            input_hidden,
            hidden_output,
            activation: sigmoid,
        }
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn input_hidden_weights(&self) -> &Matrix {
        &self.input_hidden
    }

    pub fn hidden_output_weights(&self) -> &Matrix {
        &self.hidden_output
    }

    /// Replaces the input→hidden weights wholesale (e.g. with weights loaded
    /// from storage). The replacement must match the current shape exactly.
    pub fn set_input_hidden_weights(&mut self, weights: Matrix) -> Result<()> {
        self.input_hidden.copy_from(&weights)?;
        Ok(())
    }

    /// Replaces the hidden→output weights wholesale. The replacement must
    /// match the current shape exactly.
    pub fn set_hidden_output_weights(&mut self, weights: Matrix) -> Result<()> {
        self.hidden_output.copy_from(&weights)?;
        Ok(())
    }

    /// Forward inference.
    ///
    /// `input` is a 1×I row vector. Computes
    /// `hidden = sigmoid(input · input_hidden)` (1×H), then
    /// `output = sigmoid(hidden · hidden_output)` (1×O) and returns it.
    /// Pure function of the input and the current weights.
    pub fn query(&self, input: &Matrix) -> Result<Matrix> {
        let mut hidden = input.dot(&self.input_hidden)?;
        hidden.map_assign(self.activation);

        let mut output = hidden.dot(&self.hidden_output)?;
        output.map_assign(self.activation);
        Ok(output)
    }

    /// One gradient-descent step. This is deliberately not textbook two-layer
    /// backpropagation; see DESIGN.md for the rationale.
    ///
    /// Recomputes `hidden` and `output` exactly as `query` does, then applies
    /// the logistic-output delta rule to `hidden_output` only:
    ///
    /// ```text
    /// delta = learning_rate · (error ⊙ output ⊙ (1 − output))ᵗ · hidden
    /// hidden_output += deltaᵗ
    /// ```
    ///
    /// The update is asymmetric, and the test suite asserts it stays so:
    /// - the error signal is `input − output`, not `label − output`, so the
    ///   call fails with `ShapeMismatch` unless the input and output widths
    ///   agree;
    /// - `label` is accepted but unused;
    /// - a hidden-layer error (`error · hidden_outputᵗ`) is derived but never
    ///   applied, so `input_hidden` is left untouched by training.
    pub fn train(&mut self, input: &Matrix, _label: &Matrix) -> Result<()> {
        let mut hidden = input.dot(&self.input_hidden)?;
        hidden.map_assign(self.activation);

        let mut output = hidden.dot(&self.hidden_output)?;
        output.map_assign(self.activation);

        let output_errors = input.sub(&output)?;

        let mut delta = output_errors
            .hadamard(&output)?
            .hadamard(&output.map(|x| 1.0 - x))?
            .transpose()
            .dot(&hidden)?;
        delta.scale_assign(self.learning_rate);
        self.hidden_output.add_assign(&delta.transpose())?;

        // Derived but never applied to input_hidden.
        let _hidden_errors = output_errors.dot(&self.hidden_output.transpose())?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MatrixError;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn seeded(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    #[test]
    fn zero_weights_yield_all_one_half_outputs() {
        let mut net = Network::new(4, 3, 2, 0.1, &mut seeded(0));
        net.set_input_hidden_weights(Matrix::zeros(4, 3)).unwrap();
        net.set_hidden_output_weights(Matrix::zeros(3, 2)).unwrap();

        let output = net.query(&Matrix::row(vec![0.7, -2.0, 5.0, 0.0])).unwrap();
        assert_eq!(output.rows(), 1);
        assert_eq!(output.cols(), 2);
        assert!(output.as_slice().iter().all(|&x| x == 0.5));
    }

    #[test]
    fn query_returns_the_output_width() {
        let net = Network::new(5, 4, 3, 0.2, &mut seeded(1));
        let output = net.query(&Matrix::row(vec![0.1; 5])).unwrap();
        assert_eq!(output.rows(), 1);
        assert_eq!(output.cols(), 3);
        assert!(output.as_slice().iter().all(|&x| x > 0.0 && x < 1.0));
    }

    #[test]
    fn query_rejects_an_input_of_the_wrong_width() {
        let net = Network::new(5, 4, 3, 0.2, &mut seeded(2));
        assert_eq!(
            net.query(&Matrix::row(vec![0.1; 6])).unwrap_err(),
            MatrixError::DimensionMismatch { left_cols: 6, right_rows: 5 }
        );
    }

    #[test]
    fn query_does_not_mutate_the_weights() {
        let net = Network::new(4, 4, 4, 0.3, &mut seeded(3));
        let ih_before = net.input_hidden_weights().clone();
        let ho_before = net.hidden_output_weights().clone();
        net.query(&Matrix::row(vec![0.5; 4])).unwrap();
        assert_eq!(net.input_hidden_weights(), &ih_before);
        assert_eq!(net.hidden_output_weights(), &ho_before);
    }

    #[test]
    fn weight_replacement_rejects_shape_differences() {
        let mut net = Network::new(4, 3, 2, 0.1, &mut seeded(4));
        assert_eq!(
            net.set_input_hidden_weights(Matrix::zeros(3, 4)).unwrap_err(),
            MatrixError::ShapeMismatch { left: (4, 3), right: (3, 4) }
        );
        assert_eq!(
            net.set_hidden_output_weights(Matrix::zeros(3, 3)).unwrap_err(),
            MatrixError::ShapeMismatch { left: (3, 2), right: (3, 3) }
        );
    }

    #[test]
    fn weight_replacement_installs_the_new_values() {
        let mut net = Network::new(2, 2, 2, 0.1, &mut seeded(5));
        let replacement = Matrix::ones(2, 2);
        net.set_hidden_output_weights(replacement.clone()).unwrap();
        assert_eq!(net.hidden_output_weights(), &replacement);
    }

    // The asymmetric update: one train call changes hidden_output but leaves
    // input_hidden bit-identical.
    #[test]
    fn train_updates_only_the_hidden_output_weights() {
        let mut net = Network::new(3, 5, 3, 0.5, &mut seeded(6));
        let ih_before = net.input_hidden_weights().clone();
        let ho_before = net.hidden_output_weights().clone();

        let input = Matrix::row(vec![1.0, 0.0, 0.5]);
        let label = Matrix::row(vec![0.0, 1.0, 0.0]);
        net.train(&input, &label).unwrap();

        assert_eq!(net.input_hidden_weights(), &ih_before);
        assert_ne!(net.hidden_output_weights(), &ho_before);
    }

    // Because the error signal is input - output, training a network whose
    // input and output widths differ surfaces the shape violation.
    #[test]
    fn train_fails_when_input_and_output_widths_differ() {
        let mut net = Network::new(4, 3, 2, 0.1, &mut seeded(7));
        let input = Matrix::row(vec![0.2; 4]);
        let label = Matrix::row(vec![0.0, 1.0]);
        assert_eq!(
            net.train(&input, &label).unwrap_err(),
            MatrixError::ShapeMismatch { left: (1, 4), right: (1, 2) }
        );
        // A failed step must not leave a partial update behind.
        let ho_before = net.hidden_output_weights().clone();
        let _ = net.train(&input, &label);
        assert_eq!(net.hidden_output_weights(), &ho_before);
    }

    #[test]
    fn train_ignores_the_label_argument() {
        let mut a = Network::new(3, 4, 3, 0.5, &mut seeded(8));
        let mut b = Network::new(3, 4, 3, 0.5, &mut seeded(8));

        let input = Matrix::row(vec![0.9, 0.1, 0.4]);
        a.train(&input, &Matrix::row(vec![1.0, 0.0, 0.0])).unwrap();
        b.train(&input, &Matrix::row(vec![0.0, 0.0, 1.0])).unwrap();

        assert_eq!(a.hidden_output_weights(), b.hidden_output_weights());
    }

    #[test]
    fn train_moves_the_output_toward_the_input_signal() {
        // With error = input - output, repeated training on the same sample
        // drags the output toward the input values.
        let mut net = Network::new(3, 6, 3, 0.8, &mut seeded(9));
        let input = Matrix::row(vec![0.9, 0.1, 0.5]);
        let label = Matrix::row(vec![0.9, 0.1, 0.5]);

        let before = net.query(&input).unwrap();
        let distance = |out: &Matrix| -> f64 {
            out.as_slice()
                .iter()
                .zip(input.as_slice())
                .map(|(o, i)| (o - i) * (o - i))
                .sum()
        };
        let d_before = distance(&before);

        for _ in 0..200 {
            net.train(&input, &label).unwrap();
        }
        let d_after = distance(&net.query(&input).unwrap());
        assert!(
            d_after < d_before,
            "expected the output to move toward the input: {d_before} -> {d_after}"
        );
    }

    #[test]
    #[should_panic(expected = "learning_rate must be positive")]
    fn construction_rejects_a_non_positive_learning_rate() {
        Network::new(2, 2, 2, 0.0, &mut seeded(10));
    }
}
