//! Backpropagation for a single labeled example

use crate::data::Input;
use crate::matrix::Matrix;
use crate::network::{Gradients, Network};
use crate::utils::activations::{sigmoid_matrix, sigmoid_prime_matrix};

impl Network {
    /// Gradient of the cost for one example.
    ///
    /// Runs a forward pass that keeps every pre-activation `z_l` and activation
    /// `a_l`, seeds the output error with [`Cost::delta`](crate::cost::Cost::delta)
    /// and propagates it backwards:
    ///
    /// - `bias_grad_l = delta_l`
    /// - `weight_grad_l = delta_lᵀ · a_{l-1}`
    /// - `delta_{l-1} = (delta_l · W_l) ⊙ sigmoid'(z_{l-1})`
    ///
    /// The network is not modified.
    ///
    /// # Panics
    ///
    /// Panics if the input width does not match the input layer.
    pub fn backprop(&self, input: &Input) -> Gradients {
        let layers = self.weights.len();

        // activations[l] feeds layer l; activations[0] is the input itself.
        let mut activations: Vec<Matrix> = Vec::with_capacity(layers + 1);
        let mut zs: Vec<Matrix> = Vec::with_capacity(layers);
        activations.push(input.to_row());
        for (w, b) in self.weights.iter().zip(&self.biases) {
            let z = activations[activations.len() - 1].dot_transposed(w).add(b);
            activations.push(sigmoid_matrix(&z));
            zs.push(z);
        }

        let mut weight_grads: Vec<Matrix> = Vec::with_capacity(layers);
        let mut bias_grads: Vec<Matrix> = Vec::with_capacity(layers);

        let mut delta = self.cost.delta(
            &activations[layers],
            input.label().one_hot(),
            &zs[layers - 1],
        );
        weight_grads.push(delta.transpose().dot(&activations[layers - 1]));
        bias_grads.push(delta.clone());

        for l in (0..layers - 1).rev() {
            delta = delta
                .dot(&self.weights[l + 1])
                .multiply(&sigmoid_prime_matrix(&zs[l]));
            weight_grads.push(delta.transpose().dot(&activations[l]));
            bias_grads.push(delta.clone());
        }

        weight_grads.reverse();
        bias_grads.reverse();

        Gradients {
            weights: weight_grads,
            biases: bias_grads,
        }
    }
}
