use serde::{Serialize, Deserialize};

/// Element-wise activation applied by a dense layer after its linear
/// transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    Tanh,
    Relu,
    /// Used on the output layer only; squashes the final linear unit into
    /// a probability in [0, 1].
    Sigmoid,
}

impl Activation {
    pub fn function(&self, x: f64) -> f64 {
        match self {
            Activation::Tanh => x.tanh(),
            Activation::Relu => {
                if x > 0.0 {
                    x
                } else {
                    0.0
                }
            }
            Activation::Sigmoid => 1.0 / (1.0 + (-x).exp()),
        }
    }

    /// Derivative with respect to the pre-activation value.
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            Activation::Tanh => {
                let t = x.tanh();
                1.0 - t * t
            }
            Activation::Relu => {
                if x > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            Activation::Sigmoid => {
                let fx = self.function(x);
                fx * (1.0 - fx)
            }
        }
    }
}

/// The closed set of hidden-layer non-linearities a model config may name.
///
/// Deserializing any other name fails, so an unsupported non-linearity is
/// rejected while the config is decoded, before any layer is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nonlinearity {
    Tanh,
    Relu,
}

impl Nonlinearity {
    pub fn activation(&self) -> Activation {
        match self {
            Nonlinearity::Tanh => Activation::Tanh,
            Nonlinearity::Relu => Activation::Relu,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn sigmoid_maps_into_unit_interval() {
        for x in [-50.0, -1.0, 0.0, 1.0, 50.0] {
            let y = Activation::Sigmoid.function(x);
            assert!(y >= 0.0 && y <= 1.0);
        }
        assert_relative_eq!(Activation::Sigmoid.function(0.0), 0.5);
    }

    #[test]
    fn relu_zeroes_negative_inputs() {
        assert_relative_eq!(Activation::Relu.function(-3.0), 0.0);
        assert_relative_eq!(Activation::Relu.function(2.5), 2.5);
        assert_relative_eq!(Activation::Relu.derivative(-3.0), 0.0);
        assert_relative_eq!(Activation::Relu.derivative(2.5), 1.0);
    }

    #[test]
    fn tanh_derivative_matches_identity() {
        let x: f64 = 0.7;
        let t = x.tanh();
        assert_relative_eq!(Activation::Tanh.derivative(x), 1.0 - t * t);
    }

    #[test]
    fn nonlinearity_rejects_unknown_names() {
        assert!(serde_json::from_str::<Nonlinearity>("\"tanh\"").is_ok());
        assert!(serde_json::from_str::<Nonlinearity>("\"relu\"").is_ok());
        assert!(serde_json::from_str::<Nonlinearity>("\"sigmoid\"").is_err());
        assert!(serde_json::from_str::<Nonlinearity>("\"gelu\"").is_err());
    }
}
