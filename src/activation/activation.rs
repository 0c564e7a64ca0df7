/// Logistic function `1 / (1 + e^-x)`, bounded to the open interval (0, 1)
/// for finite `x`.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Clamps a value into the activation range [0.0, 1.0].
///
/// `NaN` has no position in the range and is stored as `0.0` (a silent
/// neuron); infinities clamp to the nearest bound.
pub fn clamp_activation(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
