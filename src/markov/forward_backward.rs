//! Scaled forward-backward recursions.
//!
//! Purpose
//! -------
//! The numerical core shared by likelihood evaluation and Baum-Welch
//! training. Both recursions are generic over an emission closure
//! `(state, t) -> density`, so the same code serves discrete symbol
//! models and continuous density models.
//!
//! Key behaviors
//! -------------
//! - The forward pass rescales every time step by the row sum `c[t]` of
//!   the unscaled forward variables, so each stored row of alpha sums to
//!   one and long sequences never underflow. The sequence log-likelihood
//!   is the sum of `ln c[t]`.
//! - The backward pass reuses the forward scaling factors: the last row
//!   is initialized to `1 / c[T-1]` and each earlier row is divided by
//!   its own `c[t]`. Under this convention the per-step identity
//!   `sum_i alpha[t][i] * beta[t][i] * c[t] == 1` holds.
//!
//! Edge cases
//! ----------
//! - A time step where every state has zero emission density produces
//!   `c[t] == 0`. Scaling is skipped for that step (the row stays all
//!   zero rather than becoming NaN), and the log-likelihood contribution
//!   `ln 0` makes the sequence score negative infinity. Callers treat
//!   that as a valid "impossible under this model" result, not an error.
use ndarray::{Array1, Array2};

/// Scaled forward pass.
///
/// Returns the scaled forward variables (one row per time step, each row
/// summing to one except for degenerate all-zero steps) and the scaling
/// factors `c[t]`.
pub fn forward<E>(
    transitions: &Array2<f64>, initial: &Array1<f64>, emission: E, length: usize,
) -> (Array2<f64>, Vec<f64>)
where
    E: Fn(usize, usize) -> f64,
{
    let states = transitions.nrows();
    let mut alpha = Array2::<f64>::zeros((length, states));
    let mut scaling = vec![0.0; length];

    for state in 0..states {
        alpha[[0, state]] = initial[state] * emission(state, 0);
    }
    scaling[0] = alpha.row(0).sum();
    if scaling[0] != 0.0 {
        let c = scaling[0];
        alpha.row_mut(0).mapv_inplace(|v| v / c);
    }

    for t in 1..length {
        for state in 0..states {
            let mut incoming = 0.0;
            for prev in 0..states {
                incoming += alpha[[t - 1, prev]] * transitions[[prev, state]];
            }
            alpha[[t, state]] = incoming * emission(state, t);
        }
        scaling[t] = alpha.row(t).sum();
        if scaling[t] != 0.0 {
            let c = scaling[t];
            alpha.row_mut(t).mapv_inplace(|v| v / c);
        }
    }

    (alpha, scaling)
}

/// Scaled backward pass using the forward pass's scaling factors.
pub fn backward<E>(
    transitions: &Array2<f64>, scaling: &[f64], emission: E, length: usize,
) -> Array2<f64>
where
    E: Fn(usize, usize) -> f64,
{
    let states = transitions.nrows();
    let mut beta = Array2::<f64>::zeros((length, states));

    let last = if scaling[length - 1] != 0.0 { 1.0 / scaling[length - 1] } else { 1.0 };
    beta.row_mut(length - 1).fill(last);

    for t in (0..length - 1).rev() {
        for state in 0..states {
            let mut outgoing = 0.0;
            for next in 0..states {
                outgoing +=
                    transitions[[state, next]] * emission(next, t + 1) * beta[[t + 1, next]];
            }
            beta[[t, state]] =
                if scaling[t] != 0.0 { outgoing / scaling[t] } else { outgoing };
        }
    }

    beta
}

/// Sequence log-likelihood from the forward scaling factors.
///
/// A zero factor contributes `ln 0 == -inf`, marking the sequence as
/// impossible under the model.
pub fn log_likelihood(scaling: &[f64]) -> f64 {
    scaling.iter().map(|c| c.ln()).sum()
}
