//! The causal-distance and activation-contribution kernel: `gamma` and `omega`.

/// Sentinel distance used in place of `-log(0)` when a pre/post spike pair's
/// gap is shorter than the synapse's delay, keeping `gamma` finite and
/// avoiding ever evaluating `exp` in the hot path.
pub const LARGE_GAMMA: f64 = 999_999.0;

/// Causal distance between a pre-spike and a post-spike across synapse
/// `e = (neg_log_rel_w, delay)`, with gap `delta = t_post - t_pre`.
///
/// `gamma = LARGE_GAMMA` if `delta < delay`, else `neg_log_rel_w + (delta -
/// delay) / tau`. No `exp` is evaluated here; the sentinel stands in for
/// `+inf` from `-log(0)` when the Heaviside factor in [`omega`] would zero
/// the exponential anyway.
pub fn gamma(delta: f64, delay: f64, neg_log_rel_w: f64, tau: f64) -> f64 {
    if delta < delay {
        LARGE_GAMMA
    } else {
        neg_log_rel_w + (delta - delay) / tau
    }
}

/// Heaviside step: `1.0` if `x >= 0.0`, else `0.0`.
fn heaviside(x: f64) -> f64 {
    if x >= 0.0 {
        1.0
    } else {
        0.0
    }
}

/// Activation contribution of a synapse of relative weight `rel_w` and
/// delay `delay`, over a pre/post gap `delta`, gated by membrane time
/// constant `tau`.
///
/// Exported for forward compatibility; not used by the core enumeration
/// pipeline, which filters purely on [`gamma`].
pub fn omega(delta: f64, delay: f64, rel_w: f64, tau: f64) -> f64 {
    heaviside(delta - delay) * rel_w * (-(delta - delay) / tau).exp()
}
