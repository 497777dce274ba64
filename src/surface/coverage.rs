// Fixed-stride alpha sampling. Exact counting is never needed, only whether
// the configured threshold was crossed, so we look at one pixel in `stride`.

pub const BYTES_PER_PIXEL: usize = 4;
const ALPHA_OFFSET: usize = 3;

/// Percentage (0..=100) of sampled RGBA8 pixels whose alpha is zero.
/// `None` for an empty buffer.
pub fn sampled_coverage(rgba: &[u8], stride_px: usize) -> Option<f64> {
    let step = stride_px.max(1) * BYTES_PER_PIXEL;
    let mut sampled = 0usize;
    let mut clear = 0usize;
    for alpha in rgba.iter().skip(ALPHA_OFFSET).step_by(step) {
        sampled += 1;
        if *alpha == 0 {
            clear += 1;
        }
    }
    if sampled == 0 {
        return None;
    }
    Some(clear as f64 * 100.0 / sampled as f64)
}

/// Inclusive: landing exactly on the threshold reveals.
pub fn crosses(coverage: f64, threshold: f64) -> bool {
    coverage >= threshold
}
