use rand::SeedableRng;
use rand::rngs::StdRng;

/// Build the random source threaded through sampling and layout.
///
/// A fixed `seed` makes every stochastic stage reproducible; `None` seeds from the OS.
pub fn garden_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Uniform sample in `[lo, hi)`; returns `lo` for an empty span.
pub(crate) fn uniform<R: rand::Rng + ?Sized>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    let span = hi - lo;
    if span <= 0.0 {
        return lo;
    }
    lo + rng.random::<f64>() * span
}
