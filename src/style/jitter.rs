use rand::{SeedableRng as _, distributions::Distribution as _};

/// Deterministic random source for handheld-camera jitter.
pub fn seeded_rng(seed: u64) -> rand_pcg::Pcg64Mcg {
    rand_pcg::Pcg64Mcg::seed_from_u64(seed)
}

/// Fresh, independently seeded random source for one render call.
pub(crate) fn entropy_rng() -> rand_pcg::Pcg64Mcg {
    rand_pcg::Pcg64Mcg::from_entropy()
}

/// Largest background tilt a caption may use, in radians.
pub const MAX_JITTER_BOUND_RAD: f64 = std::f64::consts::FRAC_PI_4;

/// Uniform rotation in `[-max_abs_rad, max_abs_rad]`, with the bound clamped to
/// [`MAX_JITTER_BOUND_RAD`]. A zero or NaN bound yields 0 and leaves `rng` untouched.
pub(crate) fn sample_rotation(rng: &mut dyn rand::RngCore, max_abs_rad: f64) -> f64 {
    if max_abs_rad.is_nan() || max_abs_rad <= 0.0 {
        return 0.0;
    }
    let bound = max_abs_rad.min(MAX_JITTER_BOUND_RAD);
    rand::distributions::Uniform::new_inclusive(-bound, bound).sample(rng)
}
