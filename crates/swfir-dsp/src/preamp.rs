//! Global safety preamp from the peak correction gain.

use swfir_core::Channel;

/// Extra attenuation on top of the peak boost, in dB.
pub const DEFAULT_HEADROOM_DB: f64 = 1.0;

/// Preamp that keeps the loudest boost across all curves from clipping.
///
/// `0.0` when no curve boosts (peak `<= 0 dB`) or there are no values at all,
/// otherwise `-(peak + headroom_db)`.
pub fn compute_preamp_db<'a, I>(curves: I, headroom_db: f64) -> f64
where
    I: IntoIterator<Item = &'a [f32]>,
{
    let peak = curves
        .into_iter()
        .flatten()
        .map(|&g| f64::from(g))
        .fold(f64::NEG_INFINITY, f64::max);

    if peak <= 0.0 {
        return 0.0;
    }
    -(peak + headroom_db)
}

/// [`compute_preamp_db`] over every channel's correction curve.
pub fn channel_preamp_db(channels: &[Channel], headroom_db: f64) -> f64 {
    compute_preamp_db(
        channels.iter().map(|c| c.correction_db.as_slice()),
        headroom_db,
    )
}
