//! Unit conversion utilities.
//!
//! PresentationML positions and sizes are expressed in English Metric Units
//! (EMU). Font sizes are carried in points and written as hundredths of a
//! point.

pub const EMUS_PER_INCH: i64 = 914_400;
pub const EMUS_PER_CM: i64 = 360_000;
pub const EMUS_PER_MM: i64 = 36_000;
pub const EMUS_PER_PT: i64 = 12_700;

/// Convert inches to EMU.
///
/// ```
/// use deckweave::common::unit::inches;
/// assert_eq!(inches(1.0), 914_400);
/// assert_eq!(inches(1.5), 1_371_600);
/// ```
#[inline]
pub fn inches(value: f64) -> i64 {
    (value * EMUS_PER_INCH as f64).round() as i64
}

#[inline]
pub fn cm(value: f64) -> i64 {
    (value * EMUS_PER_CM as f64).round() as i64
}

#[inline]
pub fn mm(value: f64) -> i64 {
    (value * EMUS_PER_MM as f64).round() as i64
}

/// Convert points to EMU.
#[inline]
pub fn pt(value: f64) -> i64 {
    (value * EMUS_PER_PT as f64).round() as i64
}

#[inline]
pub fn emu_to_inches(emu: i64) -> f64 {
    emu as f64 / EMUS_PER_INCH as f64
}

#[inline]
pub fn emu_to_pt(emu: i64) -> f64 {
    emu as f64 / EMUS_PER_PT as f64
}

/// Font size in points to the `sz` attribute value (hundredths of a point).
#[inline]
pub fn pt_to_centipoints(size: f64) -> u32 {
    (size * 100.0).round().max(0.0) as u32
}

/// `sz` attribute value back to points.
#[inline]
pub fn centipoints_to_pt(sz: u32) -> f64 {
    f64::from(sz) / 100.0
}
