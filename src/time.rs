use hifitime::{Epoch, Unit};

use crate::constants::{JulianDate, SECONDS_PER_DAY};
use crate::solarpaper_errors::SolarpaperError;

/// Current instant as a Julian date in the TDB time scale
///
/// Return
/// ------
/// * the system clock read through hifitime, expressed as JD TDB (the time scale
///   of every sample timestamp in the dataset)
pub fn jd_now() -> Result<JulianDate, SolarpaperError> {
    Ok(Epoch::now()?.to_jde_tdb_days())
}

/// Julian date `seconds` before `jd`
///
/// Argument
/// --------
/// * `jd`: the reference Julian date (TDB)
/// * `seconds`: how far back to go, in SI seconds
///
/// Return
/// ------
/// * the Julian date (TDB) `seconds` earlier, used as the start of a trail window
///
/// The date is shifted directly in days, without going through an [`Epoch`], so that
/// `jd_seconds_before(jd, 0) == jd`.
pub fn jd_seconds_before(jd: JulianDate, seconds: u32) -> JulianDate {
    let window = Unit::Second * f64::from(seconds);
    jd - window.to_seconds() / SECONDS_PER_DAY
}
