///! Pure visibility predicates: bounding box and darkness
use crate::module::daylight::DaylightWindow;
use crate::module::sat::Coordinate;

/// Half-width of the overhead bounding box, in degrees.
pub const OVERHEAD_MARGIN_DEG: f64 = 5.0;

/// Whether the satellite falls within the fixed bounding box around
/// the observer. Strict inequality: a delta of exactly 5 degrees on
/// either axis is out. No great-circle distance, coarse on purpose.
pub fn is_overhead(observer: Coordinate, satellite: Coordinate) -> bool {
    (observer.latitude - satellite.latitude).abs() < OVERHEAD_MARGIN_DEG
        && (observer.longitude - satellite.longitude).abs() < OVERHEAD_MARGIN_DEG
}

/// Whether `hour_utc` falls in the observer's night.
///
/// A `None` window means the daylight fetch failed; the policy is to
/// fail open and assume night rather than suppress a real pass.
///
/// The window bounds may sit in either order around the UTC midnight
/// wrap; night always runs from the later bound to the earlier one.
pub fn is_night(window: Option<DaylightWindow>, hour_utc: u32) -> bool {
    let Some(window) = window else {
        return true;
    };

    let dusk = window.sunrise_hour_utc.max(window.sunset_hour_utc);
    let dawn = window.sunrise_hour_utc.min(window.sunset_hour_utc);
    hour_utc >= dusk || hour_utc < dawn
}
