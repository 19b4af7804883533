use std::time::{SystemTime, UNIX_EPOCH};

/// Default epoch offset: Wednesday, January 1, 2020 00:00:00 UTC, in
/// milliseconds since the Unix epoch.
pub const DEFAULT_EPOCH: i64 = 1_577_836_800_000;

/// A source of wall-clock time in **milliseconds since the Unix epoch**.
///
/// The generator subtracts its epoch offset from this value. Non-decreasing
/// readings are assumed but not required; a reading behind the last issued
/// timestamp is reported as [`crate::Error::ClockRegression`].
///
/// # Example
///
/// ```
/// use flakeid::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_millis(&self) -> i64 {
///         1234
///     }
/// }
///
/// assert_eq!(FixedTime.current_millis(), 1234);
/// ```
pub trait TimeSource {
    /// Returns the current time in milliseconds since 1970-01-01 UTC.
    fn current_millis(&self) -> i64;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn current_millis(&self) -> i64 {
        (**self).current_millis()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for std::sync::Arc<T> {
    fn current_millis(&self) -> i64 {
        (**self).current_millis()
    }
}

/// The system wall clock.
///
/// A system time before 1970 is reported as a negative value instead of
/// panicking, which then surfaces as [`crate::Error::ClockBeforeEpoch`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn current_millis(&self) -> i64 {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(since) => i64::try_from(since.as_millis()).unwrap_or(i64::MAX),
            Err(before) => i64::try_from(before.duration().as_millis())
                .map(|ms| -ms)
                .unwrap_or(i64::MIN),
        }
    }
}
