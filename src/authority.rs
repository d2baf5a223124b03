//! Calendar authorities: where a [`ConversionResult`] comes from.
//!
//! A remote, authoritative calendar service may supply the year/month/day
//! pillars; the offline algorithm in [`saju`](crate::saju) is the reference
//! implementation and the fallback when the remote side is unavailable.
//! Transport to any particular service is left to implementors of
//! [`CalendarAuthority`].

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::civil::KST_OFFSET_MINUTES;
use crate::error::Result;
use crate::saju::{self, ConversionResult, Source};

/// Something that can turn a UTC birth instant into date pillars.
pub trait CalendarAuthority {
    /// Short name used in logs.
    fn name(&self) -> &str;
    fn convert(&self, instant: DateTime<Utc>) -> Result<ConversionResult>;
}

/// The built-in approximation, computed in a fixed civil zone.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct OfflineAuthority {
    offset_minutes: i32,
}

impl OfflineAuthority {
    pub fn new(offset_minutes: i32) -> Self {
        Self { offset_minutes }
    }
    pub fn offset_minutes(&self) -> i32 {
        self.offset_minutes
    }
}

impl Default for OfflineAuthority {
    fn default() -> Self {
        Self::new(KST_OFFSET_MINUTES)
    }
}

impl CalendarAuthority for OfflineAuthority {
    fn name(&self) -> &str {
        "offline"
    }
    fn convert(&self, instant: DateTime<Utc>) -> Result<ConversionResult> {
        saju::convert(instant, self.offset_minutes, Source::OfflineApproximation)
    }
}

/// Asks `primary` first and falls back to `offline` if it is absent or
/// fails.
///
/// Errors from `primary` are logged and dropped; only an offline failure
/// (a malformed instant or offset) reaches the caller.
///
/// # Example
///
/// ```
/// use manse::authority::{OfflineAuthority, resolve_conversion};
/// use manse::civil::parse_instant;
/// use manse::saju::Source;
///
/// let instant = parse_instant("2023-01-19T22:30:00Z").unwrap();
/// let conversion = resolve_conversion(None, &OfflineAuthority::default(), instant).unwrap();
/// assert_eq!(Source::OfflineApproximation, conversion.source);
/// ```
pub fn resolve_conversion(
    primary: Option<&dyn CalendarAuthority>,
    offline: &OfflineAuthority,
    instant: DateTime<Utc>,
) -> Result<ConversionResult> {
    if let Some(authority) = primary {
        match authority.convert(instant) {
            Ok(conversion) => {
                debug!(authority = authority.name(), "conversion supplied by authority");
                return Ok(conversion);
            }
            Err(e) => warn!(
                authority = authority.name(),
                error = %e,
                "calendar authority failed, using offline approximation"
            ),
        }
    }
    offline.convert(instant)
}
