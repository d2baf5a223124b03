//! Four Pillars (saju / 사주) computation for a birth instant.
//!
//! Converts a UTC instant into the sexagenary year, month, day and hour
//! pillars of the traditional East Asian calendar, then derives the
//! five-element tally, ten-god relations, twelve life-cycle stages and
//! great-fortune decades from them.
//!
//! Month boundaries follow a fixed civil-date table approximating the
//! solar terms; no ephemeris is consulted.
//!
//! # Examples
//!
//! Basic usage with [`Date`]:
//!
//! ```
//! use manse::Date;
//!
//! let date = Date::from_gregorian(2000, 1, 1).unwrap();
//!
//! assert_eq!(2451545, date.jdn());
//! assert_eq!(54, date.sexagenary_index()); // 戊午
//! ```
//!
//! A full profile:
//!
//! ```
//! use manse::civil::{CivilTime, parse_instant};
//! use manse::saju::{Gender, Source, build_profile, convert};
//!
//! let utc = parse_instant("2023-01-19T22:30:00Z").unwrap();
//! let conversion = convert(utc, 540, Source::OfflineApproximation).unwrap();
//! let local = CivilTime::from_utc(utc, 540).unwrap();
//! let profile = build_profile(&conversion, local, Gender::Male);
//!
//! assert_eq!("임인", profile.pillars.year.label());
//! assert_eq!("병진", profile.pillars.hour.label());
//! ```

pub mod authority;
pub mod civil;
pub mod config;
pub mod date;
pub mod error;
pub mod saju;

pub use date::{Date, YearType};
pub use error::{Error, Result};
