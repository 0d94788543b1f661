//! # Constants and type definitions for Solarpaper
//!
//! This module centralizes the **dataset constants**, **view defaults**, and **common type
//! aliases** used throughout the `solarpaper` library.
//!
//! ## Overview
//!
//! - Time conversions (days ↔ seconds)
//! - Fixed field widths of the `.sso` binary layout
//! - Default view geometry (image size, zoom, AU extent, moon offsets)
//! - Frame colors (Sun disc and background)
//!
//! Kind thresholds live next to the [`OrbitKind`](crate::sso::orbit_kind::OrbitKind)
//! enumeration, per-body colors next to the [style resolver](crate::style).

// -------------------------------------------------------------------------------------------------
// Time
// -------------------------------------------------------------------------------------------------

/// Number of seconds in a Julian day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Julian date (TDB), in days
pub type JulianDate = f64;

/// Distance in astronomical units
pub type AstronomicalUnit = f64;

/// Distance in image pixels
pub type Pixel = f64;

// -------------------------------------------------------------------------------------------------
// Dataset layout
// -------------------------------------------------------------------------------------------------

/// SPK identifier of the Sun, the default reference body of every orbit
pub const SUN_SPKID: &str = "10";

/// Width of the `spkid` and `center` fields, in bytes
pub const SPKID_WIDTH: usize = 8;

/// Width of the `name` field, in bytes
pub const NAME_WIDTH: usize = 32;

/// Size of the dataset header (one `f64` valid-until Julian date)
pub const HEADER_SIZE: usize = 8;

// -------------------------------------------------------------------------------------------------
// View defaults
// -------------------------------------------------------------------------------------------------

/// Default image width in pixels
pub const DEFAULT_WIDTH: u32 = 3840;

/// Default image height in pixels
pub const DEFAULT_HEIGHT: u32 = 2160;

/// Default zoom factor
pub const DEFAULT_ZOOM: f64 = 1.1;

/// Visible extent of the image at zoom 1, in AU (x, y)
pub const DEFAULT_SCALE_AU: [AstronomicalUnit; 2] = [16.0, 9.0];

/// Pixel offset range used to spread satellites around their parent at zoom 1 (min, max)
pub const DEFAULT_MOON_OFFSET_PX: [Pixel; 2] = [30.0, 50.0];

/// Distance ratio under which satellites without a physical radius are not drawn
pub const MINOR_SATELLITE_DISTANCE_RATIO: f32 = 0.1;

// -------------------------------------------------------------------------------------------------
// Frame
// -------------------------------------------------------------------------------------------------

/// Radius of the Sun disc, in pixels (not zoom scaled)
pub const SUN_RADIUS_PX: Pixel = 30.0;

/// Sun disc radial gradient stops (offset, ARGB color)
pub const SUN_GRADIENT: [(f64, u32); 3] = [(0.0, 0xFF7F7145), (0.5, 0xFF7F7145), (1.0, 0xFF0E1020)];

/// Background color painted behind everything else
pub const BACKGROUND_COLOR: u32 = 0xFF040404;
