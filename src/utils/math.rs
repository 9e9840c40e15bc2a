// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Math utilities

use std::f64::consts::PI;

/// Radii below this resolve to the minimum of 3 fragments
pub const GRID_FINE: f64 = 0.000_000_953_674_316_406_25;

/// Number of fragments for a circle of radius `r`.
///
/// `fn_ > 0` wins (at least 3); otherwise the count follows from the minimum
/// angle `fa` (degrees) and minimum edge length `fs`, never below 5.
pub fn fragments_from_r(r: f64, fn_: f64, fa: f64, fs: f64) -> u32 {
    if r < GRID_FINE {
        return 3;
    }
    if fn_ > 0.0 {
        return if fn_ >= 3.0 { fn_ as u32 } else { 3 };
    }
    (360.0 / fa).min(r * 2.0 * PI / fs).max(5.0).ceil() as u32
}
