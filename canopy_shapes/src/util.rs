// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Float functions behind the `std`/`libm` feature pair.

#[cfg(feature = "std")]
pub(crate) fn sqrt(v: f64) -> f64 {
    v.sqrt()
}

#[cfg(not(feature = "std"))]
pub(crate) fn sqrt(v: f64) -> f64 {
    libm::sqrt(v)
}
