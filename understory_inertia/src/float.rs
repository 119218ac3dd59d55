// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// Float functions for the decay curve: `std` when available, `libm` otherwise.

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("understory_inertia requires either the `std` or `libm` feature");

#[cfg(feature = "std")]
pub(crate) fn exp(x: f64) -> f64 {
    x.exp()
}

#[cfg(feature = "std")]
pub(crate) fn ln(x: f64) -> f64 {
    x.ln()
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
pub(crate) fn exp(x: f64) -> f64 {
    libm::exp(x)
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
pub(crate) fn ln(x: f64) -> f64 {
    libm::log(x)
}
