//! Scalar type aliases matching the FNFT C API.
//!
//! FNFT declares its own scalar typedefs; the binding mirrors them so that
//! entry-point signatures read like the header:
//!
//! - `FNFT_INT` → `i32`
//! - `FNFT_UINT` → `size_t` → [`usize`]
//! - `FNFT_REAL` → `f64`
//! - `FNFT_COMPLEX` → C `double complex` → [`Complex64`] (two adjacent
//!   doubles, layout-compatible with `num_complex::Complex<f64>`)

pub use num_complex::Complex64;

/// `FNFT_INT` (fixed-width 32-bit signed).
pub type FnftInt = i32;

/// `FNFT_UINT` (`size_t`).
pub type FnftUint = usize;

/// `FNFT_REAL` (C `double`).
pub type FnftReal = f64;

/// Widen a real-valued sample vector to the complex buffers FNFT expects.
///
/// Several transforms (KdV in particular) operate on real fields but the C
/// API takes complex samples throughout.
pub fn to_complex(samples: &[f64]) -> Vec<Complex64> {
    samples.iter().map(|&x| Complex64::new(x, 0.0)).collect()
}
