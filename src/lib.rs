//! Safe Rust bindings for the FNFT fast nonlinear Fourier transform library.
//!
//! This crate loads the FNFT shared library at runtime and exposes its five
//! transforms through plain Rust functions:
//! - [`nsev`]: Nonlinear Schroedinger equation, vanishing boundaries
//! - [`nsep`]: Nonlinear Schroedinger equation, periodic boundaries
//! - [`kdvv`]: Korteweg-de Vries equation, vanishing boundaries
//! - [`manakovv`]: Manakov equation, vanishing boundaries
//! - [`nsev_inverse`]: inverse transform for the vanishing-boundary NSE
//!
//! Each transform comes in two flavors: a convenience function that derives
//! sizes from the inputs and builds options from library defaults, and a
//! `_with_options` function that mirrors the C prototype one to one.
//!
//! ```no_run
//! use fnft::{FnftContext, NsevParams, NsevOptions};
//!
//! # fn main() -> fnft::Result<()> {
//! let ctx = FnftContext::from_env()?;
//! let tvec: Vec<f64> = (0..256).map(|i| -10.0 + i as f64 * 20.0 / 255.0).collect();
//! let q: Vec<fnft::Complex64> = tvec
//!     .iter()
//!     .map(|t| fnft::Complex64::new(2.0 / t.cosh(), 0.0))
//!     .collect();
//! let res = fnft::nsev(&ctx, &q, &tvec, &NsevParams::default(), &NsevOptions::builder())?;
//! println!("found {} bound states", res.bound_states.map_or(0, |b| b.len()));
//! # Ok(())
//! # }
//! ```

/// Binding layer version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod context;
pub mod error;
pub mod kdvv;
pub mod manakovv;
pub(crate) mod marshal;
pub mod nsep;
pub mod nsev;
pub mod nsev_inverse;
pub mod options;
pub mod spectrum;
pub mod types;

pub use context::{FnftContext, FnftVersion, LIBRARY_ENV_VAR};
pub use error::{FnftError, Result};
pub use kdvv::{kdvv, kdvv_with_options, KdvvParams, KdvvResult};
pub use manakovv::{manakovv, manakovv_with_options, ManakovvParams, ManakovvResult};
pub use nsep::{nsep, nsep_with_options, NsepParams, NsepResult};
pub use nsev::{nsev, nsev_with_options, NsevParams, NsevResult};
pub use nsev_inverse::{
    nsev_inverse, nsev_inverse_with_options, nsev_inverse_xi, NsevInverseResult,
};
pub use options::{
    KdvvOptions, KdvvOptionsBuilder, ManakovvOptions, ManakovvOptionsBuilder, NsepOptions,
    NsepOptionsBuilder, NsevInverseOptions, NsevInverseOptionsBuilder, NsevOptions,
    NsevOptionsBuilder,
};
pub use spectrum::{ContinuousSpectrumKind, DiscreteSpectrumKind, OutputPlan};
pub use types::{to_complex, Complex64, FnftInt, FnftReal, FnftUint};
