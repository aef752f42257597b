//! Bit-exact mirrors of the FNFT options structs, plus builders.
//!
//! Field order in each `#[repr(C)]` struct reproduces the corresponding
//! `fnft_*_opts_t` declaration from the C headers exactly; it is the single
//! source of truth for the ABI and must never be reordered. Default values
//! are never hard-coded on the Rust side — every builder starts from the
//! struct returned by the library's own `fnft_*_default_opts` entry point,
//! so defaults cannot drift from the installed FNFT version.
//!
//! Builders validate each override against the range the C header declares
//! and fail fast with the field name; out-of-range values are never clamped.

use crate::context::FnftContext;
use crate::error::{FnftError, Result};
use crate::types::{FnftInt, FnftUint};

/// Range-check an enumerated integer flag.
fn check_flag(field: &'static str, value: i32, min: i32, max: i32) -> Result<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(FnftError::out_of_range(field, value, min, max))
    }
}

/// Tolerances are either -1 (auto) or non-negative.
fn check_tol(field: &'static str, value: f64) -> Result<()> {
    if value == -1.0 || value >= 0.0 {
        Ok(())
    } else {
        Err(FnftError::OptionInvalid {
            field,
            message: format!("must be -1 (auto) or >= 0, got {value}"),
        })
    }
}

macro_rules! default_opts_fn {
    ($ty:ty, $symbol:literal) => {
        impl $ty {
            /// Fetch the library's own defaults for this struct.
            pub fn default_opts(ctx: &FnftContext) -> Result<Self> {
                type DefaultOpts = unsafe extern "C" fn() -> $ty;
                let f = unsafe { ctx.symbol::<DefaultOpts>($symbol) }?;
                Ok(unsafe { f() })
            }
        }
    };
}

// ---------------------------------------------------------------------------
// kdvv — Korteweg-de Vries, vanishing boundaries
// ---------------------------------------------------------------------------

/// Mirror of `fnft_kdvv_opts_t`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KdvvOptions {
    pub bound_state_localization: FnftInt,
    pub niter: FnftUint,
    pub discspec_type: FnftInt,
    pub contspec_type: FnftInt,
    pub normalization_flag: FnftInt,
    pub discretization: FnftInt,
    pub richardson_extrapolation_flag: FnftUint,
    pub grid_spacing: f64,
}

default_opts_fn!(KdvvOptions, "fnft_kdvv_default_opts");

impl KdvvOptions {
    pub fn builder() -> KdvvOptionsBuilder {
        KdvvOptionsBuilder::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct KdvvOptionsBuilder {
    discretization: Option<i32>,
    bound_state_localization: Option<i32>,
    niter: Option<usize>,
    discspec_type: Option<i32>,
    contspec_type: Option<i32>,
    normalization_flag: Option<i32>,
    richardson_extrapolation_flag: Option<i32>,
    grid_spacing: Option<f64>,
}

impl KdvvOptionsBuilder {
    pub fn discretization(mut self, v: i32) -> Self {
        self.discretization = Some(v);
        self
    }
    pub fn bound_state_localization(mut self, v: i32) -> Self {
        self.bound_state_localization = Some(v);
        self
    }
    pub fn niter(mut self, v: usize) -> Self {
        self.niter = Some(v);
        self
    }
    pub fn discspec_type(mut self, v: i32) -> Self {
        self.discspec_type = Some(v);
        self
    }
    pub fn contspec_type(mut self, v: i32) -> Self {
        self.contspec_type = Some(v);
        self
    }
    pub fn normalization_flag(mut self, v: i32) -> Self {
        self.normalization_flag = Some(v);
        self
    }
    pub fn richardson_extrapolation_flag(mut self, v: i32) -> Self {
        self.richardson_extrapolation_flag = Some(v);
        self
    }
    pub fn grid_spacing(mut self, v: f64) -> Self {
        self.grid_spacing = Some(v);
        self
    }

    /// Validate and write the present overrides into `opts`.
    pub(crate) fn apply(&self, opts: &mut KdvvOptions) -> Result<()> {
        if let Some(v) = self.discretization {
            check_flag("discretization", v, 0, 55)?;
            opts.discretization = v;
        }
        if let Some(v) = self.bound_state_localization {
            check_flag("bound_state_localization", v, 0, 1)?;
            opts.bound_state_localization = v;
        }
        if let Some(v) = self.niter {
            opts.niter = v;
        }
        if let Some(v) = self.discspec_type {
            check_flag("discspec_type", v, 0, 3)?;
            opts.discspec_type = v;
        }
        if let Some(v) = self.contspec_type {
            check_flag("contspec_type", v, 0, 3)?;
            opts.contspec_type = v;
        }
        if let Some(v) = self.normalization_flag {
            check_flag("normalization_flag", v, 0, 1)?;
            opts.normalization_flag = v;
        }
        if let Some(v) = self.richardson_extrapolation_flag {
            check_flag("richardson_extrapolation_flag", v, 0, 1)?;
            opts.richardson_extrapolation_flag = v as FnftUint;
        }
        if let Some(v) = self.grid_spacing {
            if !(v >= 0.0) {
                return Err(FnftError::OptionInvalid {
                    field: "grid_spacing",
                    message: format!("must be >= 0, got {v}"),
                });
            }
            opts.grid_spacing = v;
        }
        Ok(())
    }

    /// Library defaults plus the overrides set on this builder.
    pub fn build(&self, ctx: &FnftContext) -> Result<KdvvOptions> {
        let mut opts = KdvvOptions::default_opts(ctx)?;
        self.apply(&mut opts)?;
        Ok(opts)
    }
}

// ---------------------------------------------------------------------------
// nsev — nonlinear Schroedinger, vanishing boundaries
// ---------------------------------------------------------------------------

/// Mirror of `fnft_nsev_opts_t`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NsevOptions {
    pub bound_state_filtering: FnftInt,
    pub bound_state_localization: FnftInt,
    pub niter: FnftUint,
    pub tol: f64,
    pub dsub: FnftUint,
    pub discspec_type: FnftInt,
    pub contspec_type: FnftInt,
    pub normalization_flag: i32,
    pub discretization: FnftInt,
    pub richardson_extrapolation_flag: FnftInt,
    pub bounding_box: [f64; 4],
}

default_opts_fn!(NsevOptions, "fnft_nsev_default_opts");

impl NsevOptions {
    pub fn builder() -> NsevOptionsBuilder {
        NsevOptionsBuilder::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct NsevOptionsBuilder {
    bound_state_filtering: Option<i32>,
    bound_state_localization: Option<i32>,
    niter: Option<usize>,
    tol: Option<f64>,
    dsub: Option<usize>,
    discspec_type: Option<i32>,
    contspec_type: Option<i32>,
    normalization_flag: Option<i32>,
    discretization: Option<i32>,
    richardson_extrapolation_flag: Option<i32>,
    bounding_box: Option<[f64; 4]>,
}

impl NsevOptionsBuilder {
    pub fn bound_state_filtering(mut self, v: i32) -> Self {
        self.bound_state_filtering = Some(v);
        self
    }
    pub fn bound_state_localization(mut self, v: i32) -> Self {
        self.bound_state_localization = Some(v);
        self
    }
    pub fn niter(mut self, v: usize) -> Self {
        self.niter = Some(v);
        self
    }
    pub fn tol(mut self, v: f64) -> Self {
        self.tol = Some(v);
        self
    }
    pub fn dsub(mut self, v: usize) -> Self {
        self.dsub = Some(v);
        self
    }
    pub fn discspec_type(mut self, v: i32) -> Self {
        self.discspec_type = Some(v);
        self
    }
    pub fn contspec_type(mut self, v: i32) -> Self {
        self.contspec_type = Some(v);
        self
    }
    pub fn normalization_flag(mut self, v: i32) -> Self {
        self.normalization_flag = Some(v);
        self
    }
    pub fn discretization(mut self, v: i32) -> Self {
        self.discretization = Some(v);
        self
    }
    pub fn richardson_extrapolation_flag(mut self, v: i32) -> Self {
        self.richardson_extrapolation_flag = Some(v);
        self
    }
    pub fn bounding_box(mut self, v: [f64; 4]) -> Self {
        self.bounding_box = Some(v);
        self
    }

    pub(crate) fn apply(&self, opts: &mut NsevOptions) -> Result<()> {
        if let Some(v) = self.bound_state_filtering {
            check_flag("bound_state_filtering", v, 0, 2)?;
            opts.bound_state_filtering = v;
        }
        if let Some(v) = self.bound_state_localization {
            check_flag("bound_state_localization", v, 0, 2)?;
            opts.bound_state_localization = v;
        }
        if let Some(v) = self.niter {
            opts.niter = v;
        }
        if let Some(v) = self.tol {
            check_tol("tol", v)?;
            opts.tol = v;
        }
        if let Some(v) = self.dsub {
            opts.dsub = v;
        }
        if let Some(v) = self.discspec_type {
            check_flag("discspec_type", v, 0, 3)?;
            opts.discspec_type = v;
        }
        if let Some(v) = self.contspec_type {
            check_flag("contspec_type", v, 0, 3)?;
            opts.contspec_type = v;
        }
        if let Some(v) = self.normalization_flag {
            check_flag("normalization_flag", v, 0, 1)?;
            opts.normalization_flag = v;
        }
        if let Some(v) = self.discretization {
            check_flag("discretization", v, 0, 27)?;
            opts.discretization = v;
        }
        if let Some(v) = self.richardson_extrapolation_flag {
            check_flag("richardson_extrapolation_flag", v, 0, 1)?;
            opts.richardson_extrapolation_flag = v;
        }
        if let Some(v) = self.bounding_box {
            opts.bounding_box = v;
        }
        Ok(())
    }

    pub fn build(&self, ctx: &FnftContext) -> Result<NsevOptions> {
        let mut opts = NsevOptions::default_opts(ctx)?;
        self.apply(&mut opts)?;
        Ok(opts)
    }
}

// ---------------------------------------------------------------------------
// nsep — nonlinear Schroedinger, periodic boundaries
// ---------------------------------------------------------------------------

/// Mirror of `fnft_nsep_opts_t`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NsepOptions {
    pub localization: FnftInt,
    pub filtering: FnftInt,
    pub bounding_box: [f64; 4],
    pub max_evals: FnftUint,
    pub discretization: FnftInt,
    pub normalization_flag: FnftInt,
    pub floquet_range: [f64; 2],
    pub points_per_spine: FnftUint,
    pub dsub: FnftUint,
    pub tol: f64,
}

default_opts_fn!(NsepOptions, "fnft_nsep_default_opts");

impl NsepOptions {
    pub fn builder() -> NsepOptionsBuilder {
        NsepOptionsBuilder::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct NsepOptionsBuilder {
    localization: Option<i32>,
    filtering: Option<i32>,
    bounding_box: Option<[f64; 4]>,
    max_evals: Option<usize>,
    discretization: Option<i32>,
    normalization_flag: Option<i32>,
    floquet_range: Option<[f64; 2]>,
    points_per_spine: Option<usize>,
    dsub: Option<usize>,
    tol: Option<f64>,
}

impl NsepOptionsBuilder {
    pub fn localization(mut self, v: i32) -> Self {
        self.localization = Some(v);
        self
    }
    pub fn filtering(mut self, v: i32) -> Self {
        self.filtering = Some(v);
        self
    }
    pub fn bounding_box(mut self, v: [f64; 4]) -> Self {
        self.bounding_box = Some(v);
        self
    }
    pub fn max_evals(mut self, v: usize) -> Self {
        self.max_evals = Some(v);
        self
    }
    pub fn discretization(mut self, v: i32) -> Self {
        self.discretization = Some(v);
        self
    }
    pub fn normalization_flag(mut self, v: i32) -> Self {
        self.normalization_flag = Some(v);
        self
    }
    pub fn floquet_range(mut self, v: [f64; 2]) -> Self {
        self.floquet_range = Some(v);
        self
    }
    pub fn points_per_spine(mut self, v: usize) -> Self {
        self.points_per_spine = Some(v);
        self
    }
    pub fn dsub(mut self, v: usize) -> Self {
        self.dsub = Some(v);
        self
    }
    pub fn tol(mut self, v: f64) -> Self {
        self.tol = Some(v);
        self
    }

    pub(crate) fn apply(&self, opts: &mut NsepOptions) -> Result<()> {
        if let Some(v) = self.localization {
            check_flag("localization", v, 0, 3)?;
            opts.localization = v;
        }
        if let Some(v) = self.filtering {
            check_flag("filtering", v, 0, 2)?;
            opts.filtering = v;
        }
        if let Some(v) = self.bounding_box {
            opts.bounding_box = v;
        }
        if let Some(v) = self.max_evals {
            opts.max_evals = v;
        }
        if let Some(v) = self.discretization {
            check_flag("discretization", v, 0, 27)?;
            opts.discretization = v;
        }
        if let Some(v) = self.normalization_flag {
            check_flag("normalization_flag", v, 0, 1)?;
            opts.normalization_flag = v;
        }
        if let Some(v) = self.floquet_range {
            opts.floquet_range = v;
        }
        if let Some(v) = self.points_per_spine {
            opts.points_per_spine = v;
        }
        if let Some(v) = self.dsub {
            opts.dsub = v;
        }
        if let Some(v) = self.tol {
            check_tol("tol", v)?;
            opts.tol = v;
        }
        Ok(())
    }

    pub fn build(&self, ctx: &FnftContext) -> Result<NsepOptions> {
        let mut opts = NsepOptions::default_opts(ctx)?;
        self.apply(&mut opts)?;
        Ok(opts)
    }
}

// ---------------------------------------------------------------------------
// nsev_inverse — inverse transform
// ---------------------------------------------------------------------------

/// Mirror of `fnft_nsev_inverse_opts_t`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NsevInverseOptions {
    pub discretization: FnftInt,
    pub contspec_type: FnftInt,
    pub contspec_inversion_method: FnftInt,
    pub discspec_type: FnftInt,
    pub max_iter: FnftUint,
    pub oversampling_factor: FnftUint,
}

default_opts_fn!(NsevInverseOptions, "fnft_nsev_inverse_default_opts");

impl NsevInverseOptions {
    pub fn builder() -> NsevInverseOptionsBuilder {
        NsevInverseOptionsBuilder::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct NsevInverseOptionsBuilder {
    discretization: Option<i32>,
    contspec_type: Option<i32>,
    contspec_inversion_method: Option<i32>,
    discspec_type: Option<i32>,
    max_iter: Option<usize>,
    oversampling_factor: Option<usize>,
}

impl NsevInverseOptionsBuilder {
    pub fn discretization(mut self, v: i32) -> Self {
        self.discretization = Some(v);
        self
    }
    pub fn contspec_type(mut self, v: i32) -> Self {
        self.contspec_type = Some(v);
        self
    }
    pub fn contspec_inversion_method(mut self, v: i32) -> Self {
        self.contspec_inversion_method = Some(v);
        self
    }
    pub fn discspec_type(mut self, v: i32) -> Self {
        self.discspec_type = Some(v);
        self
    }
    pub fn max_iter(mut self, v: usize) -> Self {
        self.max_iter = Some(v);
        self
    }
    pub fn oversampling_factor(mut self, v: usize) -> Self {
        self.oversampling_factor = Some(v);
        self
    }

    pub(crate) fn apply(&self, opts: &mut NsevInverseOptions) -> Result<()> {
        if let Some(v) = self.discretization {
            check_flag("discretization", v, 0, 27)?;
            opts.discretization = v;
        }
        if let Some(v) = self.contspec_type {
            check_flag("contspec_type", v, 0, 2)?;
            opts.contspec_type = v;
        }
        if let Some(v) = self.contspec_inversion_method {
            check_flag("contspec_inversion_method", v, 0, 3)?;
            opts.contspec_inversion_method = v;
        }
        if let Some(v) = self.discspec_type {
            check_flag("discspec_type", v, 0, 1)?;
            opts.discspec_type = v;
        }
        if let Some(v) = self.max_iter {
            opts.max_iter = v;
        }
        if let Some(v) = self.oversampling_factor {
            opts.oversampling_factor = v;
        }
        Ok(())
    }

    pub fn build(&self, ctx: &FnftContext) -> Result<NsevInverseOptions> {
        let mut opts = NsevInverseOptions::default_opts(ctx)?;
        self.apply(&mut opts)?;
        Ok(opts)
    }
}

// ---------------------------------------------------------------------------
// manakovv — Manakov equation, vanishing boundaries
// ---------------------------------------------------------------------------

/// Mirror of `fnft_manakovv_opts_t`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManakovvOptions {
    pub bound_state_filtering: FnftInt,
    pub bound_state_localization: FnftInt,
    pub niter: FnftUint,
    pub dsub: FnftUint,
    pub discspec_type: FnftInt,
    pub contspec_type: FnftInt,
    pub normalization_flag: FnftInt,
    pub discretization: FnftInt,
    pub richardson_extrapolation_flag: FnftUint,
}

default_opts_fn!(ManakovvOptions, "fnft_manakovv_default_opts");

impl ManakovvOptions {
    pub fn builder() -> ManakovvOptionsBuilder {
        ManakovvOptionsBuilder::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ManakovvOptionsBuilder {
    bound_state_filtering: Option<i32>,
    bound_state_localization: Option<i32>,
    niter: Option<usize>,
    dsub: Option<usize>,
    discspec_type: Option<i32>,
    contspec_type: Option<i32>,
    normalization_flag: Option<i32>,
    discretization: Option<i32>,
    richardson_extrapolation_flag: Option<i32>,
}

impl ManakovvOptionsBuilder {
    pub fn bound_state_filtering(mut self, v: i32) -> Self {
        self.bound_state_filtering = Some(v);
        self
    }
    pub fn bound_state_localization(mut self, v: i32) -> Self {
        self.bound_state_localization = Some(v);
        self
    }
    pub fn niter(mut self, v: usize) -> Self {
        self.niter = Some(v);
        self
    }
    pub fn dsub(mut self, v: usize) -> Self {
        self.dsub = Some(v);
        self
    }
    pub fn discspec_type(mut self, v: i32) -> Self {
        self.discspec_type = Some(v);
        self
    }
    pub fn contspec_type(mut self, v: i32) -> Self {
        self.contspec_type = Some(v);
        self
    }
    pub fn normalization_flag(mut self, v: i32) -> Self {
        self.normalization_flag = Some(v);
        self
    }
    pub fn discretization(mut self, v: i32) -> Self {
        self.discretization = Some(v);
        self
    }
    pub fn richardson_extrapolation_flag(mut self, v: i32) -> Self {
        self.richardson_extrapolation_flag = Some(v);
        self
    }

    pub(crate) fn apply(&self, opts: &mut ManakovvOptions) -> Result<()> {
        if let Some(v) = self.bound_state_filtering {
            check_flag("bound_state_filtering", v, 0, 2)?;
            opts.bound_state_filtering = v;
        }
        if let Some(v) = self.bound_state_localization {
            check_flag("bound_state_localization", v, 0, 2)?;
            opts.bound_state_localization = v;
        }
        if let Some(v) = self.niter {
            opts.niter = v;
        }
        if let Some(v) = self.dsub {
            opts.dsub = v;
        }
        if let Some(v) = self.discspec_type {
            check_flag("discspec_type", v, 0, 3)?;
            opts.discspec_type = v;
        }
        if let Some(v) = self.contspec_type {
            check_flag("contspec_type", v, 0, 3)?;
            opts.contspec_type = v;
        }
        if let Some(v) = self.normalization_flag {
            check_flag("normalization_flag", v, 0, 1)?;
            opts.normalization_flag = v;
        }
        if let Some(v) = self.discretization {
            check_flag("discretization", v, 0, 12)?;
            opts.discretization = v;
        }
        if let Some(v) = self.richardson_extrapolation_flag {
            check_flag("richardson_extrapolation_flag", v, 0, 1)?;
            opts.richardson_extrapolation_flag = v as FnftUint;
        }
        Ok(())
    }

    pub fn build(&self, ctx: &FnftContext) -> Result<ManakovvOptions> {
        let mut opts = ManakovvOptions::default_opts(ctx)?;
        self.apply(&mut opts)?;
        Ok(opts)
    }
}
