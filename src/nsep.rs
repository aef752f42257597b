//! Nonlinear Schroedinger equation with periodic boundaries (`fnft_nsep`).
//!
//! Different frame shape from the vanishing-boundary variants: no XI grid,
//! both the main and the auxiliary spectrum count are in/out scalars, and
//! the sheet-indices output is always passed as null.

use crate::context::FnftContext;
use crate::error::{warn_on_error, FnftError, Result};
use crate::marshal::OutBuf;
use crate::options::{NsepOptions, NsepOptionsBuilder};
use crate::types::{Complex64, FnftInt, FnftReal, FnftUint};

/// `localization` flag values for nsep.
pub const LOC_SUBSAMPLE_AND_REFINE: i32 = 0;
pub const LOC_NEWTON: i32 = 1;
pub const LOC_GRIDSEARCH: i32 = 2;
pub const LOC_MIXED: i32 = 3;

/// `filtering` flag values for nsep.
pub const FILT_NONE: i32 = 0;
pub const FILT_MANUAL: i32 = 1;
pub const FILT_AUTO: i32 = 2;

pub(crate) const ENTRY_POINT: &str = "fnft_nsep";

/// Signature of `fnft_nsep`.
pub type NsepFn = unsafe extern "C" fn(
    d: FnftUint,
    q: *const Complex64,
    t: *const FnftReal,
    phase_shift: FnftReal,
    k_ptr: *mut FnftUint,
    main_spec: *mut Complex64,
    m_ptr: *mut FnftUint,
    aux_spec: *mut Complex64,
    sheet_indices: *mut FnftInt,
    kappa: FnftInt,
    opts: *mut NsepOptions,
) -> FnftInt;

/// Problem parameters for the convenience entry point [`nsep`].
#[derive(Debug, Clone, Default)]
pub struct NsepParams {
    /// Main-spectrum capacity; `points_per_spine * D` when `None`.
    pub k: Option<usize>,
    /// Auxiliary-spectrum capacity; `D` when `None`.
    pub m: Option<usize>,
    /// Change of the phase over one quasi-period.
    pub phase_shift: FnftReal,
    /// +1 focusing, -1 defocusing. Zero defaults to focusing.
    pub kappa: i32,
}

/// Outputs of one `fnft_nsep` call. Both spectra are always computed, so
/// neither field is optional.
#[derive(Debug, Clone)]
pub struct NsepResult {
    pub return_code: i32,
    /// Main spectrum, sliced to the refined count the library wrote back.
    pub main: Vec<Complex64>,
    /// Auxiliary spectrum, sliced likewise.
    pub aux: Vec<Complex64>,
    pub options: NsepOptions,
}

#[derive(Debug)]
pub(crate) struct NsepCall {
    d: FnftUint,
    q: Vec<Complex64>,
    t: [f64; 2],
    phase_shift: FnftReal,
    k: FnftUint,
    m: FnftUint,
    kappa: FnftInt,
    opts: NsepOptions,
    main: OutBuf,
    aux: OutBuf,
}

impl NsepCall {
    pub(crate) fn new(
        q: &[Complex64],
        t: [f64; 2],
        phase_shift: FnftReal,
        k: usize,
        m: usize,
        kappa: i32,
        opts: NsepOptions,
    ) -> Self {
        Self {
            d: q.len(),
            q: q.to_vec(),
            t,
            phase_shift,
            k,
            m,
            kappa,
            opts,
            main: OutBuf::allocate(Some(k)),
            aux: OutBuf::allocate(Some(m)),
        }
    }

    pub(crate) unsafe fn dispatch(&mut self, f: NsepFn) -> i32 {
        f(
            self.d,
            self.q.as_ptr(),
            self.t.as_ptr(),
            self.phase_shift,
            &mut self.k,
            self.main.as_mut_ptr(),
            &mut self.m,
            self.aux.as_mut_ptr(),
            std::ptr::null_mut(),
            self.kappa,
            &mut self.opts,
        )
    }

    pub(crate) fn finish(self, return_code: i32) -> NsepResult {
        NsepResult {
            return_code,
            main: self.main.prefix(self.k).unwrap_or_default(),
            aux: self.aux.prefix(self.m).unwrap_or_default(),
            options: self.opts,
        }
    }
}

/// Run `fnft_nsep` with an explicit options struct and explicit spectrum
/// capacities.
#[allow(clippy::too_many_arguments)]
pub fn nsep_with_options(
    ctx: &FnftContext,
    q: &[Complex64],
    t: [f64; 2],
    phase_shift: FnftReal,
    k: usize,
    m: usize,
    kappa: i32,
    options: &NsepOptions,
) -> Result<NsepResult> {
    let f = unsafe { ctx.symbol::<NsepFn>(ENTRY_POINT) }?;
    let mut call = NsepCall::new(q, t, phase_shift, k, m, kappa, *options);
    let code = unsafe { call.dispatch(*f) };
    warn_on_error(ENTRY_POINT, code);
    Ok(call.finish(code))
}

/// Convenience entry point: capacities default to `points_per_spine * D`
/// for the main spectrum and `D` for the auxiliary spectrum.
pub fn nsep(
    ctx: &FnftContext,
    q: &[Complex64],
    tvec: &[f64],
    params: &NsepParams,
    options: &NsepOptionsBuilder,
) -> Result<NsepResult> {
    if tvec.len() < 2 {
        return Err(FnftError::length_mismatch("time vector", 2, tvec.len()));
    }
    let t1 = tvec.iter().cloned().fold(f64::INFINITY, f64::min);
    let t2 = tvec.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let opts = options.build(ctx)?;
    let d = q.len();
    let k = params.k.unwrap_or(opts.points_per_spine * d);
    let m = params.m.unwrap_or(d);
    let kappa = if params.kappa == 0 { 1 } else { params.kappa };
    nsep_with_options(ctx, q, [t1, t2], params.phase_shift, k, m, kappa, &opts)
}
