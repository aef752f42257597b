//! Inverse transform for the Nonlinear Schroedinger equation with
//! vanishing boundaries (`fnft_nsev_inverse`), plus the `fnft_nsev_inverse_XI`
//! helper that derives the matching frequency window for a time window.
//!
//! The direction is reversed here: the spectra are inputs, the only output
//! buffer is the reconstructed field `q`. Absent spectra (pure-soliton or
//! pure-radiation states) cross the boundary as null with a zero count.

use crate::context::FnftContext;
use crate::error::{ensure_success, warn_on_error, FnftError, Result};
use crate::marshal::{optional_in_ptr, OutBuf};
use crate::options::{NsevInverseOptions, NsevInverseOptionsBuilder};
use crate::types::{Complex64, FnftInt, FnftReal, FnftUint};

pub(crate) const ENTRY_POINT: &str = "fnft_nsev_inverse";
pub(crate) const XI_ENTRY_POINT: &str = "fnft_nsev_inverse_XI";

/// Signature of `fnft_nsev_inverse`.
pub type NsevInverseFn = unsafe extern "C" fn(
    m: FnftUint,
    contspec: *const Complex64,
    xi: *const FnftReal,
    k: FnftUint,
    bound_states: *const Complex64,
    normconsts_or_residues: *const Complex64,
    d: FnftUint,
    q: *mut Complex64,
    t: *const FnftReal,
    kappa: FnftInt,
    opts: *mut NsevInverseOptions,
) -> FnftInt;

/// Signature of `fnft_nsev_inverse_XI`.
pub type NsevInverseXiFn = unsafe extern "C" fn(
    d: FnftUint,
    t: *const FnftReal,
    m: FnftUint,
    xi: *mut FnftReal,
    discretization: FnftInt,
) -> FnftInt;

/// Outputs of one `fnft_nsev_inverse` call.
#[derive(Debug, Clone)]
pub struct NsevInverseResult {
    pub return_code: i32,
    /// Reconstructed field samples, one per requested time sample.
    pub q: Vec<Complex64>,
    pub options: NsevInverseOptions,
}

#[derive(Debug)]
pub(crate) struct NsevInverseCall {
    m: FnftUint,
    contspec: Option<Vec<Complex64>>,
    xi: [f64; 2],
    k: FnftUint,
    bound_states: Option<Vec<Complex64>>,
    discspec: Option<Vec<Complex64>>,
    d: FnftUint,
    q: OutBuf,
    t: [f64; 2],
    kappa: FnftInt,
    opts: NsevInverseOptions,
}

impl NsevInverseCall {
    /// Bound states and their coefficients come and go together; passing
    /// one without the other, or with different lengths, is an input error.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        contspec: Option<&[Complex64]>,
        xi: [f64; 2],
        bound_states: Option<&[Complex64]>,
        discspec: Option<&[Complex64]>,
        d: usize,
        t: [f64; 2],
        kappa: i32,
        opts: NsevInverseOptions,
    ) -> Result<Self> {
        let (bound_states, discspec) = match (bound_states, discspec) {
            (Some(bs), Some(ds)) => {
                if bs.len() != ds.len() {
                    return Err(FnftError::length_mismatch(
                        "discrete spectrum coefficients",
                        bs.len(),
                        ds.len(),
                    ));
                }
                (Some(bs.to_vec()), Some(ds.to_vec()))
            }
            (None, None) => (None, None),
            _ => {
                return Err(FnftError::option_invalid(
                    "bound_states",
                    "bound states and their coefficients must be passed together",
                ))
            }
        };
        Ok(Self {
            m: contspec.map_or(0, |cs| cs.len()),
            contspec: contspec.map(|cs| cs.to_vec()),
            xi,
            k: bound_states.as_ref().map_or(0, |bs| bs.len()),
            bound_states,
            discspec,
            d,
            q: OutBuf::allocate(Some(d)),
            t,
            kappa,
            opts,
        })
    }

    pub(crate) unsafe fn dispatch(&mut self, f: NsevInverseFn) -> i32 {
        f(
            self.m,
            optional_in_ptr(self.contspec.as_deref()),
            self.xi.as_ptr(),
            self.k,
            optional_in_ptr(self.bound_states.as_deref()),
            optional_in_ptr(self.discspec.as_deref()),
            self.d,
            self.q.as_mut_ptr(),
            self.t.as_ptr(),
            self.kappa,
            &mut self.opts,
        )
    }

    pub(crate) fn finish(self, return_code: i32) -> NsevInverseResult {
        NsevInverseResult {
            return_code,
            q: self.q.prefix(self.d).unwrap_or_default(),
            options: self.opts,
        }
    }
}

/// Run `fnft_nsev_inverse` with an explicit options struct.
#[allow(clippy::too_many_arguments)]
pub fn nsev_inverse_with_options(
    ctx: &FnftContext,
    contspec: Option<&[Complex64]>,
    xi: [f64; 2],
    bound_states: Option<&[Complex64]>,
    discspec: Option<&[Complex64]>,
    d: usize,
    t: [f64; 2],
    kappa: i32,
    options: &NsevInverseOptions,
) -> Result<NsevInverseResult> {
    let f = unsafe { ctx.symbol::<NsevInverseFn>(ENTRY_POINT) }?;
    let mut call =
        NsevInverseCall::new(contspec, xi, bound_states, discspec, d, t, kappa, *options)?;
    let code = unsafe { call.dispatch(*f) };
    warn_on_error(ENTRY_POINT, code);
    Ok(call.finish(code))
}

/// Convenience entry point: the sample grids come in as full vectors and
/// only their lengths and endpoints reach the foreign call. The frequency
/// vector must come from [`nsev_inverse_xi`]; the two grids cannot be
/// chosen independently.
#[allow(clippy::too_many_arguments)]
pub fn nsev_inverse(
    ctx: &FnftContext,
    xivec: &[f64],
    tvec: &[f64],
    contspec: Option<&[Complex64]>,
    bound_states: Option<&[Complex64]>,
    discspec: Option<&[Complex64]>,
    kappa: i32,
    options: &NsevInverseOptionsBuilder,
) -> Result<NsevInverseResult> {
    if tvec.len() < 2 {
        return Err(FnftError::length_mismatch("time vector", 2, tvec.len()));
    }
    if xivec.len() < 2 {
        return Err(FnftError::length_mismatch("frequency vector", 2, xivec.len()));
    }
    if let Some(cs) = contspec {
        if cs.len() != xivec.len() {
            return Err(FnftError::length_mismatch(
                "continuous spectrum",
                xivec.len(),
                cs.len(),
            ));
        }
    }
    let opts = options.build(ctx)?;
    nsev_inverse_with_options(
        ctx,
        contspec,
        [xivec[0], xivec[xivec.len() - 1]],
        bound_states,
        discspec,
        tvec.len(),
        [tvec[0], tvec[tvec.len() - 1]],
        kappa,
        &opts,
    )
}

/// Compute the frequency window `[XI1, XI2]` that `fnft_nsev_inverse`
/// expects for a given time window and grid sizes. Strict on the return
/// code: a window from a failed call would silently corrupt the inverse
/// transform downstream.
pub fn nsev_inverse_xi(
    ctx: &FnftContext,
    d: usize,
    t: [f64; 2],
    m: usize,
    discretization: i32,
) -> Result<[f64; 2]> {
    let f = unsafe { ctx.symbol::<NsevInverseXiFn>(XI_ENTRY_POINT) }?;
    let mut xi = [0.0f64; 2];
    let code = unsafe { f(d, t.as_ptr(), m, xi.as_mut_ptr(), discretization) };
    ensure_success(XI_ENTRY_POINT, code)?;
    Ok(xi)
}
