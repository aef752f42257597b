//! Nonlinear Schroedinger equation with vanishing boundaries (`fnft_nsev`).
//!
//! The call frame mirrors the C prototype exactly:
//!
//! ```c
//! int fnft_nsev(UINT D, COMPLEX const *q, REAL const *T, UINT M,
//!               COMPLEX *contspec, REAL const *XI, UINT *K_ptr,
//!               COMPLEX *bound_states, COMPLEX *normconsts_or_residues,
//!               INT kappa, fnft_nsev_opts_t *opts);
//! ```
//!
//! `contspec`, `bound_states` and `normconsts_or_residues` become null when
//! the corresponding spectrum is skipped; `K_ptr` carries the bound-state
//! capacity in and the refined found count out.

use crate::context::FnftContext;
use crate::error::{warn_on_error, FnftError, Result};
use crate::marshal::{split_discrete, split_scalar_continuous, OutBuf};
use crate::options::{NsevOptions, NsevOptionsBuilder};
use crate::spectrum::{OutputPlan, SCALAR_CONT_RULES};
use crate::types::{Complex64, FnftInt, FnftReal, FnftUint};

/// `bound_state_localization` flag values for nsev.
pub const BSLOC_FAST_EIGENVALUE: i32 = 0;
pub const BSLOC_NEWTON: i32 = 1;
pub const BSLOC_SUBSAMPLE_AND_REFINE: i32 = 2;

pub(crate) const ENTRY_POINT: &str = "fnft_nsev";

/// Signature of `fnft_nsev`.
pub type NsevFn = unsafe extern "C" fn(
    d: FnftUint,
    q: *const Complex64,
    t: *const FnftReal,
    m: FnftUint,
    contspec: *mut Complex64,
    xi: *const FnftReal,
    k_ptr: *mut FnftUint,
    bound_states: *mut Complex64,
    normconsts_or_residues: *mut Complex64,
    kappa: FnftInt,
    opts: *mut NsevOptions,
) -> FnftInt;

/// Problem parameters for the convenience entry point [`nsev`].
#[derive(Debug, Clone)]
pub struct NsevParams {
    /// Frequency window `[XI1, XI2]` for the continuous spectrum.
    pub xi: [f64; 2],
    /// Number of continuous-spectrum samples.
    pub m: usize,
    /// Bound-state capacity (upper bound on the number found).
    pub k: usize,
    /// +1 focusing, -1 defocusing.
    pub kappa: i32,
    /// Initial bound-state guesses, used only under Newton localization.
    pub guesses: Option<Vec<Complex64>>,
}

impl Default for NsevParams {
    fn default() -> Self {
        Self {
            xi: [-2.0, 2.0],
            m: 128,
            k: 128,
            kappa: 1,
            guesses: None,
        }
    }
}

/// Outputs of one `fnft_nsev` call. Fields are `None` when the options
/// skipped the corresponding spectrum.
#[derive(Debug, Clone)]
pub struct NsevResult {
    /// Raw foreign return code; nonzero means the library reported a
    /// problem (already logged as a warning).
    pub return_code: i32,
    pub bound_states: Option<Vec<Complex64>>,
    pub disc_norm: Option<Vec<Complex64>>,
    pub disc_res: Option<Vec<Complex64>>,
    pub cont_ref: Option<Vec<Complex64>>,
    pub cont_a: Option<Vec<Complex64>>,
    pub cont_b: Option<Vec<Complex64>>,
    /// The options struct as passed to the call.
    pub options: NsevOptions,
}

/// One prepared call: inputs, output buffers and the plan that sized them.
#[derive(Debug)]
pub(crate) struct NsevCall {
    d: FnftUint,
    q: Vec<Complex64>,
    t: [f64; 2],
    m: FnftUint,
    xi: [f64; 2],
    k: FnftUint,
    kappa: FnftInt,
    opts: NsevOptions,
    plan: OutputPlan,
    cont: OutBuf,
    bound_states: OutBuf,
    discspec: OutBuf,
}

impl NsevCall {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        q: &[Complex64],
        t: [f64; 2],
        xi: [f64; 2],
        m: usize,
        k: usize,
        kappa: i32,
        opts: NsevOptions,
        guesses: Option<&[Complex64]>,
    ) -> Self {
        let plan = OutputPlan::resolve(opts.discspec_type, opts.contspec_type, SCALAR_CONT_RULES);
        let mut bound_states = OutBuf::allocate(plan.bound_states_len(k));
        if opts.bound_state_localization == BSLOC_NEWTON {
            if let Some(guesses) = guesses {
                bound_states.seed(guesses);
            }
        }
        Self {
            d: q.len(),
            q: q.to_vec(),
            t,
            m,
            xi,
            k,
            kappa,
            opts,
            plan,
            cont: OutBuf::allocate(plan.continuous_len(m)),
            bound_states,
            discspec: OutBuf::allocate(plan.discrete_len(k)),
        }
    }

    /// Invoke the foreign entry point once with the positional frame.
    pub(crate) unsafe fn dispatch(&mut self, f: NsevFn) -> i32 {
        f(
            self.d,
            self.q.as_ptr(),
            self.t.as_ptr(),
            self.m,
            self.cont.as_mut_ptr(),
            self.xi.as_ptr(),
            &mut self.k,
            self.bound_states.as_mut_ptr(),
            self.discspec.as_mut_ptr(),
            self.kappa,
            &mut self.opts,
        )
    }

    /// Slice the mutated buffers into the result record, using the same
    /// plan that sized them and the refined bound-state count.
    pub(crate) fn finish(self, return_code: i32) -> NsevResult {
        let discrete = split_discrete(
            self.plan.discrete,
            &self.bound_states,
            &self.discspec,
            self.k,
        );
        let cont = split_scalar_continuous(self.plan.continuous, &self.cont, self.m);
        NsevResult {
            return_code,
            bound_states: discrete.bound_states,
            disc_norm: discrete.norming_constants,
            disc_res: discrete.residues,
            cont_ref: cont.reflection,
            cont_a: cont.a,
            cont_b: cont.b,
            options: self.opts,
        }
    }
}

/// Run `fnft_nsev` with an explicit, fully populated options struct.
#[allow(clippy::too_many_arguments)]
pub fn nsev_with_options(
    ctx: &FnftContext,
    q: &[Complex64],
    t: [f64; 2],
    xi: [f64; 2],
    m: usize,
    k: usize,
    kappa: i32,
    options: &NsevOptions,
    guesses: Option<&[Complex64]>,
) -> Result<NsevResult> {
    let f = unsafe { ctx.symbol::<NsevFn>(ENTRY_POINT) }?;
    let mut call = NsevCall::new(q, t, xi, m, k, kappa, *options, guesses);
    let code = unsafe { call.dispatch(*f) };
    warn_on_error(ENTRY_POINT, code);
    Ok(call.finish(code))
}

/// Convenience entry point: derives the sample count and time window from
/// the inputs, builds the options from library defaults plus the given
/// overrides, and calls [`nsev_with_options`].
pub fn nsev(
    ctx: &FnftContext,
    q: &[Complex64],
    tvec: &[f64],
    params: &NsevParams,
    options: &NsevOptionsBuilder,
) -> Result<NsevResult> {
    if tvec.len() < 2 {
        return Err(FnftError::length_mismatch("time vector", 2, tvec.len()));
    }
    let t1 = tvec.iter().cloned().fold(f64::INFINITY, f64::min);
    let t2 = tvec.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let opts = options.build(ctx)?;
    nsev_with_options(
        ctx,
        q,
        [t1, t2],
        params.xi,
        params.m,
        params.k,
        params.kappa,
        &opts,
        params.guesses.as_deref(),
    )
}
