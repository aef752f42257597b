//! Korteweg-de Vries equation with vanishing boundaries (`fnft_kdvv`).
//!
//! Same frame shape as nsev minus the `kappa` argument; the KdV transform
//! has no focusing/defocusing switch.

use crate::context::FnftContext;
use crate::error::{warn_on_error, FnftError, Result};
use crate::marshal::{split_discrete, split_scalar_continuous, OutBuf};
use crate::options::{KdvvOptions, KdvvOptionsBuilder};
use crate::spectrum::{OutputPlan, SCALAR_CONT_RULES};
use crate::types::{Complex64, FnftInt, FnftReal, FnftUint};

/// `bound_state_localization` flag values for kdvv. Unlike nsev, Newton
/// refinement is flag 0 here.
pub const BSLOC_NEWTON: i32 = 0;
pub const BSLOC_GRIDSEARCH_AND_REFINE: i32 = 1;

pub(crate) const ENTRY_POINT: &str = "fnft_kdvv";

/// Signature of `fnft_kdvv`.
pub type KdvvFn = unsafe extern "C" fn(
    d: FnftUint,
    q: *const Complex64,
    t: *const FnftReal,
    m: FnftUint,
    contspec: *mut Complex64,
    xi: *const FnftReal,
    k_ptr: *mut FnftUint,
    bound_states: *mut Complex64,
    normconsts_or_residues: *mut Complex64,
    opts: *mut KdvvOptions,
) -> FnftInt;

/// Problem parameters for the convenience entry point [`kdvv`].
#[derive(Debug, Clone)]
pub struct KdvvParams {
    pub xi: [f64; 2],
    pub m: usize,
    pub k: usize,
    /// Initial bound-state guesses, used only under Newton localization.
    pub guesses: Option<Vec<Complex64>>,
}

impl Default for KdvvParams {
    fn default() -> Self {
        Self {
            xi: [-2.0, 2.0],
            m: 128,
            k: 128,
            guesses: None,
        }
    }
}

/// Outputs of one `fnft_kdvv` call.
#[derive(Debug, Clone)]
pub struct KdvvResult {
    pub return_code: i32,
    pub bound_states: Option<Vec<Complex64>>,
    pub disc_norm: Option<Vec<Complex64>>,
    pub disc_res: Option<Vec<Complex64>>,
    pub cont_ref: Option<Vec<Complex64>>,
    pub cont_a: Option<Vec<Complex64>>,
    pub cont_b: Option<Vec<Complex64>>,
    pub options: KdvvOptions,
}

#[derive(Debug)]
pub(crate) struct KdvvCall {
    d: FnftUint,
    q: Vec<Complex64>,
    t: [f64; 2],
    m: FnftUint,
    xi: [f64; 2],
    k: FnftUint,
    opts: KdvvOptions,
    plan: OutputPlan,
    cont: OutBuf,
    bound_states: OutBuf,
    discspec: OutBuf,
}

impl KdvvCall {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        q: &[Complex64],
        t: [f64; 2],
        xi: [f64; 2],
        m: usize,
        k: usize,
        opts: KdvvOptions,
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
            opts,
            plan,
            cont: OutBuf::allocate(plan.continuous_len(m)),
            bound_states,
            discspec: OutBuf::allocate(plan.discrete_len(k)),
        }
    }

    pub(crate) unsafe fn dispatch(&mut self, f: KdvvFn) -> i32 {
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
            &mut self.opts,
        )
    }

    pub(crate) fn finish(self, return_code: i32) -> KdvvResult {
        let discrete = split_discrete(
            self.plan.discrete,
            &self.bound_states,
            &self.discspec,
            self.k,
        );
        let cont = split_scalar_continuous(self.plan.continuous, &self.cont, self.m);
        KdvvResult {
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

/// Run `fnft_kdvv` with an explicit options struct.
#[allow(clippy::too_many_arguments)]
pub fn kdvv_with_options(
    ctx: &FnftContext,
    q: &[Complex64],
    t: [f64; 2],
    xi: [f64; 2],
    m: usize,
    k: usize,
    options: &KdvvOptions,
    guesses: Option<&[Complex64]>,
) -> Result<KdvvResult> {
    let f = unsafe { ctx.symbol::<KdvvFn>(ENTRY_POINT) }?;
    let mut call = KdvvCall::new(q, t, xi, m, k, *options, guesses);
    let code = unsafe { call.dispatch(*f) };
    warn_on_error(ENTRY_POINT, code);
    Ok(call.finish(code))
}

/// Convenience entry point over [`kdvv_with_options`].
pub fn kdvv(
    ctx: &FnftContext,
    q: &[Complex64],
    tvec: &[f64],
    params: &KdvvParams,
    options: &KdvvOptionsBuilder,
) -> Result<KdvvResult> {
    if tvec.len() < 2 {
        return Err(FnftError::length_mismatch("time vector", 2, tvec.len()));
    }
    let t1 = tvec.iter().cloned().fold(f64::INFINITY, f64::min);
    let t2 = tvec.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let opts = options.build(ctx)?;
    kdvv_with_options(
        ctx,
        q,
        [t1, t2],
        params.xi,
        params.m,
        params.k,
        &opts,
        params.guesses.as_deref(),
    )
}
