//! Manakov equation with vanishing boundaries (`fnft_manakovv`).
//!
//! Two-component variant: the potential arrives as two equally long sample
//! vectors `q1` and `q2`, and the continuous spectrum carries two
//! reflection coefficients (or a, b1, b2).

use crate::context::FnftContext;
use crate::error::{warn_on_error, FnftError, Result};
use crate::marshal::{split_discrete, split_vector_continuous, OutBuf};
use crate::options::{ManakovvOptions, ManakovvOptionsBuilder};
use crate::spectrum::{OutputPlan, VECTOR_CONT_RULES};
use crate::types::{Complex64, FnftInt, FnftReal, FnftUint};

/// `bound_state_localization` flag values for manakovv.
pub const BSLOC_FAST_EIGENVALUE: i32 = 0;
pub const BSLOC_NEWTON: i32 = 1;
pub const BSLOC_SUBSAMPLE_AND_REFINE: i32 = 2;

pub(crate) const ENTRY_POINT: &str = "fnft_manakovv";

/// Signature of `fnft_manakovv`.
pub type ManakovvFn = unsafe extern "C" fn(
    d: FnftUint,
    q1: *const Complex64,
    q2: *const Complex64,
    t: *const FnftReal,
    m: FnftUint,
    contspec: *mut Complex64,
    xi: *const FnftReal,
    k_ptr: *mut FnftUint,
    bound_states: *mut Complex64,
    normconsts_or_residues: *mut Complex64,
    kappa: FnftInt,
    opts: *mut ManakovvOptions,
) -> FnftInt;

/// Problem parameters for the convenience entry point [`manakovv`].
#[derive(Debug, Clone)]
pub struct ManakovvParams {
    pub xi: [f64; 2],
    pub m: usize,
    pub k: usize,
    pub kappa: i32,
    pub guesses: Option<Vec<Complex64>>,
}

impl Default for ManakovvParams {
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

/// Outputs of one `fnft_manakovv` call.
#[derive(Debug, Clone)]
pub struct ManakovvResult {
    pub return_code: i32,
    pub bound_states: Option<Vec<Complex64>>,
    pub disc_norm: Option<Vec<Complex64>>,
    pub disc_res: Option<Vec<Complex64>>,
    pub cont_ref1: Option<Vec<Complex64>>,
    pub cont_ref2: Option<Vec<Complex64>>,
    pub cont_a: Option<Vec<Complex64>>,
    pub cont_b1: Option<Vec<Complex64>>,
    pub cont_b2: Option<Vec<Complex64>>,
    pub options: ManakovvOptions,
}

#[derive(Debug)]
pub(crate) struct ManakovvCall {
    d: FnftUint,
    q1: Vec<Complex64>,
    q2: Vec<Complex64>,
    t: [f64; 2],
    m: FnftUint,
    xi: [f64; 2],
    k: FnftUint,
    kappa: FnftInt,
    opts: ManakovvOptions,
    plan: OutputPlan,
    cont: OutBuf,
    bound_states: OutBuf,
    discspec: OutBuf,
}

impl ManakovvCall {
    /// Both components must have the same length; the frame carries a
    /// single D.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        q1: &[Complex64],
        q2: &[Complex64],
        t: [f64; 2],
        xi: [f64; 2],
        m: usize,
        k: usize,
        kappa: i32,
        opts: ManakovvOptions,
        guesses: Option<&[Complex64]>,
    ) -> Result<Self> {
        if q1.len() != q2.len() {
            return Err(FnftError::length_mismatch(
                "second potential component",
                q1.len(),
                q2.len(),
            ));
        }
        let plan = OutputPlan::resolve(opts.discspec_type, opts.contspec_type, VECTOR_CONT_RULES);
        let mut bound_states = OutBuf::allocate(plan.bound_states_len(k));
        if opts.bound_state_localization == BSLOC_NEWTON {
            if let Some(guesses) = guesses {
                bound_states.seed(guesses);
            }
        }
        Ok(Self {
            d: q1.len(),
            q1: q1.to_vec(),
            q2: q2.to_vec(),
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
        })
    }

    pub(crate) unsafe fn dispatch(&mut self, f: ManakovvFn) -> i32 {
        f(
            self.d,
            self.q1.as_ptr(),
            self.q2.as_ptr(),
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

    pub(crate) fn finish(self, return_code: i32) -> ManakovvResult {
        let discrete = split_discrete(
            self.plan.discrete,
            &self.bound_states,
            &self.discspec,
            self.k,
        );
        let cont = split_vector_continuous(self.plan.continuous, &self.cont, self.m);
        ManakovvResult {
            return_code,
            bound_states: discrete.bound_states,
            disc_norm: discrete.norming_constants,
            disc_res: discrete.residues,
            cont_ref1: cont.reflection1,
            cont_ref2: cont.reflection2,
            cont_a: cont.a,
            cont_b1: cont.b1,
            cont_b2: cont.b2,
            options: self.opts,
        }
    }
}

/// Run `fnft_manakovv` with an explicit options struct.
#[allow(clippy::too_many_arguments)]
pub fn manakovv_with_options(
    ctx: &FnftContext,
    q1: &[Complex64],
    q2: &[Complex64],
    t: [f64; 2],
    xi: [f64; 2],
    m: usize,
    k: usize,
    kappa: i32,
    options: &ManakovvOptions,
    guesses: Option<&[Complex64]>,
) -> Result<ManakovvResult> {
    let f = unsafe { ctx.symbol::<ManakovvFn>(ENTRY_POINT) }?;
    let mut call = ManakovvCall::new(q1, q2, t, xi, m, k, kappa, *options, guesses)?;
    let code = unsafe { call.dispatch(*f) };
    warn_on_error(ENTRY_POINT, code);
    Ok(call.finish(code))
}

/// Convenience entry point over [`manakovv_with_options`].
pub fn manakovv(
    ctx: &FnftContext,
    q1: &[Complex64],
    q2: &[Complex64],
    tvec: &[f64],
    params: &ManakovvParams,
    options: &ManakovvOptionsBuilder,
) -> Result<ManakovvResult> {
    if tvec.len() < 2 {
        return Err(FnftError::length_mismatch("time vector", 2, tvec.len()));
    }
    let t1 = tvec.iter().cloned().fold(f64::INFINITY, f64::min);
    let t2 = tvec.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let opts = options.build(ctx)?;
    manakovv_with_options(
        ctx,
        q1,
        q2,
        [t1, t2],
        params.xi,
        params.m,
        params.k,
        params.kappa,
        &opts,
        params.guesses.as_deref(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectrum::{CSTYPE_BOTH, CSTYPE_REFLECTION_COEFFICIENT, DSTYPE_SKIP};

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    fn opts_with(dst: i32, cst: i32) -> ManakovvOptions {
        ManakovvOptions {
            bound_state_filtering: 1,
            bound_state_localization: BSLOC_FAST_EIGENVALUE,
            niter: 10,
            dsub: 0,
            discspec_type: dst,
            contspec_type: cst,
            normalization_flag: 0,
            discretization: 1,
            richardson_extrapolation_flag: 0,
        }
    }

    fn samples(n: usize) -> Vec<Complex64> {
        (0..n).map(|i| c(i as f64, 0.0)).collect()
    }

    #[test]
    fn mismatched_components_are_rejected() {
        let err = ManakovvCall::new(
            &samples(8),
            &samples(7),
            [0.0, 1.0],
            [-2.0, 2.0],
            8,
            4,
            1,
            opts_with(0, 0),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, FnftError::LengthMismatch { .. }));
    }

    #[test]
    fn reflection_buffer_holds_two_components() {
        let call = ManakovvCall::new(
            &samples(8),
            &samples(8),
            [0.0, 1.0],
            [-2.0, 2.0],
            16,
            4,
            1,
            opts_with(DSTYPE_SKIP, CSTYPE_REFLECTION_COEFFICIENT),
            None,
        )
        .unwrap();
        assert_eq!(call.cont.prefix(32).unwrap().len(), 32); // 2 * M
    }

    unsafe extern "C" fn stub_fills_cont(
        _d: FnftUint,
        _q1: *const Complex64,
        _q2: *const Complex64,
        _t: *const FnftReal,
        m: FnftUint,
        contspec: *mut Complex64,
        _xi: *const FnftReal,
        k_ptr: *mut FnftUint,
        _bound_states: *mut Complex64,
        _normconsts_or_residues: *mut Complex64,
        _kappa: FnftInt,
        _opts: *mut ManakovvOptions,
    ) -> FnftInt {
        *k_ptr = 0;
        if !contspec.is_null() {
            for i in 0..(5 * m) {
                *contspec.add(i) = Complex64::new(i as f64, 0.0);
            }
        }
        0
    }

    #[test]
    fn both_splits_into_five_segments() {
        let mut call = ManakovvCall::new(
            &samples(4),
            &samples(4),
            [0.0, 1.0],
            [-2.0, 2.0],
            2,
            4,
            1,
            opts_with(DSTYPE_SKIP, CSTYPE_BOTH),
            None,
        )
        .unwrap();
        let code = unsafe { call.dispatch(stub_fills_cont) };
        let result = call.finish(code);
        assert_eq!(result.cont_ref1.unwrap(), vec![c(0.0, 0.0), c(1.0, 0.0)]);
        assert_eq!(result.cont_ref2.unwrap(), vec![c(2.0, 0.0), c(3.0, 0.0)]);
        assert_eq!(result.cont_a.unwrap(), vec![c(4.0, 0.0), c(5.0, 0.0)]);
        assert_eq!(result.cont_b1.unwrap(), vec![c(6.0, 0.0), c(7.0, 0.0)]);
        assert_eq!(result.cont_b2.unwrap(), vec![c(8.0, 0.0), c(9.0, 0.0)]);
    }

    #[test]
    fn newton_guess_count_is_bounded_by_capacity() {
        let guesses: Vec<Complex64> = (0..6).map(|i| c(0.0, i as f64)).collect();
        let mut opts = opts_with(0, 0);
        opts.bound_state_localization = BSLOC_NEWTON;
        let call = ManakovvCall::new(
            &samples(8),
            &samples(8),
            [0.0, 1.0],
            [-2.0, 2.0],
            8,
            4,
            1,
            opts,
            Some(&guesses),
        )
        .unwrap();
        // only the first 4 guesses fit
        assert_eq!(
            call.bound_states.prefix(4).unwrap(),
            vec![c(0.0, 0.0), c(0.0, 1.0), c(0.0, 2.0), c(0.0, 3.0)]
        );
    }
}
