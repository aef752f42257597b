//! Output shape resolution.
//!
//! FNFT decides *what* it computes from two integer flags in the options
//! struct: the discrete-spectrum kind and the continuous-spectrum kind. The
//! buffer sizes the caller must allocate follow deterministically from those
//! flags, so the shapes are resolved here, once, before the call — and the
//! same [`OutputPlan`] instance is then used to slice the buffers afterwards.
//! Allocation and demarshaling can never disagree.

/// `discspec_type` flag values shared by kdvv, nsev and manakovv.
pub const DSTYPE_NORMING_CONSTANTS: i32 = 0;
pub const DSTYPE_RESIDUES: i32 = 1;
pub const DSTYPE_BOTH: i32 = 2;
pub const DSTYPE_SKIP: i32 = 3;

/// `contspec_type` flag values shared by kdvv, nsev and manakovv.
pub const CSTYPE_REFLECTION_COEFFICIENT: i32 = 0;
pub const CSTYPE_AB: i32 = 1;
pub const CSTYPE_BOTH: i32 = 2;
pub const CSTYPE_SKIP: i32 = 3;

/// What the discrete-spectrum output buffer must hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscreteSpectrumKind {
    NormingConstants,
    Residues,
    Both,
    Skip,
}

impl DiscreteSpectrumKind {
    /// Resolve the `discspec_type` flag.
    ///
    /// Any value outside the known set degrades to `Skip` instead of
    /// raising; this mirrors the C enum handling the original interface
    /// exposes and is preserved for compatibility (see DESIGN.md).
    pub fn from_flag(flag: i32) -> Self {
        match flag {
            DSTYPE_NORMING_CONSTANTS => Self::NormingConstants,
            DSTYPE_RESIDUES => Self::Residues,
            DSTYPE_BOTH => Self::Both,
            _ => Self::Skip,
        }
    }

    /// Buffer length as a multiple of the bound-state capacity K, or `None`
    /// when the output is skipped.
    pub fn multiplier(self) -> Option<usize> {
        match self {
            Self::NormingConstants | Self::Residues => Some(1),
            Self::Both => Some(2),
            Self::Skip => None,
        }
    }

    pub fn includes_norming_constants(self) -> bool {
        matches!(self, Self::NormingConstants | Self::Both)
    }

    pub fn includes_residues(self) -> bool {
        matches!(self, Self::Residues | Self::Both)
    }
}

/// What the continuous-spectrum output buffer must hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinuousSpectrumKind {
    ReflectionCoefficient,
    Ab,
    Both,
    Skip,
}

impl ContinuousSpectrumKind {
    /// Resolve the `contspec_type` flag; unknown values degrade to `Skip`.
    pub fn from_flag(flag: i32) -> Self {
        match flag {
            CSTYPE_REFLECTION_COEFFICIENT => Self::ReflectionCoefficient,
            CSTYPE_AB => Self::Ab,
            CSTYPE_BOTH => Self::Both,
            _ => Self::Skip,
        }
    }

    /// Buffer length as a multiple of the requested grid size M, or `None`
    /// when skipped. The multiplier depends on the variant: the Manakov
    /// transform has two field components, so each category carries more
    /// M-length segments than the scalar transforms do.
    pub fn multiplier(self, rules: &ContRules) -> Option<usize> {
        match self {
            Self::ReflectionCoefficient => Some(rules.reflection),
            Self::Ab => Some(rules.ab),
            Self::Both => Some(rules.both),
            Self::Skip => None,
        }
    }
}

/// Per-variant continuous-spectrum multiplier table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContRules {
    pub reflection: usize,
    pub ab: usize,
    pub both: usize,
}

/// Scalar transforms (kdvv, nsev): one reflection coefficient, a and b.
pub const SCALAR_CONT_RULES: ContRules = ContRules {
    reflection: 1,
    ab: 2,
    both: 3,
};

/// Two-component transform (manakovv): two reflection coefficients,
/// a plus b1 and b2.
pub const VECTOR_CONT_RULES: ContRules = ContRules {
    reflection: 2,
    ab: 3,
    both: 5,
};

/// The resolved output shapes for one call, computed before the call from
/// the populated options struct and reused verbatim for demarshaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputPlan {
    pub discrete: DiscreteSpectrumKind,
    pub continuous: ContinuousSpectrumKind,
    rules: ContRules,
}

impl OutputPlan {
    /// Total function: every flag pair maps to exactly one plan.
    pub fn resolve(discspec_flag: i32, contspec_flag: i32, rules: ContRules) -> Self {
        Self {
            discrete: DiscreteSpectrumKind::from_flag(discspec_flag),
            continuous: ContinuousSpectrumKind::from_flag(contspec_flag),
            rules,
        }
    }

    /// Required discrete-spectrum buffer length for capacity `k`, `None`
    /// when skipped.
    pub fn discrete_len(&self, k: usize) -> Option<usize> {
        self.discrete.multiplier().map(|m| m * k)
    }

    /// Required bound-state buffer length; skipped together with the
    /// discrete spectrum.
    pub fn bound_states_len(&self, k: usize) -> Option<usize> {
        self.discrete.multiplier().map(|_| k)
    }

    /// Required continuous-spectrum buffer length for grid size `m`.
    pub fn continuous_len(&self, m: usize) -> Option<usize> {
        self.continuous.multiplier(&self.rules).map(|mult| mult * m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(DSTYPE_NORMING_CONSTANTS, Some(1))]
    #[case(DSTYPE_RESIDUES, Some(1))]
    #[case(DSTYPE_BOTH, Some(2))]
    #[case(DSTYPE_SKIP, None)]
    fn discrete_multipliers(#[case] flag: i32, #[case] expected: Option<usize>) {
        assert_eq!(DiscreteSpectrumKind::from_flag(flag).multiplier(), expected);
    }

    #[rstest]
    #[case(CSTYPE_REFLECTION_COEFFICIENT, 1, 2)]
    #[case(CSTYPE_AB, 2, 3)]
    #[case(CSTYPE_BOTH, 3, 5)]
    fn continuous_multipliers(#[case] flag: i32, #[case] scalar: usize, #[case] vector: usize) {
        let kind = ContinuousSpectrumKind::from_flag(flag);
        assert_eq!(kind.multiplier(&SCALAR_CONT_RULES), Some(scalar));
        assert_eq!(kind.multiplier(&VECTOR_CONT_RULES), Some(vector));
    }

    #[test]
    fn unknown_flags_degrade_to_skip() {
        assert_eq!(DiscreteSpectrumKind::from_flag(7), DiscreteSpectrumKind::Skip);
        assert_eq!(DiscreteSpectrumKind::from_flag(-1), DiscreteSpectrumKind::Skip);
        assert_eq!(
            ContinuousSpectrumKind::from_flag(42),
            ContinuousSpectrumKind::Skip
        );
    }

    #[test]
    fn plan_lengths() {
        let plan = OutputPlan::resolve(DSTYPE_BOTH, CSTYPE_BOTH, SCALAR_CONT_RULES);
        assert_eq!(plan.discrete_len(10), Some(20));
        assert_eq!(plan.bound_states_len(10), Some(10));
        assert_eq!(plan.continuous_len(128), Some(384));

        let skip = OutputPlan::resolve(DSTYPE_SKIP, CSTYPE_SKIP, SCALAR_CONT_RULES);
        assert_eq!(skip.discrete_len(10), None);
        assert_eq!(skip.bound_states_len(10), None);
        assert_eq!(skip.continuous_len(128), None);
    }

    proptest! {
        /// The resolver is total: any flag pair yields a plan, and anything
        /// outside the known sets is a skip, never a panic.
        #[test]
        fn resolver_is_total(dst in any::<i32>(), cst in any::<i32>()) {
            let plan = OutputPlan::resolve(dst, cst, SCALAR_CONT_RULES);
            if !(0..=2).contains(&dst) {
                prop_assert_eq!(plan.discrete, DiscreteSpectrumKind::Skip);
                prop_assert_eq!(plan.discrete_len(4), None);
            }
            if !(0..=2).contains(&cst) {
                prop_assert_eq!(plan.continuous, ContinuousSpectrumKind::Skip);
                prop_assert_eq!(plan.continuous_len(4), None);
            }
        }
    }
}
