//! Buffer marshaling at the foreign boundary.
//!
//! Output buffers are modeled as a tagged [`OutBuf`]: either an owned,
//! zero-initialized allocation the C library writes into, or `Absent`, which
//! lowers to a null pointer at the last possible moment — inside the call
//! frame itself. Application code never handles nullable raw pointers.
//!
//! For iterative bound-state localization the guess values are written into
//! the *same* buffer that receives the refined results (guess-in/result-out,
//! as the C API mandates); [`OutBuf::seed`] makes that aliasing explicit.

use crate::spectrum::{ContinuousSpectrumKind, DiscreteSpectrumKind};
use crate::types::Complex64;

/// A foreign output buffer that is either present or skipped.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum OutBuf {
    Present(Vec<Complex64>),
    Absent,
}

impl OutBuf {
    /// Allocate a zeroed buffer of `len`, or `Absent` when the output plan
    /// skipped this category.
    pub fn allocate(len: Option<usize>) -> Self {
        match len {
            Some(len) => Self::Present(vec![Complex64::new(0.0, 0.0); len]),
            None => Self::Absent,
        }
    }

    /// Pointer for the call frame: the buffer's base address, or null when
    /// the output is skipped.
    pub fn as_mut_ptr(&mut self) -> *mut Complex64 {
        match self {
            Self::Present(buf) => buf.as_mut_ptr(),
            Self::Absent => std::ptr::null_mut(),
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// Copy as many seed values as fit into the front of the buffer. A
    /// no-op for skipped buffers; the number of copies is bounded by the
    /// shorter of the guesses and the buffer capacity.
    pub fn seed(&mut self, guesses: &[Complex64]) {
        if let Self::Present(buf) = self {
            let n = guesses.len().min(buf.len());
            buf[..n].copy_from_slice(&guesses[..n]);
        }
    }

    /// Copy out the `index`-th segment of `len` elements, `None` when the
    /// buffer is absent.
    pub fn segment(&self, index: usize, len: usize) -> Option<Vec<Complex64>> {
        match self {
            Self::Present(buf) => Some(buf[index * len..(index + 1) * len].to_vec()),
            Self::Absent => None,
        }
    }

    /// Copy out the first `len` elements, `None` when absent.
    pub fn prefix(&self, len: usize) -> Option<Vec<Complex64>> {
        self.segment(0, len)
    }
}

/// Read pointer for an optional *input* buffer (inverse transform spectra),
/// null when the input is not supplied.
pub(crate) fn optional_in_ptr(input: Option<&[Complex64]>) -> *const Complex64 {
    match input {
        Some(buf) => buf.as_ptr(),
        None => std::ptr::null(),
    }
}

/// Discrete-spectrum outputs after the call, sliced to the refined count.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DiscreteParts {
    pub bound_states: Option<Vec<Complex64>>,
    pub norming_constants: Option<Vec<Complex64>>,
    pub residues: Option<Vec<Complex64>>,
}

/// Slice the discrete-spectrum buffers to the refined bound-state count
/// `k_found` that the foreign call wrote back. When both coefficient kinds
/// were requested the library packs `k_found` norming constants followed by
/// `k_found` residues, so the split point is the refined count, not the
/// allocated capacity.
pub(crate) fn split_discrete(
    kind: DiscreteSpectrumKind,
    bound_states: &OutBuf,
    discspec: &OutBuf,
    k_found: usize,
) -> DiscreteParts {
    let (norming_constants, residues) = match kind {
        DiscreteSpectrumKind::NormingConstants => (discspec.prefix(k_found), None),
        DiscreteSpectrumKind::Residues => (None, discspec.prefix(k_found)),
        DiscreteSpectrumKind::Both => (
            discspec.segment(0, k_found),
            discspec.segment(1, k_found),
        ),
        DiscreteSpectrumKind::Skip => (None, None),
    };
    DiscreteParts {
        bound_states: bound_states.prefix(k_found),
        norming_constants,
        residues,
    }
}

/// Continuous-spectrum segments for the scalar transforms (kdvv, nsev):
/// reflection coefficient and/or the scattering coefficients a and b.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ScalarContParts {
    pub reflection: Option<Vec<Complex64>>,
    pub a: Option<Vec<Complex64>>,
    pub b: Option<Vec<Complex64>>,
}

pub(crate) fn split_scalar_continuous(
    kind: ContinuousSpectrumKind,
    cont: &OutBuf,
    m: usize,
) -> ScalarContParts {
    match kind {
        ContinuousSpectrumKind::ReflectionCoefficient => ScalarContParts {
            reflection: cont.segment(0, m),
            a: None,
            b: None,
        },
        ContinuousSpectrumKind::Ab => ScalarContParts {
            reflection: None,
            a: cont.segment(0, m),
            b: cont.segment(1, m),
        },
        ContinuousSpectrumKind::Both => ScalarContParts {
            reflection: cont.segment(0, m),
            a: cont.segment(1, m),
            b: cont.segment(2, m),
        },
        ContinuousSpectrumKind::Skip => ScalarContParts {
            reflection: None,
            a: None,
            b: None,
        },
    }
}

/// Continuous-spectrum segments for the two-component Manakov transform:
/// two reflection coefficients and/or a, b1, b2.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct VectorContParts {
    pub reflection1: Option<Vec<Complex64>>,
    pub reflection2: Option<Vec<Complex64>>,
    pub a: Option<Vec<Complex64>>,
    pub b1: Option<Vec<Complex64>>,
    pub b2: Option<Vec<Complex64>>,
}

pub(crate) fn split_vector_continuous(
    kind: ContinuousSpectrumKind,
    cont: &OutBuf,
    m: usize,
) -> VectorContParts {
    let mut parts = VectorContParts {
        reflection1: None,
        reflection2: None,
        a: None,
        b1: None,
        b2: None,
    };
    match kind {
        ContinuousSpectrumKind::ReflectionCoefficient => {
            parts.reflection1 = cont.segment(0, m);
            parts.reflection2 = cont.segment(1, m);
        }
        ContinuousSpectrumKind::Ab => {
            parts.a = cont.segment(0, m);
            parts.b1 = cont.segment(1, m);
            parts.b2 = cont.segment(2, m);
        }
        ContinuousSpectrumKind::Both => {
            parts.reflection1 = cont.segment(0, m);
            parts.reflection2 = cont.segment(1, m);
            parts.a = cont.segment(2, m);
            parts.b1 = cont.segment(3, m);
            parts.b2 = cont.segment(4, m);
        }
        ContinuousSpectrumKind::Skip => {}
    }
    parts
}
