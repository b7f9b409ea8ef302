//! Logical-to-physical qubit mappings.
//!
//! A [`Mapping`] is a bijection on `[0, n)` stored as a forward array
//! (`logical -> physical`) plus its inverse, so lookups in both directions
//! and transpositions are O(1). Every constructor validates bijectivity and
//! every mutation is a transposition, so an existing `Mapping` is always a
//! permutation.

use serde::{Deserialize, Serialize};
use swaperation_ir::QubitId;

use crate::error::{RouteError, RouteResult};

/// A bijection from logical to physical qubit indices.
///
/// Serialized as the forward array, e.g. `[2, 0, 1]` for logical 0 on
/// physical 2.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct Mapping {
    forward: Vec<u32>,
    inverse: Vec<u32>,
}

impl Mapping {
    /// The identity on `[0, n)`.
    pub fn identity(n: u32) -> Self {
        let forward: Vec<u32> = (0..n).collect();
        Self {
            inverse: forward.clone(),
            forward,
        }
    }

    /// Build from a forward array, rejecting anything that is not a permutation.
    pub fn from_vec(forward: Vec<u32>) -> RouteResult<Self> {
        let n = forward.len();
        let mut inverse = vec![u32::MAX; n];
        for (logical, &physical) in forward.iter().enumerate() {
            let slot = inverse.get_mut(physical as usize).ok_or_else(|| {
                RouteError::InvalidMapping(format!("{physical} out of range for length {n}"))
            })?;
            if *slot != u32::MAX {
                return Err(RouteError::InvalidMapping(format!(
                    "{physical} appears more than once"
                )));
            }
            *slot = logical as u32;
        }
        Ok(Self { forward, inverse })
    }

    /// The transposition exchanging `x` and `y` on `[0, n)`.
    pub fn transposition(n: u32, x: u32, y: u32) -> RouteResult<Self> {
        for q in [x, y] {
            if q >= n {
                return Err(RouteError::QubitOutOfRange {
                    qubit: q,
                    num_qubits: n,
                });
            }
        }
        let mut t = Self::identity(n);
        t.forward.swap(x as usize, y as usize);
        t.inverse.swap(x as usize, y as usize);
        Ok(t)
    }

    /// Size of the domain.
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// Whether the domain is empty.
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Physical qubit holding `logical`.
    #[inline]
    pub fn physical(&self, logical: u32) -> Option<u32> {
        self.forward.get(logical as usize).copied()
    }

    /// Logical qubit held by `physical`.
    #[inline]
    pub fn logical(&self, physical: u32) -> Option<u32> {
        self.inverse.get(physical as usize).copied()
    }

    /// Map a qubit of a circuit no wider than this mapping.
    ///
    /// # Panics
    ///
    /// Panics if `qubit` is outside the domain.
    #[inline]
    pub fn map_qubit(&self, qubit: QubitId) -> QubitId {
        QubitId(self.forward[qubit.index()])
    }

    /// The forward array.
    pub fn as_slice(&self) -> &[u32] {
        &self.forward
    }

    /// The inverse bijection (`physical -> logical`).
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self {
            forward: self.inverse.clone(),
            inverse: self.forward.clone(),
        }
    }

    /// Exchange whatever logical qubits sit on physical `x` and `y`.
    ///
    /// Equivalent to `*self = apply_swap(self, x, y)` without allocating.
    pub fn swap_physical(&mut self, x: u32, y: u32) -> RouteResult<()> {
        let n = self.forward.len() as u32;
        for q in [x, y] {
            if q >= n {
                return Err(RouteError::QubitOutOfRange {
                    qubit: q,
                    num_qubits: n,
                });
            }
        }
        let (lx, ly) = (self.inverse[x as usize], self.inverse[y as usize]);
        self.forward[lx as usize] = y;
        self.forward[ly as usize] = x;
        self.inverse.swap(x as usize, y as usize);
        Ok(())
    }

    /// Whether the forward and inverse arrays agree and cover `[0, n)`.
    pub fn is_bijection(&self) -> bool {
        self.forward.len() == self.inverse.len()
            && self
                .forward
                .iter()
                .enumerate()
                .all(|(l, &p)| self.inverse.get(p as usize) == Some(&(l as u32)))
    }
}

/// `h = f ∘ g`, i.e. `h(x) = f(g(x))`.
pub fn compose(f: &Mapping, g: &Mapping) -> RouteResult<Mapping> {
    if f.len() != g.len() {
        return Err(RouteError::InvalidMapping(format!(
            "cannot compose mappings of length {} and {}",
            f.len(),
            g.len()
        )));
    }
    let forward = g.forward.iter().map(|&x| f.forward[x as usize]).collect();
    let inverse = f.inverse.iter().map(|&x| g.inverse[x as usize]).collect();
    Ok(Mapping { forward, inverse })
}

/// `compose(transposition(x, y), mapping)`: the mapping after physically
/// swapping `x` and `y`.
pub fn apply_swap(mapping: &Mapping, x: u32, y: u32) -> RouteResult<Mapping> {
    let t = Mapping::transposition(mapping.len() as u32, x, y)?;
    compose(&t, mapping)
}

/// `diff[i] = initial.index_of(final[i])`: where each entry of `final`
/// sits in `initial`.
///
/// Applied after `initial`, this permutation yields `final`.
pub fn perm_diff(initial: &Mapping, final_: &Mapping) -> RouteResult<Mapping> {
    if initial.len() != final_.len() {
        return Err(RouteError::InvalidMapping(format!(
            "cannot diff mappings of length {} and {}",
            initial.len(),
            final_.len()
        )));
    }
    let forward = final_
        .forward
        .iter()
        .map(|&v| initial.inverse[v as usize])
        .collect();
    Mapping::from_vec(forward)
}

impl TryFrom<Vec<u32>> for Mapping {
    type Error = RouteError;

    fn try_from(forward: Vec<u32>) -> RouteResult<Self> {
        Self::from_vec(forward)
    }
}

impl From<Mapping> for Vec<u32> {
    fn from(mapping: Mapping) -> Self {
        mapping.forward
    }
}
