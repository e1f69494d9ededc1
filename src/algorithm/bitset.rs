use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset holding the candidate variants of an open cell
///
/// Indexed by variant index. Iteration is always in ascending index order, so
/// removing members never reorders the survivors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileBitset {
    bits: BitVec,
}

impl TileBitset {
    /// Create a bitset with no variants present
    pub fn new(variant_count: usize) -> Self {
        Self {
            bits: bitvec![0; variant_count],
        }
    }

    /// Create a bitset containing every variant
    pub fn all(variant_count: usize) -> Self {
        Self {
            bits: bitvec![1; variant_count],
        }
    }

    /// Insert a variant index, ignoring indices past the end
    pub fn insert(&mut self, variant: usize) {
        if variant < self.bits.len() {
            self.bits.set(variant, true);
        }
    }

    /// Test variant membership
    pub fn contains(&self, variant: usize) -> bool {
        self.bits.get(variant).as_deref() == Some(&true)
    }

    /// Keep only the variants accepted by `keep`
    ///
    /// Returns how many variants were removed.
    pub fn retain(&mut self, mut keep: impl FnMut(usize) -> bool) -> usize {
        let doomed: Vec<usize> = self.bits.iter_ones().filter(|&v| !keep(v)).collect();
        for &variant in &doomed {
            self.bits.set(variant, false);
        }
        doomed.len()
    }

    /// Remove every variant
    pub fn clear(&mut self) {
        self.bits.fill(false);
    }

    /// Test if no variants are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count variants in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Iterate members in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// Extract all members as a vector
    pub fn to_vec(&self) -> Vec<usize> {
        self.bits.iter_ones().collect()
    }
}

impl fmt::Display for TileBitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TileBitset({} variants: {:?})", self.count(), self.to_vec())
    }
}
