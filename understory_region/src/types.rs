// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared public types: set operators and relation results.

/// Boolean operator applied by the combine sweeps.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum SetOp {
    /// Points in either operand.
    Union,
    /// Points in both operands.
    Intersect,
    /// Points in exactly one operand.
    Xor,
    /// Points in the left operand but not the right.
    Subtract,
}

impl SetOp {
    /// Evaluate the operator on the running depth of each operand.
    ///
    /// Depths are `0` (outside) or `1` (inside) for canonical inputs.
    #[inline]
    pub(crate) const fn apply(self, depth_a: i32, depth_b: i32) -> bool {
        let state = match self {
            Self::Union => depth_a | depth_b,
            Self::Intersect => depth_a & depth_b,
            Self::Xor => depth_a ^ depth_b,
            Self::Subtract => depth_a & !depth_b,
        };
        state != 0
    }
}

/// How two sets relate to each other.
///
/// Produced by [`IntervalSet::relate`](crate::IntervalSet::relate) and
/// [`Region::relate`](crate::Region::relate).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Relation {
    /// The sets share no points.
    None,
    /// The sets overlap, but neither contains the other.
    Intersect,
    /// The left set is a proper superset of the right set.
    AContainsB,
    /// The right set is a proper superset of the left set.
    BContainsA,
    /// The sets contain exactly the same points.
    Equal,
}

bitflags::bitflags! {
    /// Running state of a relation sweep.
    ///
    /// A sweep starts with both containment bits set and clears them as
    /// counterexamples are found.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub(crate) struct RelateFlags: u8 {
        /// No point of B has been seen outside A.
        const A_CONTAINS_B = 0b0000_0001;
        /// No point of A has been seen outside B.
        const B_CONTAINS_A = 0b0000_0010;
        /// A point inside both has been seen.
        const INTERSECTS   = 0b0000_0100;
    }
}

impl RelateFlags {
    /// Flags at the start of a sweep.
    pub(crate) const fn start() -> Self {
        Self::A_CONTAINS_B.union(Self::B_CONTAINS_A)
    }

    /// Update the flags from the depths at one coordinate.
    #[inline]
    pub(crate) fn observe(&mut self, depth_a: i32, depth_b: i32) {
        if depth_a & depth_b != 0 {
            self.insert(Self::INTERSECTS);
        } else if depth_b & !depth_a != 0 {
            self.remove(Self::A_CONTAINS_B);
        } else if depth_a & !depth_b != 0 {
            self.remove(Self::B_CONTAINS_A);
        }
    }

    /// Map the final flags to a relation.
    pub(crate) fn relation(self) -> Relation {
        if !self.contains(Self::INTERSECTS) {
            return Relation::None;
        }
        match (
            self.contains(Self::A_CONTAINS_B),
            self.contains(Self::B_CONTAINS_A),
        ) {
            (true, true) => Relation::Equal,
            (true, false) => Relation::AContainsB,
            (false, true) => Relation::BContainsA,
            (false, false) => Relation::Intersect,
        }
    }
}
