//! Relief policies that keep worry levels bounded after each transform.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How a worry level is bounded after the transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReliefPolicy {
    /// Floor-divide by three. Suited to short runs.
    DivideByThree,
    /// Reduce modulo the product of all divisors. Keeps every divisibility
    /// test intact for any number of rounds.
    ModuloBasis,
}

impl ReliefPolicy {
    /// Bound a transformed worry level back into `u64`.
    ///
    /// `modulus_basis` must be > 0. Only `DivideByThree` can return `None`,
    /// when a third of `worry` still exceeds `u64::MAX`.
    pub fn relieve(self, worry: u128, modulus_basis: u64) -> Option<u64> {
        let relieved = match self {
            ReliefPolicy::DivideByThree => worry / 3,
            ReliefPolicy::ModuloBasis => worry % u128::from(modulus_basis),
        };
        u64::try_from(relieved).ok()
    }
}

impl fmt::Display for ReliefPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReliefPolicy::DivideByThree => f.write_str("divide_by_three"),
            ReliefPolicy::ModuloBasis => f.write_str("modulo_basis"),
        }
    }
}
