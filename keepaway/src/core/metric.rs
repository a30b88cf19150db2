//! Business metric over inspection counts.

use crate::core::agent::Agent;
use crate::core::error::SimError;

/// Product of the `k` largest inspection counts across `agents`.
///
/// Ties do not affect the result. `k == 0` yields the empty product `1`;
/// `k > agents.len()` is a [`SimError::Range`].
pub fn top_inspection_product(agents: &[Agent], k: usize) -> Result<u64, SimError> {
    if k > agents.len() {
        return Err(SimError::Range {
            requested: k,
            available: agents.len(),
        });
    }
    let mut counts: Vec<u64> = agents.iter().map(|agent| agent.inspections).collect();
    counts.sort_unstable_by(|a, b| b.cmp(a));
    counts
        .iter()
        .take(k)
        .try_fold(1u64, |product, count| product.checked_mul(*count))
        .ok_or(SimError::ProductOverflow { k })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::counted;

    #[test]
    fn multiplies_two_largest_counts() {
        let agents = counted(&[101, 95, 7, 105]);
        assert_eq!(top_inspection_product(&agents, 2), Ok(10605));
    }

    #[test]
    fn ties_do_not_change_product() {
        let agents = counted(&[4, 9, 9, 1]);
        assert_eq!(top_inspection_product(&agents, 2), Ok(81));
        assert_eq!(top_inspection_product(&agents, 3), Ok(324));
    }

    #[test]
    fn zero_k_is_empty_product() {
        let agents = counted(&[3, 5]);
        assert_eq!(top_inspection_product(&agents, 0), Ok(1));
    }

    #[test]
    fn k_equal_to_population_uses_every_count() {
        let agents = counted(&[2, 3, 4]);
        assert_eq!(top_inspection_product(&agents, 3), Ok(24));
    }

    #[test]
    fn k_beyond_population_is_range_error() {
        let agents = counted(&[2, 3]);
        assert_eq!(
            top_inspection_product(&agents, 3),
            Err(SimError::Range {
                requested: 3,
                available: 2,
            })
        );
    }

    #[test]
    fn oversized_product_is_reported() {
        let agents = counted(&[u64::MAX, 2]);
        assert_eq!(
            top_inspection_product(&agents, 2),
            Err(SimError::ProductOverflow { k: 2 })
        );
    }
}
