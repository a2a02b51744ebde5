//! Apportionment of vault surplus through a yield-per-share index.
//!
//! Whenever the vault surplus grows, the growth is spread over the principal
//! held at that moment by raising `per_share`. A member's yield is what the
//! index gained while their principal sat in the pool, so principal that has
//! left earns nothing afterwards and later or smaller deposits earn less.
//! Floor division keeps the sum of member yield at or below the surplus.

use circle_core::PoolError;

use crate::storage::{Position, YieldIndex};

pub const PRECISION: i128 = 1_000_000_000_000;

/// Fold any surplus not yet accounted for into the index. Nothing is folded
/// while no principal is held.
pub fn fold(
    index: &YieldIndex,
    surplus: i128,
    total_principal: i128,
) -> Result<YieldIndex, PoolError> {
    if total_principal <= 0 || surplus <= index.accounted {
        return Ok(index.clone());
    }
    let fresh = surplus - index.accounted;
    let step = fresh.checked_mul(PRECISION).ok_or(PoolError::Overflow)? / total_principal;
    let per_share = index
        .per_share
        .checked_add(step)
        .ok_or(PoolError::Overflow)?;
    Ok(YieldIndex {
        per_share,
        accounted: surplus,
    })
}

/// Yield owed to a member holding `principal` since their last settle.
pub fn earned(position: &Position, principal: i128, index: &YieldIndex) -> Result<i128, PoolError> {
    let accrued = principal
        .checked_mul(index.per_share)
        .ok_or(PoolError::Overflow)?;
    let unsettled = (accrued - position.reward_debt).max(0) / PRECISION;
    position
        .pending
        .checked_add(unsettled)
        .ok_or(PoolError::Overflow)
}

/// Settle yield earned on `principal_before` and restart the debt for
/// `principal_after`. Must run on every principal change.
pub fn settle(
    position: &Position,
    principal_before: i128,
    principal_after: i128,
    index: &YieldIndex,
) -> Result<Position, PoolError> {
    let pending = earned(position, principal_before, index)?;
    let reward_debt = principal_after
        .checked_mul(index.per_share)
        .ok_or(PoolError::Overflow)?;
    Ok(Position {
        pending,
        reward_debt,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fold_spreads_growth_over_current_principal() {
        let index = fold(&YieldIndex::default(), 500, 1_000).unwrap();
        assert_eq!(index.accounted, 500);
        assert_eq!(index.per_share, PRECISION / 2);

        // Unchanged surplus folds nothing more.
        assert_eq!(fold(&index, 500, 4_000).unwrap(), index);
    }

    #[test]
    fn no_fold_without_principal() {
        let index = fold(&YieldIndex::default(), 900, 0).unwrap();
        assert_eq!(index, YieldIndex::default());
    }

    #[test]
    fn shares_never_exceed_surplus() {
        let principals = [7i128, 11, 13];
        let total: i128 = principals.iter().sum();
        let index = fold(&YieldIndex::default(), 1_000, total).unwrap();
        let paid: i128 = principals
            .iter()
            .map(|p| earned(&Position::default(), *p, &index).unwrap())
            .sum();
        assert!(paid <= 1_000);
        assert!(1_000 - paid < principals.len() as i128);
    }

    #[test]
    fn exited_principal_earns_nothing_later() {
        let first = fold(&YieldIndex::default(), 100, 1_000).unwrap();
        let gone = settle(&Position::default(), 1_000, 0, &first).unwrap();
        assert_eq!(gone.pending, 100);

        let later = fold(&first, 400, 3_000).unwrap();
        assert_eq!(earned(&gone, 0, &later).unwrap(), 100);
    }

    #[test]
    fn late_deposit_skips_earlier_growth() {
        let first = fold(&YieldIndex::default(), 100, 1_000).unwrap();
        let late = settle(&Position::default(), 0, 1_000, &first).unwrap();
        assert_eq!(earned(&late, 1_000, &first).unwrap(), 0);

        let second = fold(&first, 300, 2_000).unwrap();
        assert_eq!(earned(&late, 1_000, &second).unwrap(), 100);
    }
}
