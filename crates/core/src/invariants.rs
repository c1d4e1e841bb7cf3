//! Developer guardrails and invariants
//!
//! Debug assertions for detecting impossible states during development.
//! These checks are compiled out in release builds.

use std::collections::HashSet;

use crate::draw::DrawPlan;
use crate::pool::Pool;

/// Remaining + drawn must always account for the whole roster, without repeats
pub fn assert_pool_invariants(pool: &Pool) {
    debug_assert_eq!(
        pool.remaining().len() + pool.drawn().len(),
        pool.roster().len(),
        "Pool lost track of participants: {} remaining + {} drawn != {} entered",
        pool.remaining().len(),
        pool.drawn().len(),
        pool.roster().len()
    );

    if cfg!(debug_assertions) {
        let mut seen = HashSet::new();
        for participant in pool.remaining() {
            debug_assert!(
                seen.insert(participant.id),
                "Participant {} appears twice in the pool",
                participant.id
            );
        }
        for id in pool.drawn() {
            debug_assert!(
                seen.insert(*id),
                "Participant {} is both drawn and remaining (or drawn twice)",
                id
            );
        }
    }
}

/// The plan must stop on the winner, inside the final loop
pub fn assert_plan_invariants(plan: &DrawPlan) {
    let per_loop = plan.base_order.len();

    debug_assert_eq!(
        plan.sequence.len(),
        plan.loops * per_loop,
        "Display sequence has {} entries, expected {} loops of {}",
        plan.sequence.len(),
        plan.loops,
        per_loop
    );

    debug_assert!(
        plan.target_index >= (plan.loops - 1) * per_loop,
        "Target index {} is not inside the final loop",
        plan.target_index
    );

    debug_assert_eq!(
        plan.sequence.get(plan.target_index).map(|p| p.id),
        Some(plan.winner.id),
        "Target index {} does not point at winner {}",
        plan.target_index,
        plan.winner.id
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Participant;

    #[test]
    fn test_fresh_pool() {
        let pool = Pool::new(vec![
            Participant::new(1, "Ana", "Sales"),
            Participant::new(2, "Luis", "IT"),
        ]);
        assert_pool_invariants(&pool);
    }

    #[test]
    fn test_pool_after_take() {
        let mut pool = Pool::new(vec![
            Participant::new(1, "Ana", "Sales"),
            Participant::new(2, "Luis", "IT"),
        ]);
        pool.take(0);
        assert_pool_invariants(&pool);
    }
}
