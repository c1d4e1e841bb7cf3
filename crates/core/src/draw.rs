//! Draw engine
//!
//! Picks one winner uniformly at random, removes it from the pool and
//! plans the loops the spin scrolls through before stopping on it.

use std::time::Duration;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::invariants::assert_plan_invariants;
use crate::models::Participant;
use crate::pool::Pool;

/// Parameters that shape the animation plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawParams {
    pub spin_duration: Duration,
    pub min_items_per_second: u32,
    pub min_loops: usize,
    pub reshuffle_attempts: usize,
}

impl Default for DrawParams {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

impl From<&Settings> for DrawParams {
    fn from(settings: &Settings) -> Self {
        Self {
            spin_duration: settings.spin_duration(),
            min_items_per_second: settings.min_items_per_second,
            min_loops: settings.min_loops.max(1),
            reshuffle_attempts: settings.reshuffle_attempts,
        }
    }
}

/// Outcome of one draw: the winner and what the spin should show
#[derive(Debug, Clone)]
pub struct DrawPlan {
    pub winner: Participant,
    /// Pool order at draw time; also the final loop of the sequence
    pub base_order: Vec<Participant>,
    /// Every entry the spin scrolls past, loops concatenated
    pub sequence: Vec<Participant>,
    pub loops: usize,
    /// Position of the winner in `sequence`, inside the final loop
    pub target_index: usize,
}

impl DrawPlan {
    pub fn per_loop(&self) -> usize {
        self.base_order.len()
    }
}

#[derive(Debug, Clone, Default)]
pub struct DrawEngine {
    params: DrawParams,
}

impl DrawEngine {
    pub fn new(params: DrawParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &DrawParams {
        &self.params
    }

    /// Number of loops needed so enough entries scroll by during the spin
    pub fn loops_for(&self, pool_len: usize) -> usize {
        if pool_len == 0 {
            return 0;
        }
        let min_total = (self.params.spin_duration.as_secs_f64()
            * f64::from(self.params.min_items_per_second))
        .ceil() as usize;
        self.params
            .min_loops
            .max(min_total.div_ceil(pool_len))
            .max(1)
    }

    /// Draw one winner out of the pool.
    ///
    /// The pool is reshuffled first, so its display order changes on every
    /// draw. Fails with [`Error::EmptyPool`] without touching anything when
    /// nobody is left.
    pub fn draw_one<R: Rng + ?Sized>(&self, pool: &mut Pool, rng: &mut R) -> Result<DrawPlan> {
        if pool.is_empty() {
            return Err(Error::EmptyPool);
        }

        pool.remaining_mut().shuffle(rng);
        let base_order = pool.remaining().to_vec();
        let per_loop = base_order.len();

        let winner_index = rng.gen_range(0..per_loop);
        let loops = self.loops_for(per_loop);
        let sequence = self.build_sequence(&base_order, loops, rng);

        let winner = pool.take(winner_index).ok_or(Error::EmptyPool)?;

        let plan = DrawPlan {
            winner,
            target_index: (loops - 1) * per_loop + winner_index,
            base_order,
            sequence,
            loops,
        };
        assert_plan_invariants(&plan);

        tracing::debug!(
            winner_id = plan.winner.id,
            loops = plan.loops,
            entries = plan.sequence.len(),
            remaining = pool.len(),
            "Winner drawn"
        );

        Ok(plan)
    }

    /// `loops - 1` shuffled loops followed by the base order itself.
    ///
    /// Adjacent loops must not meet on the same participant, otherwise the
    /// reel looks stuck for a row.
    fn build_sequence<R: Rng + ?Sized>(
        &self,
        base_order: &[Participant],
        loops: usize,
        rng: &mut R,
    ) -> Vec<Participant> {
        let mut sequence = Vec::with_capacity(loops * base_order.len());
        let mut prev_last: Option<u32> = None;
        let first_id = base_order.first().map(|p| p.id);

        for i in 0..loops.saturating_sub(1) {
            let mut chunk = shuffled_loop(base_order, prev_last, rng);

            // The last shuffled loop runs straight into the base order.
            if i + 2 == loops && base_order.len() > 1 {
                let mut tries = 0;
                while tries < self.params.reshuffle_attempts
                    && chunk.last().map(|p| p.id) == first_id
                {
                    chunk = shuffled_loop(base_order, prev_last, rng);
                    tries += 1;
                }
            }

            prev_last = chunk.last().map(|p| p.id);
            sequence.extend(chunk);
        }

        sequence.extend_from_slice(base_order);
        sequence
    }
}

/// One shuffled copy of the base order, rotated so it does not start on `prev_last`
fn shuffled_loop<R: Rng + ?Sized>(
    base_order: &[Participant],
    prev_last: Option<u32>,
    rng: &mut R,
) -> Vec<Participant> {
    let mut chunk = base_order.to_vec();
    chunk.shuffle(rng);

    if let Some(prev) = prev_last {
        if chunk.len() > 1 {
            let mut guard = 0;
            while guard < chunk.len() && chunk[0].id == prev {
                chunk.rotate_left(1);
                guard += 1;
            }
        }
    }

    chunk
}
