//! Draw session
//!
//! Owns everything one raffle needs: pool, ledger, cache, event details and
//! the busy flag that keeps draws from overlapping.

use rand::Rng;

use crate::draw::{DrawEngine, DrawPlan};
use crate::error::{Error, Result};
use crate::export::{ExportOutcome, Exporter};
use crate::ledger::Ledger;
use crate::models::{parse_roster, EventInfo, Participant, WinnerRecord};
use crate::pool::Pool;
use crate::storage::LedgerStore;

/// Where the session is in the draw cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No roster loaded
    Setup,
    /// Roster loaded, waiting for the draw trigger
    Ready,
    /// A spin is running
    Drawing,
    /// Spin finished, attendance not confirmed yet
    AwaitingConfirmation,
}

pub struct DrawSession {
    engine: DrawEngine,
    store: Box<dyn LedgerStore>,
    pool: Pool,
    ledger: Ledger,
    event: Option<EventInfo>,
    busy: bool,
    pending: Option<Participant>,
}

impl DrawSession {
    /// New session; the ledger is restored from `store`
    pub fn new(engine: DrawEngine, store: Box<dyn LedgerStore>) -> Self {
        let ledger = store.load();
        Self {
            engine,
            store,
            pool: Pool::default(),
            ledger,
            event: None,
            busy: false,
            pending: None,
        }
    }

    /// Start a new raffle from raw `name, department` lines.
    ///
    /// The roster is validated before anything changes; on success the
    /// previous winners are forgotten, cache included. Returns the number of
    /// participants.
    pub fn start(&mut self, roster_text: &str, event: EventInfo) -> Result<usize> {
        if self.busy {
            return Err(Error::DrawInProgress);
        }
        let roster = parse_roster(roster_text)?;

        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "Could not clear winner cache");
        }
        self.ledger.clear();

        self.pool = Pool::new(roster);
        self.pending = None;
        tracing::info!(
            participants = self.pool.len(),
            event = %event.name,
            date = %event.date,
            "Raffle started"
        );
        self.event = Some(event);

        Ok(self.pool.len())
    }

    /// Back to setup. Winners recorded so far are kept.
    pub fn reset(&mut self) {
        self.pool = Pool::default();
        self.busy = false;
        self.pending = None;
        tracing::info!("Session reset to setup");
    }

    /// Draw a winner and mark the session busy until [`finish_spin`](Self::finish_spin).
    pub fn begin_draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<DrawPlan> {
        if self.busy {
            return Err(Error::DrawInProgress);
        }
        if self.pending.is_some() {
            return Err(Error::ResultPending);
        }

        let plan = self.engine.draw_one(&mut self.pool, rng)?;
        self.busy = true;
        self.pending = Some(plan.winner.clone());
        Ok(plan)
    }

    /// The spin is over (or failed); release the draw trigger
    pub fn finish_spin(&mut self) {
        self.busy = false;
    }

    /// Close the result. The winner is recorded only if `attended`.
    pub fn settle(&mut self, attended: bool) -> Result<Option<&WinnerRecord>> {
        if self.busy {
            return Err(Error::DrawInProgress);
        }
        let winner = self.pending.take().ok_or(Error::NoPendingWinner)?;

        if !attended {
            tracing::info!(winner_id = winner.id, "Winner dismissed without attendance");
            return Ok(None);
        }

        self.ledger.record(WinnerRecord::attended(&winner));
        if let Err(e) = self.store.save(&self.ledger) {
            tracing::warn!(error = %e, "Could not save winner cache");
        }
        Ok(self.ledger.records().last())
    }

    /// Export the confirmed winners
    pub fn export(&self, exporter: &Exporter) -> Result<ExportOutcome> {
        exporter.export(&self.ledger, self.event.as_ref())
    }

    pub fn phase(&self) -> Phase {
        if self.busy {
            Phase::Drawing
        } else if self.pending.is_some() {
            Phase::AwaitingConfirmation
        } else if self.pool.roster().is_empty() {
            Phase::Setup
        } else {
            Phase::Ready
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn pending(&self) -> Option<&Participant> {
        self.pending.as_ref()
    }

    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn event(&self) -> Option<&EventInfo> {
        self.event.as_ref()
    }

    pub fn engine(&self) -> &DrawEngine {
        &self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, WinnerCache};
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::tempdir;

    fn event() -> EventInfo {
        EventInfo::new("Kick-off", NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()).unwrap()
    }

    fn session() -> DrawSession {
        DrawSession::new(DrawEngine::default(), Box::new(MemoryStore::new()))
    }

    #[test]
    fn test_start_loads_pool() {
        let mut session = session();
        assert_eq!(session.phase(), Phase::Setup);

        let count = session.start("Ana, Sales\nLuis, IT", event()).unwrap();

        assert_eq!(count, 2);
        assert_eq!(session.phase(), Phase::Ready);
        assert_eq!(session.event().unwrap().name, "Kick-off");
    }

    #[test]
    fn test_example_draw() {
        let mut session = session();
        session.start("Ana, Sales\nLuis, IT", event()).unwrap();
        let mut rng = StdRng::seed_from_u64(99);

        let plan = session.begin_draw(&mut rng).unwrap();

        assert_eq!(session.pool().len(), 1);
        assert!(["Ana", "Luis"].contains(&plan.winner.name.as_str()));
        assert_eq!(session.phase(), Phase::Drawing);
    }

    #[test]
    fn test_busy_blocks_second_draw() {
        let mut session = session();
        session.start("Ana, Sales\nLuis, IT\nEva, HR", event()).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        session.begin_draw(&mut rng).unwrap();
        assert!(matches!(session.begin_draw(&mut rng), Err(Error::DrawInProgress)));
        assert!(matches!(session.settle(true), Err(Error::DrawInProgress)));
        assert_eq!(session.pool().len(), 2);

        session.finish_spin();
        assert_eq!(session.phase(), Phase::AwaitingConfirmation);
        assert!(matches!(session.begin_draw(&mut rng), Err(Error::ResultPending)));
    }

    #[test]
    fn test_ledger_only_holds_attended_winners() {
        let mut session = session();
        session
            .start("Ana, Sales\nLuis, IT\nEva, HR\nTom, Ops", event())
            .unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let mut confirmed = Vec::new();

        for round in 0..4 {
            let plan = session.begin_draw(&mut rng).unwrap();
            session.finish_spin();
            let attended = round % 2 == 0;
            let recorded = session.settle(attended).unwrap().map(|r| r.id);
            if attended {
                assert_eq!(recorded, Some(plan.winner.id));
                confirmed.push(plan.winner.id);
            } else {
                assert_eq!(recorded, None);
            }
        }

        let ledger_ids: Vec<u32> = session.ledger().records().iter().map(|r| r.id).collect();
        assert_eq!(ledger_ids, confirmed);
        assert!(session.pool().is_empty());
        assert_eq!(session.pool().drawn().len(), 4);
    }

    #[test]
    fn test_empty_pool_is_a_noop() {
        let mut session = session();
        session.start("Ana, Sales", event()).unwrap();
        let mut rng = StdRng::seed_from_u64(2);

        session.begin_draw(&mut rng).unwrap();
        session.finish_spin();
        session.settle(false).unwrap();

        assert!(matches!(session.begin_draw(&mut rng), Err(Error::EmptyPool)));
        assert!(!session.is_busy());
        assert!(session.pending().is_none());
    }

    #[test]
    fn test_settle_without_draw() {
        let mut session = session();
        session.start("Ana, Sales", event()).unwrap();
        assert!(matches!(session.settle(true), Err(Error::NoPendingWinner)));
    }

    #[test]
    fn test_invalid_roster_changes_nothing() {
        let dir = tempdir().unwrap();
        let cache = WinnerCache::in_dir(dir.path());
        let mut session = DrawSession::new(DrawEngine::default(), Box::new(cache.clone()));
        session.start("Ana, Sales", event()).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        session.begin_draw(&mut rng).unwrap();
        session.finish_spin();
        session.settle(true).unwrap();

        let err = session.start("Luis, IT\nnobody", event()).unwrap_err();

        assert!(matches!(err, Error::InvalidEntry { line: 2, .. }));
        assert_eq!(session.ledger().len(), 1);
        assert_eq!(cache.load().len(), 1);
        assert_eq!(session.pool().roster()[0].name, "Ana");
    }

    #[test]
    fn test_cache_survives_reload_and_clears_on_start() {
        let dir = tempdir().unwrap();
        let mut rng = StdRng::seed_from_u64(4);

        {
            let mut session = DrawSession::new(
                DrawEngine::default(),
                Box::new(WinnerCache::in_dir(dir.path())),
            );
            session.start("Ana, Sales\nLuis, IT", event()).unwrap();
            session.begin_draw(&mut rng).unwrap();
            session.finish_spin();
            session.settle(true).unwrap();
        }

        let mut reloaded = DrawSession::new(
            DrawEngine::default(),
            Box::new(WinnerCache::in_dir(dir.path())),
        );
        assert_eq!(reloaded.ledger().len(), 1);

        reloaded.start("Eva, HR", event()).unwrap();
        assert!(reloaded.ledger().is_empty());
        assert!(WinnerCache::in_dir(dir.path()).load().is_empty());
    }

    #[test]
    fn test_reset_keeps_ledger() {
        let mut session = session();
        session.start("Ana, Sales\nLuis, IT", event()).unwrap();
        let mut rng = StdRng::seed_from_u64(8);
        session.begin_draw(&mut rng).unwrap();
        session.finish_spin();
        session.settle(true).unwrap();

        session.reset();

        assert_eq!(session.phase(), Phase::Setup);
        assert_eq!(session.ledger().len(), 1);
    }

    #[test]
    fn test_export_uses_event() {
        let dir = tempdir().unwrap();
        let mut session = session();
        session.start("Ana, Sales", event()).unwrap();
        let mut rng = StdRng::seed_from_u64(6);
        session.begin_draw(&mut rng).unwrap();
        session.finish_spin();
        session.settle(true).unwrap();

        let outcome = session.export(&Exporter::new(dir.path())).unwrap();
        assert!(outcome.path().exists());
    }
}
