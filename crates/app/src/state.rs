//! Application state management

use tombola_core::{
    DrawEngine, DrawParams, DrawSession, Exporter, LedgerStore, Result, Settings, SpinParams,
    Spinner, WinnerCache,
};

use crate::cues::{self, CuePlayer};
use crate::notice::Notifier;

/// Main application state
pub struct AppState {
    pub settings: Settings,
    pub session: DrawSession,
    pub spinner: Spinner,
    pub exporter: Exporter,
    pub cues: Box<dyn CuePlayer>,
    pub notifier: Notifier,
}

impl AppState {
    /// State backed by the winner cache in the platform data directory
    pub fn new(settings: Settings) -> Result<Self> {
        let cache = WinnerCache::open_default()?;
        tracing::info!(path = %cache.path().display(), "Using winner cache");
        Ok(Self::with_store(settings, Box::new(cache)))
    }

    pub fn with_store(settings: Settings, store: Box<dyn LedgerStore>) -> Self {
        let engine = DrawEngine::new(DrawParams::from(&settings));
        let spinner = Spinner::new(SpinParams::from(&settings));
        let exporter = Exporter::new(settings.export_dir());
        let cues = cues::player(settings.sound);

        Self {
            session: DrawSession::new(engine, store),
            spinner,
            exporter,
            cues,
            notifier: Notifier,
            settings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tombola_core::{MemoryStore, Phase};

    #[test]
    fn test_state_follows_settings() {
        let settings = Settings {
            spin_duration_ms: 2_500,
            sound: false,
            ..Settings::default()
        };

        let state = AppState::with_store(settings, Box::new(MemoryStore::new()));

        assert_eq!(state.spinner.params().duration, Duration::from_millis(2_500));
        assert_eq!(
            state.session.engine().params().spin_duration,
            Duration::from_millis(2_500)
        );
        assert_eq!(state.session.phase(), Phase::Setup);
    }
}
