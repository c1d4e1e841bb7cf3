//! Audio cues
//!
//! Best effort only: a cue that cannot play is logged and forgotten.

use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// The reel starts turning
    Spin,
    /// A winner is on screen
    Winner,
}

pub trait CuePlayer {
    fn play(&self, cue: Cue) -> io::Result<()>;

    /// Stop whatever is playing
    fn stop(&self) -> io::Result<()> {
        Ok(())
    }
}

/// Rings the terminal bell
#[derive(Debug, Default)]
pub struct TerminalBell;

impl CuePlayer for TerminalBell {
    fn play(&self, cue: Cue) -> io::Result<()> {
        let bells = match cue {
            Cue::Spin => "\x07",
            Cue::Winner => "\x07\x07",
        };
        let mut err = io::stderr().lock();
        err.write_all(bells.as_bytes())?;
        err.flush()
    }
}

#[derive(Debug, Default)]
pub struct Silent;

impl CuePlayer for Silent {
    fn play(&self, _cue: Cue) -> io::Result<()> {
        Ok(())
    }
}

/// Pick the player for the `sound` setting
pub fn player(sound: bool) -> Box<dyn CuePlayer> {
    if sound {
        Box::new(TerminalBell)
    } else {
        Box::new(Silent)
    }
}

pub fn play(player: &dyn CuePlayer, cue: Cue) {
    if let Err(e) = player.play(cue) {
        tracing::debug!(?cue, error = %e, "Cue could not be played");
    }
}

pub fn stop(player: &dyn CuePlayer) {
    if let Err(e) = player.stop() {
        tracing::debug!(error = %e, "Cue could not be stopped");
    }
}
