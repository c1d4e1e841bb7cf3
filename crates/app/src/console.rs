//! Operator console
//!
//! Reads the roster and event details, then runs the command loop. Input
//! stays live while a spin runs: draw requests are refused, anything else is
//! kept for after the spin.

use std::collections::VecDeque;
use std::io::{self, Write};
use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader, Lines, Stdin};
use tombola_core::{EventInfo, ExportOutcome, Participant, Phase, Result};

use crate::cues::{self, Cue};
use crate::state::AppState;
use crate::terminal::TerminalSurface;

/// Operator commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Draw,
    Export,
    Status,
    Back,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        match line.trim().to_lowercase().as_str() {
            "" | "draw" | "d" => Command::Draw,
            "export" | "e" => Command::Export,
            "status" | "s" => Command::Status,
            "back" | "new" | "reset" => Command::Back,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => Command::Unknown(other.to_string()),
        }
    }
}

/// Answers that confirm attendance
fn is_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "s" | "si" | "sí"
    )
}

/// What was given on the command line for the first setup
#[derive(Debug, Clone, Default)]
pub struct SetupOptions {
    pub roster: Option<PathBuf>,
    pub event: Option<String>,
    pub date: Option<String>,
}

pub struct Console<R, W: Write> {
    state: AppState,
    input: Lines<BufReader<R>>,
    input_open: bool,
    /// Lines typed during a spin, answered afterwards
    queued: VecDeque<String>,
    surface: TerminalSurface<W>,
    rng: StdRng,
    options: SetupOptions,
    ignored_draws: usize,
}

impl Console<Stdin, io::Stdout> {
    pub fn stdio(state: AppState, options: SetupOptions) -> Self {
        let rows = state.settings.viewport_rows;
        Self::new(state, tokio::io::stdin(), io::stdout(), rows, options)
    }
}

impl<R: AsyncRead + Unpin, W: Write> Console<R, W> {
    pub fn new(state: AppState, input: R, output: W, rows: usize, options: SetupOptions) -> Self {
        Self {
            state,
            input: BufReader::new(input).lines(),
            input_open: true,
            queued: VecDeque::new(),
            surface: TerminalSurface::new(output, rows),
            rng: StdRng::from_entropy(),
            options,
            ignored_draws: 0,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Draw requests refused because a spin was running
    #[cfg(test)]
    pub fn ignored_draws(&self) -> usize {
        self.ignored_draws
    }

    pub async fn run(&mut self) -> Result<()> {
        let restored = self.state.session.ledger().len();
        if restored > 0 {
            self.state
                .notifier
                .info(&format!("Restored {restored} winner(s) from the last session"));
        }

        if !self.setup().await? {
            return Ok(());
        }
        print_help();

        loop {
            prompt("> ");
            let Some(line) = self.read_line().await? else {
                break;
            };

            match Command::parse(&line) {
                Command::Draw => self.draw().await?,
                Command::Export => self.export(),
                Command::Status => self.status(),
                Command::Back => {
                    self.state.session.reset();
                    if !self.setup().await? {
                        break;
                    }
                }
                Command::Help => print_help(),
                Command::Quit => break,
                Command::Unknown(cmd) => self
                    .state
                    .notifier
                    .warn(&format!("Unknown command `{cmd}`, type `help`")),
            }
        }

        tracing::info!(ignored_draws = self.ignored_draws, "Console closed");
        Ok(())
    }

    async fn read_line(&mut self) -> Result<Option<String>> {
        if let Some(line) = self.queued.pop_front() {
            return Ok(Some(line));
        }
        self.read_fresh_line().await
    }

    /// Next line typed from now on, skipping anything queued during a spin
    async fn read_fresh_line(&mut self) -> Result<Option<String>> {
        if !self.input_open {
            return Ok(None);
        }
        match self.input.next_line().await? {
            Some(line) => Ok(Some(line)),
            None => {
                self.input_open = false;
                Ok(None)
            }
        }
    }

    /// Collect event details and a roster until the session starts.
    /// Returns `false` when input ran out first.
    async fn setup(&mut self) -> Result<bool> {
        let Some(event) = self.event_details().await? else {
            return Ok(false);
        };

        loop {
            let Some(roster) = self.roster_text().await? else {
                return Ok(false);
            };

            match self.state.session.start(&roster, event.clone()) {
                Ok(count) => {
                    self.state.notifier.info("Winner list reset");
                    self.state
                        .notifier
                        .success(&format!("{count} participants ready to draw"));
                    return Ok(true);
                }
                Err(e) => self.state.notifier.warn(&e.to_string()),
            }
        }
    }

    async fn event_details(&mut self) -> Result<Option<EventInfo>> {
        if let Some(name) = self.options.event.take() {
            let date = self.options.date.take().unwrap_or_else(today);
            match EventInfo::parse(&name, &date) {
                Ok(event) => return Ok(Some(event)),
                Err(e) => self.state.notifier.warn(&e.to_string()),
            }
        }

        loop {
            prompt("Event name: ");
            let Some(name) = self.read_line().await? else {
                return Ok(None);
            };
            if name.trim().is_empty() {
                self.state.notifier.warn("Pick an event name.");
                continue;
            }

            let today = today();
            prompt(&format!("Event date [{today}]: "));
            let Some(date) = self.read_line().await? else {
                return Ok(None);
            };
            let date = if date.trim().is_empty() { today } else { date };

            match EventInfo::parse(&name, &date) {
                Ok(event) => return Ok(Some(event)),
                Err(e) => self.state.notifier.warn(&e.to_string()),
            }
        }
    }

    async fn roster_text(&mut self) -> Result<Option<String>> {
        if let Some(path) = self.options.roster.take() {
            match tokio::fs::read_to_string(&path).await {
                Ok(text) => return Ok(Some(text)),
                Err(e) => self
                    .state
                    .notifier
                    .warn(&format!("Could not read {}: {e}", path.display())),
            }
        }

        println!("Enter participants as `name, department`, one per line. Finish with an empty line.");
        let mut lines = Vec::new();
        loop {
            match self.read_line().await? {
                Some(line) if line.trim().is_empty() => break,
                Some(line) => lines.push(line),
                None if lines.is_empty() => return Ok(None),
                None => break,
            }
        }
        Ok(Some(lines.join("\n")))
    }

    async fn draw(&mut self) -> Result<()> {
        let plan = match self.state.session.begin_draw(&mut self.rng) {
            Ok(plan) => plan,
            Err(e) => {
                self.state.notifier.warn(&e.to_string());
                return Ok(());
            }
        };

        cues::play(self.state.cues.as_ref(), Cue::Spin);

        let mut refused = 0;
        let outcome = {
            let spin = self.state.spinner.spin(&mut self.surface, &plan);
            tokio::pin!(spin);

            loop {
                tokio::select! {
                    outcome = &mut spin => break outcome,
                    line = self.input.next_line(), if self.input_open => match line {
                        Ok(Some(line)) => {
                            if Command::parse(&line) == Command::Draw {
                                tracing::warn!("Draw requested while a spin is running");
                                refused += 1;
                            } else {
                                self.queued.push_back(line);
                            }
                        }
                        Ok(None) => self.input_open = false,
                        Err(e) => {
                            tracing::warn!(error = %e, "Input error during spin");
                            self.input_open = false;
                        }
                    },
                }
            }
        };

        self.state.session.finish_spin();
        cues::stop(self.state.cues.as_ref());
        self.ignored_draws += refused;

        if refused > 0 {
            self.state
                .notifier
                .warn("A draw was already in progress; extra draw requests were ignored");
        }
        match outcome {
            Ok(outcome) => tracing::debug!(
                frames = outcome.frames,
                correction = outcome.correction,
                "Spin settled"
            ),
            Err(e) => self.state.notifier.error(&format!("Error while spinning: {e}")),
        }

        announce(&plan.winner);
        cues::play(self.state.cues.as_ref(), Cue::Winner);

        // Lines typed during the spin stay queued as commands; only an answer
        // given after the prompt counts.
        prompt(&format!("Did {} attend? [y/N] ", plan.winner.name));
        let attended = self.read_fresh_line().await?.is_some_and(|a| is_yes(&a));
        cues::stop(self.state.cues.as_ref());

        match self.state.session.settle(attended) {
            Ok(Some(record)) => self
                .state
                .notifier
                .success(&format!("{} saved as winner", record.name)),
            Ok(None) => self
                .state
                .notifier
                .info(&format!("{} was not recorded", plan.winner.name)),
            Err(e) => self.state.notifier.warn(&e.to_string()),
        }

        let remaining = self.state.session.pool().len();
        if remaining == 0 {
            self.state.notifier.info("Everyone has been drawn");
        }
        Ok(())
    }

    fn export(&self) {
        if self.state.session.ledger().is_empty() {
            self.state.notifier.info("No winners to export yet.");
            return;
        }

        match self.state.session.export(&self.state.exporter) {
            Ok(ExportOutcome::Spreadsheet(path)) => self
                .state
                .notifier
                .success(&format!("Spreadsheet written to {}", path.display())),
            Ok(ExportOutcome::CsvFallback { path, reason }) => {
                self.state
                    .notifier
                    .error(&format!("Could not create the spreadsheet: {reason}"));
                self.state
                    .notifier
                    .warn(&format!("Wrote a CSV file instead: {}", path.display()));
            }
            Err(e) => self.state.notifier.error(&format!("Export failed: {e}")),
        }
    }

    fn status(&self) {
        let session = &self.state.session;
        if let Some(event) = session.event() {
            println!("Event:     {} ({})", event.name, event.display_date());
        }
        println!(
            "Pool:      {} of {} left",
            session.pool().len(),
            session.pool().roster().len()
        );
        println!("Winners:   {}", session.ledger().len());
        let phase = match session.phase() {
            Phase::Setup => "setup",
            Phase::Ready => "ready",
            Phase::Drawing => "drawing",
            Phase::AwaitingConfirmation => "waiting for attendance",
        };
        println!("State:     {phase}");
    }
}

fn today() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}

fn prompt(text: &str) {
    let mut out = io::stdout().lock();
    let _ = write!(out, "{text}");
    let _ = out.flush();
}

fn announce(winner: &Participant) {
    println!();
    println!("🎉 Winner: {}", winner.name);
    println!("   {}", winner.department);
}

fn print_help() {
    println!("Commands:");
    println!("  draw (or Enter) - spin for the next winner");
    println!("  export          - save confirmed winners (.xlsx, CSV fallback)");
    println!("  status          - show pool and winner counts");
    println!("  back            - return to setup (winners are kept)");
    println!("  quit            - leave");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::tempdir;
    use tokio::io::{AsyncWriteExt, DuplexStream};
    use tombola_core::{MemoryStore, Settings};

    fn quick_state(export_dir: PathBuf) -> AppState {
        let settings = Settings {
            spin_duration_ms: 500,
            frame_interval_ms: 50,
            sound: false,
            export_dir: Some(export_dir),
            ..Settings::default()
        };
        AppState::with_store(settings, Box::new(MemoryStore::new()))
    }

    fn event_options() -> SetupOptions {
        SetupOptions {
            roster: None,
            event: Some("Kick-off".into()),
            date: Some("2026-01-15".into()),
        }
    }

    /// Operator input that arrives over time: each chunk is written after
    /// its delay, counted from the previous chunk.
    fn typed(steps: &[(u64, &'static str)]) -> DuplexStream {
        let (mut keyboard, input) = tokio::io::duplex(1024);
        let steps = steps.to_vec();
        tokio::spawn(async move {
            for (delay_ms, text) in steps {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                keyboard.write_all(text.as_bytes()).await.unwrap();
            }
        });
        input
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse(""), Command::Draw);
        assert_eq!(Command::parse("  DRAW "), Command::Draw);
        assert_eq!(Command::parse("export"), Command::Export);
        assert_eq!(Command::parse("new"), Command::Back);
        assert_eq!(Command::parse("q"), Command::Quit);
        assert_eq!(Command::parse("spin"), Command::Unknown("spin".into()));
    }

    #[test]
    fn test_yes_answers() {
        assert!(is_yes("y"));
        assert!(is_yes(" Sí "));
        assert!(!is_yes(""));
        assert!(!is_yes("n"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_scripted_draw_and_export() {
        let dir = tempdir().unwrap();
        // The spin lasts 500ms; the answer comes once it is over.
        let input = typed(&[
            (0, "Ana, Sales\nLuis, IT\n\ndraw\n"),
            (1000, "y\nexport\nquit\n"),
        ]);
        let mut console = Console::new(
            quick_state(dir.path().to_path_buf()),
            input,
            Vec::new(),
            5,
            event_options(),
        );

        console.run().await.unwrap();

        let session = &console.state().session;
        assert_eq!(session.pool().len(), 1);
        assert_eq!(session.ledger().len(), 1);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_roster_is_asked_again() {
        let dir = tempdir().unwrap();
        let script = "Ana, Sales\nLuis\n\nEva, HR\n\nquit\n";
        let mut console = Console::new(
            quick_state(dir.path().to_path_buf()),
            script.as_bytes(),
            Vec::new(),
            5,
            event_options(),
        );

        console.run().await.unwrap();

        let roster = console.state().session.pool().roster();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].name, "Eva");
    }

    #[tokio::test(start_paused = true)]
    async fn test_draw_refused_while_spinning() {
        let dir = tempdir().unwrap();
        let input = typed(&[
            (0, "Ana, Sales\n\ndraw\n"),
            (100, "draw\n"),
            (1000, "n\nquit\n"),
        ]);
        let mut console = Console::new(
            quick_state(dir.path().to_path_buf()),
            input,
            Vec::new(),
            5,
            event_options(),
        );

        console.run().await.unwrap();

        assert_eq!(console.ignored_draws(), 1);
        let session = &console.state().session;
        assert!(session.pool().is_empty());
        assert!(session.ledger().is_empty());
        assert_eq!(session.phase(), Phase::Ready);
    }

    #[tokio::test(start_paused = true)]
    async fn test_commands_typed_during_spin_do_not_answer_attendance() {
        let dir = tempdir().unwrap();
        let input = typed(&[
            (0, "Ana, Sales\nLuis, IT\n\ndraw\n"),
            (100, "status\n"),
            (1000, "y\nquit\n"),
        ]);
        let mut console = Console::new(
            quick_state(dir.path().to_path_buf()),
            input,
            Vec::new(),
            5,
            event_options(),
        );

        console.run().await.unwrap();

        let session = &console.state().session;
        assert_eq!(session.pool().len(), 1);
        assert_eq!(session.ledger().len(), 1);
        assert_eq!(session.phase(), Phase::Ready);
        assert!(console.queued.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_roster_file() {
        let dir = tempdir().unwrap();
        let roster = dir.path().join("people.txt");
        std::fs::write(&roster, "Ana, Sales\nLuis, IT\nEva, HR\n").unwrap();
        let options = SetupOptions {
            roster: Some(roster),
            ..event_options()
        };
        let mut console = Console::new(
            quick_state(dir.path().join("exports")),
            "status\nquit\n".as_bytes(),
            Vec::new(),
            5,
            options,
        );

        console.run().await.unwrap();

        assert_eq!(console.state().session.pool().len(), 3);
        assert_eq!(console.state().session.event().unwrap().name, "Kick-off");
    }
}
