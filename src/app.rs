//! App: terminal init, fixed-rate frame loop, key handling.

use crate::input::key_to_command;
use crate::theme::Theme;
use crate::ui::{self, Hud};
use anyhow::Result;
use crossterm::event::{self, Event as TermEvent, KeyEventKind};
use opentris::audio::AudioSink;
use opentris::{
    Command, Engine, Event, FileStore, Flow, GameConfig, GravityClock, Phase, RandomPieces,
    Session, ShapeCatalog,
};
use ratatui::DefaultTerminal;
use std::time::{Duration, Instant};
use tachyonfx::Effect;

type GameSession = Session<RandomPieces, FileStore, Box<dyn AudioSink>>;

pub struct App {
    session: GameSession,
    theme: Theme,
    clock: GravityClock,
    frame_interval: Duration,
    no_animation: bool,
    /// TachyonFX flash for the last row clear (created when rows clear).
    flash: Option<Effect>,
    /// Last time the flash was processed (for delta).
    flash_time: Option<Instant>,
}

impl App {
    pub fn new(
        config: &GameConfig,
        audio: Box<dyn AudioSink>,
        theme: Theme,
        frame_rate: f64,
        no_animation: bool,
    ) -> Result<Self> {
        config.validate()?;
        let source = config
            .seed
            .map_or_else(RandomPieces::from_time, RandomPieces::new);
        let engine = Engine::new(config.rows, config.cols, ShapeCatalog::standard(), source);
        let store = FileStore::new(config.save_dir.clone());
        let session = Session::new(engine, store, audio, config.player.clone());
        log::info!(
            "starting {}x{} board for {}, best {}",
            config.rows,
            config.cols,
            config.player,
            session.high_score().score
        );
        Ok(Self {
            session,
            theme,
            clock: GravityClock::new(config.gravity_every),
            frame_interval: Duration::from_secs_f64(1.0 / frame_rate.max(1.0)),
            no_animation,
            flash: None,
            flash_time: None,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        use crossterm::{
            execute,
            terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
        };

        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let mut terminal =
            DefaultTerminal::new(ratatui::backend::CrosstermBackend::new(stdout))?;
        terminal.hide_cursor()?;

        let result = self.run_loop(&mut terminal);

        // Restore
        let _ = terminal.show_cursor();
        execute!(std::io::stdout(), LeaveAlternateScreen)?;
        disable_raw_mode()?;

        result
    }

    fn run_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        loop {
            let frame_start = Instant::now();
            terminal.draw(|f| {
                let hud = Hud {
                    player: self.session.player(),
                    best: self.session.high_score(),
                    new_high_score: self.session.new_high_score(),
                };
                ui::draw(
                    f,
                    self.session.engine(),
                    &hud,
                    &self.theme,
                    &mut self.flash,
                    &mut self.flash_time,
                    frame_start,
                );
            })?;
            if self.flash.as_ref().is_some_and(Effect::done) {
                self.flash = None;
                self.flash_time = None;
            }

            // Keys are handled as they arrive; the frame itself ends on a fixed deadline.
            let deadline = frame_start + self.frame_interval;
            loop {
                let now = Instant::now();
                if now >= deadline {
                    break;
                }
                if !event::poll(deadline - now)? {
                    continue;
                }
                let TermEvent::Key(key) = event::read()? else {
                    continue;
                };
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let command = match key_to_command(key) {
                    Some(c) => c,
                    // Any key leaves the title screen.
                    None if self.session.engine().phase() == Phase::NotStarted => Command::SoftDrop,
                    None => continue,
                };
                if self.apply(command) == Flow::Quit {
                    return Ok(());
                }
            }

            // Gravity counts frames only while playing, so pausing freezes it.
            if self.session.engine().phase() == Phase::Playing && self.clock.on_frame() {
                self.apply(Command::Tick);
            }
        }
    }

    fn apply(&mut self, command: Command) -> Flow {
        let flow = self.session.apply(command);
        for event in self.session.drain_events() {
            match event {
                Event::GameStarted => self.clock.reset(),
                Event::RowsCleared(n) => {
                    log::debug!("cleared {n} rows");
                    if !self.no_animation {
                        self.flash = Some(ui::row_clear_flash());
                        self.flash_time = None;
                    }
                }
                Event::GameOver { score } => {
                    log::debug!("final score {score}");
                }
                Event::NewPiece(_) | Event::Paused | Event::Resumed => {}
            }
        }
        flow
    }
}
