//! One player's session: the engine plus its score store and audio sink.

use crate::audio::{AudioCue, AudioSink};
use crate::engine::{Command, Engine, Event, Flow};
use crate::highscores::{HighScore, ScoreStore};
use crate::rng::PieceSource;

pub struct Session<P, S, A>
where
    P: PieceSource,
    S: ScoreStore,
    A: AudioSink,
{
    engine: Engine<P>,
    store: S,
    audio: A,
    player: String,
    high_score: HighScore,
    /// Set when the last finished game beat the stored high score.
    new_high_score: bool,
    events: Vec<Event>,
}

impl<P, S, A> Session<P, S, A>
where
    P: PieceSource,
    S: ScoreStore,
    A: AudioSink,
{
    /// Reads the high score once; the store reports a missing file as zero.
    pub fn new(engine: Engine<P>, store: S, audio: A, player: impl Into<String>) -> Self {
        let high_score = store.read_high_score();
        let mut session = Self {
            engine,
            store,
            audio,
            player: player.into(),
            high_score,
            new_high_score: false,
            events: Vec::new(),
        };
        // The first spawn may already have ended the game.
        session.route_events();
        session
    }

    pub fn engine(&self) -> &Engine<P> {
        &self.engine
    }

    pub fn player(&self) -> &str {
        &self.player
    }

    pub fn high_score(&self) -> &HighScore {
        &self.high_score
    }

    pub fn new_high_score(&self) -> bool {
        self.new_high_score
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn apply(&mut self, command: Command) -> Flow {
        let flow = self.engine.apply(command);
        self.route_events();
        flow
    }

    /// Engine events since the last drain, for the renderer.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    fn route_events(&mut self) {
        for event in self.engine.drain_events() {
            match event {
                Event::GameStarted => {
                    self.new_high_score = false;
                    self.audio.cue(AudioCue::GameStarted);
                }
                Event::RowsCleared(n) => self.audio.cue(AudioCue::RowsCleared(n)),
                Event::Paused => self.audio.cue(AudioCue::Paused),
                Event::Resumed => self.audio.cue(AudioCue::Resumed),
                Event::GameOver { score } => self.finish_game(score),
                Event::NewPiece(_) => {}
            }
            self.events.push(event);
        }
    }

    /// Persist the result. Write failures are logged and never reach gameplay state.
    fn finish_game(&mut self, score: u32) {
        if score > self.high_score.score {
            if let Err(err) = self.store.write_high_score(score, &self.player) {
                log::warn!("could not save high score: {err}");
            }
            self.high_score = HighScore {
                score,
                player: self.player.clone(),
            };
            self.new_high_score = true;
            self.audio.cue(AudioCue::GameOverWithNewHighScore);
        } else {
            if let Err(err) = self.store.append_score(score, &self.player) {
                log::warn!("could not append score: {err}");
            }
            self.new_high_score = false;
            self.audio.cue(AudioCue::GameOverNormal);
        }
        log::info!("game over: {} scored {score}", self.player);
    }
}
