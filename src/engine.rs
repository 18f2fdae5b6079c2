//! Game engine: phase state machine over the board, the falling piece and the score.

use crate::board::Board;
use crate::rng::{PieceSource, RandomPieces};
use crate::shapes::{ColorId, Shape, ShapeCatalog, ShapeKind};

/// Points per cleared row. No combos, no level multiplier.
pub const ROW_CLEAR_POINTS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Playing,
    Paused,
    GameOver,
}

/// Discrete commands fed by the input layer and the timing driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    Rotate,
    SoftDrop,
    TogglePause,
    /// Gravity step; sent by the timing driver at its configured cadence.
    Tick,
    Quit,
    Restart,
}

/// What happened during a command, in order. Drained by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    GameStarted,
    NewPiece(ShapeKind),
    RowsCleared(u32),
    Paused,
    Resumed,
    GameOver { score: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Falling piece: current shape matrix and the board position of its top-left corner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivePiece {
    shape: Shape,
    x: i32,
    y: i32,
}

impl ActivePiece {
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    /// Absolute `(x, y, color)` of every filled cell.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32, ColorId)> + '_ {
        self.shape
            .filled_cells()
            .map(move |(dx, dy, c)| (self.x + dx as i32, self.y + dy as i32, c))
    }
}

pub struct Engine<P: PieceSource = RandomPieces> {
    catalog: ShapeCatalog,
    source: P,
    board: Board,
    piece: Option<ActivePiece>,
    score: u32,
    phase: Phase,
    events: Vec<Event>,
}

impl<P: PieceSource> Engine<P> {
    /// Empty `rows × cols` board with the first piece already spawned.
    pub fn new(rows: usize, cols: usize, catalog: ShapeCatalog, source: P) -> Self {
        Self::with_board(Board::new(rows, cols), catalog, source)
    }

    /// Engine around a prepared board. Spawns the first piece; if it collides the
    /// engine starts in `GameOver`.
    pub fn with_board(board: Board, catalog: ShapeCatalog, source: P) -> Self {
        let mut engine = Self {
            catalog,
            source,
            board,
            piece: None,
            score: 0,
            phase: Phase::NotStarted,
            events: Vec::new(),
        };
        engine.spawn();
        engine
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn piece(&self) -> Option<&ActivePiece> {
        self.piece.as_ref()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn catalog(&self) -> &ShapeCatalog {
        &self.catalog
    }

    /// Events emitted since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    /// Dispatch one command according to the current phase.
    pub fn apply(&mut self, command: Command) -> Flow {
        if command == Command::Quit {
            return Flow::Quit;
        }
        match self.phase {
            Phase::NotStarted => {
                if command != Command::Tick {
                    self.phase = Phase::Playing;
                    self.events.push(Event::GameStarted);
                }
            }
            Phase::Playing => match command {
                Command::MoveLeft => {
                    self.move_piece(-1);
                }
                Command::MoveRight => {
                    self.move_piece(1);
                }
                Command::Rotate => {
                    self.rotate();
                }
                Command::SoftDrop => self.drop(),
                Command::Tick => self.tick(),
                Command::TogglePause => self.toggle_pause(),
                Command::Quit | Command::Restart => {}
            },
            Phase::Paused => {
                if command == Command::TogglePause {
                    self.toggle_pause();
                }
            }
            Phase::GameOver => {
                if command == Command::Restart {
                    self.restart();
                }
            }
        }
        Flow::Continue
    }

    /// Gravity tick: one `drop` while playing, nothing otherwise.
    pub fn tick(&mut self) {
        if self.phase == Phase::Playing {
            self.drop();
        }
    }

    /// Shift the piece horizontally. The target is clamped to `[0, cols - width]`
    /// and then checked for collision. Returns true if the piece moved.
    pub fn move_piece(&mut self, dx: i32) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        let Some(piece) = self.piece.as_mut() else {
            return false;
        };
        let max_x = (self.board.cols() as i32 - piece.shape.width() as i32).max(0);
        let target = (piece.x + dx).clamp(0, max_x);
        if target == piece.x || self.board.collides(&piece.shape, target, piece.y) {
            return false;
        }
        piece.x = target;
        true
    }

    /// Rotate clockwise in place. No wall kicks: rejected if the rotated shape collides.
    pub fn rotate(&mut self) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        let Some(piece) = self.piece.as_mut() else {
            return false;
        };
        let rotated = piece.shape.rotated();
        if self.board.collides(&rotated, piece.x, piece.y) {
            return false;
        }
        piece.shape = rotated;
        true
    }

    /// Move the piece down one row, or lock it, clear rows, score and spawn the next.
    pub fn drop(&mut self) {
        if self.phase != Phase::Playing {
            return;
        }
        let Some(piece) = self.piece.as_mut() else {
            return;
        };
        if !self.board.collides(&piece.shape, piece.x, piece.y + 1) {
            piece.y += 1;
            return;
        }
        if let Some(locked) = self.piece.take() {
            self.board.merge(&locked.shape, locked.x, locked.y);
        }
        let cleared = self.board.clear_full_rows();
        if cleared > 0 {
            self.score = self.score.saturating_add(ROW_CLEAR_POINTS * cleared);
            self.events.push(Event::RowsCleared(cleared));
        }
        self.spawn();
    }

    /// `Playing` ↔ `Paused`; ignored in other phases.
    pub fn toggle_pause(&mut self) {
        match self.phase {
            Phase::Playing => {
                self.phase = Phase::Paused;
                self.events.push(Event::Paused);
            }
            Phase::Paused => {
                self.phase = Phase::Playing;
                self.events.push(Event::Resumed);
            }
            Phase::NotStarted | Phase::GameOver => {}
        }
    }

    /// Fresh board and score after a finished game.
    pub fn restart(&mut self) {
        if self.phase != Phase::GameOver {
            return;
        }
        self.board = Board::new(self.board.rows(), self.board.cols());
        self.score = 0;
        self.phase = Phase::Playing;
        self.events.push(Event::GameStarted);
        self.spawn();
    }

    /// Uniform pick, centred at the top. Colliding on spawn ends the game.
    fn spawn(&mut self) {
        let count = self.catalog.len();
        let index = self.source.next_index(count) % count;
        let shape = self.catalog.shapes()[index].clone();
        let x = self.board.cols() as i32 / 2 - shape.width() as i32 / 2;
        if self.board.collides(&shape, x, 0) {
            self.piece = None;
            self.phase = Phase::GameOver;
            log::debug!("spawn blocked, game over at score {}", self.score);
            self.events.push(Event::GameOver { score: self.score });
            return;
        }
        self.events.push(Event::NewPiece(shape.kind()));
        self.piece = Some(ActivePiece { shape, x, y: 0 });
    }
}
