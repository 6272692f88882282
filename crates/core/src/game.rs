//! Game module - the session controller
//!
//! Owns the field, the active piece and the lookahead kind, and turns intents
//! plus elapsed time into piece motion, landings, scoring and state changes.
//!
//! Each of the three actions (move, rotate, fall) has its own timer. A call to
//! [`Game::update`] adds the elapsed time to every timer; a timer whose total
//! is strictly greater than its threshold fires its action once and restarts
//! from zero. A long stall therefore costs at most one action per timer, and
//! every action still goes through the collision check.

use log::{debug, info, trace};

use crate::config::GameConfig;
use crate::field::Field;
use crate::piece::Piece;
use crate::rng::{KindSource, UniformKinds};
use crate::scoring::{landing_points, level_for_score};
use crate::snapshot::GameSnapshot;
use crate::types::{Coord, Intent, PieceKind, SessionState};

/// Result of one gravity step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallOutcome {
    /// The piece moved down one row.
    Fell,
    /// The piece landed and the next one spawned.
    Landed { lines_cleared: u32 },
    /// The piece landed but the next one had no room; the game is over.
    ToppedOut { lines_cleared: u32 },
    /// Not running; nothing happened.
    Idle,
}

/// Recorded once per landing; read it back with [`Game::take_last_event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LandingEvent {
    pub lines_cleared: u32,
    /// Points awarded for this landing
    pub points: u32,
    /// Level after scoring
    pub level: u32,
    pub topped_out: bool,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct Game<S: KindSource = UniformKinds> {
    config: GameConfig,
    field: Field,
    active: Piece,
    next_kind: PieceKind,
    source: S,
    state: SessionState,
    score: u32,
    lines: u32,
    level: u32,
    left_held: bool,
    right_held: bool,
    rotate_held: bool,
    soft_drop_held: bool,
    move_timer_ms: u32,
    rotate_timer_ms: u32,
    fall_timer_ms: u32,
    /// Last landing, until taken.
    last_event: Option<LandingEvent>,
}

impl Game<UniformKinds> {
    /// New session with default tuning and a uniform kind generator.
    pub fn new(seed: u32) -> Self {
        Self::with_source(GameConfig::default(), UniformKinds::new(seed))
    }

    pub fn with_config(config: GameConfig, seed: u32) -> Self {
        Self::with_source(config, UniformKinds::new(seed))
    }

    /// Seed the kind generator was created with.
    pub fn seed(&self) -> u32 {
        self.source.seed()
    }
}

impl<S: KindSource> Game<S> {
    /// New session drawing kinds from `source`. The first piece is already
    /// spawned and the game is running.
    pub fn with_source(config: GameConfig, mut source: S) -> Self {
        let config = config.sanitized();
        let next_kind = source.next_kind();
        let mut game = Self {
            config,
            field: Field::new(config.field_width, config.field_height),
            active: Piece::new(),
            next_kind,
            source,
            state: SessionState::Running,
            score: 0,
            lines: 0,
            level: 0,
            left_held: false,
            right_held: false,
            rotate_held: false,
            soft_drop_held: false,
            move_timer_ms: 0,
            rotate_timer_ms: 0,
            fall_timer_ms: 0,
            last_event: None,
        };
        game.spawn_next();
        game
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_paused(&self) -> bool {
        self.state == SessionState::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.state == SessionState::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn field_size(&self) -> (u16, u16) {
        self.field.size()
    }

    /// Occupancy of a landed cell; see [`Field::occupancy`].
    pub fn cell_at(&self, x: i32, y: i32) -> u8 {
        self.field.occupancy(x, y)
    }

    pub fn active(&self) -> &Piece {
        &self.active
    }

    pub fn active_tiles(&self) -> &[Coord; 4] {
        self.active.tiles()
    }

    pub fn active_kind(&self) -> Option<PieceKind> {
        self.active.kind()
    }

    pub fn next_kind(&self) -> PieceKind {
        self.next_kind
    }

    /// Current fall threshold (accelerated while soft drop is held).
    pub fn fall_delay_ms(&self) -> u32 {
        self.config.fall_delay_ms(self.level, self.soft_drop_held)
    }

    /// Install the lookahead kind as the active piece and draw a new lookahead.
    ///
    /// Returns false (and ends the game) if the new piece overlaps the field.
    pub fn spawn_next(&mut self) -> bool {
        self.active = Piece::spawn(self.next_kind);
        self.next_kind = self.source.next_kind();
        trace!(
            "spawned {:?}, next {:?}",
            self.active.kind(),
            self.next_kind
        );

        if self.field.intersects(&self.active) {
            self.state = SessionState::GameOver;
            info!(
                "game over: score {} lines {} level {}",
                self.score, self.lines, self.level
            );
            return false;
        }
        true
    }

    /// Apply one player intent
    pub fn apply_intent(&mut self, intent: Intent) {
        match intent {
            Intent::Reset => self.reset(),
            Intent::TogglePause => {
                self.state = match self.state {
                    SessionState::Running => SessionState::Paused,
                    SessionState::Paused => SessionState::Running,
                    SessionState::GameOver => SessionState::GameOver,
                };
            }
            _ if self.state == SessionState::GameOver => {}
            Intent::MoveLeft(held) => {
                if held && !self.left_held {
                    self.move_timer_ms = self.config.move_delay_ms;
                }
                self.left_held = held;
            }
            Intent::MoveRight(held) => {
                if held && !self.right_held {
                    self.move_timer_ms = self.config.move_delay_ms;
                }
                self.right_held = held;
            }
            Intent::Rotate(held) => {
                if held && !self.rotate_held {
                    self.rotate_timer_ms = self.config.rotate_delay_ms;
                }
                self.rotate_held = held;
            }
            Intent::SoftDrop(held) => self.soft_drop_held = held,
        }
    }

    /// Net horizontal direction of the held keys: -1, 0 or +1.
    fn horizontal_direction(&self) -> i32 {
        (self.right_held as i32) - (self.left_held as i32)
    }

    /// Advance the simulation by `elapsed_ms`.
    ///
    /// Returns true if the active piece or the field changed.
    pub fn update(&mut self, elapsed_ms: u32) -> bool {
        if self.state != SessionState::Running {
            return false;
        }
        let mut changed = false;

        self.move_timer_ms = self.move_timer_ms.saturating_add(elapsed_ms);
        if self.move_timer_ms > self.config.move_delay_ms {
            let dx = self.horizontal_direction();
            if dx != 0 {
                changed |= self.try_shift(dx);
            }
            self.move_timer_ms = 0;
        }

        self.rotate_timer_ms = self.rotate_timer_ms.saturating_add(elapsed_ms);
        if self.rotate_timer_ms > self.config.rotate_delay_ms {
            if self.rotate_held {
                changed |= self.try_rotate();
            }
            self.rotate_timer_ms = 0;
        }

        self.fall_timer_ms = self.fall_timer_ms.saturating_add(elapsed_ms);
        if self.fall_timer_ms > self.fall_delay_ms() {
            changed |= self.fall_step() != FallOutcome::Idle;
            self.fall_timer_ms = 0;
        }

        changed
    }

    /// Move the active piece `dx` columns if the target is free.
    pub fn try_shift(&mut self, dx: i32) -> bool {
        if self.state != SessionState::Running {
            return false;
        }
        let mut candidate = self.active;
        candidate.translate(dx);
        if self.field.intersects(&candidate) {
            return false;
        }
        self.active = candidate;
        true
    }

    /// Rotate the active piece if the target is free.
    pub fn try_rotate(&mut self) -> bool {
        if self.state != SessionState::Running {
            return false;
        }
        let mut candidate = self.active;
        candidate.rotate();
        if self.field.intersects(&candidate) {
            return false;
        }
        self.active = candidate;
        true
    }

    /// One gravity step: fall a row, or land if the row below is blocked.
    pub fn fall_step(&mut self) -> FallOutcome {
        if self.state != SessionState::Running {
            return FallOutcome::Idle;
        }

        let mut candidate = self.active;
        candidate.fall();
        if !self.field.intersects(&candidate) {
            self.active = candidate;
            return FallOutcome::Fell;
        }

        let lines_cleared = self.land();
        if self.spawn_next() {
            FallOutcome::Landed { lines_cleared }
        } else {
            if let Some(event) = self.last_event.as_mut() {
                event.topped_out = true;
            }
            FallOutcome::ToppedOut { lines_cleared }
        }
    }

    /// Commit the active piece, clear rows and score the landing.
    fn land(&mut self) -> u32 {
        self.field.commit(&self.active);
        let lines_cleared = self.field.clear_full_rows();

        let points = landing_points(lines_cleared);
        self.score = self.score.saturating_add(points);
        self.lines = self.lines.saturating_add(lines_cleared);
        self.level = level_for_score(self.score, self.config.level_divisor);

        debug!(
            "landed {:?}: {} lines, +{} points, level {}",
            self.active.kind(),
            lines_cleared,
            points,
            self.level
        );

        self.last_event = Some(LandingEvent {
            lines_cleared,
            points,
            level: self.level,
            topped_out: false,
        });
        lines_cleared
    }

    /// Take and clear the last landing event.
    pub fn take_last_event(&mut self) -> Option<LandingEvent> {
        self.last_event.take()
    }

    /// Reinitialize the session: empty field, zeroed counters, fresh lookahead
    /// and a freshly spawned piece.
    pub fn reset(&mut self) {
        self.field.reset();
        self.score = 0;
        self.lines = 0;
        self.level = 0;
        self.state = SessionState::Running;
        self.left_held = false;
        self.right_held = false;
        self.rotate_held = false;
        self.soft_drop_held = false;
        self.move_timer_ms = 0;
        self.rotate_timer_ms = 0;
        self.fall_timer_ms = 0;
        self.last_event = None;
        self.next_kind = self.source.next_kind();
        self.spawn_next();
        info!("session reset");
    }

    /// Copy the render-facing state into a reusable snapshot.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        let (width, height) = self.field.size();
        out.width = width;
        out.height = height;
        out.field.clear();
        out.field.extend_from_slice(self.field.cells());
        out.active = *self.active.tiles();
        out.active_kind = self.active.kind();
        out.next_kind = self.next_kind;
        out.score = self.score;
        out.lines = self.lines;
        out.level = self.level;
        out.state = self.state;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(1)
    }
}
