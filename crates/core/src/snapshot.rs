use crate::types::{Coord, PieceKind, SessionState, BLOCKED};

/// Render-facing copy of a session.
///
/// Filled by [`Game::snapshot_into`](crate::Game::snapshot_into); reusing one
/// snapshot across frames keeps the field buffer allocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub width: u16,
    pub height: u16,
    /// Row-major occupancy, `width * height` entries
    pub field: Vec<u8>,
    pub active: [Coord; 4],
    pub active_kind: Option<PieceKind>,
    pub next_kind: PieceKind,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub state: SessionState,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.width = 0;
        self.height = 0;
        self.field.clear();
        self.active = [(0, 0); 4];
        self.active_kind = None;
        self.next_kind = PieceKind::I;
        self.score = 0;
        self.lines = 0;
        self.level = 0;
        self.state = SessionState::Running;
    }

    /// Landed occupancy at (x, y), [`BLOCKED`] outside the field.
    pub fn cell(&self, x: i32, y: i32) -> u8 {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return BLOCKED;
        }
        self.field
            .get(y as usize * self.width as usize + x as usize)
            .copied()
            .unwrap_or(BLOCKED)
    }

    pub fn playable(&self) -> bool {
        self.state == SessionState::Running
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            field: Vec::new(),
            active: [(0, 0); 4],
            active_kind: None,
            next_kind: PieceKind::I,
            score: 0,
            lines: 0,
            level: 0,
            state: SessionState::Running,
        }
    }
}
