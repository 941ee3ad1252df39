/// The player: character selection, grid moves, and the slide tween.
///
/// ## Modes
///
///   **Selecting**: before the session starts. Left/Right cycle the
///   character, Up starts the game. Handled by `choose()`.
///
///   **Playing**: directional commands request a one-cell move. Handled
///   by `handle_input()`.
///
/// ## Slide
///
/// A legal move does not jump. It starts a `Slide`: a small tween that owns
/// its start position and per-step delta and commits position only at step
/// boundaries as the simulation clock passes them. While a slide exists the
/// player is *locked*: further moves are dropped and `reset()` refuses.
/// The lock is released a fixed delay after the slide began, and
/// `advance()` reports that moment so callers waiting on it (a pending
/// session reset) can act without polling.

use super::board::{Pos, MOVE_X, MOVE_Y, START};
use super::entity::Entity;
use super::sprite::{Character, Sprite};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    Up,
    Down,
    Left,
    Right,
}

impl Command {
    /// Cell offset for a move in this direction.
    fn offset(self) -> (f32, f32) {
        match self {
            Command::Up => (0.0, -MOVE_Y),
            Command::Down => (0.0, MOVE_Y),
            Command::Left => (-MOVE_X, 0.0),
            Command::Right => (MOVE_X, 0.0),
        }
    }
}

/// Outcome of a selecting-mode command.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Choice {
    Start,
    Changed(usize),
    Unchanged,
}

/// Slide cadence, in milliseconds of simulation time.
#[derive(Clone, Copy, Debug)]
pub struct SlideTiming {
    pub steps: u32,
    pub step_ms: f64,
    pub release_ms: f64,
}

impl Default for SlideTiming {
    fn default() -> Self {
        SlideTiming { steps: 5, step_ms: 15.0, release_ms: 70.0 }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SlideProgress {
    /// No slide in flight.
    Idle,
    /// Slide in flight, lock held.
    Moving,
    /// The slide finished and the lock was released during this call.
    Released,
}

/// One cell-to-cell transition.
#[derive(Clone, Debug)]
pub struct Slide {
    from: Pos,
    /// Per-step delta (cell offset / steps).
    delta: (f32, f32),
    started_at: f64,
    committed: u32,
    timing: SlideTiming,
}

impl Slide {
    fn new(from: Pos, command: Command, now: f64, timing: SlideTiming) -> Self {
        let (dx, dy) = command.offset();
        let steps = timing.steps.max(1) as f32;
        Slide {
            from,
            delta: (dx / steps, dy / steps),
            started_at: now,
            committed: 0,
            timing,
        }
    }

    /// Steps whose scheduled time is at or before `now`. Step `i` is due at
    /// `started_at + i * step_ms`.
    fn due_steps(&self, now: f64) -> u32 {
        let elapsed = now - self.started_at;
        if elapsed < 0.0 {
            return 0;
        }
        let steps = self.timing.steps.max(1);
        if self.timing.step_ms <= 0.0 {
            return steps;
        }
        ((elapsed / self.timing.step_ms).floor() as u32 + 1).min(steps)
    }

    fn position_after(&self, steps: u32) -> Pos {
        let k = steps as f32;
        self.from.offset(self.delta.0 * k, self.delta.1 * k)
    }

    fn is_released(&self, now: f64) -> bool {
        self.committed >= self.timing.steps.max(1) && now - self.started_at >= self.timing.release_ms
    }

    pub fn delta(&self) -> (f32, f32) {
        self.delta
    }
}

#[derive(Clone, Debug)]
pub struct Player {
    pub pos: Pos,
    /// Selected character, 0..=4.
    pub character: usize,
    slide: Option<Slide>,
}

impl Player {
    pub fn new(character: usize) -> Self {
        Player {
            pos: START,
            character: character.min(Character::ALL.len() - 1),
            slide: None,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.slide.is_some()
    }

    /// The in-flight slide, if any.
    pub fn slide(&self) -> Option<&Slide> {
        self.slide.as_ref()
    }

    /// Selecting-mode command. Up starts the game; Left/Right pick a character.
    pub fn choose(&mut self, command: Command) -> Choice {
        let last = Character::ALL.len() - 1;
        let next = match command {
            Command::Up => return Choice::Start,
            Command::Left => self.character.saturating_sub(1),
            Command::Right => (self.character + 1).min(last),
            Command::Down => return Choice::Unchanged,
        };
        if next == self.character {
            Choice::Unchanged
        } else {
            self.character = next;
            Choice::Changed(next)
        }
    }

    /// Playing-mode command. Starts a slide toward the adjacent cell.
    ///
    /// Returns false when the command was dropped: either the lock is held
    /// or the target lies outside the playable area. Neither case touches
    /// position or lock.
    pub fn handle_input(&mut self, command: Command, now: f64, timing: SlideTiming) -> bool {
        if self.is_locked() {
            return false;
        }
        // Unlocked means settled on a cell, so this is both the pre-slide
        // and the live position.
        let (dx, dy) = command.offset();
        if !self.pos.offset(dx, dy).in_player_area() {
            return false;
        }
        self.slide = Some(Slide::new(self.pos, command, now, timing));
        true
    }

    /// Commit slide steps that are due at `now` and release the lock once
    /// the release delay has passed.
    pub fn advance(&mut self, now: f64) -> SlideProgress {
        let slide = match self.slide.as_mut() {
            Some(s) => s,
            None => return SlideProgress::Idle,
        };
        let due = slide.due_steps(now);
        if due > slide.committed {
            slide.committed = due;
            self.pos = slide.position_after(due);
        }
        if slide.is_released(now) {
            self.slide = None;
            SlideProgress::Released
        } else {
            SlideProgress::Moving
        }
    }

    /// Back to the start cell. Refuses (and changes nothing) mid-slide.
    pub fn reset(&mut self) -> bool {
        if self.is_locked() {
            return false;
        }
        self.pos = START;
        true
    }
}

impl Entity for Player {
    fn position(&self) -> Pos {
        self.pos
    }

    fn sprite(&self) -> Sprite {
        Sprite::Character(Character::from_index(self.character))
    }
}
