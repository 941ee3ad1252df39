/// Events emitted by input handling and simulation steps.
/// The driver logs them; tests assert on them.

#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    CharacterSelected { index: usize },
    GameStarted { character: usize },
    GemCollected { score: u32, gems: u32 },
    KeySpawned { x: f32, y: f32 },
    KeyCollected,
    LevelUp { level: u32, enemies: usize },
    PlayerHit,
    /// A reset was requested mid-slide and waits for the lock.
    ResetDeferred,
    SessionReset,
}
