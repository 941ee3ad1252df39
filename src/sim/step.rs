/// The step function: advances the world by one tick.
///
/// Processing order:
///   1. Clock advance (wall-clock dt)
///   2. Slide tween: commit due steps, release lock, finish a pending reset
///   3. Entity updates (enemy patrol / respawn)
///   4. Contact detection → session flags
///   5. Progression: enemy → reset, gem → score/key, key → level-up
///
/// Input arrives between ticks through `handle_command`. Both run on the
/// driver's thread; the slide tween is the only deferred work and it is
/// driven by the same clock, so nothing here ever blocks or polls.

use rand::Rng;
use tracing::debug;

use crate::domain::entity::{Enemy, Entity};
use crate::domain::player::{Choice, Command, SlideProgress};
use crate::domain::rules;
use super::event::GameEvent;
use super::world::WorldState;

// ══════════════════════════════════════════════════════════════
// Main entry points
// ══════════════════════════════════════════════════════════════

pub fn step<R: Rng + ?Sized>(world: &mut WorldState, dt: f32, rng: &mut R) -> Vec<GameEvent> {
    let mut events: Vec<GameEvent> = Vec::new();
    world.clock_ms += f64::from(dt) * 1000.0;

    resolve_slide(world, &mut events);
    update_entities(world, dt, rng);

    // Flags are cleared by the reset itself; nothing scores meanwhile.
    if world.reset_pending {
        return events;
    }

    world.session.collisions = rules::detect(&world.player, &world.enemies, &world.gem, &world.key);
    resolve_progression(world, rng, &mut events);

    events
}

/// Route one decoded directional command.
pub fn handle_command(world: &mut WorldState, command: Command) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if !world.session.started {
        match world.player.choose(command) {
            Choice::Start => {
                world.session.started = true;
                events.push(GameEvent::GameStarted { character: world.player.character });
            }
            Choice::Changed(index) => events.push(GameEvent::CharacterSelected { index }),
            Choice::Unchanged => {}
        }
        return events;
    }

    if !world.player.handle_input(command, world.clock_ms, world.slide_timing) {
        debug!(?command, locked = world.player.is_locked(), "move dropped");
    } else if let Some(slide) = world.player.slide() {
        debug!(?command, delta = ?slide.delta(), "slide started");
    }
    events
}

/// One driver frame: advance the world by `dt`, then apply the commands
/// read during that frame. Slides start at the clock of the frame the
/// key arrived in.
pub fn tick<R: Rng + ?Sized>(
    world: &mut WorldState,
    commands: &[Command],
    dt: f32,
    rng: &mut R,
) -> Vec<GameEvent> {
    let mut events = step(world, dt, rng);
    for &command in commands {
        events.extend(handle_command(world, command));
    }
    events
}

/// Reset the session, now if the player is settled, otherwise as soon as
/// the in-flight slide releases its lock.
pub fn request_reset(world: &mut WorldState, events: &mut Vec<GameEvent>) {
    if world.reset_pending {
        return;
    }
    if world.player.reset() {
        apply_session_reset(world, events);
    } else {
        debug!(clock_ms = world.clock_ms, "reset deferred until slide completes");
        world.reset_pending = true;
        events.push(GameEvent::ResetDeferred);
    }
}

// ══════════════════════════════════════════════════════════════
// Slide & reset
// ══════════════════════════════════════════════════════════════

fn resolve_slide(world: &mut WorldState, events: &mut Vec<GameEvent>) {
    let progress = world.player.advance(world.clock_ms);
    if progress == SlideProgress::Released && world.reset_pending && world.player.reset() {
        apply_session_reset(world, events);
    }
}

fn apply_session_reset(world: &mut WorldState, events: &mut Vec<GameEvent>) {
    world.reset_pending = false;
    world.session.reset_progress();
    world.enemies.truncate(world.initial_enemies);
    events.push(GameEvent::SessionReset);
}

// ══════════════════════════════════════════════════════════════
// Entities
// ══════════════════════════════════════════════════════════════

fn update_entities<R: Rng + ?Sized>(world: &mut WorldState, dt: f32, rng: &mut R) {
    let factor = world.session.speed_factor;
    for enemy in world.enemies.iter_mut() {
        enemy.update(dt, factor, rng);
    }
    world.player.update(dt, factor, rng);
}

// ══════════════════════════════════════════════════════════════
// Progression
// ══════════════════════════════════════════════════════════════

fn resolve_progression<R: Rng + ?Sized>(world: &mut WorldState, rng: &mut R, events: &mut Vec<GameEvent>) {
    if !world.session.collisions.any() {
        return;
    }

    if world.session.collisions.enemy {
        // A key touched on the same tick is still consumed.
        if world.session.collisions.key {
            collect_key(world, rng, events);
        }
        events.push(GameEvent::PlayerHit);
        request_reset(world, events);
        // Either done (flags cleared) or pending (progression suspended).
        return;
    }

    if world.session.collisions.gem {
        world.session.collisions.gem = false;
        let key_due = world.session.collect_gem();
        events.push(GameEvent::GemCollected {
            score: world.session.score,
            gems: world.session.gems_this_level,
        });
        if key_due && !world.key.is_active() {
            world.key.spawn(rng, &world.gem);
            events.push(GameEvent::KeySpawned { x: world.key.pos.x, y: world.key.pos.y });
        }
        world.gem.spawn(rng, &world.key);
    }

    if world.session.collisions.key {
        collect_key(world, rng, events);
    }
}

fn collect_key<R: Rng + ?Sized>(world: &mut WorldState, rng: &mut R, events: &mut Vec<GameEvent>) {
    world.session.collisions.key = false;
    level_up(world, rng, events);
    world.key.out();
    events.push(GameEvent::KeyCollected);
}

fn level_up<R: Rng + ?Sized>(world: &mut WorldState, rng: &mut R, events: &mut Vec<GameEvent>) {
    world.session.level_up();
    world.enemies.push(Enemy::spawned(rng, world.session.speed_factor));
    events.push(GameEvent::LevelUp {
        level: world.session.level,
        enemies: world.enemies.len(),
    });
}
