/// Entry point and game loop.

mod config;
mod domain;
mod error;
mod logging;
mod sim;
mod ui;

use std::time::{Duration, Instant};

use rand::Rng;
use tracing::{debug, error, info, warn};

use config::GameConfig;
use domain::sprite::ALL_SPRITES;
use error::GameResult;
use sim::event::GameEvent;
use sim::step;
use sim::world::WorldState;
use ui::input::InputState;
use ui::renderer::Renderer;
use ui::sprites::SpriteCache;

fn main() {
    let (config, warnings) = GameConfig::load();

    if let Err(e) = logging::init(&config.general) {
        eprintln!("Logging disabled: {e}");
    }
    for w in &warnings {
        warn!("config: {w}");
    }
    info!(
        enemies = config.game.enemies,
        character = config.game.character,
        frame_ms = config.timing.frame_ms,
        "starting"
    );

    let mut rng = rand::thread_rng();
    let mut world = WorldState::new(&config, &mut rng);

    let mut sprites = SpriteCache::new();
    sprites.load(&ALL_SPRITES);
    if !sprites.is_ready(&ALL_SPRITES) {
        error!("sprite cache incomplete");
        eprintln!("Sprite cache incomplete");
        return;
    }

    let mut renderer = Renderer::new(sprites);

    if let Err(e) = renderer.init() {
        error!("terminal init failed: {e}");
        eprintln!("Terminal init failed: {e}");
        return;
    }

    let result = game_loop(&mut world, &mut renderer, &mut rng, &config);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }

    if let Err(e) = result {
        error!("game loop aborted: {e}");
        eprintln!("Game error: {e}");
    }

    info!(score = world.session.score, level = world.session.level, "exiting");
    println!();
    println!("Thanks for playing Frogger!");
    println!("Final Score: {}  Level: {}", world.session.score, world.session.level);
}

fn game_loop<R: Rng + ?Sized>(
    world: &mut WorldState,
    renderer: &mut Renderer,
    rng: &mut R,
    config: &GameConfig,
) -> GameResult<()> {
    let mut kb = InputState::new();
    let tick_rate = Duration::from_millis(config.timing.frame_ms);

    let mut events = Vec::new();
    step::request_reset(world, &mut events);
    log_events(&events);

    let mut last_tick = Instant::now();

    loop {
        let frame_start = Instant::now();

        kb.drain_events();
        if kb.quit_requested() {
            break;
        }
        let now = Instant::now();
        let dt = now.duration_since(last_tick).as_secs_f32();
        last_tick = now;

        log_events(&step::tick(world, &kb.commands, dt, rng));
        renderer.render(world)?;

        if let Some(rest) = tick_rate.checked_sub(frame_start.elapsed()) {
            std::thread::sleep(rest);
        }
    }

    Ok(())
}

fn log_events(events: &[GameEvent]) {
    for event in events {
        match *event {
            GameEvent::CharacterSelected { index } => debug!(index, "character selected"),
            GameEvent::GameStarted { character } => info!(character, "game started"),
            GameEvent::GemCollected { score, gems } => debug!(score, gems, "gem collected"),
            GameEvent::KeySpawned { x, y } => debug!(x, y, "key spawned"),
            GameEvent::KeyCollected => info!("key collected"),
            GameEvent::LevelUp { level, enemies } => info!(level, enemies, "level up"),
            GameEvent::PlayerHit => info!("player hit"),
            GameEvent::ResetDeferred => debug!("reset deferred"),
            GameEvent::SessionReset => debug!("session reset"),
        }
    }
}
