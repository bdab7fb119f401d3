//! spriteclip command-line player.
//!
//! Loads a movie clip description, spawns one animated entity from it and
//! runs the animation headless for a number of ticks, logging the drawable
//! and position published on every tick. Every `--switch-every` ticks a
//! random registered clip is selected, the way a game would react to input.
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run -- assets/Engo.mc.json --ticks 100 --switch-every 25
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use clap::Parser;
use glam::Vec2;

use spriteclip::components::animation::AnimationComponent;
use spriteclip::components::mapposition::MapPosition;
use spriteclip::components::sprite::Sprite;
use spriteclip::driver::{AnimatedBundle, AnimationDriver};
use spriteclip::events::animation::ClipFinished;
use spriteclip::resources::animationconfig::AnimationConfig;
use spriteclip::resources::assetstore::AssetStore;
use spriteclip::resources::movieclip::MovieClipResource;
use spriteclip::resources::movieclipstore::MovieClipStore;

/// Headless sprite animation player
#[derive(Parser)]
#[command(version, about = "Plays movie clip animations headless and logs every frame.")]
struct Cli {
    /// Movie clip description, relative to the assets directory.
    movie_clip: String,

    /// Directory asset URLs are resolved against.
    #[arg(long, default_value = ".")]
    assets: PathBuf,

    /// INI configuration file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Number of ticks to run.
    #[arg(long, default_value_t = 100)]
    ticks: u32,

    /// Seconds per tick.
    #[arg(long, default_value_t = 0.04)]
    dt: f32,

    /// Select a random clip every N ticks (0 disables).
    #[arg(long, default_value_t = 0)]
    switch_every: u32,

    /// Seed for random clip selection.
    #[arg(long)]
    seed: Option<u64>,
}

/// Entity assembled from a movie clip, the way a scene would build its hero.
fn hero(resource: &MovieClipResource, position: Vec2, rate: f32) -> Option<AnimatedBundle> {
    let drawable = resource.first_drawable()?;

    let mut animation = AnimationComponent::new(resource.spritesheet.drawables(), rate);
    animation.add_clips(resource.clips.iter().cloned());
    if let Some(default) = &resource.default_clip {
        animation.add_default_clip(default.clone());
    }

    Some(AnimatedBundle {
        position: MapPosition {
            pos: Vec2::new(
                position.x + drawable.width(),
                position.y - drawable.height(),
            ),
        },
        sprite: Sprite::new(drawable),
        animation,
    })
}

fn select_random_clip(animation: &mut AnimationComponent, rng: &mut fastrand::Rng) {
    let mut names: Vec<&String> = animation.clips.keys().collect();
    if names.is_empty() {
        return;
    }
    names.sort();
    let name = names[rng.usize(..names.len())].clone();
    log::info!("Selecting clip {:?}", name);
    animation.select_by_name(&name);
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AnimationConfig::with_path(path),
        None => AnimationConfig::new(),
    };
    if let Err(e) = config.load_from_file() {
        log::debug!("{}; using defaults", e);
    }

    let mut assets = AssetStore::new(&cli.assets);
    let mut clips = MovieClipStore::new();
    let resource = match clips.load(&cli.movie_clip, &mut assets, &config.movie_clip_options()) {
        Ok(resource) => resource.clone(),
        Err(e) => {
            log::error!("Failed to load {}: {}", cli.movie_clip, e);
            return ExitCode::FAILURE;
        }
    };
    let rate = resource.suggested_rate().unwrap_or(config.rate);

    let Some(bundle) = hero(&resource, Vec2::new(200.0, 600.0), rate) else {
        log::error!("{} has no usable sprite regions", cli.movie_clip);
        return ExitCode::FAILURE;
    };

    let mut world = World::new();
    world.insert_resource(config);
    world.insert_resource(clips);
    world.insert_resource(assets);
    world.add_observer(|trigger: On<ClipFinished>| {
        let event = trigger.event();
        log::info!("{:?} finished clip {:?}", event.entity, event.clip);
    });
    world.flush();

    let mut driver = AnimationDriver::new();
    let entity = world.spawn_empty().id();
    driver.track(&mut world, entity, bundle);

    let mut rng = match cli.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };

    for tick in 1..=cli.ticks {
        if cli.switch_every > 0 && tick % cli.switch_every == 0 {
            if let Some(mut animation) = world.get_mut::<AnimationComponent>(entity) {
                select_random_clip(&mut animation, &mut rng);
            }
        }

        driver.update(&mut world, cli.dt);

        let sprite = world.get::<Sprite>(entity);
        let position = world.get::<MapPosition>(entity);
        let clip = world
            .get::<AnimationComponent>(entity)
            .and_then(|animation| animation.current_clip().map(|clip| clip.name.clone()));
        if let (Some(sprite), Some(position)) = (sprite, position) {
            log::debug!(
                "tick {:>4} clip {:<16} region {:?} {}x{} at {:?}",
                tick,
                clip.as_deref().unwrap_or("-"),
                sprite.drawable.region.position,
                sprite.width(),
                sprite.height(),
                position.pos
            );
        }
    }

    ExitCode::SUCCESS
}
