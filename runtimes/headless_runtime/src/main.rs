// Headless Runtime - drives the locomotion core through scripted scenarios
//
// No headset, renderer, or engine: the host seams are filled by a rapier
// trimesh world, a rectangle navmesh, and a pinhole screen projector, and
// the returned effects are applied to a simulated character frame by frame.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use cgmath::{InnerSpace, Vector2, Vector3, vec2, vec3};
use clap::Parser;
use tracing::{debug, info};

use blinkstep::{BodyState, Effect, HostContext, LocomotionConfig, Time, VrCharacter};

mod scenarios;
mod world;

use scenarios::Scenario;
use world::{PinholeScreen, RectNavMesh, SimWorld};

const FRAME_SECONDS: f32 = 1.0 / 60.0;
/// Speed the movement component applies to a full throttle, in world units
/// (centimeters) per second.
const WALK_SPEED: f32 = 240.0;
/// Half of a 176 cm standing capsule.
const CAPSULE_HALF_HEIGHT: f32 = 88.0;

#[derive(Parser)]
#[command(name = "headless_runtime")]
#[command(about = "Scripted scenario driver for the blinkstep locomotion core")]
struct Args {
    /// Scenario to play (walk, teleport, aborted-teleport)
    #[arg(short, long, default_value = "teleport")]
    scenario: String,

    /// Number of frames to simulate at 60 fps
    #[arg(short, long, default_value = "240")]
    frames: usize,

    /// JSON locomotion config; fields left out keep their defaults
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Host-side character state the effects are applied to.
struct SimCharacter {
    position: Vector3<f32>,
    velocity: Vector3<f32>,
    yaw_degrees: f32,
    marker_position: Option<Vector3<f32>>,
    fade_active: bool,
    vignette_radius: f32,
    vignette_center: Vector2<f32>,
    teleport_count: usize,
    aborted_fade_count: usize,
}

impl SimCharacter {
    fn new() -> Self {
        SimCharacter {
            position: vec3(0.0, 0.0, 0.0),
            velocity: vec3(0.0, 0.0, 0.0),
            yaw_degrees: 0.0,
            marker_position: None,
            fade_active: false,
            vignette_radius: 1.0,
            vignette_center: vec2(0.5, 0.5),
            teleport_count: 0,
            aborted_fade_count: 0,
        }
    }

    /// Apply one frame's effects in order, then integrate movement.
    fn step(&mut self, effects: Vec<Effect>, delta_seconds: f32) {
        let mut wish = vec3(0.0, 0.0, 0.0);
        let mut relocated = false;
        for effect in effects {
            self.apply(effect, &mut wish, &mut relocated);
        }

        if relocated {
            self.velocity = vec3(0.0, 0.0, 0.0);
        } else {
            self.velocity = wish * WALK_SPEED;
            self.position += self.velocity * delta_seconds;
        }
    }

    fn apply(&mut self, effect: Effect, wish: &mut Vector3<f32>, relocated: &mut bool) {
        match effect {
            Effect::NoEffect => {}
            Effect::Multiple(effects) => {
                for effect in effects {
                    self.apply(effect, wish, relocated);
                }
            }
            Effect::SetPlayerPosition {
                position,
                is_teleport,
            } => {
                info!("Relocated to {:?} (teleport: {})", position, is_teleport);
                self.position = position;
                self.teleport_count += 1;
                *relocated = true;
            }
            Effect::AddMovementInput { world_direction } => {
                *wish += world_direction;
            }
            Effect::AddYawInput { degrees } => {
                self.yaw_degrees += degrees;
            }
            Effect::ShowDestinationMarker { position } => {
                self.marker_position = Some(position);
            }
            Effect::HideDestinationMarker => {
                self.marker_position = None;
            }
            Effect::StartCameraFade {
                from_alpha,
                to_alpha,
                duration,
                ..
            } => {
                info!(
                    "Camera fade {:.1} -> {:.1} over {:.2}s",
                    from_alpha, to_alpha, duration
                );
                self.fade_active = true;
            }
            Effect::StopCameraFade => {
                if self.fade_active && !*relocated {
                    self.aborted_fade_count += 1;
                }
                self.fade_active = false;
            }
            Effect::SetVignetteRadius { radius } => {
                self.vignette_radius = radius;
            }
            Effect::SetVignetteCenter { center } => {
                self.vignette_center = center;
            }
            Effect::DrawDebugArc { points } => {
                debug!("Targeting arc with {} samples", points.len());
            }
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<LocomotionConfig> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Reading config {}", path.display()))?;
            serde_json::from_str(&text).context("Parsing locomotion config")
        }
        None => Ok(LocomotionConfig::default()),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "headless_runtime=info,blinkstep=info".into()),
        )
        .init();

    let args = Args::parse();
    let scenario = Scenario::parse(&args.scenario)
        .with_context(|| format!("Unknown scenario: {}", args.scenario))?;
    let config = load_config(args.config.as_ref())?;

    info!(
        "Playing {:?} for {} frames at {:.0} fps",
        scenario,
        args.frames,
        1.0 / FRAME_SECONDS
    );

    let collision = SimWorld::arena();
    let nav_mesh = RectNavMesh::arena();
    let mut character = VrCharacter::new(&config);
    let mut sim = SimCharacter::new();

    for frame in 0..args.frames {
        // Scripted poses are body-relative; place them in the world.
        let mut input = scenario.input_for_frame(frame);
        input.head.position += sim.position;
        input.left_hand.position += sim.position;
        input.right_hand.position += sim.position;

        let screen = PinholeScreen::new(input.head.position, input.head.forward());
        let time = Time {
            elapsed: Duration::from_secs_f32(FRAME_SECONDS),
            total: Duration::from_secs_f32(frame as f32 * FRAME_SECONDS),
        };
        let body = BodyState {
            velocity: sim.velocity,
            capsule_half_height: CAPSULE_HALF_HEIGHT,
        };
        let host = HostContext {
            collision: &collision,
            nav_mesh: Some(&nav_mesh),
            screen: Some(&screen),
        };

        let effects = character.update(&time, &input, &body, &host);
        sim.step(effects, FRAME_SECONDS);

        debug!(
            "frame {:3}: pos=({:7.1}, {:5.1}, {:7.1}) speed={:6.1} marker={:?}",
            frame,
            sim.position.x,
            sim.position.y,
            sim.position.z,
            sim.velocity.magnitude(),
            sim.marker_position,
        );
    }

    info!(
        "Finished: position=({:.1}, {:.1}, {:.1}), yaw={:.1} deg, teleports={}, aborted fades={}, vignette radius={:.2} center=({:.2}, {:.2})",
        sim.position.x,
        sim.position.y,
        sim.position.z,
        sim.yaw_degrees,
        sim.teleport_count,
        sim.aborted_fade_count,
        sim.vignette_radius,
        sim.vignette_center.x,
        sim.vignette_center.y,
    );

    Ok(())
}
