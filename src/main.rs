use anyhow::Result;
use glam::Vec2;
use log::{info, warn};
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

mod core;
mod engine;
mod game;

use engine::game_loop::{GameLoop, FIXED_TIMESTEP};
use engine::input::{Action, InputManager};
use engine::physics::{presets, PhysicsWorld};
use game::characters::{CharacterConfig, CharacterManager, MovementState};

const PLAYER_CONFIG_PATH: &str = "assets/config/player.ron";

/// Half the floor width; characters past it are reset to the spawn point
const ARENA_HALF_WIDTH: f32 = 20.0;
const SPAWN_POINT: Vec2 = Vec2::ZERO;

fn load_player_config() -> CharacterConfig {
    match CharacterConfig::load(PLAYER_CONFIG_PATH) {
        Ok(config) => {
            info!("Loaded character config from {}", PLAYER_CONFIG_PATH);
            config
        }
        Err(e) => {
            warn!("Using default character config ({})", e);
            CharacterConfig::default()
        }
    }
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Rusted Brawler...");

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Rusted Brawler")
        .with_inner_size(winit::dpi::LogicalSize::new(1280, 720))
        .with_resizable(true)
        .build(&event_loop)?;

    info!("Window created successfully");

    let mut physics = PhysicsWorld::new();
    let floor = physics.add_rigid_body(presets::floor_body(0.0, -1.4));
    physics.add_collider(presets::floor_collider(ARENA_HALF_WIDTH * 2.0, 1.0), floor);

    let mut characters = CharacterManager::new();
    let player = characters.spawn(
        "Player 1",
        Some(0),
        load_player_config(),
        &mut physics,
        SPAWN_POINT,
    )?;

    let mut input = InputManager::new(1);
    let mut game_loop = GameLoop::new();
    let mut last_state = MovementState::Idle;

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("Close requested, shutting down...");
                elwt.exit();
            }
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event, .. },
                ..
            } => input.process_keyboard_event(&event),
            Event::WindowEvent {
                event: WindowEvent::MouseInput { state, button, .. },
                ..
            } => input.process_mouse_button(button, state),
            Event::WindowEvent {
                event: WindowEvent::Focused(false),
                ..
            } => input.reset_all(),
            Event::WindowEvent {
                event: WindowEvent::RedrawRequested,
                ..
            } => {
                if input.global_just_pressed(Action::Menu) {
                    info!("Menu requested, shutting down...");
                    elwt.exit();
                    return;
                }
                if input.global_just_pressed(Action::Pause) {
                    game_loop.toggle_pause();
                }

                let steps = game_loop.begin_frame();
                if !game_loop.is_paused() {
                    characters.apply_input(&input);
                    for _ in 0..steps {
                        characters.fixed_update(&mut physics, FIXED_TIMESTEP);
                    }
                    characters.frame_update(&mut physics, game_loop.frame_delta());
                    characters.respawn_out_of_bounds(&mut physics, ARENA_HALF_WIDTH, SPAWN_POINT);
                }
                input.end_frame();

                if let Some(character) = characters.get(player) {
                    let state = character.movement_state();
                    if state != last_state {
                        info!(
                            "{}: {:?} -> {:?} at {:?}",
                            character.name,
                            last_state,
                            state,
                            character.position(&physics)
                        );
                        last_state = state;
                    }
                }
            }
            Event::AboutToWait => {
                // Request redraw on next frame
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
