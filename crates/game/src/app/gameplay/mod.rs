use std::time::Duration;

use engine::Vec2;

mod entities;
mod scene;

pub(crate) use scene::{SceneVisuals, StarfieldScene};

pub(crate) const WINDOW_WIDTH: u32 = 1280;
pub(crate) const WINDOW_HEIGHT: u32 = 720;
pub(crate) const BACKGROUND_COLOR: [u8; 4] = [15, 10, 25, 255];
const PLAYER_SPEED: f32 = 500.0;
const LASER_SPEED: f32 = 600.0;
const LASER_COOLDOWN_SECONDS: f32 = 0.4;
const METEOR_SPEED_MIN: f32 = 300.0;
const METEOR_SPEED_MAX: f32 = 400.0;
const METEOR_TIMER_SECONDS: f32 = 0.4;
const METEOR_SPAWN_Y_MIN: f32 = -150.0;
const METEOR_SPAWN_Y_MAX: f32 = -50.0;
const METEOR_DRIFT: f32 = 0.5;
const HEARTBEAT_SECONDS: f32 = 1.0;
const STAR_COUNT: usize = 20;
const STAR_SCALE_MIN: f32 = 0.5;
const STAR_SCALE_MAX: f32 = 1.6;
const BANNER_TEXT: &str = "Watch the console: Timer fires every 1 second!";
const HUD_ORIGIN: Vec2 = Vec2::new(20.0, 20.0);
const HUD_TEXT_SIZE: u32 = 20;
const HUD_LINE_SPACING: f32 = 30.0;
const HUD_TEXT_COLOR: [u8; 4] = [245, 245, 245, 255];

#[derive(Debug, Clone)]
pub(crate) struct SceneSettings {
    pub(crate) world_size: Vec2,
    pub(crate) player_speed: f32,
    pub(crate) laser_speed: f32,
    pub(crate) laser_cooldown: Duration,
    pub(crate) meteor_interval: Duration,
    pub(crate) meteor_speed: (f32, f32),
    pub(crate) meteor_spawn_y: (f32, f32),
    pub(crate) meteor_drift: f32,
    pub(crate) heartbeat_interval: Duration,
    pub(crate) star_count: usize,
    pub(crate) star_scale: (f32, f32),
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            world_size: Vec2::new(WINDOW_WIDTH as f32, WINDOW_HEIGHT as f32),
            player_speed: PLAYER_SPEED,
            laser_speed: LASER_SPEED,
            laser_cooldown: Duration::from_secs_f32(LASER_COOLDOWN_SECONDS),
            meteor_interval: Duration::from_secs_f32(METEOR_TIMER_SECONDS),
            meteor_speed: (METEOR_SPEED_MIN, METEOR_SPEED_MAX),
            meteor_spawn_y: (METEOR_SPAWN_Y_MIN, METEOR_SPAWN_Y_MAX),
            meteor_drift: METEOR_DRIFT,
            heartbeat_interval: Duration::from_secs_f32(HEARTBEAT_SECONDS),
            star_count: STAR_COUNT,
            star_scale: (STAR_SCALE_MIN, STAR_SCALE_MAX),
        }
    }
}
