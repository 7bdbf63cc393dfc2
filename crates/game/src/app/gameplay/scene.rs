use std::time::Duration;

use engine::{
    step_all, AssetError, Canvas, DeadlineTimer, InputSnapshot, Scene, SpriteLoader, TickTime,
    TimerEvent, Vec2, Visual,
};
use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, info};

use super::entities::{FireEvent, Laser, Meteor, Player, Star};
use super::{
    SceneSettings, BANNER_TEXT, HUD_LINE_SPACING, HUD_ORIGIN, HUD_TEXT_COLOR, HUD_TEXT_SIZE,
};

pub(crate) struct SceneVisuals {
    pub(crate) player: Visual,
    pub(crate) star: Visual,
    pub(crate) laser: Visual,
    pub(crate) meteor: Visual,
}

impl SceneVisuals {
    pub(crate) fn load(loader: &mut dyn SpriteLoader) -> Result<Self, AssetError> {
        Ok(Self {
            player: loader.load_sprite("player")?,
            star: loader.load_sprite("star")?,
            laser: loader.load_sprite("laser")?,
            meteor: loader.load_sprite("meteor")?,
        })
    }
}

/// One player ship over a fixed field of stars, with lasers and falling meteors.
///
/// Timers are advanced in registration order: heartbeat, meteor spawn, then the
/// player's laser cooldown.
pub(crate) struct StarfieldScene {
    settings: SceneSettings,
    visuals: SceneVisuals,
    rng: StdRng,
    player: Player,
    stars: Vec<Star>,
    lasers: Vec<Laser>,
    meteors: Vec<Meteor>,
    heartbeat: DeadlineTimer,
    meteor_spawn: DeadlineTimer,
    heartbeat_count: u64,
}

impl StarfieldScene {
    pub(crate) fn new(visuals: SceneVisuals, settings: SceneSettings, mut rng: StdRng) -> Self {
        let stars = scatter_stars(&mut rng, visuals.star, &settings);
        let player = Player::new(
            visuals.player,
            settings.world_size,
            settings.player_speed,
            settings.laser_cooldown,
        );
        Self {
            heartbeat: DeadlineTimer::new(settings.heartbeat_interval)
                .repeating()
                .started(Duration::ZERO),
            meteor_spawn: DeadlineTimer::new(settings.meteor_interval)
                .repeating()
                .started(Duration::ZERO),
            settings,
            visuals,
            rng,
            player,
            stars,
            lasers: Vec::new(),
            meteors: Vec::new(),
            heartbeat_count: 0,
        }
    }

    fn advance_timers(&mut self, now: Duration) {
        if self.heartbeat.advance(now) == TimerEvent::Expired {
            self.heartbeat_count += 1;
            info!(count = self.heartbeat_count, "timer_expired");
        }
        if self.meteor_spawn.advance(now) == TimerEvent::Expired {
            self.spawn_meteor();
        }
        self.player.advance_cooldown(now);
    }

    fn draw_hud(&self, canvas: &mut dyn Canvas) {
        canvas.draw_text(BANNER_TEXT, HUD_ORIGIN, HUD_TEXT_SIZE, HUD_TEXT_COLOR);
        let heartbeat_line = format!("Heartbeats: {}", self.heartbeat_count);
        canvas.draw_text(
            &heartbeat_line,
            HUD_ORIGIN + Vec2::new(0.0, HUD_LINE_SPACING),
            HUD_TEXT_SIZE,
            HUD_TEXT_COLOR,
        );
    }

    fn spawn_laser(&mut self, fire: FireEvent) {
        self.lasers.push(Laser::from_muzzle(
            self.visuals.laser,
            fire.muzzle,
            self.settings.laser_speed,
        ));
        debug!(
            x = fire.muzzle.x,
            y = fire.muzzle.y,
            lasers = self.lasers.len(),
            "laser_fired"
        );
    }

    fn spawn_meteor(&mut self) {
        let settings = &self.settings;
        let position = Vec2::new(
            uniform(&mut self.rng, 0.0, settings.world_size.x),
            uniform(
                &mut self.rng,
                settings.meteor_spawn_y.0,
                settings.meteor_spawn_y.1,
            ),
        );
        let direction = Vec2::new(
            uniform(
                &mut self.rng,
                -settings.meteor_drift,
                settings.meteor_drift,
            ),
            1.0,
        );
        let speed = uniform(
            &mut self.rng,
            settings.meteor_speed.0,
            settings.meteor_speed.1,
        );
        self.meteors
            .push(Meteor::new(self.visuals.meteor, position, direction, speed));
    }
}

impl Scene for StarfieldScene {
    fn update(&mut self, tick: TickTime, input: &InputSnapshot) {
        self.advance_timers(tick.now);

        if let Some(fire) = self.player.update(tick, input) {
            self.spawn_laser(fire);
        }

        step_all(&mut self.lasers, tick.dt);
        step_all(&mut self.meteors, tick.dt);

        let world_height = self.settings.world_size.y;
        self.lasers.retain(|laser| !laser.is_offscreen());
        self.meteors
            .retain(|meteor| !meteor.is_offscreen(world_height));
    }

    fn render(&self, canvas: &mut dyn Canvas) {
        for star in &self.stars {
            star.draw(canvas);
        }
        for meteor in &self.meteors {
            meteor.draw(canvas);
        }
        for laser in &self.lasers {
            laser.draw(canvas);
        }
        self.player.draw(canvas);
        self.draw_hud(canvas);
    }

    fn entity_count(&self) -> usize {
        1 + self.stars.len() + self.lasers.len() + self.meteors.len()
    }
}

fn scatter_stars(rng: &mut StdRng, visual: Visual, settings: &SceneSettings) -> Vec<Star> {
    (0..settings.star_count)
        .map(|_| {
            let position = Vec2::new(
                uniform(rng, 0.0, settings.world_size.x),
                uniform(rng, 0.0, settings.world_size.y),
            );
            let scale = uniform(rng, settings.star_scale.0, settings.star_scale.1);
            Star::new(visual, position, scale)
        })
        .collect()
}

fn uniform(rng: &mut StdRng, min: f32, max: f32) -> f32 {
    if max > min {
        rng.gen_range(min..=max)
    } else {
        min
    }
}

#[cfg(test)]
impl StarfieldScene {
    pub(crate) fn player(&self) -> &Player {
        &self.player
    }

    pub(crate) fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub(crate) fn lasers(&self) -> &[Laser] {
        &self.lasers
    }

    pub(crate) fn meteors(&self) -> &[Meteor] {
        &self.meteors
    }

    pub(crate) fn heartbeat_count(&self) -> u64 {
        self.heartbeat_count
    }

    pub(crate) fn player_position(&self) -> Vec2 {
        use engine::Movable;
        self.player.body().position
    }
}
