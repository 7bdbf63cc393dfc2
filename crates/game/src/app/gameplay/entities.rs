use std::time::Duration;

use engine::{
    clamp_to_region, input_direction, Body, Canvas, DeadlineTimer, InputAction, InputSnapshot,
    Movable, TickTime, Vec2, Visual,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct FireEvent {
    /// Top-center of the player after this tick's movement.
    pub(crate) muzzle: Vec2,
}

/// The controllable ship. Steered by held keys, kept inside `bounds`.
#[derive(Debug, Clone)]
pub(crate) struct Player {
    body: Body,
    visual: Visual,
    bounds: Vec2,
    cooldown: DeadlineTimer,
}

impl Player {
    pub(crate) fn new(visual: Visual, bounds: Vec2, speed: f32, cooldown: Duration) -> Self {
        let position = Vec2::new(
            (bounds.x - visual.size.x) * 0.5,
            (bounds.y - visual.size.y) * 0.5,
        );
        Self {
            body: Body::new(clamp_to_region(position, visual.size, bounds), visual.size, speed),
            visual,
            bounds,
            cooldown: DeadlineTimer::new(cooldown),
        }
    }

    pub(crate) fn advance_cooldown(&mut self, now: Duration) {
        self.cooldown.advance(now);
    }

    /// Read input, detect the fire edge, integrate, then clamp.
    pub(crate) fn update(&mut self, tick: TickTime, input: &InputSnapshot) -> Option<FireEvent> {
        self.body.set_direction(input_direction(input));
        let fired = self.try_trigger(tick.now, input);
        self.step(tick.dt);
        fired.then(|| FireEvent {
            muzzle: Vec2::new(self.body.center_x(), self.body.top()),
        })
    }

    fn try_trigger(&mut self, now: Duration, input: &InputSnapshot) -> bool {
        if !input.was_pressed(InputAction::Fire) || self.cooldown.is_active() {
            return false;
        }
        self.cooldown.activate(now);
        true
    }

    pub(crate) fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.draw_sprite(self.visual.handle, self.body.position, 1.0);
    }
}

impl Movable for Player {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn post_integrate(&mut self, _dt: f32) {
        self.body.position = clamp_to_region(self.body.position, self.body.size, self.bounds);
    }
}

/// Background decoration. Placed once; the scene never steps it.
#[derive(Debug, Clone)]
pub(crate) struct Star {
    body: Body,
    visual: Visual,
    scale: f32,
}

impl Star {
    pub(crate) fn new(visual: Visual, position: Vec2, scale: f32) -> Self {
        Self {
            body: Body::new(position, visual.scaled_size(scale), 0.0),
            visual,
            scale,
        }
    }

    pub(crate) fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.draw_sprite(self.visual.handle, self.body.position, self.scale);
    }
}

impl Movable for Star {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Laser {
    body: Body,
    visual: Visual,
}

impl Laser {
    /// Places the laser so its bottom-center sits on `muzzle`.
    pub(crate) fn from_muzzle(visual: Visual, muzzle: Vec2, speed: f32) -> Self {
        let position = Vec2::new(muzzle.x - visual.size.x * 0.5, muzzle.y - visual.size.y);
        Self {
            body: Body::new(position, visual.size, speed).with_direction(Vec2::new(0.0, -1.0)),
            visual,
        }
    }

    pub(crate) fn is_offscreen(&self) -> bool {
        self.body.bottom() < 0.0
    }

    pub(crate) fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.draw_sprite(self.visual.handle, self.body.position, 1.0);
    }
}

impl Movable for Laser {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Meteor {
    body: Body,
    visual: Visual,
}

impl Meteor {
    pub(crate) fn new(visual: Visual, position: Vec2, direction: Vec2, speed: f32) -> Self {
        Self {
            body: Body::new(position, visual.size, speed).with_direction(direction),
            visual,
        }
    }

    pub(crate) fn is_offscreen(&self, world_height: f32) -> bool {
        self.body.top() > world_height
    }

    pub(crate) fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.draw_sprite(self.visual.handle, self.body.position, 1.0);
    }
}

impl Movable for Meteor {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

#[cfg(test)]
impl Player {
    pub(crate) fn cooling_down(&self) -> bool {
        self.cooldown.is_active()
    }

    pub(crate) fn placed_at(mut self, position: Vec2) -> Self {
        self.body.position = position;
        self
    }
}

#[cfg(test)]
impl Star {
    pub(crate) fn scale(&self) -> f32 {
        self.scale
    }
}
