use std::ops::{Add, AddAssign, Mul, Sub};

/// Screen-space vector. `x` grows to the right, `y` grows downward.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn normalize_or_zero(self) -> Self {
        let len_sq = self.x * self.x + self.y * self.y;
        if len_sq > 0.0 && len_sq.is_finite() {
            let inv_len = len_sq.sqrt().recip();
            Vec2 {
                x: self.x * inv_len,
                y: self.y * inv_len,
            }
        } else {
            Vec2::ZERO
        }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2 {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2 {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2 {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

/// Kinematic state shared by everything that moves.
///
/// `position` is the top-left corner, `size` the extents used for bounds checks.
/// `direction` is kept either zero or unit length so diagonal motion never
/// exceeds `speed`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub position: Vec2,
    pub size: Vec2,
    pub speed: f32,
    direction: Vec2,
}

impl Body {
    pub fn new(position: Vec2, size: Vec2, speed: f32) -> Self {
        Self {
            position,
            size,
            speed,
            direction: Vec2::ZERO,
        }
    }

    pub fn with_direction(mut self, direction: Vec2) -> Self {
        self.set_direction(direction);
        self
    }

    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Vec2) {
        self.direction = direction.normalize_or_zero();
    }

    pub fn integrate(&mut self, dt: f32) {
        if dt == 0.0 {
            return;
        }
        self.position += self.direction * (self.speed * dt);
    }

    pub fn top(&self) -> f32 {
        self.position.y
    }

    pub fn bottom(&self) -> f32 {
        self.position.y + self.size.y
    }

    pub fn center_x(&self) -> f32 {
        self.position.x + self.size.x * 0.5
    }
}

/// Capability seam for per-tick movement.
///
/// Everything integrates; types that constrain or react after moving override
/// `post_integrate`.
pub trait Movable {
    fn body(&self) -> &Body;

    fn body_mut(&mut self) -> &mut Body;

    fn integrate(&mut self, dt: f32) {
        self.body_mut().integrate(dt);
    }

    fn post_integrate(&mut self, _dt: f32) {}

    fn step(&mut self, dt: f32) {
        self.integrate(dt);
        self.post_integrate(dt);
    }
}

impl Movable for Body {
    fn body(&self) -> &Body {
        self
    }

    fn body_mut(&mut self) -> &mut Body {
        self
    }
}

pub fn step_all<M: Movable>(items: &mut [M], dt: f32) {
    for item in items {
        item.step(dt);
    }
}

/// Clamps each axis of `position` into `[0, region - size]`.
///
/// When `size` exceeds `region` on an axis the interval collapses to `0`.
pub fn clamp_to_region(position: Vec2, size: Vec2, region: Vec2) -> Vec2 {
    Vec2 {
        x: clamp_axis(position.x, size.x, region.x),
        y: clamp_axis(position.y, size.y, region.y),
    }
}

fn clamp_axis(value: f32, size: f32, extent: f32) -> f32 {
    let upper = (extent - size).max(0.0);
    value.clamp(0.0, upper)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fence {
        body: Body,
        region: Vec2,
    }

    impl Movable for Fence {
        fn body(&self) -> &Body {
            &self.body
        }

        fn body_mut(&mut self) -> &mut Body {
            &mut self.body
        }

        fn post_integrate(&mut self, _dt: f32) {
            self.body.position = clamp_to_region(self.body.position, self.body.size, self.region);
        }
    }

    #[test]
    fn integrate_with_zero_dt_keeps_position() {
        let directions = [
            Vec2::new(1.0, 0.0),
            Vec2::new(-1.0, 1.0),
            Vec2::new(0.3, -0.7),
            Vec2::ZERO,
        ];
        for direction in directions {
            for speed in [0.0, 1.0, 500.0, 1.0e9] {
                let mut body =
                    Body::new(Vec2::new(12.5, -4.0), Vec2::new(8.0, 8.0), speed)
                        .with_direction(direction);
                body.integrate(0.0);
                assert_eq!(body.position, Vec2::new(12.5, -4.0), "speed={speed}");
            }
        }
    }

    #[test]
    fn integrate_moves_by_direction_speed_dt() {
        let mut body = Body::new(Vec2::new(10.0, 10.0), Vec2::ZERO, 200.0)
            .with_direction(Vec2::new(0.0, -1.0));

        body.integrate(0.5);

        assert_eq!(body.position, Vec2::new(10.0, -90.0));
    }

    #[test]
    fn direction_is_normalized_or_zero() {
        let mut body = Body::new(Vec2::ZERO, Vec2::ZERO, 1.0);

        body.set_direction(Vec2::new(3.0, 4.0));
        assert!((body.direction().length() - 1.0).abs() < 1e-6);

        body.set_direction(Vec2::ZERO);
        assert_eq!(body.direction(), Vec2::ZERO);

        body.set_direction(Vec2::new(f32::NAN, 1.0));
        assert_eq!(body.direction(), Vec2::ZERO);
    }

    #[test]
    fn clamp_snaps_to_nearest_boundary() {
        let size = Vec2::new(40.0, 40.0);
        let region = Vec2::new(800.0, 600.0);

        assert_eq!(
            clamp_to_region(Vec2::new(1200.0, -30.0), size, region),
            Vec2::new(760.0, 0.0)
        );
        assert_eq!(
            clamp_to_region(Vec2::new(-0.5, 900.0), size, region),
            Vec2::new(0.0, 560.0)
        );
        assert_eq!(
            clamp_to_region(Vec2::new(100.0, 200.0), size, region),
            Vec2::new(100.0, 200.0)
        );
    }

    #[test]
    fn oversized_body_collapses_to_origin_axis() {
        let clamped = clamp_to_region(
            Vec2::new(50.0, 50.0),
            Vec2::new(900.0, 10.0),
            Vec2::new(800.0, 600.0),
        );
        assert_eq!(clamped, Vec2::new(0.0, 50.0));
    }

    #[test]
    fn post_integrate_runs_after_integrate() {
        let mut fence = Fence {
            body: Body::new(Vec2::new(700.0, 300.0), Vec2::new(40.0, 40.0), 500.0)
                .with_direction(Vec2::new(1.0, 0.0)),
            region: Vec2::new(800.0, 600.0),
        };

        fence.step(1.0);

        assert_eq!(fence.body.position.x, 760.0);
        assert_eq!(fence.body.position.y, 300.0);
    }

    #[test]
    fn step_all_moves_every_item() {
        let mut bodies = vec![
            Body::new(Vec2::ZERO, Vec2::ZERO, 10.0).with_direction(Vec2::new(1.0, 0.0)),
            Body::new(Vec2::ZERO, Vec2::ZERO, 20.0).with_direction(Vec2::new(0.0, 1.0)),
        ];

        step_all(&mut bodies, 0.5);

        assert_eq!(bodies[0].position, Vec2::new(5.0, 0.0));
        assert_eq!(bodies[1].position, Vec2::new(0.0, 10.0));
    }
}
