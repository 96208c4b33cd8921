//! Throwable bouncing ball with a glitter particle trail.
//!
//! The ball is either held by the player, free-flying, or at rest.
//! Collision mirrors the player's per-axis AABB stepping, but a contact
//! reflects and damps velocity on that axis instead of freezing it.

use glam::Vec3;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::collide::Aabb;
use crate::constants::{Color, GRAVITY, ROOM_HEIGHT};
use crate::physics::Camera;

/// Radius of the ball body.
pub const BALL_RADIUS: f32 = 0.36;

/// Launch speed along the camera look direction.
pub const THROW_SPEED: f32 = 26.0;

/// Velocity retained by a bounce.
pub const BOUNCE_DAMPING: f32 = 0.978;

/// Isotropic per-frame drag factor.
pub const DRAG: f32 = 0.991;

/// Below this vertical impact speed the ball settles instead of bouncing.
pub const MIN_VELOCITY: f32 = 0.15;

/// Maximum camera distance at which a catch succeeds.
pub const CATCH_RANGE: f32 = 4.5;

/// Horizontal friction applied on floor contact.
const FLOOR_FRICTION: f32 = 0.95;

/// Capacity of the glitter trail ring buffer.
pub const GLITTER_COUNT: usize = 120;

/// Lifetime of a single glitter particle in seconds.
pub const GLITTER_LIFE: f32 = 1.8;

/// Seconds between trail spawns while the ball is moving fast.
const GLITTER_SPAWN_INTERVAL: f32 = 0.008;

/// Particles spawned in a burst on wall contact.
const GLITTER_BURST: usize = 5;

/// Rainbow palette the trail draws from.
pub const GLITTER_COLORS: [Color; 7] = [
    Color::rgb(0xff, 0x2d, 0x78),
    Color::rgb(0x00, 0xd4, 0xff),
    Color::rgb(0x00, 0xff, 0x88),
    Color::rgb(0xff, 0xaa, 0x00),
    Color::rgb(0xcc, 0x44, 0xff),
    Color::rgb(0xff, 0x66, 0x44),
    Color::rgb(0x44, 0xff, 0xcc),
];

/// Parking spot for dead particles, far below any room.
const PARKED: Vec3 = Vec3::new(0.0, -100.0, 0.0);

/// One trail particle. Dead particles stay in the buffer, parked
/// off-scene, until their slot is reused.
#[derive(Debug, Clone, Copy)]
pub struct Glitter {
    pub position: Vec3,
    pub velocity: Vec3,
    pub age: f32,
    pub size: f32,
    /// Index into [`GLITTER_COLORS`].
    pub color: usize,
    pub alive: bool,
}

impl Glitter {
    const fn dead() -> Self {
        Self {
            position: PARKED,
            velocity: Vec3::ZERO,
            age: GLITTER_LIFE + 1.0,
            size: 0.0,
            color: 0,
            alive: false,
        }
    }

    /// Display brightness in [0, 1]: life fade modulated by a
    /// deterministic twinkle keyed to age and slot index.
    pub fn brightness(&self, index: usize) -> f32 {
        if !self.alive {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let twinkle = 0.6 + (self.age * 12.0 + index as f32).sin() * 0.4;
        let fade = 1.0 - self.age / GLITTER_LIFE;
        (fade * twinkle).clamp(0.0, 1.0)
    }
}

/// Fixed-capacity round-robin particle pool. No allocation after startup.
#[derive(Debug, Clone)]
struct GlitterTrail {
    particles: [Glitter; GLITTER_COUNT],
    next_slot: usize,
    spawn_cooldown: f32,
}

impl GlitterTrail {
    fn new() -> Self {
        Self {
            particles: [Glitter::dead(); GLITTER_COUNT],
            next_slot: 0,
            spawn_cooldown: 0.0,
        }
    }

    fn reset(&mut self) {
        self.particles = [Glitter::dead(); GLITTER_COUNT];
        self.next_slot = 0;
        self.spawn_cooldown = 0.0;
    }

    fn spawn(&mut self, origin: Vec3, rng: &mut ChaCha8Rng) {
        let slot = self.next_slot;
        self.next_slot = (self.next_slot + 1) % GLITTER_COUNT;

        let jitter = Vec3::new(
            rng.random_range(-0.075..0.075),
            rng.random_range(-0.075..0.075),
            rng.random_range(-0.075..0.075),
        );
        self.particles[slot] = Glitter {
            position: origin + jitter,
            velocity: Vec3::new(
                rng.random_range(-0.4..0.4),
                rng.random_range(0.2..0.7),
                rng.random_range(-0.4..0.4),
            ),
            age: 0.0,
            size: 0.08 + rng.random::<f32>() * 0.1,
            color: rng.random_range(0..GLITTER_COLORS.len()),
            alive: true,
        };
    }

    fn update(&mut self, delta: f32) {
        for particle in &mut self.particles {
            if !particle.alive {
                continue;
            }
            particle.age += delta;
            if particle.age > GLITTER_LIFE {
                particle.alive = false;
                particle.size = 0.0;
                particle.position = PARKED;
                continue;
            }
            particle.position += particle.velocity * delta;
            // Drag only; the upward drift comes from the spawn velocity.
            particle.velocity *= 0.98;
        }
    }

    fn any_alive(&self) -> bool {
        self.particles.iter().any(|p| p.alive)
    }
}

/// The throwable ball body and its trail.
#[derive(Debug, Clone)]
pub struct Ball {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Attached to the player. Mutually exclusive with `active`.
    pub held: bool,
    /// Free-flying. `false` while held or at rest.
    pub active: bool,
    trail: GlitterTrail,
    rng: ChaCha8Rng,
}

impl Ball {
    pub fn new(seed: u64) -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            held: true,
            active: false,
            trail: GlitterTrail::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Launches the ball along the camera look direction from a
    /// camera-relative offset. No-op unless currently held.
    pub fn throw(&mut self, camera: &Camera) {
        if !self.held {
            return;
        }
        self.held = false;
        self.active = true;

        let dir = camera.forward();
        self.position = camera.position + dir;
        self.position.y -= 0.2;
        self.velocity = dir * THROW_SPEED;
        self.trail.reset();
    }

    /// Catches the ball if it is within range. Returns whether the catch
    /// succeeded; out of range is a no-op, not an error.
    pub fn try_catch(&mut self, camera: &Camera) -> bool {
        if self.held || !self.active {
            return false;
        }
        if self.position.distance(camera.position) < CATCH_RANGE {
            self.held = true;
            self.active = false;
            return true;
        }
        false
    }

    /// Throw when held, otherwise attempt a catch.
    pub fn toggle(&mut self, camera: &Camera) {
        if self.held {
            self.throw(camera);
        } else {
            self.try_catch(camera);
        }
    }

    /// Pulls the ball back into the player's hand unconditionally.
    /// Used on room switches.
    pub fn force_catch(&mut self) {
        self.held = true;
        self.active = false;
    }

    /// Trail particles for rendering.
    pub fn trail(&self) -> &[Glitter] {
        &self.trail.particles
    }

    /// Whether any trail particle is still fading out.
    pub fn trail_visible(&self) -> bool {
        self.active || self.trail.any_alive()
    }

    /// Advances the ball by one frame against the active room's geometry.
    pub fn update(&mut self, delta: f32, colliders: &[Aabb], ground_level: f32) {
        self.trail.update(delta);
        if !self.active {
            return;
        }

        self.velocity.y -= GRAVITY * delta;
        self.velocity *= DRAG;

        for axis in 0..3 {
            self.step_axis(axis, delta, colliders);
        }

        // Floor: clamp and bounce, or settle below the threshold.
        if self.position.y - BALL_RADIUS < ground_level {
            self.position.y = ground_level + BALL_RADIUS;
            if self.velocity.y.abs() > MIN_VELOCITY {
                self.velocity.y = self.velocity.y.abs() * BOUNCE_DAMPING;
            } else {
                self.velocity.y = 0.0;
            }
            self.velocity.x *= FLOOR_FRICTION;
            self.velocity.z *= FLOOR_FRICTION;
        }

        // Ceiling: symmetric, without the settle case.
        let ceiling = ground_level + ROOM_HEIGHT;
        if self.position.y + BALL_RADIUS > ceiling {
            self.position.y = ceiling - BALL_RADIUS;
            self.velocity.y = -self.velocity.y.abs() * BOUNCE_DAMPING;
        }

        // Trail while moving fast.
        self.trail.spawn_cooldown -= delta;
        if self.trail.spawn_cooldown <= 0.0 && self.velocity.length_squared() > 0.5 {
            self.trail.spawn(self.position, &mut self.rng);
            self.trail.spawn_cooldown = GLITTER_SPAWN_INTERVAL;
        }

        // Full stop once resting on the floor with negligible speed.
        if self.position.y - BALL_RADIUS <= ground_level + 0.01
            && self.velocity.length_squared() < MIN_VELOCITY * MIN_VELOCITY
        {
            self.velocity = Vec3::ZERO;
        }
    }

    /// Integrates one axis and reflects on contact.
    fn step_axis(&mut self, axis: usize, delta: f32, colliders: &[Aabb]) {
        let old = self.position[axis];
        self.position[axis] += self.velocity[axis] * delta;

        let body = Aabb::around(self.position, BALL_RADIUS);
        if colliders.iter().any(|c| body.intersects(c)) {
            self.position[axis] = old;
            self.velocity[axis] *= -BOUNCE_DAMPING;
            for _ in 0..GLITTER_BURST {
                self.trail.spawn(self.position, &mut self.rng);
            }
        }
    }
}
