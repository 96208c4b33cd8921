//! Fireworks: rockets that arc up and burst into particle clouds.
//!
//! Purely cosmetic. Runs every frame regardless of pause state so the
//! sky keeps animating behind menus and terminals.

use glam::Vec3;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::constants::Color;

const BURST_COLORS: [Color; 10] = [
    Color::rgb(0xff, 0x2d, 0x78),
    Color::rgb(0x00, 0xd4, 0xff),
    Color::rgb(0x00, 0xff, 0x88),
    Color::rgb(0xff, 0xaa, 0x00),
    Color::rgb(0xcc, 0x44, 0xff),
    Color::rgb(0xff, 0x66, 0x44),
    Color::rgb(0x44, 0xff, 0xcc),
    Color::rgb(0xff, 0xee, 0xdd),
    Color::rgb(0xff, 0x88, 0xcc),
    Color::rgb(0x88, 0xff, 0xff),
];

/// Seconds between rockets of one salvo.
const LAUNCH_STAGGER: f32 = 0.14;

/// Rocket gravity — gentler than the player's, for a long arc.
const ROCKET_GRAVITY: f32 = 4.0;

const EXPLOSION_LIFE: f32 = 2.5;
const BURST_PARTICLES: usize = 120;
const RING_PARTICLES: usize = 50;

/// A rocket on its way up.
#[derive(Debug, Clone)]
pub struct Rocket {
    pub position: Vec3,
    velocity: Vec3,
    age: f32,
    fuse: f32,
    color: Color,
}

/// A burst cloud fading out.
#[derive(Debug, Clone)]
pub struct Explosion {
    pub color: Color,
    pub age: f32,
    /// Main spherical burst: (position, velocity) pairs.
    pub particles: Vec<(Vec3, Vec3)>,
    /// Secondary ring expanding on the horizontal plane.
    pub ring: Vec<(Vec3, Vec3)>,
}

impl Explosion {
    fn new(origin: Vec3, color: Color, rng: &mut ChaCha8Rng) -> Self {
        let particles = (0..BURST_PARTICLES)
            .map(|_| {
                // Uniform direction on the sphere.
                let theta = rng.random_range(0.0..std::f32::consts::TAU);
                let phi = (rng.random_range(-1.0_f32..1.0)).acos();
                let speed = rng.random_range(5.0..13.0);
                let velocity = Vec3::new(
                    speed * phi.sin() * theta.cos(),
                    speed * phi.sin() * theta.sin(),
                    speed * phi.cos(),
                );
                (origin, velocity)
            })
            .collect();

        #[allow(clippy::cast_precision_loss)]
        let ring = (0..RING_PARTICLES)
            .map(|i| {
                let angle = (i as f32 / RING_PARTICLES as f32) * std::f32::consts::TAU;
                let radius = rng.random_range(6.0..9.0);
                let velocity = Vec3::new(
                    angle.cos() * radius,
                    rng.random_range(-0.8..3.2),
                    angle.sin() * radius,
                );
                (origin, velocity)
            })
            .collect();

        Self {
            color,
            age: 0.0,
            particles,
            ring,
        }
    }

    fn update(&mut self, delta: f32) {
        self.age += delta;
        for (position, velocity) in &mut self.particles {
            *position += *velocity * delta;
            *velocity *= 0.95;
            velocity.y -= 3.0 * delta;
        }
        for (position, velocity) in &mut self.ring {
            *position += *velocity * delta;
            *velocity *= 0.93;
        }
    }

    fn finished(&self) -> bool {
        self.age >= EXPLOSION_LIFE
    }

    /// Remaining opacity in [0, 1].
    pub fn fade(&self) -> f32 {
        (1.0 - self.age / EXPLOSION_LIFE).max(0.0)
    }
}

/// Fireworks launcher and particle manager.
#[derive(Debug)]
pub struct Fireworks {
    rockets: Vec<Rocket>,
    explosions: Vec<Explosion>,
    /// Countdowns to rockets of a pending salvo.
    pending: Vec<f32>,
    auto: bool,
    auto_timer: f32,
    origin: Vec3,
    rng: ChaCha8Rng,
}

impl Fireworks {
    pub fn new(seed: u64) -> Self {
        Self {
            rockets: Vec::new(),
            explosions: Vec::new(),
            pending: Vec::new(),
            auto: false,
            auto_timer: 0.0,
            origin: Vec3::new(0.0, 1.0, 0.0),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Moves the launch origin (set to the active room's roof area).
    pub fn set_origin(&mut self, origin: Vec3) {
        self.origin = origin;
    }

    /// Queues a salvo of `count` rockets with a small stagger.
    pub fn launch(&mut self, count: usize) {
        #[allow(clippy::cast_precision_loss)]
        for i in 0..count {
            self.pending.push(i as f32 * LAUNCH_STAGGER);
        }
    }

    /// Keeps launching small salvos until stopped.
    pub fn start_auto(&mut self) {
        self.auto = true;
        self.auto_timer = 0.0;
    }

    pub fn stop_auto(&mut self) {
        self.auto = false;
    }

    pub fn rockets(&self) -> &[Rocket] {
        &self.rockets
    }

    pub fn explosions(&self) -> &[Explosion] {
        &self.explosions
    }

    pub fn is_idle(&self) -> bool {
        self.rockets.is_empty() && self.explosions.is_empty() && self.pending.is_empty()
    }

    pub fn update(&mut self, delta: f32) {
        if self.auto {
            self.auto_timer -= delta;
            if self.auto_timer <= 0.0 {
                let count = self.rng.random_range(2..4);
                self.launch(count);
                self.auto_timer = self.rng.random_range(0.6..1.2);
            }
        }

        // Fire pending salvo rockets whose stagger expired.
        let mut due = 0;
        for countdown in &mut self.pending {
            *countdown -= delta;
            if *countdown <= 0.0 {
                due += 1;
            }
        }
        self.pending.retain(|c| *c > 0.0);
        for _ in 0..due {
            self.spawn_rocket();
        }

        // Rockets rise until the fuse runs out, then burst.
        let mut burst_at = Vec::new();
        for rocket in &mut self.rockets {
            rocket.age += delta;
            rocket.velocity.y -= ROCKET_GRAVITY * delta;
            rocket.position += rocket.velocity * delta;
            if rocket.age >= rocket.fuse {
                burst_at.push((rocket.position, rocket.color));
            }
        }
        self.rockets.retain(|r| r.age < r.fuse);
        for (origin, color) in burst_at {
            self.explosions
                .push(Explosion::new(origin, color, &mut self.rng));
        }

        for explosion in &mut self.explosions {
            explosion.update(delta);
        }
        self.explosions.retain(|e| !e.finished());
    }

    fn spawn_rocket(&mut self) {
        let offset = Vec3::new(
            self.rng.random_range(-6.0..6.0),
            0.0,
            self.rng.random_range(-6.0..6.0),
        );
        let color = BURST_COLORS[self.rng.random_range(0..BURST_COLORS.len())];
        self.rockets.push(Rocket {
            position: self.origin + offset,
            velocity: Vec3::new(
                self.rng.random_range(-3.0..3.0),
                self.rng.random_range(16.0..26.0),
                self.rng.random_range(-3.0..3.0),
            ),
            age: 0.0,
            fuse: self.rng.random_range(1.1..2.3),
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_salvo_staggers_rockets() {
        let mut fireworks = Fireworks::new(3);
        fireworks.launch(3);

        // First rocket due immediately, the rest later.
        fireworks.update(DT);
        assert_eq!(fireworks.rockets().len(), 1);

        for _ in 0..10 {
            fireworks.update(DT);
        }
        assert_eq!(fireworks.rockets().len(), 2);

        for _ in 0..10 {
            fireworks.update(DT);
        }
        assert_eq!(fireworks.rockets().len(), 3);
    }

    #[test]
    fn test_rockets_become_explosions_then_fade() {
        let mut fireworks = Fireworks::new(3);
        fireworks.launch(1);

        // Longest fuse is 2.3 s.
        for _ in 0..150 {
            fireworks.update(DT);
        }
        assert!(fireworks.rockets().is_empty());
        assert_eq!(fireworks.explosions().len(), 1);
        assert_eq!(fireworks.explosions()[0].particles.len(), 120);
        assert!(fireworks.explosions()[0].fade() > 0.0);

        // Explosions expire after their lifetime.
        for _ in 0..160 {
            fireworks.update(DT);
        }
        assert!(fireworks.is_idle());
    }

    #[test]
    fn test_auto_mode_keeps_launching() {
        let mut fireworks = Fireworks::new(3);
        fireworks.start_auto();
        for _ in 0..120 {
            fireworks.update(DT);
        }
        assert!(!fireworks.is_idle());

        fireworks.stop_auto();
        // Everything in flight eventually burns out.
        for _ in 0..600 {
            fireworks.update(DT);
        }
        assert!(fireworks.is_idle());
    }

    #[test]
    fn test_deterministic_given_seed() {
        let mut a = Fireworks::new(9);
        let mut b = Fireworks::new(9);
        a.launch(2);
        b.launch(2);
        for _ in 0..200 {
            a.update(DT);
            b.update(DT);
        }
        assert_eq!(a.rockets().len(), b.rockets().len());
        assert_eq!(a.explosions().len(), b.explosions().len());
        for (ea, eb) in a.explosions().iter().zip(b.explosions()) {
            assert_eq!(ea.particles, eb.particles);
        }
    }
}
