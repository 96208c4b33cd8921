//! Laser weapon and drone swarm, armed via the roof data core.
//!
//! Bolts fly straight and despawn at range; drones spawn on a timer,
//! steer toward the player, and explode on a bolt hit or on reaching
//! the player. Cosmetic like the fireworks: updates are never gated on
//! pause.

use glam::Vec3;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::constants::Color;
use crate::physics::Camera;
use crate::state::GameState;

const LASER_SPEED: f32 = 65.0;
const LASER_RANGE: f32 = 50.0;
/// Minimum seconds between shots.
const LASER_COOLDOWN: f32 = 0.08;

const DRONE_SPEED: f32 = 5.5;
/// Base seconds between drone spawns; shrinks with kills.
const DRONE_SPAWN_INTERVAL: f32 = 3.2;
const MAX_DRONES: usize = 10;
/// Bolt-to-drone distance that counts as a hit.
const HIT_RADIUS: f32 = 0.6;
/// Drone-to-player distance that triggers self-destruction.
const DRONE_REACH: f32 = 1.3;

const EXPLOSION_LIFE: f32 = 0.6;

const DRONE_COLORS: [Color; 4] = [
    Color::rgb(0xff, 0x33, 0x00),
    Color::rgb(0xff, 0x77, 0x00),
    Color::rgb(0xff, 0x00, 0x55),
    Color::rgb(0xdd, 0x22, 0x00),
];

/// A laser bolt in flight.
#[derive(Debug, Clone)]
pub struct Laser {
    pub position: Vec3,
    pub direction: Vec3,
    traveled: f32,
}

/// A hostile drone homing on the player.
#[derive(Debug, Clone)]
pub struct Drone {
    pub position: Vec3,
    pub color: Color,
    velocity: Vec3,
    wobble: f32,
}

impl Drone {
    /// Steers toward the player; returns the current distance.
    fn update(&mut self, delta: f32, player: Vec3) -> f32 {
        self.wobble += delta * 3.5;
        let to_player = player - self.position;
        let distance = to_player.length();
        let desired = to_player.normalize_or_zero() * DRONE_SPEED;
        self.velocity = self.velocity.lerp(desired, (delta * 2.5).min(1.0));
        self.position += self.velocity * delta;
        self.position.y += self.wobble.sin() * 0.012;
        distance
    }
}

/// A short flash left behind by a destroyed drone.
#[derive(Debug, Clone)]
pub struct DroneExplosion {
    pub position: Vec3,
    pub color: Color,
    pub age: f32,
}

impl DroneExplosion {
    /// Remaining opacity in [0, 1].
    pub fn fade(&self) -> f32 {
        (1.0 - self.age / EXPLOSION_LIFE).max(0.0)
    }
}

/// Weapon state. Inert until armed once via the data core.
#[derive(Debug)]
pub struct WeaponSystem {
    pub active: bool,
    pub kills: u32,
    lasers: Vec<Laser>,
    drones: Vec<Drone>,
    explosions: Vec<DroneExplosion>,
    spawn_timer: f32,
    shot_timer: f32,
    rng: ChaCha8Rng,
}

impl WeaponSystem {
    pub fn new(seed: u64) -> Self {
        Self {
            active: false,
            kills: 0,
            lasers: Vec::new(),
            drones: Vec::new(),
            explosions: Vec::new(),
            spawn_timer: 0.0,
            shot_timer: 0.0,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Arms the weapon and schedules the first drone. Re-arming is a no-op.
    pub fn activate(&mut self, state: &mut GameState) {
        if self.active {
            return;
        }
        self.active = true;
        self.spawn_timer = 1.5;
        tracing::info!("laser weapon armed");
        state.notify("LASER WEAPON ARMED — left click to fire. Drones incoming…");
    }

    /// Fires a bolt from just in front of the camera, rate-limited.
    pub fn try_fire(&mut self, camera: &Camera) {
        if !self.active || self.shot_timer > 0.0 {
            return;
        }
        let direction = camera.forward();
        let mut origin = camera.position + direction * 0.6;
        origin.y -= 0.15;
        self.lasers.push(Laser {
            position: origin,
            direction,
            traveled: 0.0,
        });
        self.shot_timer = LASER_COOLDOWN;
    }

    pub fn lasers(&self) -> &[Laser] {
        &self.lasers
    }

    pub fn drones(&self) -> &[Drone] {
        &self.drones
    }

    pub fn explosions(&self) -> &[DroneExplosion] {
        &self.explosions
    }

    pub fn update(&mut self, delta: f32, player: Vec3, state: &mut GameState) {
        if !self.active {
            return;
        }

        self.shot_timer = (self.shot_timer - delta).max(0.0);

        // Spawn pressure rises with the kill count.
        self.spawn_timer -= delta;
        if self.spawn_timer <= 0.0 && self.drones.len() < MAX_DRONES {
            self.spawn_drone(player);
            #[allow(clippy::cast_precision_loss)]
            let interval = DRONE_SPAWN_INTERVAL - self.kills as f32 * 0.08;
            self.spawn_timer = interval.max(1.5);
        }

        // Advance bolts and resolve hits.
        let mut surviving = Vec::with_capacity(self.lasers.len());
        for mut laser in self.lasers.drain(..) {
            let step = LASER_SPEED * delta;
            laser.position += laser.direction * step;
            laser.traveled += step;
            if laser.traveled >= LASER_RANGE {
                continue;
            }

            let hit = self
                .drones
                .iter()
                .position(|d| d.position.distance(laser.position) < HIT_RADIUS);
            if let Some(index) = hit {
                let drone = self.drones.swap_remove(index);
                self.explosions.push(DroneExplosion {
                    position: drone.position,
                    color: drone.color,
                    age: 0.0,
                });
                self.kills += 1;
            } else {
                surviving.push(laser);
            }
        }
        self.lasers = surviving;

        // Drones close in; within reach they self-destruct.
        let mut impacted = Vec::new();
        let mut index = 0;
        while index < self.drones.len() {
            let distance = self.drones[index].update(delta, player);
            if distance < DRONE_REACH {
                let drone = self.drones.swap_remove(index);
                impacted.push(drone);
            } else {
                index += 1;
            }
        }
        for drone in impacted {
            self.explosions.push(DroneExplosion {
                position: drone.position,
                color: drone.color,
                age: 0.0,
            });
            state.notify(format!("Drone impact! ({} shot down)", self.kills));
        }

        for explosion in &mut self.explosions {
            explosion.age += delta;
        }
        self.explosions.retain(|e| e.age < EXPLOSION_LIFE);
    }

    fn spawn_drone(&mut self, player: Vec3) {
        let angle = self.rng.random_range(0.0..std::f32::consts::TAU);
        let distance = self.rng.random_range(22.0..36.0);
        let height = self.rng.random_range(10.0..24.0);
        let color = DRONE_COLORS[self.rng.random_range(0..DRONE_COLORS.len())];
        self.drones.push(Drone {
            position: Vec3::new(
                player.x + angle.cos() * distance,
                player.y + height,
                player.z + angle.sin() * distance,
            ),
            color,
            velocity: Vec3::ZERO,
            wobble: self.rng.random_range(0.0..std::f32::consts::TAU),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn player() -> Vec3 {
        Vec3::new(0.0, 37.7, 0.0)
    }

    #[test]
    fn test_inert_until_armed() {
        let mut weapon = WeaponSystem::new(5);
        let mut state = GameState::new();

        weapon.try_fire(&Camera::at(player()));
        assert!(weapon.lasers().is_empty());

        for _ in 0..600 {
            weapon.update(DT, player(), &mut state);
        }
        assert!(weapon.drones().is_empty());
    }

    #[test]
    fn test_fire_rate_limited() {
        let mut weapon = WeaponSystem::new(5);
        let mut state = GameState::new();
        weapon.activate(&mut state);

        let camera = Camera::at(player());
        weapon.try_fire(&camera);
        weapon.try_fire(&camera);
        assert_eq!(weapon.lasers().len(), 1);

        // After the cooldown another shot goes out.
        for _ in 0..6 {
            weapon.update(DT, player(), &mut state);
        }
        weapon.try_fire(&camera);
        assert_eq!(weapon.lasers().len(), 2);
    }

    #[test]
    fn test_bolts_despawn_at_range() {
        let mut weapon = WeaponSystem::new(5);
        let mut state = GameState::new();
        weapon.activate(&mut state);
        weapon.try_fire(&Camera::at(player()));

        // 50 m at 65 m/s is under a second.
        for _ in 0..60 {
            weapon.update(DT, player(), &mut state);
        }
        assert!(weapon.lasers().is_empty());
    }

    #[test]
    fn test_drones_spawn_and_home() {
        let mut weapon = WeaponSystem::new(5);
        let mut state = GameState::new();
        weapon.activate(&mut state);

        // First spawn after 1.5 s.
        for _ in 0..100 {
            weapon.update(DT, player(), &mut state);
        }
        assert_eq!(weapon.drones().len(), 1);
        let early = weapon.drones()[0].position.distance(player());

        for _ in 0..120 {
            weapon.update(DT, player(), &mut state);
        }
        let later = weapon.drones()[0].position.distance(player());
        assert!(later < early, "drone should close in: {early} -> {later}");
    }

    #[test]
    fn test_bolt_kills_drone() {
        let mut weapon = WeaponSystem::new(5);
        let mut state = GameState::new();
        weapon.activate(&mut state);

        // Plant a drone straight ahead of the camera and shoot it.
        weapon.drones.push(Drone {
            position: player() + Vec3::new(0.0, 0.0, -6.0),
            color: DRONE_COLORS[0],
            velocity: Vec3::ZERO,
            wobble: 0.0,
        });
        weapon.try_fire(&Camera::at(player()));

        for _ in 0..30 {
            weapon.update(DT, player(), &mut state);
        }
        assert_eq!(weapon.kills, 1);
        assert!(weapon.drones().is_empty());
    }
}
