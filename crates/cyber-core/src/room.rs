//! Rooms: static colliders, render props, moving platforms, interactables.
//!
//! A room is built once at startup and owns its geometry for the life of
//! the session. Static colliders never change; each moving platform's
//! box is rewritten every frame from its oscillation phase, so physics
//! always sees live geometry without its own update hook.

use glam::Vec3;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::collide::Aabb;
use crate::constants::{
    Color, PLAYER_HEIGHT, ROOM_HEIGHT, ROOM_SIZE, WALL_THICKNESS,
};
use crate::fragments;
use crate::state::{Floor, FragmentId, GameState};

/// Oscillation axis for a moving platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformAxis {
    X,
    Z,
}

/// A platform sliding back and forth along one horizontal axis.
///
/// `offset(t) = range · sin(speed · t + phase)`, with a random phase so
/// platforms in the same room don't move in lockstep.
#[derive(Debug, Clone)]
pub struct MovingPlatform {
    /// Center-bottom of the platform at offset 0, world space.
    base: Vec3,
    size: Vec3,
    axis: PlatformAxis,
    range: f32,
    speed: f32,
    phase: f32,
    /// Current oscillation offset along `axis`.
    pub offset: f32,
    /// Live bounding box, rewritten every frame.
    pub aabb: Aabb,
}

impl MovingPlatform {
    fn new(
        base: Vec3,
        size: Vec3,
        axis: PlatformAxis,
        range: f32,
        speed: f32,
        phase: f32,
    ) -> Self {
        let mut platform = Self {
            base,
            size,
            axis,
            range,
            speed,
            phase,
            offset: 0.0,
            aabb: Aabb::from_center_bottom(base, size),
        };
        platform.refresh_aabb();
        platform
    }

    /// Recomputes the offset and bounding box for the given simulation time.
    pub fn advance(&mut self, time: f32) {
        self.offset = (time * self.speed + self.phase).sin() * self.range;
        self.refresh_aabb();
    }

    fn refresh_aabb(&mut self) {
        let mut center_bottom = self.base;
        match self.axis {
            PlatformAxis::X => center_bottom.x += self.offset,
            PlatformAxis::Z => center_bottom.z += self.offset,
        }
        self.aabb = Aabb::from_center_bottom(center_bottom, self.size);
    }

    /// Center of the platform body, for rendering.
    pub fn center(&self) -> Vec3 {
        self.aabb.center()
    }

    pub fn size(&self) -> Vec3 {
        self.size
    }

    #[cfg(test)]
    pub(crate) fn fixed_for_test(base: Vec3, size: Vec3, axis: PlatformAxis) -> Self {
        Self::new(base, size, axis, 0.0, 0.0, 0.0)
    }
}

/// A renderable solid block. Colliders are tracked separately so
/// decoration can be walked through.
#[derive(Debug, Clone)]
pub struct Prop {
    pub center: Vec3,
    pub size: Vec3,
    pub color: Color,
    pub emissive: bool,
}

/// What activating an interactable does. Typed counterpart of the
/// per-registration callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    /// Collect the fragment with this id.
    Fragment(FragmentId),
    /// Open the elevator floor-select terminal.
    ElevatorPanel,
    /// Open the gating puzzle terminal of a floor.
    PuzzleTerminal(Floor),
    /// Mount the hoverboard.
    Hoverboard,
    /// Arm the laser weapon.
    DataCore,
}

/// A pickable volume bound to an action.
#[derive(Debug, Clone)]
pub struct Interactable {
    pub volumes: Vec<Aabb>,
    pub action: Interaction,
}

/// A collectible fragment still present in the room.
#[derive(Debug, Clone, Copy)]
pub struct FragmentMarker {
    pub id: FragmentId,
    pub position: Vec3,
}

/// Lifetime of a collection burst in seconds.
const BURST_LIFE: f32 = 1.0;
const BURST_PARTICLES: usize = 30;

/// Short-lived particle burst, spawned when a fragment is collected.
#[derive(Debug, Clone)]
pub struct Burst {
    pub color: Color,
    pub age: f32,
    pub particles: Vec<(Vec3, Vec3)>,
}

impl Burst {
    fn new(origin: Vec3, color: Color, rng: &mut ChaCha8Rng) -> Self {
        let particles = (0..BURST_PARTICLES)
            .map(|_| {
                let velocity = Vec3::new(
                    rng.random_range(-1.5..1.5),
                    rng.random_range(-1.5..1.5),
                    rng.random_range(-1.5..1.5),
                );
                (origin, velocity)
            })
            .collect();
        Self {
            color,
            age: 0.0,
            particles,
        }
    }

    fn update(&mut self, delta: f32) {
        self.age += delta;
        for (position, velocity) in &mut self.particles {
            *position += *velocity * delta;
            *velocity *= 0.95;
        }
    }

    fn finished(&self) -> bool {
        self.age > BURST_LIFE
    }

    /// Remaining opacity in [0, 1].
    pub fn opacity(&self) -> f32 {
        (1.0 - self.age / BURST_LIFE).max(0.0)
    }
}

/// One floor's worth of world.
#[derive(Debug)]
pub struct Room {
    pub floor: Floor,
    pub floor_y: f32,
    pub colliders: Vec<Aabb>,
    pub props: Vec<Prop>,
    pub platforms: Vec<MovingPlatform>,
    pub interactables: Vec<Interactable>,
    pub fragment_markers: Vec<FragmentMarker>,
    pub bursts: Vec<Burst>,
}

impl Room {
    /// Builds a floor's room. Fragments already collected are left out.
    pub fn build(floor: Floor, rng: &mut ChaCha8Rng, state: &GameState) -> Self {
        let mut room = Self {
            floor,
            floor_y: floor.floor_y(),
            colliders: Vec::new(),
            props: Vec::new(),
            platforms: Vec::new(),
            interactables: Vec::new(),
            fragment_markers: Vec::new(),
            bursts: Vec::new(),
        };

        room.build_shell();
        match floor {
            Floor::Lobby => room.build_lobby(),
            Floor::Basement => room.build_basement(rng),
            Floor::Pixel => room.build_pixel(),
            Floor::Crypto => room.build_crypto(rng),
            Floor::Roof => room.build_roof(),
        }
        room.add_elevator_panel();
        fragments::build_fragments(&mut room, state);
        room
    }

    /// Player spawn in world space.
    pub fn spawn_point(&self) -> Vec3 {
        Vec3::new(0.0, self.floor_y + PLAYER_HEIGHT, 8.0)
    }

    /// Per-frame cosmetic update: advances and retires bursts.
    pub fn update(&mut self, delta: f32) {
        for burst in &mut self.bursts {
            burst.update(delta);
        }
        self.bursts.retain(|b| !b.finished());
    }

    /// Slides every moving platform to its position at `time` and
    /// rewrites its bounding box.
    pub fn update_platforms(&mut self, time: f32) {
        for platform in &mut self.platforms {
            platform.advance(time);
        }
    }

    /// Spawns a collection burst at a world position.
    pub fn spawn_burst(&mut self, origin: Vec3, color: Color, rng: &mut ChaCha8Rng) {
        self.bursts.push(Burst::new(origin, color, rng));
    }

    /// Removes the visual marker of a collected fragment.
    pub fn remove_fragment_marker(&mut self, id: FragmentId) {
        self.fragment_markers.retain(|m| m.id != id);
    }

    // ── Geometry helpers ────────────────────────────────────────────

    /// Adds a solid box: a prop plus a collider. Coordinates are local
    /// (x/z centered on the room, y above the floor surface).
    fn add_box(&mut self, x: f32, y: f32, z: f32, w: f32, h: f32, d: f32, color: Color) {
        self.add_prop(x, y, z, w, h, d, color, false);
        self.colliders.push(Aabb::new(
            Vec3::new(x - w / 2.0, self.floor_y + y, z - d / 2.0),
            Vec3::new(x + w / 2.0, self.floor_y + y + h, z + d / 2.0),
        ));
    }

    /// Adds a render-only block with no collider.
    #[allow(clippy::too_many_arguments)]
    fn add_prop(&mut self, x: f32, y: f32, z: f32, w: f32, h: f32, d: f32, color: Color, emissive: bool) {
        self.props.push(Prop {
            center: Vec3::new(x, self.floor_y + y + h / 2.0, z),
            size: Vec3::new(w, h, d),
            color,
            emissive,
        });
    }

    /// Adds an oscillating platform with a random phase.
    #[allow(clippy::too_many_arguments)]
    fn add_platform(
        &mut self,
        x: f32,
        y: f32,
        z: f32,
        w: f32,
        h: f32,
        d: f32,
        axis: PlatformAxis,
        range: f32,
        speed: f32,
        rng: &mut ChaCha8Rng,
    ) {
        let phase = rng.random_range(0.0..std::f32::consts::TAU);
        self.platforms.push(MovingPlatform::new(
            Vec3::new(x, self.floor_y + y, z),
            Vec3::new(w, h, d),
            axis,
            range,
            speed,
            phase,
        ));
    }

    fn add_interactable(&mut self, volume: Aabb, action: Interaction) {
        self.interactables.push(Interactable {
            volumes: vec![volume],
            action,
        });
    }

    // ── Standard shell ──────────────────────────────────────────────

    /// Floor slab, four walls and (below the roof) a ceiling slab.
    fn build_shell(&mut self) {
        let s = ROOM_SIZE;
        let h = ROOM_HEIGHT;
        let hs = s / 2.0;
        let wt = WALL_THICKNESS;

        self.add_prop(0.0, -0.1, 0.0, s, 0.1, s, Color::DARK_FLOOR, false);

        self.add_box(0.0, 0.0, -hs, s, h, wt, Color::DARK_PANEL); // north
        self.add_box(0.0, 0.0, hs, s, h, wt, Color::DARK_PANEL); // south
        self.add_box(-hs, 0.0, 0.0, wt, h, s, Color::DARK_PANEL); // west
        self.add_box(hs, 0.0, 0.0, wt, h, s, Color::DARK_PANEL); // east

        if self.floor != Floor::Roof {
            self.add_prop(0.0, h, 0.0, s, 0.1, s, Color::DIM, false);
        }
    }

    /// Elevator call panel on the east wall, present on every floor.
    fn add_elevator_panel(&mut self) {
        self.add_prop(14.4, 0.8, 0.0, 0.3, 1.4, 0.8, Color::NEON_BLUE, true);
        self.add_interactable(
            Aabb::new(
                Vec3::new(14.1, self.floor_y + 0.8, -0.5),
                Vec3::new(14.7, self.floor_y + 2.2, 0.5),
            ),
            Interaction::ElevatorPanel,
        );
    }

    /// Gating-puzzle terminal against the north wall.
    fn add_puzzle_terminal(&mut self, x: f32) {
        self.add_box(x, 0.0, -14.2, 1.6, 2.2, 0.4, Color::DARK_PANEL);
        self.add_prop(x, 1.2, -13.95, 1.2, 0.8, 0.05, Color::NEON_GREEN, true);
        self.add_interactable(
            Aabb::new(
                Vec3::new(x - 0.9, self.floor_y + 0.4, -14.7),
                Vec3::new(x + 0.9, self.floor_y + 2.4, -13.8),
            ),
            Interaction::PuzzleTerminal(self.floor),
        );
    }

    // ── Floors ──────────────────────────────────────────────────────

    fn build_lobby(&mut self) {
        // Hologram pedestal in the center.
        self.add_box(0.0, 0.0, 0.0, 2.0, 0.5, 2.0, Color::DARK_PANEL);
        self.add_prop(0.0, 2.0, 0.0, 1.0, 1.0, 1.0, Color::NEON_BLUE, true);

        // Four support columns.
        for (x, z) in [(-9.0, -9.0), (9.0, -9.0), (-9.0, 9.0), (9.0, 9.0)] {
            self.add_box(x, 0.0, z, 1.2, ROOM_HEIGHT, 1.2, Color::DARK_PANEL);
        }
    }

    fn build_basement(&mut self, rng: &mut ChaCha8Rng) {
        // Server rack rows.
        for x in [-10.0, -7.0, 7.0, 10.0] {
            self.add_box(x, 0.0, -9.0, 2.2, 2.4, 0.9, Color::DIM);
            self.add_box(x, 0.0, 9.0, 2.2, 2.4, 0.9, Color::DIM);
        }

        self.add_platform(-7.0, 1.5, -5.0, 2.4, 0.22, 1.2, PlatformAxis::X, 5.0, 0.6, rng);
        self.add_platform(4.0, 2.3, 1.0, 2.2, 0.22, 1.0, PlatformAxis::Z, 5.5, 0.5, rng);

        self.add_puzzle_terminal(4.0);
    }

    fn build_pixel(&mut self) {
        // Large pixel display wall.
        self.add_box(0.0, 0.5, -13.8, 8.0, 4.0, 0.4, Color::DARK_PANEL);

        // Crates to climb on.
        self.add_box(-8.0, 0.0, 6.0, 1.6, 0.8, 1.6, Color::DIM);
        self.add_box(-6.2, 0.0, 6.0, 1.6, 1.6, 1.6, Color::DIM);
        self.add_box(10.0, 0.0, -4.0, 2.0, 1.0, 2.0, Color::DIM);

        self.add_puzzle_terminal(-6.0);
    }

    fn build_crypto(&mut self, rng: &mut ChaCha8Rng) {
        // Cipher pillars.
        for (x, z) in [(-8.0, 4.0), (0.0, 6.0), (8.0, 4.0)] {
            self.add_box(x, 0.0, z, 1.4, 3.2, 1.4, Color::DARK_PANEL);
            self.add_prop(x, 3.2, z, 1.0, 0.3, 1.0, Color::NEON_PINK, true);
        }

        self.add_platform(-6.0, 1.4, 0.0, 2.4, 0.22, 1.2, PlatformAxis::Z, 4.5, 0.7, rng);
        self.add_platform(5.0, 2.0, -3.0, 2.2, 0.22, 1.0, PlatformAxis::X, 4.0, 0.9, rng);

        self.add_puzzle_terminal(5.0);
    }

    fn build_roof(&mut self) {
        // Antenna mast; pokes above the shell on purpose.
        self.add_box(0.0, 0.0, -10.0, 1.0, 8.0, 1.0, Color::DARK_PANEL);
        self.add_prop(0.0, 8.0, -10.0, 0.2, 1.5, 0.2, Color::NEON_PINK, true);

        // Data core: arms the laser weapon.
        self.add_box(6.0, 0.0, -6.0, 1.5, 1.8, 1.5, Color::DARK_PANEL);
        self.add_prop(6.0, 1.9, -6.0, 0.9, 0.9, 0.9, Color::NEON_GREEN, true);
        self.add_interactable(
            Aabb::new(
                Vec3::new(5.0, self.floor_y, -7.0),
                Vec3::new(7.0, self.floor_y + 2.8, -5.0),
            ),
            Interaction::DataCore,
        );

        // Hoverboard pad; the board itself is simulated separately.
        self.add_prop(-8.0, 0.0, 2.0, 2.4, 0.1, 1.2, Color::NEON_BLUE, true);
        self.add_interactable(
            Aabb::new(
                Vec3::new(-9.2, self.floor_y, 1.0),
                Vec3::new(-6.8, self.floor_y + 1.6, 3.0),
            ),
            Interaction::Hoverboard,
        );
    }
}
