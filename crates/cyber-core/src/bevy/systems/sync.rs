//! Scene setup and per-frame visual sync from the simulation.
//!
//! Static room geometry is spawned as meshes on every floor change;
//! particles (glitter, bursts, fireworks, bolts, drones) are drawn with
//! the Gizmos API, which gives immediate feedback without managing
//! per-particle entities.

use bevy::prelude::*;

use crate::ball::{BALL_RADIUS, GLITTER_COLORS};
use crate::bevy::resources::TowerSim;
use crate::constants::Color as CoreColor;
use crate::state::{Floor, FragmentId};

/// Marker for the player camera entity.
#[derive(Component)]
pub struct PlayerCamera;

/// Everything spawned for the active room; despawned on floor change.
#[derive(Component)]
pub struct RoomTag;

#[derive(Component)]
pub struct BallVisual;

#[derive(Component)]
pub struct HoverboardVisual;

/// Index into the active room's platform list.
#[derive(Component)]
pub struct PlatformVisual(pub usize);

#[derive(Component)]
pub struct FragmentVisual(pub FragmentId);

fn color(c: CoreColor) -> Color {
    Color::srgba_u8(c.r, c.g, c.b, c.a)
}

fn faded(c: CoreColor, alpha: f32) -> Color {
    let [r, g, b, _] = c.to_f32();
    Color::srgba(r, g, b, alpha)
}

/// Spawns the camera, the ball and the hoverboard. Room content follows
/// in `sync_room` once the first frame has run.
pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.insert_resource(GlobalAmbientLight {
        color: Color::srgb(0.7, 0.75, 0.9),
        brightness: 120.0,
        ..default()
    });

    commands.spawn((Camera3d::default(), Transform::default(), PlayerCamera));

    commands.spawn((
        BallVisual,
        Mesh3d(meshes.add(Sphere::new(BALL_RADIUS))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::WHITE,
            emissive: LinearRgba::rgb(1.0, 0.4, 0.0),
            perceptual_roughness: 0.15,
            metallic: 0.85,
            ..default()
        })),
        Transform::default(),
        Visibility::Hidden,
    ));

    commands.spawn((
        HoverboardVisual,
        Mesh3d(meshes.add(Cuboid::new(1.6, 0.08, 0.6))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb_u8(0x00, 0x22, 0x33),
            emissive: LinearRgba::rgb(0.0, 0.8, 1.0) * 0.6,
            metallic: 0.9,
            perceptual_roughness: 0.15,
            ..default()
        })),
        Transform::default(),
    ));
}

/// Rebuilds room meshes whenever the active floor changes.
pub fn sync_room(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    sim: Res<TowerSim>,
    existing: Query<Entity, With<RoomTag>>,
    mut last_floor: Local<Option<Floor>>,
) {
    let floor = sim.0.state.current_floor;
    if *last_floor == Some(floor) {
        return;
    }
    *last_floor = Some(floor);

    for entity in &existing {
        commands.entity(entity).despawn();
    }

    let room = sim.0.active_room();

    for prop in &room.props {
        let material = if prop.emissive {
            StandardMaterial {
                base_color: color(prop.color),
                emissive: color(prop.color).to_linear() * 2.0,
                ..default()
            }
        } else {
            StandardMaterial {
                base_color: color(prop.color),
                perceptual_roughness: 0.85,
                metallic: 0.15,
                ..default()
            }
        };
        commands.spawn((
            RoomTag,
            Mesh3d(meshes.add(Cuboid::new(prop.size.x, prop.size.y, prop.size.z))),
            MeshMaterial3d(materials.add(material)),
            Transform::from_xyz(prop.center.x, prop.center.y, prop.center.z),
        ));
    }

    for (index, platform) in room.platforms.iter().enumerate() {
        let size = platform.size();
        let center = platform.center();
        commands.spawn((
            RoomTag,
            PlatformVisual(index),
            Mesh3d(meshes.add(Cuboid::new(size.x, size.y, size.z))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::srgb_u8(0x0d, 0x1a, 0x2a),
                emissive: LinearRgba::rgb(0.0, 0.83, 1.0) * 0.35,
                metallic: 0.7,
                perceptual_roughness: 0.3,
                ..default()
            })),
            Transform::from_xyz(center.x, center.y, center.z),
        ));
    }

    for marker in &room.fragment_markers {
        commands.spawn((
            RoomTag,
            FragmentVisual(marker.id),
            Mesh3d(meshes.add(Sphere::new(0.25))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::srgb_u8(0x11, 0x22, 0x00),
                emissive: LinearRgba::rgb(0.0, 1.0, 0.53) * 2.5,
                ..default()
            })),
            Transform::from_xyz(marker.position.x, marker.position.y, marker.position.z),
        ));
    }

    // Room fill light.
    commands.spawn((
        RoomTag,
        PointLight {
            intensity: 2_000_000.0,
            range: 40.0,
            color: Color::srgb(0.8, 0.9, 1.0),
            ..default()
        },
        Transform::from_xyz(0.0, room.floor_y + 4.2, 0.0),
    ));
}

/// Camera transform from the simulation camera.
pub fn sync_camera(sim: Res<TowerSim>, mut query: Query<&mut Transform, With<PlayerCamera>>) {
    let camera = sim.0.camera;
    for mut transform in &mut query {
        transform.translation = Vec3::new(camera.position.x, camera.position.y, camera.position.z);
        transform.rotation = Quat::from_euler(EulerRot::YXZ, camera.yaw, camera.pitch, 0.0);
    }
}

/// Moves platforms, fragments, the ball and the hoverboard to their
/// simulated positions.
#[allow(clippy::type_complexity)]
pub fn sync_dynamic(
    mut commands: Commands,
    time: Res<Time>,
    sim: Res<TowerSim>,
    mut platforms: Query<(&PlatformVisual, &mut Transform)>,
    mut fragments: Query<
        (Entity, &FragmentVisual, &mut Transform),
        (Without<PlatformVisual>, Without<BallVisual>, Without<HoverboardVisual>),
    >,
    mut ball: Query<
        (&mut Transform, &mut Visibility),
        (With<BallVisual>, Without<PlatformVisual>, Without<FragmentVisual>),
    >,
    mut board: Query<
        (&mut Transform, &mut Visibility),
        (
            With<HoverboardVisual>,
            Without<BallVisual>,
            Without<PlatformVisual>,
            Without<FragmentVisual>,
        ),
    >,
) {
    let tower = &sim.0;
    let room = tower.active_room();

    for (PlatformVisual(index), mut transform) in &mut platforms {
        if let Some(platform) = room.platforms.get(*index) {
            let center = platform.center();
            transform.translation = Vec3::new(center.x, center.y, center.z);
        }
    }

    for (entity, FragmentVisual(id), mut transform) in &mut fragments {
        let Some(marker) = room.fragment_markers.iter().find(|m| m.id == *id) else {
            // Collected since the room was spawned.
            commands.entity(entity).despawn();
            continue;
        };
        let bob = (tower.time * 1.5 + marker.position.y * 2.0).sin() * 0.15;
        transform.translation =
            Vec3::new(marker.position.x, marker.position.y + bob, marker.position.z);
        transform.rotation = Quat::from_rotation_y(tower.time * 1.2);
    }

    for (mut transform, mut visibility) in &mut ball {
        *visibility = if tower.ball.active {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
        transform.translation = Vec3::new(
            tower.ball.position.x,
            tower.ball.position.y,
            tower.ball.position.z,
        );
        let delta = time.delta_secs();
        transform.rotate_x(tower.ball.velocity.z * delta * 3.0);
        transform.rotate_z(-tower.ball.velocity.x * delta * 3.0);
    }

    for (mut transform, mut visibility) in &mut board {
        *visibility = if tower.hoverboard.mounted {
            Visibility::Hidden
        } else {
            Visibility::Visible
        };
        transform.translation = Vec3::new(
            tower.hoverboard.position.x,
            tower.hoverboard.position.y,
            tower.hoverboard.position.z,
        );
    }
}

/// Immediate-mode particle rendering: glitter trail, collection bursts,
/// fireworks, laser bolts and drones.
pub fn draw_particles(mut gizmos: Gizmos, sim: Res<TowerSim>) {
    let tower = &sim.0;

    if tower.ball.trail_visible() {
        for (index, particle) in tower.ball.trail().iter().enumerate() {
            if !particle.alive {
                continue;
            }
            let brightness = particle.brightness(index);
            let [r, g, b, _] = GLITTER_COLORS[particle.color].to_f32();
            gizmos.sphere(
                Vec3::new(particle.position.x, particle.position.y, particle.position.z),
                particle.size * 0.5,
                Color::srgb(r * brightness, g * brightness, b * brightness),
            );
        }
    }

    for burst in &tower.active_room().bursts {
        let tint = faded(burst.color, burst.opacity());
        for (position, _) in &burst.particles {
            gizmos.sphere(Vec3::new(position.x, position.y, position.z), 0.05, tint);
        }
    }

    for rocket in tower.fireworks.rockets() {
        gizmos.sphere(
            Vec3::new(rocket.position.x, rocket.position.y, rocket.position.z),
            0.1,
            Color::srgb(1.0, 0.8, 0.0),
        );
    }
    for explosion in tower.fireworks.explosions() {
        let tint = faded(explosion.color, explosion.fade());
        for (position, _) in &explosion.particles {
            gizmos.sphere(Vec3::new(position.x, position.y, position.z), 0.06, tint);
        }
        let ring_tint = Color::srgba(1.0, 1.0, 1.0, explosion.fade() * 0.9);
        for (position, _) in &explosion.ring {
            gizmos.sphere(Vec3::new(position.x, position.y, position.z), 0.04, ring_tint);
        }
    }

    for laser in tower.weapon.lasers() {
        let head = Vec3::new(laser.position.x, laser.position.y, laser.position.z);
        let tail = head
            - Vec3::new(laser.direction.x, laser.direction.y, laser.direction.z) * 0.7;
        gizmos.line(tail, head, Color::srgb(0.0, 1.0, 1.0));
    }
    for drone in tower.weapon.drones() {
        gizmos.sphere(
            Vec3::new(drone.position.x, drone.position.y, drone.position.z),
            0.28,
            color(drone.color),
        );
    }
    for explosion in tower.weapon.explosions() {
        gizmos.sphere(
            Vec3::new(explosion.position.x, explosion.position.y, explosion.position.z),
            0.3 + explosion.age * 1.5,
            faded(explosion.color, explosion.fade()),
        );
    }
}
