//! Collectible data fragments, three hidden on each floor.

use glam::Vec3;

use crate::collide::Aabb;
use crate::room::{Interaction, Room};
use crate::state::{FragmentId, GameState};

/// Pick-up volume half-extent around a fragment.
const PICKUP_EXTENT: f32 = 0.45;

/// Local positions (x, height above floor, z) of the three fragments on
/// each floor.
pub fn positions(floor: crate::state::Floor) -> [Vec3; 3] {
    use crate::state::Floor;
    match floor {
        Floor::Lobby => [
            Vec3::new(-12.0, 1.2, -12.0),
            Vec3::new(11.0, 3.5, 3.0),
            Vec3::new(-3.0, 4.2, 10.0),
        ],
        Floor::Basement => [
            Vec3::new(13.0, 0.6, -13.0),
            Vec3::new(-12.0, 3.0, 6.0),
            Vec3::new(5.0, 1.0, -5.0),
        ],
        Floor::Pixel => [
            Vec3::new(-13.0, 4.0, -13.0),
            Vec3::new(12.0, 1.5, 11.0),
            Vec3::new(0.0, 2.0, 8.0),
        ],
        Floor::Crypto => [
            Vec3::new(-13.0, 1.0, -13.0),
            Vec3::new(13.0, 4.0, 10.0),
            Vec3::new(-8.0, 2.0, 3.0),
        ],
        Floor::Roof => [
            Vec3::new(-12.0, 0.8, -10.0),
            Vec3::new(12.0, 0.8, -10.0),
            Vec3::new(0.0, 0.8, -13.0),
        ],
    }
}

/// Registers the floor's still-uncollected fragments as markers and
/// interactables. Called once from [`Room::build`].
pub(crate) fn build_fragments(room: &mut Room, state: &GameState) {
    for (slot, local) in positions(room.floor).into_iter().enumerate() {
        #[allow(clippy::cast_possible_truncation)]
        let id = FragmentId {
            floor: room.floor,
            slot: slot as u8,
        };
        if state.is_collected(id) {
            continue;
        }
        let world = Vec3::new(local.x, room.floor_y + local.y, local.z);
        room.fragment_markers.push(crate::room::FragmentMarker {
            id,
            position: world,
        });
        room.interactables.push(crate::room::Interactable {
            volumes: vec![Aabb::around(world, PICKUP_EXTENT)],
            action: Interaction::Fragment(id),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{FRAGMENTS_PER_FLOOR, Floor};

    #[test]
    fn test_every_floor_has_three_positions() {
        for floor in Floor::ALL {
            let positions = positions(floor);
            assert_eq!(positions.len(), FRAGMENTS_PER_FLOOR);
            for p in positions {
                // Inside the room footprint and above its floor.
                assert!(p.x.abs() < 15.0);
                assert!(p.z.abs() < 15.0);
                assert!(p.y > 0.0);
            }
        }
    }
}
