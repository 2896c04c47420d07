//! Block targeting and swept collision.
//!
//! Both build on one grid march: advance a ray interface by interface
//! through the block lattice, stopping at the first cell holding a solid
//! block. Fluids never stop the ray, so the player can target the lake bed
//! through the water above it.

use cgmath::{InnerSpace, Point3, Vector3};

use crate::error::WorldError;
use crate::terrain::Terrain;

/// A solid cell found along a marched ray.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RayHit {
    /// World distance from the ray origin to the hit interface.
    pub distance: f32,
    /// The solid cell.
    pub cell: Point3<i32>,
    /// The cell the ray crossed immediately before the hit; always open, so
    /// block placement targets it.
    pub prev_cell: Point3<i32>,
}

/// Marches `direction` (length = search distance) from `origin` through the
/// block grid, returning the first solid cell crossed, if any.
///
/// Fluid and empty cells are stepped through. A coordinate whose chunk is
/// not resident surfaces as [`WorldError::MissingChunk`] rather than a miss;
/// a zero-length ray cannot select an interface and is rejected as
/// [`WorldError::DegenerateRay`].
pub fn march(
    origin: Point3<f32>,
    direction: Vector3<f32>,
    terrain: &Terrain,
) -> Result<Option<RayHit>, WorldError> {
    let max_len = direction.magnitude();
    if max_len == 0.0 {
        return Err(WorldError::DegenerateRay);
    }
    let direction = [
        direction.x / max_len,
        direction.y / max_len,
        direction.z / max_len,
    ];
    let mut position = [origin.x, origin.y, origin.z];
    let mut cell = [
        origin.x.floor() as i32,
        origin.y.floor() as i32,
        origin.z.floor() as i32,
    ];
    let mut prev_cell = cell;

    let mut traveled = 0.0f32;
    while traveled < max_len {
        // No interface can be farther than the cell diagonal away.
        let mut min_t = 3.0f32.sqrt();
        let mut interface_axis = None;

        for axis in 0..3 {
            if direction[axis] == 0.0 {
                continue;
            }
            let mut offset = direction[axis].signum().max(0.0);
            // Sitting exactly on an interface and looking negative: the next
            // crossing is the near face, not the far one.
            if cell[axis] as f32 == position[axis] && offset == 0.0 {
                offset = -1.0;
            }
            let next_interface = (cell[axis] as f32) + offset;
            let axis_t = ((next_interface - position[axis]) / direction[axis]).min(max_len);
            if axis_t < min_t {
                min_t = axis_t;
                interface_axis = Some(axis);
            }
        }

        let axis = interface_axis.ok_or(WorldError::DegenerateRay)?;
        traveled += min_t;
        for i in 0..3 {
            position[i] += direction[i] * min_t;
        }

        prev_cell = cell;
        cell = [
            position[0].floor() as i32,
            position[1].floor() as i32,
            position[2].floor() as i32,
        ];
        // Crossing a face in the negative direction lands on that face's
        // coordinate; the entered cell is one below it.
        if direction[axis] < 0.0 {
            cell[axis] -= 1;
        }

        let block = terrain.get_block(cell[0], cell[1], cell[2])?;
        if !block.is_empty() && !block.is_fluid() {
            return Ok(Some(RayHit {
                distance: traveled.min(max_len),
                cell: Point3::new(cell[0], cell[1], cell[2]),
                prev_cell: Point3::new(prev_cell[0], prev_cell[1], prev_cell[2]),
            }));
        }
    }

    Ok(None)
}

// The player occupies a 1x2x1 box; rays start from the four corners of each
// of its three horizontal slices.
const BOX_CORNERS: [Vector3<f32>; 12] = [
    Vector3::new(0.5, 0.0, 0.5),
    Vector3::new(0.5, 0.0, -0.5),
    Vector3::new(-0.5, 0.0, -0.5),
    Vector3::new(-0.5, 0.0, 0.5),
    Vector3::new(0.5, 1.0, 0.5),
    Vector3::new(0.5, 1.0, -0.5),
    Vector3::new(-0.5, 1.0, -0.5),
    Vector3::new(-0.5, 1.0, 0.5),
    Vector3::new(0.5, 2.0, 0.5),
    Vector3::new(0.5, 2.0, -0.5),
    Vector3::new(-0.5, 2.0, -0.5),
    Vector3::new(-0.5, 2.0, 0.5),
];

/// Clamps a displacement so the player's bounding box never enters solid
/// terrain, marching each corner per axis and shortening the blocked axes.
pub fn sweep_player_box(
    position: Point3<f32>,
    displacement: Vector3<f32>,
    terrain: &Terrain,
) -> Result<Vector3<f32>, WorldError> {
    let mut clamped = displacement;

    for corner in BOX_CORNERS {
        let ray_origin = position + corner;
        for axis in 0..3 {
            let component = clamped[axis];
            if component == 0.0 {
                continue;
            }
            let mut ray = Vector3::new(0.0, 0.0, 0.0);
            ray[axis] = component;
            if let Some(hit) = march(ray_origin, ray, terrain)? {
                if hit.distance > 0.001 {
                    clamped[axis] = component.signum()
                        * (component.abs().min(hit.distance) - 0.0001).max(0.0);
                } else {
                    clamped[axis] = 0.0;
                }
            }
        }
    }

    Ok(clamped)
}
