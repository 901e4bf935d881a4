use rstar::{RTree, RTreeObject, AABB};

/// Integer block coordinate in the host world.
pub type BlockPos = [i32; 3];

/// Lightweight position-only record for spatial indexing; avoids cloning
/// full creatures into the tree.
#[derive(Clone, Debug)]
pub struct CreatureLocation {
    pub id: u32,
    pub position: [f64; 3],
}

impl RTreeObject for CreatureLocation {
    type Envelope = AABB<[f64; 3]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position)
    }
}

/// Build an R*-tree from creature positions via bulk_load (O(n log n)).
pub fn build_index(locations: Vec<CreatureLocation>) -> RTree<CreatureLocation> {
    RTree::bulk_load(locations)
}

/// IDs of creatures inside the axis-aligned cube of the given half-extent
/// centered on `center`, excluding `self_id`.
///
/// The contagion census box is a cube (Chebyshev metric), so envelope
/// containment is exact and no distance filter is needed.
pub fn query_cube(
    tree: &RTree<CreatureLocation>,
    center: [f64; 3],
    half_extent: f64,
    self_id: u32,
) -> Vec<u32> {
    let envelope = AABB::from_corners(
        [
            center[0] - half_extent,
            center[1] - half_extent,
            center[2] - half_extent,
        ],
        [
            center[0] + half_extent,
            center[1] + half_extent,
            center[2] + half_extent,
        ],
    );
    let mut result: Vec<u32> = tree
        .locate_in_envelope(&envelope)
        .filter(|loc| loc.id != self_id)
        .map(|loc| loc.id)
        .collect();
    result.sort_unstable();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_location(id: u32, x: f64, y: f64, z: f64) -> CreatureLocation {
        CreatureLocation {
            id,
            position: [x, y, z],
        }
    }

    #[test]
    fn query_finds_creatures_inside_the_cube() {
        let tree = build_index(vec![
            make_location(0, 5.0, 5.0, 5.0),
            make_location(1, 8.0, 5.0, 5.0),
            make_location(2, 50.0, 5.0, 5.0),
        ]);
        assert_eq!(query_cube(&tree, [5.0, 5.0, 5.0], 4.0, u32::MAX), vec![0, 1]);
    }

    #[test]
    fn query_excludes_self() {
        let tree = build_index(vec![
            make_location(0, 5.0, 5.0, 5.0),
            make_location(1, 6.0, 5.0, 5.0),
        ]);
        assert_eq!(query_cube(&tree, [5.0, 5.0, 5.0], 4.0, 0), vec![1]);
    }

    #[test]
    fn query_is_chebyshev_not_euclidean() {
        // The cube corner is inside the box even though its Euclidean
        // distance exceeds the half-extent.
        let tree = build_index(vec![make_location(0, 9.0, 9.0, 9.0)]);
        assert_eq!(query_cube(&tree, [5.0, 5.0, 5.0], 4.0, u32::MAX), vec![0]);
    }

    #[test]
    fn query_excludes_creatures_outside_any_axis() {
        let tree = build_index(vec![make_location(0, 5.0, 10.5, 5.0)]);
        assert!(query_cube(&tree, [5.0, 5.0, 5.0], 4.0, u32::MAX).is_empty());
    }

    #[test]
    fn query_returns_sorted_ids() {
        let tree = build_index(vec![
            make_location(9, 5.0, 5.0, 5.0),
            make_location(2, 6.0, 5.0, 5.0),
            make_location(7, 4.0, 5.0, 5.0),
        ]);
        assert_eq!(query_cube(&tree, [5.0, 5.0, 5.0], 4.0, u32::MAX), vec![2, 7, 9]);
    }
}
