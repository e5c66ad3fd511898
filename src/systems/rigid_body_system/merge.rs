//! Bonding - fusing touching bodies of a bonding alloy
//!
//! When a freshly solidified body of a bonding material appears, every body
//! of the same material reachable through 4-adjacent solid cells is absorbed
//! into it. Static molds join in and make the result static; spouts and
//! hammers never do.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::core::grid::Grid;
use crate::core::point::Point;
use crate::systems::rigid_body::{BodyId, RigidBody};

use super::rasterize::clear_body;
use super::system::RigidBodySystem;

const ADJACENT: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

impl RigidBodySystem {
    /// Add a solidified body, fusing it with touching bodies of its alloy
    /// when the alloy bonds. Returns the id of the resulting body.
    pub fn add_solidified(&mut self, body: RigidBody, grid: &mut Grid) -> Option<BodyId> {
        if !body.material.bonds() {
            return self.add_body(body, grid);
        }

        let mut owner: HashMap<Point, usize> = HashMap::new();
        for (idx, other) in self.bodies.iter().enumerate() {
            if other.material == body.material && !other.is_spout() && !other.is_hammer() {
                for p in other.world_points() {
                    owner.insert(p, idx);
                }
            }
        }

        let own: HashSet<Point> = body.world_points().collect();
        let mut seen: HashSet<Point> = own.clone();
        let mut queue: VecDeque<Point> = own.iter().copied().collect();
        let mut absorbed: Vec<usize> = Vec::new();

        while let Some(p) = queue.pop_front() {
            for (dx, dy) in ADJACENT {
                let n = p.offset(dx, dy);
                if !seen.insert(n) {
                    continue;
                }
                if let Some(&idx) = owner.get(&n) {
                    if !absorbed.contains(&idx) {
                        absorbed.push(idx);
                    }
                    queue.push_back(n);
                }
            }
        }

        if absorbed.is_empty() {
            return self.add_body(body, grid);
        }

        absorbed.sort_unstable_by(|a, b| b.cmp(a));
        let mut points: Vec<Point> = own.into_iter().collect();
        let mut is_static = body.is_static;
        for idx in absorbed.iter().copied() {
            let other = self.bodies.remove(idx);
            clear_body(&other, grid);
            is_static |= other.is_static;
            points.extend(other.world_points());
        }
        points.sort_unstable_by_key(|p| (p.y, p.x));

        log::debug!("fused {} {} bodies", absorbed.len() + 1, body.material.as_str());
        let merged = RigidBody::from_world_points(&points, body.material, is_static);
        self.reinsert(merged, grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cells::*;
    use crate::domain::material::Material;
    use crate::systems::rigid_body::SpoutState;

    #[test]
    fn brass_fuses_with_touching_brass() {
        let mut grid = Grid::new(6, 3);
        let mut sys = RigidBodySystem::new();
        sys.add_body(RigidBody::rectangle(0, 2, 2, 1, Material::Brass), &mut grid);
        sys.add_body(RigidBody::rectangle(4, 2, 2, 1, Material::Brass), &mut grid);

        let bridge = RigidBody::rectangle(2, 2, 2, 1, Material::Brass);
        let id = sys.add_solidified(bridge, &mut grid).unwrap();

        assert_eq!(sys.body_count(), 1);
        let merged = sys.get(id).unwrap();
        assert_eq!((merged.x, merged.y, merged.len()), (0, 2, 6));
        assert_eq!(grid.count(CELL_SOLID_BRASS), 6);
        assert!(sys.footprints_consistent(&grid));
    }

    #[test]
    fn iron_never_fuses() {
        let mut grid = Grid::new(4, 2);
        let mut sys = RigidBodySystem::new();
        sys.add_body(RigidBody::rectangle(0, 1, 2, 1, Material::Iron), &mut grid);
        sys.add_solidified(RigidBody::rectangle(2, 1, 2, 1, Material::Iron), &mut grid);
        assert_eq!(sys.body_count(), 2);
    }

    #[test]
    fn brass_ignores_other_alloys_and_diagonals() {
        let mut grid = Grid::new(4, 4);
        let mut sys = RigidBodySystem::new();
        sys.add_body(RigidBody::rectangle(1, 2, 1, 1, Material::Iron), &mut grid);
        sys.add_body(RigidBody::rectangle(1, 1, 1, 1, Material::Brass), &mut grid);
        sys.add_solidified(RigidBody::rectangle(0, 3, 1, 1, Material::Brass), &mut grid);
        assert_eq!(sys.body_count(), 3);
    }

    #[test]
    fn fusion_reaches_through_chains_of_bodies() {
        let mut grid = Grid::new(5, 1);
        let mut sys = RigidBodySystem::new();
        sys.add_body(RigidBody::rectangle(0, 0, 1, 1, Material::Brass), &mut grid);
        sys.add_body(RigidBody::rectangle(1, 0, 1, 1, Material::Brass), &mut grid);
        sys.add_solidified(RigidBody::rectangle(2, 0, 1, 1, Material::Brass), &mut grid);
        assert_eq!(sys.body_count(), 1);
        assert_eq!(sys.iter().next().map(|b| b.len()), Some(3));
    }

    #[test]
    fn fusing_with_a_static_mold_makes_the_result_static() {
        let mut grid = Grid::new(3, 2);
        let mut sys = RigidBodySystem::new();
        let mut mold = RigidBody::rectangle(0, 1, 1, 1, Material::Brass);
        mold.is_static = true;
        sys.add_body(mold, &mut grid).unwrap();

        let id = sys.add_solidified(RigidBody::rectangle(1, 1, 1, 1, Material::Brass), &mut grid).unwrap();
        assert_eq!(sys.body_count(), 1);
        let merged = sys.get(id).unwrap();
        assert!(merged.is_static);
        assert_eq!((merged.x, merged.y, merged.len()), (0, 1, 2));
        assert!(sys.footprints_consistent(&grid));
    }

    #[test]
    fn brass_spouts_stay_out_of_the_fusion() {
        let mut grid = Grid::new(3, 2);
        let mut sys = RigidBodySystem::new();
        sys.add_body(RigidBody::spout(0, 1, SpoutState::new(Material::Brass, 1, None)), &mut grid)
            .unwrap();
        sys.add_solidified(RigidBody::rectangle(1, 1, 1, 1, Material::Brass), &mut grid);
        assert_eq!(sys.body_count(), 2);
        assert_eq!(sys.spout_ids().len(), 1);
    }
}
