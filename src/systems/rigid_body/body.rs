use crate::core::point::{min_corner, Point};
use crate::domain::cells::CellId;
use crate::domain::material::Material;

use super::kind::{BodyKind, HammerPhase, SpoutState};

pub type BodyId = u32;

/// Rigid Body - moves as a single unit, one grid row or column at a time
#[derive(Debug, Clone)]
pub struct RigidBody {
    /// Assigned by `RigidBodySystem`; 0 until the body is added.
    pub id: BodyId,
    /// World position of the local origin.
    pub x: i32,
    pub y: i32,
    pub material: Material,
    /// Immovable: never falls, never displaced, still blocks others.
    pub is_static: bool,
    pub kind: BodyKind,

    shape: Vec<Point>,
    width: i32,
    height: i32,
}

impl RigidBody {
    pub fn new(x: i32, y: i32, shape: Vec<Point>, material: Material, is_static: bool) -> Self {
        let (width, height) = extents(&shape);
        Self { id: 0, x, y, material, is_static, kind: BodyKind::Free, shape, width, height }
    }

    /// Build a body from absolute cells; the origin becomes their min corner.
    pub fn from_world_points(points: &[Point], material: Material, is_static: bool) -> Self {
        let Some(origin) = min_corner(points) else {
            return Self::new(0, 0, Vec::new(), material, is_static);
        };
        let shape = points.iter().map(|p| p.offset(-origin.x, -origin.y)).collect();
        Self::new(origin.x, origin.y, shape, material, is_static)
    }

    pub fn rectangle(x: i32, y: i32, w: i32, h: i32, material: Material) -> Self {
        let mut shape = Vec::with_capacity((w.max(0) * h.max(0)) as usize);
        for dy in 0..h {
            for dx in 0..w {
                shape.push(Point::new(dx, dy));
            }
        }
        Self::new(x, y, shape, material, false)
    }

    /// 1x1 spout.
    pub fn spout(x: i32, y: i32, state: SpoutState) -> Self {
        let mut body = Self::new(x, y, vec![Point::new(0, 0)], state.material, false);
        body.kind = BodyKind::Spout(state);
        body
    }

    pub fn hammer(x: i32, y: i32, w: i32, h: i32) -> Self {
        let mut body = Self::rectangle(x, y, w, h, Material::Iron);
        body.kind = BodyKind::Hammer(HammerPhase::Descending);
        body
    }

    #[inline]
    pub fn shape(&self) -> &[Point] {
        &self.shape
    }

    /// Max local x + 1.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Max local y + 1.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.shape.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shape.is_empty()
    }

    /// Cell tag this body writes into the grid.
    #[inline]
    pub fn cell(&self) -> CellId {
        self.material.solid_cell()
    }

    #[inline]
    pub fn is_spout(&self) -> bool {
        matches!(self.kind, BodyKind::Spout(_))
    }

    #[inline]
    pub fn is_hammer(&self) -> bool {
        matches!(self.kind, BodyKind::Hammer(_))
    }

    /// Whether the gravity step should pull on this body.
    #[inline]
    pub fn falls(&self) -> bool {
        !self.is_static && matches!(self.kind, BodyKind::Free) && !self.is_empty()
    }

    /// Whether solidify, merge and the hammer may touch this body.
    #[inline]
    pub fn is_workable(&self) -> bool {
        !self.is_static && matches!(self.kind, BodyKind::Free)
    }

    pub fn spout_state(&self) -> Option<&SpoutState> {
        match &self.kind {
            BodyKind::Spout(s) => Some(s),
            _ => None,
        }
    }

    pub fn spout_state_mut(&mut self) -> Option<&mut SpoutState> {
        match &mut self.kind {
            BodyKind::Spout(s) => Some(s),
            _ => None,
        }
    }

    pub fn world_points(&self) -> impl Iterator<Item = Point> + '_ {
        self.world_points_at(self.x, self.y)
    }

    pub fn world_points_at(&self, x: i32, y: i32) -> impl Iterator<Item = Point> + '_ {
        self.shape.iter().map(move |p| p.offset(x, y))
    }

    /// True iff the shape at the current position covers `(gx, gy)`.
    pub fn contains_global_point(&self, gx: i32, gy: i32) -> bool {
        let local = Point::new(gx - self.x, gy - self.y);
        self.shape.contains(&local)
    }

    /// Bounding-box hit test, used for grabbing.
    pub fn bbox_contains(&self, gx: i32, gy: i32) -> bool {
        gx >= self.x && gx < self.x + self.width && gy >= self.y && gy < self.y + self.height
    }

    #[inline]
    pub fn contains_local(&self, p: Point) -> bool {
        self.shape.contains(&p)
    }

    /// Remove one local point. Returns false when it was not part of the shape.
    /// Extents are left as-is; callers rebuild bodies from the remainder.
    pub(crate) fn take_point(&mut self, p: Point) -> bool {
        match self.shape.iter().position(|q| *q == p) {
            Some(i) => {
                self.shape.swap_remove(i);
                true
            }
            None => false,
        }
    }
}

fn extents(shape: &[Point]) -> (i32, i32) {
    if shape.is_empty() {
        return (0, 0);
    }
    let w = shape.iter().map(|p| p.x).max().unwrap_or(0) + 1;
    let h = shape.iter().map(|p| p.y).max().unwrap_or(0) + 1;
    (w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extents_are_max_plus_one() {
        let body = RigidBody::new(3, 4, vec![Point::new(0, 0), Point::new(2, 1)], Material::Iron, false);
        assert_eq!((body.width(), body.height()), (3, 2));
        assert!(body.contains_global_point(5, 5));
        assert!(!body.contains_global_point(4, 5));
    }

    #[test]
    fn empty_shape_is_zero_sized_and_inert() {
        let body = RigidBody::new(0, 0, Vec::new(), Material::Brass, false);
        assert_eq!((body.width(), body.height()), (0, 0));
        assert!(!body.falls());
        let body = RigidBody::from_world_points(&[], Material::Iron, false);
        assert!(body.is_empty());
    }

    #[test]
    fn world_points_normalize_to_min_corner() {
        let pts = [Point::new(7, 3), Point::new(6, 4), Point::new(7, 4)];
        let body = RigidBody::from_world_points(&pts, Material::Iron, false);
        assert_eq!((body.x, body.y), (6, 3));
        let mut back: Vec<Point> = body.world_points().collect();
        back.sort();
        let mut want = pts.to_vec();
        want.sort();
        assert_eq!(back, want);
    }

    #[test]
    fn roles_gate_gravity_and_tools() {
        let spout = RigidBody::spout(1, 1, SpoutState::new(Material::Iron, 1, None));
        assert!(!spout.falls());
        assert!(!spout.is_workable());
        let hammer = RigidBody::hammer(0, 0, 3, 8);
        assert!(hammer.is_hammer());
        assert_eq!(hammer.len(), 24);
        let mut mold = RigidBody::rectangle(0, 0, 2, 2, Material::Iron);
        assert!(mold.falls());
        mold.is_static = true;
        assert!(!mold.falls());
    }
}
