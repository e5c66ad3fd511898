//! Drop hammer
//!
//! Spawned at the top centre, the hammer sinks a row per tick (pushing metal
//! aside like any body). When it can sink no further it strikes the cell
//! under its bottom-centre, then climbs back out and despawns once it is
//! entirely above row 0, or as soon as something blocks the climb.

use crate::core::grid::Grid;
use crate::core::point::Point;
use crate::core::random::TieBreak;
use crate::systems::rigid_body::{BodyId, BodyKind, HammerPhase, RigidBody};

use super::destroy::DestroyOutcome;
use super::movement::{move_down, move_to, MoveLimits, MoveOutcome};
use super::rasterize::clear_body;
use super::system::RigidBodySystem;

pub const HAMMER_WIDTH: i32 = 3;
pub const HAMMER_HEIGHT: i32 = 8;

const CLIMB: MoveLimits = MoveLimits { below_bottom: false, above_top: true };

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HammerEvent {
    Struck { target: BodyId, outcome: DestroyOutcome },
    Missed,
    Despawned,
}

impl RigidBodySystem {
    pub fn hammer_active(&self) -> bool {
        self.bodies.iter().any(|b| b.is_hammer())
    }

    /// Drop a new hammer at the top centre. Only one may exist at a time.
    pub fn spawn_hammer(&mut self, grid: &mut Grid) -> Option<BodyId> {
        if self.hammer_active() {
            return None;
        }
        let x = (grid.width() as i32 / 2 - HAMMER_WIDTH / 2).max(0);
        self.add_body(RigidBody::hammer(x, 0, HAMMER_WIDTH, HAMMER_HEIGHT), grid)
    }

    /// Advance every hammer one step.
    pub fn step_hammers(&mut self, grid: &mut Grid, rng: &mut dyn TieBreak) -> Vec<HammerEvent> {
        let ids: Vec<BodyId> = self.bodies.iter().filter(|b| b.is_hammer()).map(|b| b.id).collect();
        let mut events = Vec::new();

        for id in ids {
            let Some(idx) = self.index_of(id) else {
                continue;
            };
            let BodyKind::Hammer(phase) = self.bodies[idx].kind else {
                continue;
            };

            match phase {
                HammerPhase::Descending => {
                    let body = &mut self.bodies[idx];
                    if move_down(body, grid, rng, MoveLimits::CONTAINED).moved() {
                        continue;
                    }
                    body.kind = BodyKind::Hammer(HammerPhase::Ascending);
                    let (sx, sy) = (body.x + body.width() / 2, body.y + body.height());
                    events.push(self.strike(sx, sy, grid));
                }
                HammerPhase::Ascending => {
                    let body = &mut self.bodies[idx];
                    if body.y + body.height() <= 0 {
                        events.push(self.despawn(idx, grid));
                        continue;
                    }
                    let (x, y) = (body.x, body.y - 1);
                    match move_to(body, x, y, grid, rng, CLIMB) {
                        MoveOutcome::Moved | MoveOutcome::Unchanged => {}
                        stuck => {
                            log::debug!("hammer {} cannot climb ({:?})", id, stuck);
                            events.push(self.despawn(idx, grid));
                        }
                    }
                }
            }
        }
        events
    }

    fn despawn(&mut self, idx: usize, grid: &mut Grid) -> HammerEvent {
        let hammer = self.bodies.remove(idx);
        clear_body(&hammer, grid);
        HammerEvent::Despawned
    }

    fn strike(&mut self, gx: i32, gy: i32, grid: &mut Grid) -> HammerEvent {
        let Some(target) = self.body_at(gx, gy) else {
            return HammerEvent::Missed;
        };
        let Some(body) = self.get(target) else {
            return HammerEvent::Missed;
        };
        if !body.is_workable() {
            return HammerEvent::Missed;
        }
        let local = Point::new(gx - body.x, gy - body.y);
        let outcome = self.destroy_tile(target, local, grid);
        log::debug!("hammer struck body {} at {},{}: {:?}", target, gx, gy, outcome);
        HammerEvent::Struck { target, outcome }
    }
}
