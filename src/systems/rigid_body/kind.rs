use crate::domain::material::Material;

/// Role of a body beyond "a lump of metal".
#[derive(Debug, Clone, PartialEq)]
pub enum BodyKind {
    /// Solidified cluster, stone or mold.
    Free,
    /// Emits particles into the cell below itself. Never falls and never
    /// takes part in solidify or destroy.
    Spout(SpoutState),
    /// Drop hammer driven by its own descend/ascend state machine.
    Hammer(HammerPhase),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HammerPhase {
    Descending,
    Ascending,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpoutState {
    pub material: Material,
    /// Particles poured per activation.
    pub flow: u32,
    /// Particles left in the reservoir. `None` pours forever (sandbox).
    pub remaining: Option<u32>,
    pub flowing: bool,
    pub to_pour: u32,
}

impl SpoutState {
    pub fn new(material: Material, flow: u32, max: Option<u32>) -> Self {
        Self { material, flow, remaining: max, flowing: false, to_pour: 0 }
    }

    #[inline]
    pub fn has_resource(&self) -> bool {
        self.remaining != Some(0)
    }

    /// Stage a pour of `flow` particles. Refused while already flowing or empty.
    pub fn activate(&mut self) -> bool {
        if self.flowing || !self.has_resource() || self.flow == 0 {
            return false;
        }
        self.flowing = true;
        self.to_pour = self.flow;
        true
    }

    /// Spend one unit of the staged pour. `injected` says whether the
    /// particle actually landed; only a landed particle costs resource.
    pub fn advance(&mut self, injected: bool) {
        if !self.flowing || self.to_pour == 0 {
            return;
        }
        if injected {
            if let Some(r) = self.remaining.as_mut() {
                *r = r.saturating_sub(1);
            }
        }
        self.to_pour -= 1;
        if self.to_pour == 0 || !self.has_resource() {
            self.flowing = false;
            self.to_pour = 0;
        }
    }

    #[inline]
    pub fn wants_to_pour(&self) -> bool {
        self.flowing && self.to_pour > 0 && self.has_resource()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activation_is_refused_while_flowing() {
        let mut spout = SpoutState::new(Material::Iron, 3, Some(10));
        assert!(spout.activate());
        assert!(!spout.activate());
        assert_eq!(spout.to_pour, 3);
    }

    #[test]
    fn only_landed_particles_cost_resource() {
        let mut spout = SpoutState::new(Material::Iron, 2, Some(5));
        spout.activate();
        spout.advance(false);
        spout.advance(true);
        assert_eq!(spout.remaining, Some(4));
        assert!(!spout.flowing);
    }

    #[test]
    fn running_dry_stops_the_pour() {
        let mut spout = SpoutState::new(Material::Brass, 5, Some(1));
        assert!(spout.activate());
        spout.advance(true);
        assert!(!spout.flowing);
        assert!(!spout.has_resource());
        assert!(!spout.activate());
    }

    #[test]
    fn unlimited_spouts_never_run_dry() {
        let mut spout = SpoutState::new(Material::Iron, 1, None);
        for _ in 0..100 {
            assert!(spout.activate());
            spout.advance(true);
        }
        assert_eq!(spout.remaining, None);
    }
}
