/// Completion flag that transitions `false -> true` exactly once and never reverts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OneShot(bool);

impl OneShot {
    pub fn new() -> Self {
        Self(false)
    }

    /// Returns `true` only for the call that performed the transition.
    pub fn fire(&mut self) -> bool {
        if self.0 {
            return false;
        }
        self.0 = true;
        true
    }

    pub fn is_set(self) -> bool {
        self.0
    }
}

/// The stage completion chain `drawing_complete -> formation_complete -> shower_started`.
///
/// A later flag is never set while an earlier one is clear.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StageState {
    drawing_complete: OneShot,
    formation_complete: OneShot,
    shower_started: OneShot,
}

impl StageState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drawing_complete(&self) -> bool {
        self.drawing_complete.is_set()
    }

    pub fn formation_complete(&self) -> bool {
        self.formation_complete.is_set()
    }

    pub fn shower_started(&self) -> bool {
        self.shower_started.is_set()
    }

    pub fn complete_drawing(&mut self) -> bool {
        self.drawing_complete.fire()
    }

    pub fn complete_formation(&mut self) -> bool {
        if !self.drawing_complete() {
            return false;
        }
        self.formation_complete.fire()
    }

    pub fn start_shower(&mut self) -> bool {
        if !self.formation_complete() {
            return false;
        }
        self.shower_started.fire()
    }

    /// Flags as `[drawing, formation, shower]`.
    pub fn flags(&self) -> [bool; 3] {
        [
            self.drawing_complete(),
            self.formation_complete(),
            self.shower_started(),
        ]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/signal.rs"]
mod tests;
