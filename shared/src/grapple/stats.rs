use std::fmt;

use crate::scene::Point3;

const NOT_APPLICABLE: &str = "n/a";

/// Read-only diagnostic snapshot of a grapple, rendered by the debug overlay.
#[derive(Clone, Debug, PartialEq)]
pub struct GrappleStats {
    pub max_range: f32,
    /// Distance from the player to the last surface hit.
    pub current_distance: f32,
    pub moving: bool,
    pub anchor_valid: bool,
    /// Number of colliders the clearance probe touched, zero when nothing was probed.
    pub overlap_count: usize,
    /// Names of the probed colliders; `None` when nothing was probed.
    pub overlap_names: Option<Vec<String>>,
    pub target_position: Point3,
    /// Distance left to the flight target.
    pub distance_to_target: f32,
}

impl fmt::Display for GrappleStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.target_position;
        writeln!(f, "Grapple")?;
        writeln!(f, "Max Distance: {}", self.max_range)?;
        writeln!(f, "Current Distance: {}", self.current_distance)?;
        writeln!(f, "Player Moving: {}", self.moving)?;
        writeln!(f, "Grapple Point Valid: {}", self.anchor_valid)?;
        writeln!(f, "Grapple Point Check: {}", self.overlap_count)?;
        match self.overlap_names.as_deref() {
            Some(names) if !names.is_empty() => {
                writeln!(f, "Grapple Point Check Names: {}", names.join(", "))?
            }
            _ => writeln!(f, "Grapple Point Check Names: {NOT_APPLICABLE}")?,
        }
        writeln!(f, "Target Position: ({}, {}, {})", p.x, p.y, p.z)?;
        write!(f, "Distance To Target Position: {}", self.distance_to_target)
    }
}
