/*!
Grapple traversal: anchor preview while the gesture is held, flight toward the anchor once it is
released.

One [`Grapple`] exists per player and is owned by whoever owns the player (the client stores it
as a resource). The owner drives it through a small set of entry points each tick:

- [`Grapple::held`] while the grapple input is down: evaluates the anchor under the crosshair.
- [`Grapple::released`] on the frame the input goes up: commits a flight if the anchor is valid.
- [`Grapple::tick`] every frame: advances an active flight.
- [`Grapple::cancel`], [`Grapple::teleport`], [`Grapple::set_movement_enabled`] for outside
  interruptions.

Transitions are reported through a queue of [`GrappleEvent`]s the owner drains once per tick.
*/

pub mod anchor;
pub mod motion;
pub mod settings;
pub mod stats;

pub use anchor::{Anchor, SurfaceHit, evaluate_candidate};
pub use motion::{MoveTowardParams, MoveTowardResult, move_toward};
pub use settings::{GrappleSettings, SettingsError};
pub use stats::GrappleStats;

use crate::scene::{PlayerBody, Point3, Quat, SceneQuery, Vec3};

/// An active flight toward an anchor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Flight {
    pub start: Point3,
    pub target: Point3,
}

impl Flight {
    pub fn length(&self) -> f32 {
        (self.target - self.start).norm()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum GrapplePhase {
    #[default]
    Idle,
    Moving(Flight),
}

/// Notifications emitted on state transitions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GrappleEvent {
    /// A flight was committed.
    Fired { start: Point3, target: Point3 },
    /// A flight reached its target.
    Finished {
        start: Point3,
        target: Point3,
        distance_travelled: f32,
    },
}

/// The holographic preview of the player shown while the grapple input is held.
///
/// Rendered green when `valid`, red otherwise.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnchorMarker {
    pub visible: bool,
    pub position: Point3,
    pub valid: bool,
}

impl AnchorMarker {
    pub fn hidden() -> Self {
        Self {
            visible: false,
            position: Point3::origin(),
            valid: false,
        }
    }
}

#[derive(Debug)]
pub struct Grapple {
    settings: GrappleSettings,
    phase: GrapplePhase,
    anchor: Option<Anchor>,
    cancelled: bool,
    movement_enabled: bool,
    marker: AnchorMarker,
    destination_marker: Option<Point3>,
    target_position: Point3,
    target_rotation: Option<Quat>,
    current_distance: f32,
    distance_to_target: f32,
    distance_travelled: f32,
    events: Vec<GrappleEvent>,
}

impl Default for Grapple {
    fn default() -> Self {
        Self::from_valid_settings(GrappleSettings::default())
    }
}

impl Grapple {
    /// Create a grapple with validated settings.
    ///
    /// Movement starts disabled; the level enables it once the player may traverse.
    pub fn new(settings: GrappleSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self::from_valid_settings(settings))
    }

    fn from_valid_settings(settings: GrappleSettings) -> Self {
        Self {
            settings,
            phase: GrapplePhase::Idle,
            anchor: None,
            cancelled: false,
            movement_enabled: false,
            marker: AnchorMarker::hidden(),
            destination_marker: None,
            target_position: Point3::origin(),
            target_rotation: None,
            current_distance: 0.0,
            distance_to_target: 0.0,
            distance_travelled: 0.0,
            events: Vec::new(),
        }
    }

    // ---------------------------------------------------------------------------------------------
    // Gesture
    // ---------------------------------------------------------------------------------------------

    /// Preview the anchor under the player's crosshair. Call every tick while the input is held.
    ///
    /// Does nothing during a flight or while a cancellation is waiting for the release.
    pub fn held<S, P>(&mut self, scene: &S, player: &P)
    where
        S: SceneQuery + ?Sized,
        P: PlayerBody + ?Sized,
    {
        if self.is_moving() || self.cancelled {
            return;
        }

        let origin = player.position();
        let anchor = evaluate_candidate(
            scene,
            origin,
            player.forward(),
            player.radius(),
            &self.settings,
        );

        if let Some(surface) = anchor.surface {
            self.current_distance = (surface.point - origin).norm();
            self.target_position = anchor.point;
        }
        self.marker = AnchorMarker {
            visible: true,
            position: anchor.point,
            valid: anchor.valid,
        };
        self.anchor = Some(anchor);
    }

    /// Finish the gesture. Returns true when a flight was committed.
    ///
    /// A pending cancellation swallows exactly this release.
    pub fn released<P: PlayerBody + ?Sized>(&mut self, player: &P) -> bool {
        if self.is_moving() {
            return false;
        }
        self.marker.visible = false;

        if self.cancelled {
            self.cancelled = false;
            log::debug!("Grapple release consumed by cancellation");
            return false;
        }

        self.commit(player)
    }

    /// Start a flight toward the current anchor.
    ///
    /// Silently refused while moving, while movement is disabled, after a cancellation, or
    /// without a valid anchor. Returns true when the flight started.
    pub fn commit<P: PlayerBody + ?Sized>(&mut self, player: &P) -> bool {
        if self.is_moving() || !self.movement_enabled || self.cancelled {
            return false;
        }
        let Some(target) = self
            .anchor
            .as_ref()
            .filter(|anchor| anchor.valid)
            .and_then(|anchor| anchor.resting_point(player.radius()))
        else {
            return false;
        };

        let flight = Flight {
            start: player.position(),
            target,
        };
        self.phase = GrapplePhase::Moving(flight);
        self.target_position = flight.target;
        self.distance_to_target = flight.length();
        self.destination_marker = Some(flight.target);
        self.events.push(GrappleEvent::Fired {
            start: flight.start,
            target: flight.target,
        });
        log::debug!(
            "Grapple fired from {} to {} ({:.2}m)",
            flight.start,
            flight.target,
            flight.length()
        );
        true
    }

    /// Abort the gesture before it commits. Has no effect during a flight.
    ///
    /// Returns true when the cancellation took effect.
    pub fn cancel(&mut self) -> bool {
        if self.is_moving() {
            return false;
        }
        self.cancelled = true;
        self.reset_anchor();
        log::debug!("Grapple cancelled");
        true
    }

    // ---------------------------------------------------------------------------------------------
    // Flight
    // ---------------------------------------------------------------------------------------------

    /// Advance an active flight by `dt_seconds`. No-op while idle.
    pub fn tick<P: PlayerBody + ?Sized>(&mut self, player: &mut P, dt_seconds: f32) {
        let GrapplePhase::Moving(flight) = self.phase else {
            return;
        };

        self.destination_marker = Some(flight.target);
        if let Some(surface) = self.anchor.as_ref().and_then(|anchor| anchor.surface) {
            self.current_distance = (surface.point - player.position()).norm();
        }

        let step = move_toward(MoveTowardParams {
            current: player.position(),
            target: flight.target,
            speed_mps: self.settings.move_speed,
            dt_seconds,
        });
        player.set_position(step.position);
        self.distance_to_target = step.remaining;

        if step.arrived {
            self.finish(flight);
        }
    }

    fn finish(&mut self, flight: Flight) {
        self.phase = GrapplePhase::Idle;
        self.destination_marker = None;
        self.distance_travelled = flight.length();
        self.events.push(GrappleEvent::Finished {
            start: flight.start,
            target: flight.target,
            distance_travelled: self.distance_travelled,
        });
        self.reset_anchor();
        log::debug!(
            "Grapple finished at {} after {:.2}m",
            flight.target,
            self.distance_travelled
        );
    }

    /// Resynchronise after the player was moved by something else (respawn, checkpoint).
    ///
    /// Ends any flight without a `Finished` event and clears the anchor.
    pub fn teleport(&mut self, position: Point3, orientation: Option<Quat>) {
        if self.is_moving() {
            log::debug!("Grapple flight interrupted by teleport to {position}");
        }
        self.phase = GrapplePhase::Idle;
        self.destination_marker = None;
        self.target_position = position;
        self.distance_to_target = 0.0;
        if orientation.is_some() {
            self.target_rotation = orientation;
        }
        self.reset_anchor();
    }

    /// Forget the current anchor and hide the preview.
    pub fn reset_anchor(&mut self) {
        self.anchor = None;
        self.marker = AnchorMarker::hidden();
    }

    // ---------------------------------------------------------------------------------------------
    // Configuration
    // ---------------------------------------------------------------------------------------------

    pub fn set_movement_enabled(&mut self, enabled: bool) {
        self.movement_enabled = enabled;
    }

    pub fn set_max_range(&mut self, value: f32) -> Result<(), SettingsError> {
        self.settings.max_range = settings::check_max_range(value).inspect_err(|err| {
            log::warn!("Ignoring grapple range change: {err}");
        })?;
        Ok(())
    }

    /// Nudge the max range by `delta`, returning the new range.
    pub fn adjust_max_range(&mut self, delta: f32) -> Result<f32, SettingsError> {
        self.set_max_range(self.settings.max_range + delta)?;
        Ok(self.settings.max_range)
    }

    // ---------------------------------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------------------------------

    pub fn settings(&self) -> &GrappleSettings {
        &self.settings
    }

    pub fn phase(&self) -> GrapplePhase {
        self.phase
    }

    pub fn is_moving(&self) -> bool {
        matches!(self.phase, GrapplePhase::Moving(_))
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn movement_enabled(&self) -> bool {
        self.movement_enabled
    }

    pub fn anchor(&self) -> Option<&Anchor> {
        self.anchor.as_ref()
    }

    /// Candidate anchor, or the reach-limit point after a miss. `None` once cleared.
    pub fn anchor_point(&self) -> Option<Point3> {
        self.anchor.as_ref().map(|anchor| anchor.point)
    }

    pub fn anchor_valid(&self) -> bool {
        self.anchor.as_ref().is_some_and(|anchor| anchor.valid)
    }

    pub fn anchor_normal(&self) -> Option<Vec3> {
        self.anchor.as_ref().and_then(Anchor::normal)
    }

    pub fn marker(&self) -> AnchorMarker {
        self.marker
    }

    /// Where the current flight is headed; `None` while idle.
    pub fn destination_marker(&self) -> Option<Point3> {
        self.destination_marker
    }

    pub fn target_position(&self) -> Point3 {
        self.target_position
    }

    pub fn target_rotation(&self) -> Option<Quat> {
        self.target_rotation
    }

    pub fn current_distance(&self) -> f32 {
        self.current_distance
    }

    /// Straight-line length of the last completed flight.
    pub fn distance_travelled(&self) -> f32 {
        self.distance_travelled
    }

    /// Take every event emitted since the last drain, oldest first.
    pub fn drain_events(&mut self) -> impl Iterator<Item = GrappleEvent> + '_ {
        self.events.drain(..)
    }

    pub fn stats<S: SceneQuery + ?Sized>(&self, scene: &S) -> GrappleStats {
        let overlaps = self.anchor.as_ref().filter(|anchor| anchor.surface.is_some());
        GrappleStats {
            max_range: self.settings.max_range,
            current_distance: self.current_distance,
            moving: self.is_moving(),
            anchor_valid: self.anchor_valid(),
            overlap_count: overlaps.map_or(0, |anchor| anchor.overlaps.len()),
            overlap_names: overlaps.map(|anchor| {
                anchor
                    .overlaps
                    .iter()
                    .map(|&id| {
                        scene
                            .collider_name(id)
                            .map_or_else(|| format!("#{id}"), str::to_owned)
                    })
                    .collect()
            }),
            target_position: self.target_position,
            distance_to_target: self.distance_to_target,
        }
    }
}
