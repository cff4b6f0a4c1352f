//! Units: moving points with a closed set of behavior variants.

use glam::Vec2;
use rand::Rng;

use skirmish_behavior::fsm::{self, Neighbor, SoldierMind, Transition};
use skirmish_behavior::steering;
use skirmish_core::config::SimConfig;
use skirmish_core::enums::{SoldierState, UnitKindTag};
use skirmish_core::types::{Kinematics, Rect, UnitColor};

use crate::render::Canvas;

/// Variant-specific state.
#[derive(Debug, Clone, PartialEq)]
pub enum UnitKind {
    /// Runs the soldier state machine and reacts to neighbors.
    Soldier(SoldierMind),
    /// Coasts along its velocity and ignores everyone.
    Drifter,
}

/// A unit in the simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    pub kinematics: Kinematics,
    /// Display color, also the group tag.
    pub color: UnitColor,
    /// Side length of the drawn square.
    pub size: f32,
    pub kind: UnitKind,
}

impl Unit {
    /// A soldier starting idle, with its target on its own position.
    pub fn soldier(x: f32, y: f32, vx: f32, vy: f32, angle: f32, color: UnitColor, size: f32) -> Self {
        let position = Vec2::new(x, y);
        Self {
            kinematics: Kinematics::new(position, Vec2::new(vx, vy), angle),
            color,
            size,
            kind: UnitKind::Soldier(SoldierMind {
                target: position,
                ..SoldierMind::default()
            }),
        }
    }

    pub fn drifter(x: f32, y: f32, vx: f32, vy: f32, color: UnitColor, size: f32) -> Self {
        let velocity = Vec2::new(vx, vy);
        Self {
            kinematics: Kinematics::new(Vec2::new(x, y), velocity, velocity.y.atan2(velocity.x)),
            color,
            size,
            kind: UnitKind::Drifter,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.kinematics.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.kinematics.velocity
    }

    pub fn angle(&self) -> f32 {
        self.kinematics.angle
    }

    pub fn tag(&self) -> UnitKindTag {
        match self.kind {
            UnitKind::Soldier(_) => UnitKindTag::Soldier,
            UnitKind::Drifter => UnitKindTag::Drifter,
        }
    }

    pub fn mind(&self) -> Option<&SoldierMind> {
        match &self.kind {
            UnitKind::Soldier(mind) => Some(mind),
            UnitKind::Drifter => None,
        }
    }

    pub fn mind_mut(&mut self) -> Option<&mut SoldierMind> {
        match &mut self.kind {
            UnitKind::Soldier(mind) => Some(mind),
            UnitKind::Drifter => None,
        }
    }

    /// Behavior state, for soldiers.
    pub fn state(&self) -> Option<SoldierState> {
        self.mind().map(|mind| mind.state)
    }

    /// Whether the neighbor pass should query for this unit.
    pub fn can_react(&self) -> bool {
        matches!(self.kind, UnitKind::Soldier(_))
    }

    /// Movement-pass update: behavior, steering and integration.
    pub fn update(&mut self, config: &SimConfig, rng: &mut impl Rng) -> Option<Transition> {
        match &mut self.kind {
            UnitKind::Soldier(mind) => fsm::update(mind, &mut self.kinematics, config, rng),
            UnitKind::Drifter => {
                steering::advance(&mut self.kinematics, config);
                None
            }
        }
    }

    /// Neighbor-pass reaction. `neighbors` must not include this unit.
    pub fn react(
        &mut self,
        neighbors: &[Neighbor],
        config: &SimConfig,
        rng: &mut impl Rng,
    ) -> Option<Transition> {
        let position = self.kinematics.position;
        let color = self.color;
        match &mut self.kind {
            UnitKind::Soldier(mind) => fsm::react(mind, position, color, neighbors, config, rng),
            UnitKind::Drifter => None,
        }
    }

    /// Draw as a filled square centred on the unit.
    pub fn render<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        canvas.fill_rect(Rect::centered(self.position(), self.size / 2.0), self.color);
    }
}
