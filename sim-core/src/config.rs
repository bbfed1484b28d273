use crate::{
    arena::Arena,
    error::{Error, Result},
    particle::NAME_SEPARATOR,
    types::Color,
};
use std::collections::HashSet;

/// Strategy used to choose a particle's starting position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Placement {
    /// Anywhere in the arena.
    Random,
    /// Inside the vertical band belonging to the particle's group.
    #[default]
    Grouped,
}

/// One entry of the ordered group list.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupConfig {
    pub name: String,
    pub ratio: f32,
    pub color: Color,
}

impl GroupConfig {
    pub fn new(name: impl Into<String>, ratio: f32, color: Color) -> Self {
        Self {
            name: name.into(),
            ratio,
            color,
        }
    }
}

/// Settings shared by every particle of a population.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleDefaults {
    pub radius: f32,
    /// Collision repulsion strength, in `(0, 1]`.
    pub spring: f32,
    /// Velocity multiplier applied on an edge bounce.
    pub friction: f32,
    pub placement: Placement,
    /// Number of vertical bands for grouped placement; `None` uses one band per group.
    pub sectors: Option<usize>,
    /// Each initial velocity component is drawn from `[-initial_speed, initial_speed]`.
    pub initial_speed: f32,
}

impl Default for ParticleDefaults {
    fn default() -> Self {
        Self {
            radius: 10.0,
            spring: 0.05,
            friction: -0.9,
            placement: Placement::Grouped,
            sectors: None,
            initial_speed: 1.0,
        }
    }
}

/// Immutable simulation configuration, handed to the engine at (re)start.
#[derive(Clone, Debug, PartialEq)]
pub struct SimConfig {
    /// Total number of particles across all groups.
    pub population: usize,
    pub groups: Vec<GroupConfig>,
    pub arena: Arena,
    pub particle: ParticleDefaults,
    /// Candidate positions tried per particle before settling for the least overlapping one.
    pub max_placement_attempts: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            population: 100,
            groups: vec![
                GroupConfig::new("red", 1.0, Color::RED),
                GroupConfig::new("blue", 1.0, Color::BLUE),
            ],
            arena: Arena::default(),
            particle: ParticleDefaults::default(),
            max_placement_attempts: 10_000,
        }
    }
}

impl SimConfig {
    /// Number of bands the arena width is split into for grouped placement.
    pub fn sectors(&self) -> usize {
        self.particle.sectors.unwrap_or(self.groups.len())
    }

    /// Rough number of particles the arena holds before placement stalls.
    ///
    /// Random sequential placement of equal discs jams at a little over half
    /// the area; this estimate stays well below that.
    pub fn population_capacity(&self) -> usize {
        let disc = std::f32::consts::PI * self.particle.radius * self.particle.radius;
        if !disc.is_finite() || disc <= 0.0 {
            return 0;
        }
        (0.4 * self.arena.width * self.arena.height / disc).floor() as usize
    }

    /// Checks every parameter once, before any particle is created.
    ///
    /// ### Errors
    /// - [`Error::InvalidParam`] for non-finite or out-of-range numbers,
    ///   an empty group list, or empty, duplicate or separator-containing group names.
    /// - [`Error::ZeroRatioSum`] if all group ratios are zero.
    pub fn validate(&self) -> Result<()> {
        let Arena { width, height } = self.arena;
        if !width.is_finite() || width <= 0.0 || !height.is_finite() || height <= 0.0 {
            return Err(Error::InvalidParam(
                "arena width and height must be finite and > 0".into(),
            ));
        }

        if self.groups.is_empty() {
            return Err(Error::InvalidParam("at least one group is required".into()));
        }
        let mut names = HashSet::with_capacity(self.groups.len());
        for g in &self.groups {
            if g.name.is_empty() {
                return Err(Error::InvalidParam("group names must not be empty".into()));
            }
            if g.name.contains(NAME_SEPARATOR) {
                return Err(Error::InvalidParam(format!(
                    "group name {:?} must not contain {NAME_SEPARATOR:?}",
                    g.name
                )));
            }
            if !names.insert(g.name.as_str()) {
                return Err(Error::InvalidParam(format!(
                    "duplicate group name {:?}",
                    g.name
                )));
            }
            if !g.ratio.is_finite() || g.ratio < 0.0 {
                return Err(Error::InvalidParam(format!(
                    "ratio of group {:?} must be finite and >= 0",
                    g.name
                )));
            }
        }
        if self.groups.iter().all(|g| g.ratio == 0.0) {
            return Err(Error::ZeroRatioSum);
        }

        let p = &self.particle;
        if !p.radius.is_finite() || p.radius <= 0.0 {
            return Err(Error::InvalidParam("radius must be finite and > 0".into()));
        }
        if 2.0 * p.radius > width.min(height) {
            return Err(Error::InvalidParam(
                "arena must be at least 2 * radius in every dimension".into(),
            ));
        }
        if !p.spring.is_finite() || p.spring <= 0.0 || p.spring > 1.0 {
            return Err(Error::InvalidParam("spring must be in (0, 1]".into()));
        }
        if !p.friction.is_finite() {
            return Err(Error::InvalidParam("friction must be finite".into()));
        }
        if !p.initial_speed.is_finite() || p.initial_speed < 0.0 {
            return Err(Error::InvalidParam(
                "initial_speed must be finite and >= 0".into(),
            ));
        }

        let sectors = self.sectors();
        if sectors == 0 {
            return Err(Error::InvalidParam("sectors must be > 0".into()));
        }
        if p.placement == Placement::Grouped && sectors < self.groups.len() {
            return Err(Error::InvalidParam(format!(
                "grouped placement needs at least {} sectors, got {}",
                self.groups.len(),
                sectors
            )));
        }

        if self.max_placement_attempts == 0 {
            return Err(Error::InvalidParam(
                "max_placement_attempts must be > 0".into(),
            ));
        }
        Ok(())
    }
}
