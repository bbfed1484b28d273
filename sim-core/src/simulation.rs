//! The tick loop and the population it drives.
//!
//! A tick is two passes over the particles in population order (group
//! order, then id):
//! 1. [`Simulation::collide_with`] for every particle — positions stay put,
//!    velocities change in place, so a particle later in the order sees the
//!    velocity nudges applied by earlier ones.
//! 2. [`Particle::step`] for every particle.

use crate::{
    allocator,
    arena::Arena,
    canvas::{self, Canvas},
    config::SimConfig,
    error::Result,
    group::Group,
    particle::Particle,
    stats::Stats,
    types::Color,
};
use glam::Vec2;
use rand::{Rng, SeedableRng, rng, rngs::StdRng};

#[derive(Debug)]
pub struct Simulation {
    cfg: SimConfig,
    groups: Vec<Group>,
    particles: Vec<Particle>,
    rng: StdRng,
    ticks: u64,
}

impl Simulation {
    /// Validates `cfg` and builds the first population.
    ///
    /// `seed` makes allocation, placement and initial velocities
    /// reproducible; `None` seeds from the thread RNG.
    pub fn new(cfg: SimConfig, seed: Option<u64>) -> Result<Self> {
        cfg.validate()?;
        let rng: StdRng = match seed {
            Some(s) => SeedableRng::seed_from_u64(s),
            None => SeedableRng::seed_from_u64(rng().random()),
        };

        let mut sim = Self {
            cfg,
            groups: Vec::new(),
            particles: Vec::new(),
            rng,
            ticks: 0,
        };
        sim.populate()?;
        Ok(sim)
    }

    /// Discards every particle, reruns the allocator and places a fresh population.
    pub fn populate(&mut self) -> Result<()> {
        let mut groups: Vec<Group> = self.cfg.groups.iter().map(Group::from).collect();
        allocator::allocate(self.cfg.population, &mut groups, &mut self.rng)?;

        let arena = self.cfg.arena;
        let defaults = self.cfg.particle;
        let sectors = self.cfg.sectors();
        let speed = defaults.initial_speed;

        let mut particles: Vec<Particle> = Vec::with_capacity(self.cfg.population);
        let mut crowded = 0usize;
        for (gid, group) in groups.iter().enumerate() {
            for i in 0..group.population {
                let mut p = Particle::new(gid, group, i.to_string(), &defaults, sectors);
                if speed > 0.0 {
                    p.velocity = Vec2::new(
                        self.rng.random_range(-speed..=speed),
                        self.rng.random_range(-speed..=speed),
                    );
                }
                if !p.place_among(
                    &particles,
                    &arena,
                    self.cfg.max_placement_attempts,
                    &mut self.rng,
                ) {
                    crowded += 1;
                }
                particles.push(p);
            }
        }

        log::debug!(
            "populated {} particles in {} groups ({} placed with overlap)",
            particles.len(),
            groups.len(),
            crowded
        );

        self.groups = groups;
        self.particles = particles;
        self.ticks = 0;
        Ok(())
    }

    /// Replaces the configuration and repopulates.
    ///
    /// On a validation error the current configuration and particles are kept.
    pub fn reconfigure(&mut self, cfg: SimConfig) -> Result<()> {
        cfg.validate()?;
        self.cfg = cfg;
        self.populate()
    }

    /// Advances the simulation by one tick.
    pub fn tick(&mut self) {
        let mut contacts = 0usize;
        for i in 0..self.particles.len() {
            contacts += self.collide_with(i);
        }

        let arena = self.cfg.arena;
        for p in &mut self.particles {
            p.step(&arena);
        }
        debug_assert!(
            self.particles
                .iter()
                .all(|p| arena.contains_circle(p.position, p.radius)),
            "particle left the arena after tick {}",
            self.ticks + 1
        );

        self.ticks += 1;
        log::trace!("tick {}: {} contacts", self.ticks, contacts);
    }

    /// Resolves every collision of particle `index` against all others.
    ///
    /// For each overlapping particle `j`, the bounce computed by
    /// [`Particle::bounce_from`] is subtracted from `index`'s velocity and
    /// added to `j`'s. Positions are not modified.
    ///
    /// ### Returns
    /// The number of particles `index` was colliding with; `0` if `index`
    /// is out of bounds.
    pub fn collide_with(&mut self, index: usize) -> usize {
        if index >= self.particles.len() {
            return 0;
        }
        let mut contacts = 0;
        for j in 0..self.particles.len() {
            if j == index {
                continue;
            }
            let (me, other) = (&self.particles[index], &self.particles[j]);
            if !me.is_colliding_with(other) {
                continue;
            }
            let bounce = me.bounce_from(other);
            self.particles[index].velocity -= bounce;
            self.particles[j].velocity += bounce;
            contacts += 1;
        }
        contacts
    }

    /// Draws every particle, then the vertical midline on top.
    pub fn draw(&self, canvas: &mut impl Canvas) {
        for p in &self.particles {
            canvas::draw_particle(canvas, p);
        }
        let mid = self.cfg.arena.midline_x();
        canvas.line(
            Vec2::new(mid, 0.0),
            Vec2::new(mid, self.cfg.arena.height),
            Color::GRID,
        );
    }

    pub fn stats(&self) -> Stats {
        Stats::collect(&self.particles, self.groups.len(), &self.cfg.arena)
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable access for hosts (and tests) that nudge particles directly.
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn config(&self) -> &SimConfig {
        &self.cfg
    }

    pub fn arena(&self) -> Arena {
        self.cfg.arena
    }

    /// Ticks since the last (re)population.
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }
}
