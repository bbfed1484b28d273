use crate::{
    arena::Arena,
    config::{ParticleDefaults, Placement},
    group::Group,
    types::{Color, GroupId},
};
use glam::Vec2;
use rand::Rng;

/// Joins group name and id in [`Particle::name`].
pub const NAME_SEPARATOR: char = ':';

/// A single circular body.
///
/// `id` is only unique within the group. `name` joins the group name and
/// `id` with [`NAME_SEPARATOR`]; group names may not contain it, so names
/// are unique across the population. Identity checks compare `(group, id)`.
#[derive(Clone, Debug)]
pub struct Particle {
    pub id: String,
    pub name: String,
    /// Index of the owning group, which is also its band for grouped placement.
    pub group: GroupId,
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub color: Color,
    pub spring: f32,
    pub friction: f32,
    pub placement: Placement,
    pub sectors: usize,
}

impl Particle {
    /// Creates an unplaced particle at the origin with zero velocity.
    pub fn new(
        group_id: GroupId,
        group: &Group,
        id: impl Into<String>,
        defaults: &ParticleDefaults,
        sectors: usize,
    ) -> Self {
        let id = id.into();
        Self {
            name: format!("{}{NAME_SEPARATOR}{}", group.name, id),
            id,
            group: group_id,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            radius: defaults.radius,
            color: group.color,
            spring: defaults.spring,
            friction: defaults.friction,
            placement: defaults.placement,
            sectors,
        }
    }

    /// `true` if `other` is this particle (same group, same id).
    #[inline]
    pub fn is_same(&self, other: &Particle) -> bool {
        self.group == other.group && self.id == other.id
    }

    /// Two particles collide iff their centers are closer than the sum of their radii.
    #[inline]
    pub fn is_colliding_with(&self, other: &Particle) -> bool {
        self.position.distance(other.position) < self.radius + other.radius
    }

    /// Velocity nudge for an overlapping `other`, scaled by this particle's spring.
    ///
    /// The target is the point `radius + other.radius` away from this
    /// particle along the direction to `other`, i.e. where `other` would
    /// just touch. The returned vector is `(target - other.position) * spring`:
    /// the caller subtracts it from this velocity and adds it to `other`'s.
    pub fn bounce_from(&self, other: &Particle) -> Vec2 {
        let d = other.position - self.position;
        let angle = d.y.atan2(d.x);
        let target = self.position + Vec2::from_angle(angle) * (self.radius + other.radius);
        (target - other.position) * self.spring
    }

    /// Smallest gap to any other particle; negative when overlapping.
    ///
    /// Returns `f32::INFINITY` when there is nothing else to check.
    pub fn clearance_among(&self, others: &[Particle]) -> f32 {
        others
            .iter()
            .filter(|p| !self.is_same(p))
            .map(|p| self.position.distance(p.position) - (self.radius + p.radius))
            .fold(f32::INFINITY, f32::min)
    }

    /// Draws a starting position using this particle's placement strategy.
    pub fn candidate_position(&self, arena: &Arena, rng: &mut impl Rng) -> Vec2 {
        match self.placement {
            Placement::Random => Vec2::new(
                rng.random_range(0.0..arena.width),
                rng.random_range(0.0..arena.height),
            ),
            Placement::Grouped => {
                let band_width = arena.width / self.sectors.max(1) as f32;
                let x = rng.random_range(0.0..band_width) + self.group as f32 * band_width;
                Vec2::new(x, rng.random_range(0.0..arena.height))
            }
        }
    }

    /// Moves this particle to a spot that overlaps none of `others`.
    ///
    /// Candidates are drawn until one is clear of every other particle
    /// (itself excluded by [`Particle::is_same`]). After `max_attempts` failures the least
    /// overlapping candidate seen is kept instead.
    ///
    /// ### Returns
    /// `true` if a clear spot was found, `false` if the fallback was used.
    pub fn place_among(
        &mut self,
        others: &[Particle],
        arena: &Arena,
        max_attempts: usize,
        rng: &mut impl Rng,
    ) -> bool {
        let mut best = (f32::NEG_INFINITY, self.position);
        for _ in 0..max_attempts {
            self.position = self.candidate_position(arena, rng);
            let clearance = self.clearance_among(others);
            if clearance >= 0.0 {
                return true;
            }
            if clearance > best.0 {
                best = (clearance, self.position);
            }
        }

        self.position = best.1;
        log::warn!(
            "no free spot for particle {} after {} attempts; keeping overlap of {:.2}",
            self.name,
            max_attempts,
            -best.0
        );
        false
    }

    /// Advances one tick: `position += velocity`, then bounces off each edge.
    ///
    /// The four edge checks are independent, so a corner hit clamps both
    /// axes. A bounce multiplies the velocity component by `friction` and
    /// clamps the position so the circle sits on the edge.
    pub fn step(&mut self, arena: &Arena) {
        self.position += self.velocity;

        // Top edge.
        if self.position.y < self.radius {
            self.velocity.y *= self.friction;
            self.position.y = self.radius;
        }
        // Bottom edge.
        if self.position.y > arena.height - self.radius {
            self.velocity.y *= self.friction;
            self.position.y = arena.height - self.radius;
        }
        // Right edge.
        if self.position.x > arena.width - self.radius {
            self.velocity.x *= self.friction;
            self.position.x = arena.width - self.radius;
        }
        // Left edge.
        if self.position.x < self.radius {
            self.velocity.x *= self.friction;
            self.position.x = self.radius;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    const EPS: f32 = 1e-5;

    fn particle_at(name: &str, pos: Vec2, defaults: &ParticleDefaults) -> Particle {
        let group = Group::new("g", 1.0, Color::RED);
        let mut p = Particle::new(0, &group, name, defaults, 1);
        p.position = pos;
        p
    }

    fn defaults(radius: f32, spring: f32, friction: f32) -> ParticleDefaults {
        ParticleDefaults {
            radius,
            spring,
            friction,
            ..ParticleDefaults::default()
        }
    }

    #[test]
    fn name_joins_group_name_and_id() {
        let group = Group::new("red", 1.0, Color::RED);
        let p = Particle::new(0, &group, "7", &ParticleDefaults::default(), 2);
        assert_eq!(p.id, "7");
        assert_eq!(p.name, "red:7");
        assert_eq!(p.color, Color::RED);
    }

    #[test]
    fn collision_is_strict_on_touching_circles() {
        let d = defaults(10.0, 0.1, -1.0);
        let a = particle_at("a", Vec2::new(0.0, 0.0), &d);
        let touching = particle_at("b", Vec2::new(20.0, 0.0), &d);
        let overlapping = particle_at("c", Vec2::new(19.9, 0.0), &d);

        assert!(!a.is_colliding_with(&touching));
        assert!(a.is_colliding_with(&overlapping));
    }

    #[test]
    fn bounce_pushes_pair_apart_along_axis() {
        // Centers 15 apart with radii 10: 5 units of overlap along x.
        let d = defaults(10.0, 0.1, -1.0);
        let a = particle_at("a", Vec2::new(40.0, 50.0), &d);
        let b = particle_at("b", Vec2::new(55.0, 50.0), &d);

        let bounce = a.bounce_from(&b);
        assert!((bounce.x - 0.5).abs() < EPS, "bounce = {bounce:?}");
        assert!(bounce.y.abs() < EPS);
    }

    #[test]
    fn bounce_uses_only_own_spring() {
        let a = particle_at("a", Vec2::new(40.0, 50.0), &defaults(10.0, 0.1, -1.0));
        let b = particle_at("b", Vec2::new(55.0, 50.0), &defaults(10.0, 0.8, -1.0));

        assert!((a.bounce_from(&b).x - 0.5).abs() < EPS);
        assert!((b.bounce_from(&a).x + 4.0).abs() < EPS);
    }

    #[test]
    fn bounce_on_diagonal_points_away_from_self() {
        let d = defaults(5.0, 0.5, -1.0);
        let a = particle_at("a", Vec2::new(0.0, 0.0), &d);
        let b = particle_at("b", Vec2::new(3.0, 4.0), &d);

        // Distance 5, should be 10: other is pushed 5 further along (0.6, 0.8).
        let bounce = a.bounce_from(&b);
        assert!((bounce - Vec2::new(1.5, 2.0)).length() < EPS, "{bounce:?}");
    }

    #[test]
    fn step_bounces_off_left_edge_with_friction() {
        let mut p = particle_at("a", Vec2::new(5.0, 250.0), &defaults(10.0, 0.1, -0.5));
        p.velocity = Vec2::new(-3.0, 0.0);

        p.step(&Arena::new(500.0, 500.0));

        assert_eq!(p.position, Vec2::new(10.0, 250.0));
        assert!((p.velocity.x - 1.5).abs() < EPS);
        assert_eq!(p.velocity.y, 0.0);
    }

    #[test]
    fn step_clamps_both_axes_in_a_corner() {
        let mut p = particle_at("a", Vec2::new(495.0, 495.0), &defaults(10.0, 0.1, -1.0));
        p.velocity = Vec2::new(2.0, 3.0);

        p.step(&Arena::new(500.0, 500.0));

        assert_eq!(p.position, Vec2::new(490.0, 490.0));
        assert_eq!(p.velocity, Vec2::new(-2.0, -3.0));
    }

    #[test]
    fn step_without_velocity_away_from_edges_is_a_no_op() {
        let mut p = particle_at("a", Vec2::new(100.0, 200.0), &defaults(10.0, 0.1, -1.0));
        p.step(&Arena::new(500.0, 500.0));
        assert_eq!(p.position, Vec2::new(100.0, 200.0));
        assert_eq!(p.velocity, Vec2::ZERO);
    }

    #[test]
    fn friction_above_one_gains_energy() {
        let mut p = particle_at("a", Vec2::new(250.0, 12.0), &defaults(10.0, 0.1, -2.0));
        p.velocity = Vec2::new(0.0, -4.0);
        p.step(&Arena::new(500.0, 500.0));
        assert_eq!(p.position.y, 10.0);
        assert!((p.velocity.y - 8.0).abs() < EPS);
    }

    #[test]
    fn grouped_candidates_stay_in_their_band() {
        let arena = Arena::new(600.0, 300.0);
        let group = Group::new("blue", 1.0, Color::BLUE);
        let d = ParticleDefaults {
            placement: Placement::Grouped,
            ..ParticleDefaults::default()
        };
        let p = Particle::new(1, &group, "0", &d, 3);
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..500 {
            let c = p.candidate_position(&arena, &mut rng);
            assert!((200.0..400.0).contains(&c.x), "x = {}", c.x);
            assert!((0.0..300.0).contains(&c.y), "y = {}", c.y);
        }
    }

    #[test]
    fn random_candidates_cover_the_arena() {
        let arena = Arena::new(600.0, 300.0);
        let d = ParticleDefaults {
            placement: Placement::Random,
            ..ParticleDefaults::default()
        };
        let p = particle_at("a", Vec2::ZERO, &d);
        let mut rng = StdRng::seed_from_u64(5);

        let xs: Vec<f32> = (0..500)
            .map(|_| p.candidate_position(&arena, &mut rng).x)
            .collect();
        assert!(xs.iter().all(|x| (0.0..600.0).contains(x)));
        assert!(xs.iter().any(|&x| x < 200.0));
        assert!(xs.iter().any(|&x| x > 400.0));
    }

    #[test]
    fn place_among_avoids_existing_particles() {
        let arena = Arena::new(100.0, 100.0);
        let d = ParticleDefaults {
            radius: 10.0,
            placement: Placement::Random,
            ..ParticleDefaults::default()
        };
        let others = vec![
            particle_at("x", Vec2::new(25.0, 25.0), &d),
            particle_at("y", Vec2::new(75.0, 75.0), &d),
        ];
        let mut rng = StdRng::seed_from_u64(9);

        for i in 0..50 {
            let mut p = particle_at(&format!("p{i}"), Vec2::ZERO, &d);
            assert!(p.place_among(&others, &arena, 10_000, &mut rng));
            assert!(others.iter().all(|o| !p.is_colliding_with(o)));
        }
    }

    #[test]
    fn place_among_ignores_itself() {
        let arena = Arena::new(100.0, 100.0);
        let d = defaults(10.0, 0.1, -1.0);
        let mut p = particle_at("a", Vec2::new(50.0, 50.0), &d);
        let snapshot = vec![p.clone()];
        let mut rng = StdRng::seed_from_u64(2);

        assert!(p.place_among(&snapshot, &arena, 1, &mut rng));
    }

    #[test]
    fn prefix_sharing_groups_are_still_distinct() {
        let a = Group::new("a", 1.0, Color::RED);
        let a1 = Group::new("a1", 1.0, Color::BLUE);
        let d = ParticleDefaults::default();
        let mut first = Particle::new(0, &a, "10", &d, 2);
        let mut second = Particle::new(1, &a1, "0", &d, 2);
        first.position = Vec2::new(50.0, 50.0);
        second.position = Vec2::new(50.0, 50.0);

        assert_ne!(first.name, second.name);
        assert!(!first.is_same(&second));
        assert!(second.clearance_among(std::slice::from_ref(&first)) < 0.0);
    }

    #[test]
    fn place_among_falls_back_when_arena_is_full() {
        let arena = Arena::new(20.0, 20.0);
        let d = ParticleDefaults {
            radius: 10.0,
            placement: Placement::Random,
            ..ParticleDefaults::default()
        };
        let others = vec![particle_at("x", Vec2::new(10.0, 10.0), &d)];
        let mut p = particle_at("p", Vec2::ZERO, &d);
        let mut rng = StdRng::seed_from_u64(4);

        assert!(!p.place_among(&others, &arena, 100, &mut rng));
        assert!((0.0..20.0).contains(&p.position.x));
        assert!((0.0..20.0).contains(&p.position.y));
    }
}
