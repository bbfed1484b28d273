use crate::{arena::Arena, particle::Particle};

/// Aggregate counts shown next to the arena.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    /// Particles strictly left of the midline.
    pub left: usize,
    /// Particles strictly right of the midline.
    pub right: usize,
    /// Particle count per group, indexed by `GroupId`.
    pub per_group: Vec<usize>,
}

impl Stats {
    pub fn collect(particles: &[Particle], group_count: usize, arena: &Arena) -> Self {
        let mid = arena.midline_x();
        let mut stats = Self {
            per_group: vec![0; group_count],
            ..Self::default()
        };
        for p in particles {
            if p.position.x < mid {
                stats.left += 1;
            } else if p.position.x > mid {
                stats.right += 1;
            }
            if let Some(c) = stats.per_group.get_mut(p.group) {
                *c += 1;
            }
        }
        stats
    }
}
