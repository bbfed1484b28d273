use crate::{config::GroupConfig, types::Color};

/// A named category of particles.
///
/// `population` is filled in by [`crate::allocator::allocate`]; everything
/// else comes from the configuration and does not change afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct Group {
    pub name: String,
    pub ratio: f32,
    pub color: Color,
    pub population: usize,
}

impl Group {
    pub fn new(name: impl Into<String>, ratio: f32, color: Color) -> Self {
        Self {
            name: name.into(),
            ratio,
            color,
            population: 0,
        }
    }
}

impl From<&GroupConfig> for Group {
    fn from(cfg: &GroupConfig) -> Self {
        Self::new(cfg.name.clone(), cfg.ratio, cfg.color)
    }
}
