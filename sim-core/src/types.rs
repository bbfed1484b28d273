/// Identifier for a group in a [`crate::simulation::Simulation`].
///
/// This is an index into `Simulation::groups` (and into the configured
/// group list), and is only meaningful within the lifetime of a given
/// population.
pub type GroupId = usize;

/// Opaque RGBA display color; the engine never interprets it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color(pub [u8; 4]);

impl Color {
    pub const RED: Self = Self([230, 60, 60, 255]);
    pub const BLUE: Self = Self([60, 110, 230, 255]);
    pub const GRID: Self = Self([155, 155, 155, 255]);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b, 255])
    }
}
