//! Drawing capability the engine needs from its host.
//!
//! A host implements [`Canvas`] on top of whatever it paints with; the
//! engine only ever asks for filled circles and straight lines in arena
//! coordinates.

use crate::{particle::Particle, types::Color};
use glam::Vec2;

pub trait Canvas {
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn line(&mut self, from: Vec2, to: Vec2, color: Color);
}

/// Draws one particle; the disc is a pixel narrower than its collision
/// diameter so touching neighbours stay visually separate.
pub fn draw_particle(canvas: &mut impl Canvas, p: &Particle) {
    let diameter = (2.0 * p.radius - 1.0).max(0.0);
    canvas.fill_circle(p.position, diameter / 2.0, p.color);
}
