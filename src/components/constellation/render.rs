//! Drawing surface abstraction and the canvas-backed implementation.
//!
//! The simulation never touches pixels. It issues clear/circle/line intents
//! against a [`Surface`], which lets tests substitute a recording fake for the
//! browser canvas.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::particles::Particle;

/// Drawing operations the constellation needs from its host.
pub trait Surface {
	/// Surface width in drawing units.
	fn width(&self) -> f64;
	/// Surface height in drawing units.
	fn height(&self) -> f64;
	/// Erase the whole surface.
	fn clear(&mut self);
	/// Fill a circle and stroke its outline with `stroke_width`.
	fn draw_circle(&mut self, x: f64, y: f64, radius: f64, stroke_width: f64);
	/// Stroke a straight segment with `stroke_width`.
	fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke_width: f64);
}

/// Proximity weight band: a link is drawn when `min < weight < max`.
#[derive(Clone, Copy, Debug)]
pub struct LinkRule {
	/// Numerator of the weight.
	pub constant: f64,
	/// Exclusive lower bound.
	pub min_weight: f64,
	/// Exclusive upper bound.
	pub max_weight: f64,
}

impl LinkRule {
	/// `constant / distance²`, or `None` when the pair should not be linked.
	///
	/// Coincident particles give an infinite weight, which never passes the
	/// band check, so no non-finite stroke width can reach the surface.
	pub fn weight(&self, a: &Particle, b: &Particle) -> Option<f64> {
		let weight = self.constant / a.distance_sq(b);
		(weight.is_finite() && weight > self.min_weight && weight < self.max_weight)
			.then_some(weight)
	}
}

/// Draws a particle as a filled, outlined circle.
pub fn draw_particle<S: Surface + ?Sized>(surface: &mut S, p: &Particle, outline_width: f64) {
	surface.draw_circle(p.x, p.y, p.radius, outline_width);
}

/// Draws the link between two particles with the given weight as stroke width.
pub fn draw_link<S: Surface + ?Sized>(surface: &mut S, a: &Particle, b: &Particle, weight: f64) {
	surface.draw_line(a.x, a.y, b.x, b.y, weight);
}

/// [`Surface`] over an HTML canvas 2D context.
///
/// Uses the context's current fill and stroke styles (canvas defaults: opaque black).
pub struct CanvasSurface {
	ctx: CanvasRenderingContext2d,
	width: f64,
	height: f64,
}

impl CanvasSurface {
	/// Wrap a 2D context whose canvas is `width × height`.
	pub fn new(ctx: CanvasRenderingContext2d, width: f64, height: f64) -> Self {
		Self { ctx, width, height }
	}

	/// Track a new canvas backing size.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

impl Surface for CanvasSurface {
	fn width(&self) -> f64 {
		self.width
	}

	fn height(&self) -> f64 {
		self.height
	}

	fn clear(&mut self) {
		self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
	}

	fn draw_circle(&mut self, x: f64, y: f64, radius: f64, stroke_width: f64) {
		self.ctx.begin_path();
		let _ = self.ctx.arc(x, y, radius, 0.0, PI * 2.0);
		self.ctx.set_line_width(stroke_width);
		self.ctx.fill();
		self.ctx.stroke();
	}

	fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke_width: f64) {
		self.ctx.begin_path();
		self.ctx.set_line_width(stroke_width);
		self.ctx.move_to(x1, y1);
		self.ctx.line_to(x2, y2);
		self.ctx.stroke();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn rule() -> LinkRule {
		LinkRule {
			constant: 440.0,
			min_weight: 0.035,
			max_weight: 0.6,
		}
	}

	fn at(x: f64, y: f64) -> Particle {
		Particle::new(x, y, 0.0, 0.0, 1.0)
	}

	#[test]
	fn close_pair_is_too_heavy() {
		// 440 / 100 = 4.4
		assert_eq!(rule().weight(&at(0.0, 0.0), &at(10.0, 0.0)), None);
	}

	#[test]
	fn mid_range_pair_is_linked() {
		let weight = rule().weight(&at(0.0, 0.0), &at(30.0, 0.0)).unwrap();
		assert!((weight - 440.0 / 900.0).abs() < 1e-12);
	}

	#[test]
	fn distant_pair_is_dropped() {
		// 440 / 40000 = 0.011
		assert_eq!(rule().weight(&at(0.0, 0.0), &at(200.0, 0.0)), None);
	}

	#[test]
	fn band_edges_are_exclusive() {
		let rule = LinkRule {
			constant: 1.0,
			min_weight: 0.25,
			max_weight: 1.0,
		};
		// weight exactly 1.0 and exactly 0.25
		assert_eq!(rule.weight(&at(0.0, 0.0), &at(1.0, 0.0)), None);
		assert_eq!(rule.weight(&at(0.0, 0.0), &at(2.0, 0.0)), None);
		assert!(rule.weight(&at(0.0, 0.0), &at(1.5, 0.0)).is_some());
	}

	#[test]
	fn coincident_pair_never_links() {
		let p = at(5.0, 5.0);
		assert_eq!(rule().weight(&p, &p.clone()), None);
	}

	#[test]
	fn weight_is_symmetric() {
		let (a, b) = (at(3.0, 7.0), at(27.0, 25.0));
		assert!(rule().weight(&a, &b).is_some());
		assert_eq!(rule().weight(&a, &b), rule().weight(&b, &a));
	}
}
