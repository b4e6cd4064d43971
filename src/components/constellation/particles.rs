//! Particle data and the insertion-ordered store that holds them.

use rand::Rng;

use super::config::SpawnRange;

/// A single bouncing ball.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	/// Horizontal position.
	pub x: f64,
	/// Vertical position.
	pub y: f64,
	/// Horizontal velocity per frame.
	pub dx: f64,
	/// Vertical velocity per frame.
	pub dy: f64,
	/// Fixed at creation, always positive.
	pub radius: f64,
}

impl Particle {
	/// Create a particle. Radius must be positive.
	pub fn new(x: f64, y: f64, dx: f64, dy: f64, radius: f64) -> Self {
		debug_assert!(radius > 0.0, "particle radius must be positive");
		Self {
			x,
			y,
			dx,
			dy,
			radius,
		}
	}

	fn random_at<R: Rng>(x: f64, y: f64, range: &SpawnRange, rng: &mut R) -> Self {
		let dx = rng.gen_range(-range.speed..range.speed);
		let dy = rng.gen_range(-range.speed..range.speed);
		let radius = rng.gen_range(range.radius_min..range.radius_max);
		Self::new(x, y, dx, dy, radius)
	}

	/// Move by one unit time step.
	pub fn advance(&mut self) {
		self.x += self.dx;
		self.y += self.dy;
	}

	/// Flip each velocity axis whose edge has crossed the surface bounds.
	///
	/// Both axes are tested independently, so a corner hit flips both.
	/// No position correction happens here; the particle may sit one step
	/// outside the bounds until the next advance carries it back.
	pub fn reflect(&mut self, width: f64, height: f64) {
		if self.x + self.radius > width || self.x - self.radius < 0.0 {
			self.dx = -self.dx;
		}
		if self.y + self.radius > height || self.y - self.radius < 0.0 {
			self.dy = -self.dy;
		}
	}

	/// Squared distance between two particle centres.
	pub fn distance_sq(&self, other: &Particle) -> f64 {
		let (dx, dy) = (self.x - other.x, self.y - other.y);
		dx * dx + dy * dy
	}
}

/// Number of particles seeded for a surface: `floor(width * height / area_per_particle)`.
///
/// Non-positive or non-finite dimensions count as an empty surface.
pub fn seed_count(width: f64, height: f64, area_per_particle: f64) -> usize {
	if !(width > 0.0 && height > 0.0 && area_per_particle > 0.0) {
		return 0;
	}
	let count = (width * height / area_per_particle).floor();
	if count.is_finite() { count as usize } else { 0 }
}

/// Insertion-ordered collection of every live particle.
///
/// Particles are never removed. Growth is unbounded unless a capacity is set.
#[derive(Clone, Debug, Default)]
pub struct ParticleStore {
	particles: Vec<Particle>,
	capacity: Option<usize>,
}

impl ParticleStore {
	/// An empty store with no capacity limit.
	pub fn new() -> Self {
		Self::default()
	}

	/// A store that refuses to grow past `capacity` particles.
	pub fn with_capacity_limit(capacity: Option<usize>) -> Self {
		Self {
			particles: Vec::new(),
			capacity,
		}
	}

	/// Number of particles held.
	pub fn len(&self) -> usize {
		self.particles.len()
	}

	/// Whether the store holds no particles.
	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}

	/// Whether a capacity limit is set and reached.
	pub fn is_full(&self) -> bool {
		self.capacity.is_some_and(|cap| self.particles.len() >= cap)
	}

	/// Every particle, in insertion order.
	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	pub(crate) fn particles_mut(&mut self) -> &mut [Particle] {
		&mut self.particles
	}

	/// Append `particle` unless the store is full. Returns whether it was added.
	pub fn push(&mut self, particle: Particle) -> bool {
		if self.is_full() {
			return false;
		}
		self.particles.push(particle);
		true
	}

	/// Append a batch sized to the surface area, spread uniformly over
	/// `[0, width) × [0, height)`. Returns how many were added.
	pub fn seed<R: Rng>(
		&mut self,
		width: f64,
		height: f64,
		area_per_particle: f64,
		range: &SpawnRange,
		rng: &mut R,
	) -> usize {
		let count = seed_count(width, height, area_per_particle);
		let mut added = 0;
		for _ in 0..count {
			let x = rng.gen_range(0.0..width);
			let y = rng.gen_range(0.0..height);
			if !self.push(Particle::random_at(x, y, range, rng)) {
				break;
			}
			added += 1;
		}
		added
	}

	/// Append one particle exactly at `(x, y)` with random velocity and radius.
	pub fn spawn_at<R: Rng>(
		&mut self,
		x: f64,
		y: f64,
		range: &SpawnRange,
		rng: &mut R,
	) -> bool {
		if self.is_full() {
			return false;
		}
		self.push(Particle::random_at(x, y, range, rng))
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::*;

	fn rng() -> SmallRng {
		SmallRng::seed_from_u64(0xC0FFEE)
	}

	#[test]
	fn seed_count_floors() {
		assert_eq!(seed_count(400.0, 200.0, 8000.0), 10);
		assert_eq!(seed_count(80.0, 100.0, 8000.0), 1);
		assert_eq!(seed_count(100.0, 239.99, 8000.0), 2);
		assert_eq!(seed_count(100.0, 240.0, 8000.0), 3);
		assert_eq!(seed_count(79.0, 100.0, 8000.0), 0);
	}

	#[test]
	fn degenerate_surfaces_seed_nothing() {
		assert_eq!(seed_count(0.0, 1000.0, 8000.0), 0);
		assert_eq!(seed_count(-400.0, -200.0, 8000.0), 0);
		assert_eq!(seed_count(f64::NAN, 200.0, 8000.0), 0);
		assert_eq!(seed_count(f64::INFINITY, 200.0, 8000.0), 0);
	}

	#[test]
	fn seed_fills_surface_within_ranges() {
		let mut store = ParticleStore::new();
		let range = SpawnRange::seeded();
		let added = store.seed(400.0, 200.0, 8000.0, &range, &mut rng());
		assert_eq!(added, 10);
		assert_eq!(store.len(), 10);
		for p in store.particles() {
			assert!((0.0..400.0).contains(&p.x));
			assert!((0.0..200.0).contains(&p.y));
			assert!((-1.0..1.0).contains(&p.dx));
			assert!((-1.0..1.0).contains(&p.dy));
			assert!((0.2..1.2).contains(&p.radius));
		}
	}

	#[test]
	fn seed_appends_to_existing_particles() {
		let mut store = ParticleStore::new();
		store.push(Particle::new(1.0, 1.0, 0.0, 0.0, 1.0));
		store.seed(400.0, 200.0, 8000.0, &SpawnRange::seeded(), &mut rng());
		assert_eq!(store.len(), 11);
		assert_eq!(store.particles()[0].x, 1.0);
	}

	#[test]
	fn spawn_at_keeps_exact_position() {
		let mut store = ParticleStore::new();
		assert!(store.spawn_at(123.25, 45.5, &SpawnRange::clicked(), &mut rng()));
		assert_eq!(store.len(), 1);
		let p = &store.particles()[0];
		assert_eq!((p.x, p.y), (123.25, 45.5));
		assert!((-2.0..2.0).contains(&p.dx));
		assert!((-2.0..2.0).contains(&p.dy));
		assert!((0.2..0.7).contains(&p.radius));
	}

	#[test]
	fn capacity_limit_stops_growth() {
		let mut store = ParticleStore::with_capacity_limit(Some(4));
		let mut rng = rng();
		assert_eq!(store.seed(400.0, 200.0, 8000.0, &SpawnRange::seeded(), &mut rng), 4);
		assert!(store.is_full());
		assert!(!store.spawn_at(5.0, 5.0, &SpawnRange::clicked(), &mut rng));
		assert_eq!(store.len(), 4);
	}

	#[test]
	fn reflect_at_right_edge() {
		let mut p = Particle::new(199.0, 50.0, 1.0, 0.0, 2.0);
		p.advance();
		assert_eq!(p.x, 200.0);
		p.reflect(200.0, 100.0);
		assert_eq!(p.dx, -1.0);
		assert_eq!(p.dy, 0.0);
	}

	#[test]
	fn reflect_corner_flips_both_axes() {
		let mut p = Particle::new(0.5, 0.5, -1.0, -1.0, 1.0);
		p.reflect(100.0, 100.0);
		assert_eq!((p.dx, p.dy), (1.0, 1.0));
	}

	#[test]
	fn double_flip_restores_sign() {
		let mut p = Particle::new(0.2, 50.0, -0.5, 0.0, 1.0);
		p.reflect(100.0, 100.0);
		p.reflect(100.0, 100.0);
		assert_eq!(p.dx, -0.5);
	}

	#[test]
	fn distance_is_symmetric() {
		let a = Particle::new(0.0, 0.0, 0.0, 0.0, 1.0);
		let b = Particle::new(30.0, 40.0, 0.0, 0.0, 1.0);
		assert_eq!(a.distance_sq(&b), 2500.0);
		assert_eq!(a.distance_sq(&b), b.distance_sq(&a));
	}
}
