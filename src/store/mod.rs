use std::{error::Error, fmt};

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    config::{self, MassPolicy, SpawnConfig},
    types::{Body, ColorId, Stats, Vec2, PALETTE},
};

/// Fixed-size set of bodies. The length is set at construction and indices
/// stay stable for the lifetime of the store.
#[derive(Clone, Debug, PartialEq)]
pub struct BodyStore {
    bodies: Box<[Body]>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidMass {
    pub index: usize,
    pub mass: i16,
}

impl fmt::Display for InvalidMass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "body {} has non-positive mass {}", self.index, self.mass)
    }
}

impl Error for InvalidMass {}

/// Random store for a `world_width` x `world_height` surface using the
/// default spawn ranges.
pub fn initialize(count: usize, world_width: f32, world_height: f32, seed: u64) -> BodyStore {
    BodyStore::random(&SpawnConfig::new(count, world_width, world_height), seed)
}

impl BodyStore {
    pub fn from_bodies(bodies: Vec<Body>) -> Self {
        Self {
            bodies: bodies.into_boxed_slice(),
        }
    }

    pub fn random(spawn: &SpawnConfig, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let (x_lo, x_hi) = inset(spawn.world_width, spawn.margin);
        let (y_lo, y_hi) = inset(spawn.world_height, spawn.margin);
        let (mass_lo, mass_hi) = if spawn.mass_min <= spawn.mass_max {
            (spawn.mass_min, spawn.mass_max)
        } else {
            (spawn.mass_max, spawn.mass_min)
        };
        let speed = spawn.max_speed.abs();

        let mut bodies = Vec::with_capacity(spawn.count);
        for _ in 0..spawn.count {
            let pos = Vec2::new(sample(&mut rng, x_lo, x_hi), sample(&mut rng, y_lo, y_hi));
            let vel = Vec2::new(
                sample(&mut rng, -speed, speed),
                sample(&mut rng, -speed, speed),
            );
            let mass = rng.gen_range(mass_lo..=mass_hi);
            let color = PALETTE[rng.gen_range(0..PALETTE.len())];
            bodies.push(
                Body::new(pos, vel, mass, spawn.radius, spawn.trail_capacity).with_color(color),
            );
        }
        log::debug!(
            "spawned {} bodies with seed {} in {}x{}",
            bodies.len(),
            seed,
            spawn.world_width,
            spawn.world_height
        );
        Self::from_bodies(bodies)
    }

    /// The pair the simulation was first tuned with.
    pub fn two_body(trail_capacity: usize) -> Self {
        Self::from_bodies(vec![
            Body::new(
                Vec2::new(200.0, 200.0),
                Vec2::new(-5.0, 0.0),
                1000,
                config::BINARY_RADIUS,
                trail_capacity,
            )
            .with_color(ColorId::White),
            Body::new(
                Vec2::new(700.0, 400.0),
                Vec2::new(0.0, 10.0),
                500,
                config::BINARY_RADIUS,
                trail_capacity,
            )
            .with_color(ColorId::White),
        ])
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    pub fn validate(&self, policy: MassPolicy) -> Result<(), InvalidMass> {
        if policy == MassPolicy::Permissive {
            return Ok(());
        }
        match self
            .bodies
            .iter()
            .enumerate()
            .find(|(_, body)| body.mass <= 0)
        {
            Some((index, body)) => {
                log::debug!("rejecting body {} with mass {}", index, body.mass);
                Err(InvalidMass {
                    index,
                    mass: body.mass,
                })
            }
            None => Ok(()),
        }
    }

    pub fn stats(&self) -> Stats {
        let mut stats = Stats {
            body_count: self.bodies.len(),
            ..Stats::default()
        };
        let mut weighted_pos = Vec2::ZERO;
        for body in self.bodies.iter() {
            let mass = f32::from(body.mass);
            stats.total_mass += mass;
            stats.kinetic_energy += 0.5 * mass * body.vel.length_sq();
            stats.momentum += body.vel * mass;
            weighted_pos += body.pos * mass;
        }
        if stats.total_mass != 0.0 {
            stats.center_of_mass = weighted_pos * (1.0 / stats.total_mass);
        }
        stats
    }
}

fn inset(extent: f32, margin: f32) -> (f32, f32) {
    let lo = margin.max(0.0);
    let hi = extent - lo;
    if hi > lo {
        (lo, hi)
    } else {
        (extent * 0.5, extent * 0.5)
    }
}

fn sample(rng: &mut StdRng, lo: f32, hi: f32) -> f32 {
    if hi > lo { rng.gen_range(lo..hi) } else { lo }
}
