//! Per-frame physics: gravity, explicit Euler integration, wall bounces and
//! trail history.

use crate::{
    config::{PhysicsConfig, Summation, Walls},
    store::BodyStore,
    types::{Body, Vec2},
};

/// Advances a [`BodyStore`] one step at a time. Holds only a scratch buffer
/// for accelerations so repeated calls don't allocate.
#[derive(Debug, Default)]
pub struct PhysicsStep {
    acc: Vec<Vec2>,
}

impl PhysicsStep {
    pub fn new() -> Self {
        Self { acc: Vec::new() }
    }

    /// Trails record the position the bodies start the step at, then all
    /// accelerations are computed before any body moves.
    pub fn update(&mut self, store: &mut BodyStore, dt: f32, config: &PhysicsConfig) {
        let bodies = store.bodies_mut();

        if config.trail_capacity > 0 {
            for body in bodies.iter_mut() {
                push_trail(body, config.trail_capacity);
            }
        }

        compute_accelerations(bodies, config, &mut self.acc);
        integrate(bodies, &self.acc, dt, config.max_speed);

        if let Some(walls) = config.walls {
            for body in bodies.iter_mut() {
                resolve_boundaries(body, &walls);
            }
        }
    }

    /// Accelerations computed by the last `update`.
    pub fn accelerations(&self) -> &[Vec2] {
        &self.acc
    }
}

/// One-shot form of [`PhysicsStep::update`].
pub fn update(store: &mut BodyStore, dt: f32, config: &PhysicsConfig) {
    PhysicsStep::new().update(store, dt, config);
}

/// Fills `out` with one acceleration per body.
///
/// Pairs closer than `config.min_distance` are skipped outright. Masses are
/// used as given, so zero mass pulls nothing and negative mass repels.
pub fn compute_accelerations(bodies: &[Body], config: &PhysicsConfig, out: &mut Vec<Vec2>) {
    let n = bodies.len();
    out.clear();
    out.resize(n, Vec2::ZERO);
    let g = config.effective_gravity(n);

    match config.summation {
        Summation::Symmetric => {
            for i in 0..n {
                for j in (i + 1)..n {
                    let Some((dir, inv_dist_sq)) =
                        pair_terms(bodies[i].pos, bodies[j].pos, config.min_distance)
                    else {
                        continue;
                    };
                    out[i] += dir * (g * f32::from(bodies[j].mass) * inv_dist_sq);
                    out[j] -= dir * (g * f32::from(bodies[i].mass) * inv_dist_sq);
                }
            }
        }
        Summation::Asymmetric => {
            for i in 0..n {
                let mut acc = Vec2::ZERO;
                for j in 0..n {
                    if i == j {
                        continue;
                    }
                    let Some((dir, inv_dist_sq)) =
                        pair_terms(bodies[i].pos, bodies[j].pos, config.min_distance)
                    else {
                        continue;
                    };
                    acc += dir * (g * f32::from(bodies[j].mass) * inv_dist_sq);
                }
                out[i] = acc;
            }
        }
    }
}

/// Unit vector from `from` to `to` and `1 / distance²`, or `None` when the
/// pair is closer than `min_distance`.
fn pair_terms(from: Vec2, to: Vec2, min_distance: f32) -> Option<(Vec2, f32)> {
    let delta = to - from;
    let dist = delta.length();
    if dist < min_distance {
        return None;
    }
    Some((delta * (1.0 / dist), 1.0 / (dist * dist)))
}

pub fn integrate(bodies: &mut [Body], acc: &[Vec2], dt: f32, max_speed: Option<f32>) {
    for (body, a) in bodies.iter_mut().zip(acc.iter()) {
        body.vel += *a * dt;
        if let Some(limit) = max_speed {
            body.vel = body.vel.clamp_axes(limit);
        }
        body.pos += body.vel * dt;
    }
}

/// Keeps the body's edge inside the walls. Each axis bounces on its own, so a
/// body can hit two walls in the same step.
pub fn resolve_boundaries(body: &mut Body, walls: &Walls) {
    let r = body.radius;

    if body.pos.x - r < 0.0 {
        body.pos.x = r;
        body.vel.x = -body.vel.x * walls.bounce;
    } else if body.pos.x + r > walls.width {
        body.pos.x = walls.width - r;
        body.vel.x = -body.vel.x * walls.bounce;
    }

    if body.pos.y - r < 0.0 {
        body.pos.y = r;
        body.vel.y = -body.vel.y * walls.bounce;
    } else if body.pos.y + r > walls.height {
        body.pos.y = walls.height - r;
        body.vel.y = -body.vel.y * walls.bounce;
    }
}

/// Records the current position, first resizing the trail to `capacity`
/// when the body was built with a different one.
pub fn push_trail(body: &mut Body, capacity: usize) {
    body.trail.resize(capacity);
    body.trail.push(body.pos);
}
