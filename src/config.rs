pub const RENDER_HZ: f32 = 60.0;

pub const WORLD_WIDTH: f32 = 1600.0;
pub const WORLD_HEIGHT: f32 = 900.0;

pub const BINARY_GRAVITY_G: f32 = 200.0;
pub const BINARY_MIN_DISTANCE: f32 = 0.1;
pub const BINARY_DT: f32 = 0.1;
pub const BINARY_RADIUS: f32 = 1.0;

pub const SWARM_BODIES: usize = 64;
pub const SWARM_GRAVITY_G: f32 = 4000.0;
pub const SWARM_RADIUS: f32 = 4.0;
pub const SWARM_MAX_SPEED: f32 = 120.0;
pub const SWARM_TRAIL_LEN: usize = 24;

pub const BOUNCE_DAMP: f32 = 0.8;

pub const SPAWN_MARGIN: f32 = 50.0;
pub const SPAWN_SPEED: f32 = 20.0;
pub const SPAWN_MASS_MIN: i16 = 50;
pub const SPAWN_MASS_MAX: i16 = 500;

/// How pairwise contributions are summed into per-body accelerations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Summation {
    /// Each unordered pair once, equal and opposite update to both bodies.
    Symmetric,
    /// Every ordered pair, only the first body of the pair is updated.
    Asymmetric,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MassPolicy {
    Permissive,
    RejectNonPositive,
}

/// Axis-aligned box spanning `[0, width] x [0, height]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Walls {
    pub width: f32,
    pub height: f32,
    /// Fraction of the normal velocity kept after a bounce.
    pub bounce: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicsConfig {
    pub gravity: f32,
    /// Divide `gravity` by the body count before use.
    pub scale_gravity_by_count: bool,
    /// Pairs closer than this contribute nothing.
    pub min_distance: f32,
    /// Per-axis velocity cap.
    pub max_speed: Option<f32>,
    pub walls: Option<Walls>,
    /// 0 disables trail tracking.
    pub trail_capacity: usize,
    pub summation: Summation,
    pub mass_policy: MassPolicy,
}

impl PhysicsConfig {
    pub fn effective_gravity(&self, body_count: usize) -> f32 {
        if self.scale_gravity_by_count && body_count > 0 {
            self.gravity / body_count as f32
        } else {
            self.gravity
        }
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Profile::Binary.physics()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnConfig {
    pub count: usize,
    pub world_width: f32,
    pub world_height: f32,
    pub margin: f32,
    pub max_speed: f32,
    pub mass_min: i16,
    pub mass_max: i16,
    pub radius: f32,
    pub trail_capacity: usize,
}

impl SpawnConfig {
    pub fn new(count: usize, world_width: f32, world_height: f32) -> Self {
        Self {
            count,
            world_width,
            world_height,
            margin: SPAWN_MARGIN,
            max_speed: SPAWN_SPEED,
            mass_min: SPAWN_MASS_MIN,
            mass_max: SPAWN_MASS_MAX,
            radius: SWARM_RADIUS,
            trail_capacity: SWARM_TRAIL_LEN,
        }
    }
}

/// Where the per-frame `dt` comes from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Timestep {
    Fixed(f32),
    /// Real elapsed time since the previous frame.
    Measured,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Profile {
    /// Two literal bodies, fixed step, no walls or trails. Symmetric summation
    /// pulls the second body by the first body's mass, so its orbit differs from
    /// a loop that applies the partner's mass to both sides of a pair.
    Binary,
    /// Seeded random cluster inside bouncing walls, with trails.
    Swarm,
}

impl Profile {
    pub fn physics(self) -> PhysicsConfig {
        match self {
            Profile::Binary => PhysicsConfig {
                gravity: BINARY_GRAVITY_G,
                scale_gravity_by_count: false,
                min_distance: BINARY_MIN_DISTANCE,
                max_speed: None,
                walls: None,
                trail_capacity: 0,
                summation: Summation::Symmetric,
                mass_policy: MassPolicy::Permissive,
            },
            Profile::Swarm => PhysicsConfig {
                gravity: SWARM_GRAVITY_G,
                scale_gravity_by_count: true,
                min_distance: SWARM_RADIUS * 2.0,
                max_speed: Some(SWARM_MAX_SPEED),
                walls: Some(Walls {
                    width: WORLD_WIDTH,
                    height: WORLD_HEIGHT,
                    bounce: BOUNCE_DAMP,
                }),
                trail_capacity: SWARM_TRAIL_LEN,
                summation: Summation::Asymmetric,
                mass_policy: MassPolicy::Permissive,
            },
        }
    }

    pub fn timestep(self) -> Timestep {
        match self {
            Profile::Binary => Timestep::Fixed(BINARY_DT),
            Profile::Swarm => Timestep::Measured,
        }
    }

    pub fn spawn(self, count: usize) -> SpawnConfig {
        let mut spawn = SpawnConfig::new(count, WORLD_WIDTH, WORLD_HEIGHT);
        spawn.trail_capacity = self.physics().trail_capacity;
        spawn
    }
}
