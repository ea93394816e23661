use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length_sq(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    pub fn length(self) -> f32 {
        self.length_sq().sqrt()
    }

    /// Clamps each axis to `[-limit, limit]` independently; the direction of
    /// the vector is not preserved.
    pub fn clamp_axes(self, limit: f32) -> Vec2 {
        Vec2::new(self.x.max(-limit).min(limit), self.y.max(-limit).min(limit))
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, rhs: Vec2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Mul<Vec2> for f32 {
    type Output = Vec2;

    fn mul(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self * rhs.x, self * rhs.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorId {
    White,
    Cyan,
    Blue,
    Yellow,
    Magenta,
    Red,
    Green,
    Trail,
}

pub const PALETTE: [ColorId; 6] = [
    ColorId::Cyan,
    ColorId::Blue,
    ColorId::Yellow,
    ColorId::Magenta,
    ColorId::Red,
    ColorId::Green,
];

/// Bounded history of recent positions.
///
/// Stored as a ring buffer: `head` is the slot of the most recent entry and
/// `len` counts populated slots, saturating at the capacity. Enumeration is
/// always most-recent-first.
#[derive(Clone, Debug, PartialEq)]
pub struct Trail {
    slots: Vec<Vec2>,
    head: usize,
    len: usize,
}

impl Trail {
    /// Every slot starts at `start` so a renderer reading raw slots never
    /// sees the origin before the first push.
    pub fn new(capacity: usize, start: Vec2) -> Self {
        Self {
            slots: vec![start; capacity],
            head: 0,
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Changes the capacity, keeping the most recent entries that still fit.
    pub fn resize(&mut self, capacity: usize) {
        if capacity == self.slots.len() {
            return;
        }
        let fill = self
            .get(0)
            .or_else(|| self.slots.first().copied())
            .unwrap_or(Vec2::ZERO);
        let kept: Vec<Vec2> = self.iter().take(capacity).collect();
        let mut slots = vec![fill; capacity];
        // Oldest kept entry goes to slot 0 so the cursor ends on the newest.
        for (slot, pos) in slots.iter_mut().zip(kept.iter().rev()) {
            *slot = *pos;
        }
        self.len = kept.len();
        self.head = kept.len().saturating_sub(1);
        self.slots = slots;
    }

    pub fn push(&mut self, pos: Vec2) {
        let capacity = self.slots.len();
        if capacity == 0 {
            return;
        }
        if self.len > 0 {
            self.head = (self.head + 1) % capacity;
        }
        self.slots[self.head] = pos;
        if self.len < capacity {
            self.len += 1;
        }
    }

    /// `index` 0 is the most recent entry.
    pub fn get(&self, index: usize) -> Option<Vec2> {
        if index >= self.len {
            return None;
        }
        let capacity = self.slots.len();
        Some(self.slots[(self.head + capacity - index) % capacity])
    }

    pub fn iter(&self) -> impl Iterator<Item = Vec2> + '_ {
        (0..self.len).filter_map(move |i| self.get(i))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub mass: i16,
    pub radius: f32,
    pub color: ColorId,
    pub trail: Trail,
}

impl Body {
    pub fn new(pos: Vec2, vel: Vec2, mass: i16, radius: f32, trail_capacity: usize) -> Self {
        Self {
            pos,
            vel,
            mass,
            radius,
            color: ColorId::White,
            trail: Trail::new(trail_capacity, pos),
        }
    }

    pub fn with_color(mut self, color: ColorId) -> Self {
        self.color = color;
        self
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Stats {
    pub body_count: usize,
    pub total_mass: f32,
    pub kinetic_energy: f32,
    pub momentum: Vec2,
    pub center_of_mass: Vec2,
}
