use crate::{
    store::BodyStore,
    types::{Body, ColorId, Vec2},
};

/// Maps world coordinates onto terminal cells. Cells are roughly twice as tall
/// as they are wide, so the vertical scale is halved.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub origin: Vec2,
    pub zoom: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            origin: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl Camera {
    /// Fits a `world_width` x `world_height` surface into the viewport.
    pub fn fit(world_width: f32, world_height: f32, viewport: Viewport) -> Self {
        if world_width <= 0.0 || world_height <= 0.0 || viewport.width == 0 || viewport.height == 0
        {
            return Self::default();
        }
        let zoom_x = viewport.width as f32 / world_width;
        let zoom_y = viewport.height as f32 * 2.0 / world_height;
        Self {
            origin: Vec2::ZERO,
            zoom: zoom_x.min(zoom_y),
        }
    }

    fn project(&self, pos: Vec2) -> (i32, i32) {
        let sx = ((pos.x - self.origin.x) * self.zoom).floor() as i32;
        let sy = ((pos.y - self.origin.y) * self.zoom * 0.5).floor() as i32;
        (sx, sy)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

#[derive(Clone, Copy, Debug)]
pub struct RenderCell {
    pub ch: char,
    pub weight: f32,
    pub color: ColorId,
}

const EMPTY_CELL: RenderCell = RenderCell {
    ch: ' ',
    weight: f32::NEG_INFINITY,
    color: ColorId::White,
};

#[derive(Debug)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<RenderCell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let mut buffer = Self {
            width,
            height,
            cells: Vec::new(),
        };
        buffer.resize(width, height);
        buffer
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        let len = (width as usize).saturating_mul(height as usize);
        if self.cells.len() != len {
            self.cells.resize(len, EMPTY_CELL);
        }
        self.clear();
    }

    pub fn clear(&mut self) {
        self.cells.fill(EMPTY_CELL);
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn get(&self, x: u16, y: u16) -> RenderCell {
        debug_assert!(x < self.width && y < self.height, "get() out of bounds");
        let idx = (y as usize) * (self.width as usize) + (x as usize);
        self.cells[idx]
    }

    /// Heavier writes win; trails never cover a body.
    fn set(&mut self, x: i32, y: i32, ch: char, weight: f32, color: ColorId) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = (y as usize) * (self.width as usize) + (x as usize);
        let cell = &mut self.cells[idx];
        if weight >= cell.weight {
            cell.weight = weight;
            cell.ch = ch;
            cell.color = color;
        }
    }
}

pub fn draw(store: &BodyStore, camera: &Camera, viewport: Viewport, frame: &mut FrameBuffer) {
    if frame.width() != viewport.width || frame.height() != viewport.height {
        frame.resize(viewport.width, viewport.height);
    } else {
        frame.clear();
    }

    for body in store.iter() {
        draw_trail(body, camera, frame);
    }

    for body in store.iter() {
        let (sx, sy) = camera.project(body.pos);
        frame.set(sx, sy, body_glyph(body, camera), body_weight(body), body.color);
    }
}

fn draw_trail(body: &Body, camera: &Camera, frame: &mut FrameBuffer) {
    let len = body.trail.len();
    if len == 0 {
        return;
    }
    // Newest first, so older points fade and shrink.
    for (i, pos) in body.trail.iter().enumerate() {
        let age = i as f32 / len as f32;
        let ch = if age < 0.4 { '•' } else if age < 0.7 { '·' } else { '.' };
        let (sx, sy) = camera.project(pos);
        frame.set(sx, sy, ch, -1.0 - age, ColorId::Trail);
    }
}

fn body_glyph(body: &Body, camera: &Camera) -> char {
    let cells = body.radius * camera.zoom;
    if cells >= 1.0 {
        'O'
    } else if cells >= 0.3 {
        'o'
    } else {
        '∙'
    }
}

fn body_weight(body: &Body) -> f32 {
    f32::from(body.mass).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport(width: u16, height: u16) -> Viewport {
        Viewport { width, height }
    }

    mod camera {
        use super::*;

        #[test]
        fn fit_picks_the_tighter_axis() {
            let camera = Camera::fit(1600.0, 900.0, viewport(160, 45));
            assert_eq!(camera.zoom, 0.1);
            let camera = Camera::fit(1600.0, 900.0, viewport(320, 45));
            assert_eq!(camera.zoom, 0.1);
        }

        #[test]
        fn degenerate_inputs_fall_back_to_default() {
            assert_eq!(Camera::fit(0.0, 900.0, viewport(80, 24)), Camera::default());
            assert_eq!(Camera::fit(1600.0, 900.0, viewport(0, 24)), Camera::default());
        }

        #[test]
        fn projection_halves_vertical_scale() {
            let camera = Camera::fit(1600.0, 900.0, viewport(160, 45));
            assert_eq!(camera.project(Vec2::new(800.0, 450.0)), (80, 22));
        }
    }

    mod framebuffer {
        use super::*;

        #[test]
        fn creates_with_correct_dimensions() {
            let fb = FrameBuffer::new(80, 24);
            assert_eq!(fb.width(), 80);
            assert_eq!(fb.height(), 24);
        }

        #[test]
        fn resize_changes_dimensions_and_clears() {
            let mut fb = FrameBuffer::new(10, 10);
            fb.set(1, 1, 'A', 1.0, ColorId::Blue);
            fb.resize(20, 15);
            assert_eq!(fb.width(), 20);
            assert_eq!(fb.height(), 15);
            assert_eq!(fb.get(1, 1).ch, ' ');
        }

        #[test]
        fn heavier_write_wins() {
            let mut fb = FrameBuffer::new(10, 10);
            fb.set(5, 5, 'A', 10.0, ColorId::Blue);
            fb.set(5, 5, 'B', 5.0, ColorId::Red);
            assert_eq!(fb.get(5, 5).ch, 'A');
            fb.set(5, 5, 'C', 20.0, ColorId::Red);
            assert_eq!(fb.get(5, 5).ch, 'C');
            assert_eq!(fb.get(5, 5).color, ColorId::Red);
        }

        #[test]
        fn out_of_bounds_is_ignored() {
            let mut fb = FrameBuffer::new(10, 10);
            fb.set(100, 100, 'X', 10.0, ColorId::Blue);
            fb.set(-1, 3, 'X', 10.0, ColorId::Blue);
        }
    }

    mod draw_fn {
        use super::*;

        #[test]
        fn empty_store_produces_empty_frame() {
            let store = BodyStore::from_bodies(Vec::new());
            let mut frame = FrameBuffer::new(80, 24);
            draw(&store, &Camera::default(), viewport(80, 24), &mut frame);
            for y in 0..24 {
                for x in 0..80 {
                    assert_eq!(frame.get(x, y).ch, ' ');
                }
            }
        }

        #[test]
        fn body_lands_in_projected_cell_with_its_color() {
            let store = BodyStore::from_bodies(vec![
                Body::new(Vec2::new(40.0, 24.0), Vec2::ZERO, 10, 2.0, 0).with_color(ColorId::Cyan),
            ]);
            let mut frame = FrameBuffer::new(80, 24);
            draw(&store, &Camera::default(), viewport(80, 24), &mut frame);
            let cell = frame.get(40, 12);
            assert_eq!(cell.ch, 'O');
            assert_eq!(cell.color, ColorId::Cyan);
        }

        #[test]
        fn trail_is_drawn_behind_body() {
            let mut body = Body::new(Vec2::new(10.0, 10.0), Vec2::ZERO, 10, 0.5, 4);
            body.trail.push(Vec2::new(12.0, 10.0));
            body.trail.push(Vec2::new(10.0, 10.0));
            let store = BodyStore::from_bodies(vec![body]);
            let mut frame = FrameBuffer::new(80, 24);
            draw(&store, &Camera::default(), viewport(80, 24), &mut frame);
            assert_eq!(frame.get(10, 5).ch, 'o');
            let trail_cell = frame.get(12, 5);
            assert_eq!(trail_cell.color, ColorId::Trail);
            assert_eq!(trail_cell.ch, '·');
        }

        #[test]
        fn resizes_frame_to_viewport() {
            let store = BodyStore::two_body(0);
            let mut frame = FrameBuffer::new(1, 1);
            draw(&store, &Camera::default(), viewport(30, 10), &mut frame);
            assert_eq!(frame.width(), 30);
            assert_eq!(frame.height(), 10);
        }
    }
}
