use super::path::{Point, StrokeSurface};
use crate::data::{PixelPlane, Rgba};
use crate::error::{PipelineError, Result};

/// Software stroke surface over an RGBA plane.
///
/// `move_to`/`line_to` only record segments. Nothing touches the pixels
/// until `stroke`, which rasterises the pending segments in one colour.
#[derive(Debug, Clone)]
pub struct PixelCanvas {
    plane: PixelPlane,
    cursor: Option<Point>,
    pending: Vec<(Point, Point)>,
}

impl PixelCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self::from_plane(PixelPlane::filled(width, height, Rgba::BLACK))
    }

    pub fn from_plane(plane: PixelPlane) -> Self {
        Self {
            plane,
            cursor: None,
            pending: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.plane.width()
    }

    pub fn height(&self) -> usize {
        self.plane.height()
    }

    pub fn plane(&self) -> &PixelPlane {
        &self.plane
    }

    pub fn plane_mut(&mut self) -> &mut PixelPlane {
        &mut self.plane
    }

    /// Copy a whole plane back onto the canvas. Dimensions must match.
    pub fn put_image_data(&mut self, plane: &PixelPlane) -> Result<()> {
        if plane.width() != self.width() || plane.height() != self.height() {
            return Err(PipelineError::PlaneSizeMismatch {
                expected: self.plane.data().len(),
                actual: plane.data().len(),
            });
        }
        self.plane.data_mut().copy_from_slice(plane.data());
        Ok(())
    }

    /// Rasterise one segment straight away. Parts outside the canvas are
    /// clipped; segments with non-finite ends are skipped.
    pub fn draw_line(&mut self, from: Point, to: Point, color: Rgba) {
        let Some((a, b)) = clip_segment(from, to, self.width(), self.height()) else {
            return;
        };

        let (mut x0, mut y0) = (a.x.round() as i64, a.y.round() as i64);
        let (x1, y1) = (b.x.round() as i64, b.y.round() as i64);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.plane.set_pixel(x0 as usize, y0 as usize, color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }
}

impl StrokeSurface for PixelCanvas {
    fn clear(&mut self, color: Rgba) {
        self.plane.fill(color);
        self.cursor = None;
        self.pending.clear();
    }

    fn move_to(&mut self, point: Point) {
        self.cursor = Some(point);
    }

    fn line_to(&mut self, point: Point) {
        if let Some(from) = self.cursor {
            self.pending.push((from, point));
        }
        self.cursor = Some(point);
    }

    fn stroke(&mut self, color: Rgba) {
        for (from, to) in std::mem::take(&mut self.pending) {
            self.draw_line(from, to, color);
        }
        self.cursor = None;
    }
}

/// Liang–Barsky clip against `[0, width-1] × [0, height-1]`.
fn clip_segment(a: Point, b: Point, width: usize, height: usize) -> Option<(Point, Point)> {
    if width == 0 || height == 0 {
        return None;
    }
    if ![a.x, a.y, b.x, b.y].iter().all(|v| v.is_finite()) {
        return None;
    }

    let (max_x, max_y) = ((width - 1) as f64, (height - 1) as f64);
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let mut t0 = 0.0f64;
    let mut t1 = 1.0f64;

    for (p, q) in [
        (-dx, a.x),
        (dx, max_x - a.x),
        (-dy, a.y),
        (dy, max_y - a.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    Some((
        Point::new(a.x + t0 * dx, a.y + t0 * dy),
        Point::new(a.x + t1 * dx, a.y + t1 * dy),
    ))
}
