use crate::data::{MagnitudeSeries, Rgba};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrokeCommand {
    MoveTo(Point),
    LineTo(Point),
}

/// Anything that can take a stroked polyline: a software canvas, a window.
pub trait StrokeSurface {
    fn clear(&mut self, color: Rgba);
    fn move_to(&mut self, point: Point);
    fn line_to(&mut self, point: Point);
    /// Stroke everything since the last stroke and start a fresh path.
    fn stroke(&mut self, color: Rgba);
}

/// Origin followed by one point per series value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderPath {
    points: Vec<Point>,
}

impl RenderPath {
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn origin(&self) -> Option<Point> {
        self.points.first().copied()
    }

    /// Number of points, origin included.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn commands(&self) -> impl Iterator<Item = StrokeCommand> + '_ {
        self.points.iter().enumerate().map(|(i, &p)| {
            if i == 0 {
                StrokeCommand::MoveTo(p)
            } else {
                StrokeCommand::LineTo(p)
            }
        })
    }

    pub fn stroke<S: StrokeSurface + ?Sized>(&self, surface: &mut S, color: Rgba) {
        for command in self.commands() {
            match command {
                StrokeCommand::MoveTo(p) => surface.move_to(p),
                StrokeCommand::LineTo(p) => surface.line_to(p),
            }
        }
        surface.stroke(color);
    }
}

/// Start at `(offset, offset)`, then `(offset + x·scale, offset + series[x]·scale)`
/// for every index. Works the same for raw signals and magnitude spectra.
pub fn build_path(offset: f64, scale: f64, series: &[f64]) -> RenderPath {
    let mut points = Vec::with_capacity(series.len() + 1);
    points.push(Point::new(offset, offset));
    points.extend(
        series
            .iter()
            .enumerate()
            .map(|(x, &y)| Point::new(offset + x as f64 * scale, offset + y * scale)),
    );
    RenderPath { points }
}

pub fn magnitude_path(offset: f64, scale: f64, magnitudes: &MagnitudeSeries) -> RenderPath {
    build_path(offset, scale, magnitudes.values())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        log: Vec<String>,
    }

    impl StrokeSurface for Recorder {
        fn clear(&mut self, _color: Rgba) {
            self.log.push("clear".into());
        }
        fn move_to(&mut self, p: Point) {
            self.log.push(format!("M{} {}", p.x, p.y));
        }
        fn line_to(&mut self, p: Point) {
            self.log.push(format!("L{} {}", p.x, p.y));
        }
        fn stroke(&mut self, color: Rgba) {
            self.log.push(format!("S{:06x}", color.to_hex()));
        }
    }

    #[test]
    fn path_geometry() {
        let path = build_path(10.0, 5.0, &[0.0, 1.0, -2.0]);
        assert_eq!(
            path.points(),
            &[
                Point::new(10.0, 10.0),
                Point::new(10.0, 10.0),
                Point::new(15.0, 15.0),
                Point::new(20.0, 0.0),
            ]
        );
        assert_eq!(path.origin(), Some(Point::new(10.0, 10.0)));
    }

    #[test]
    fn empty_series_is_origin_only() {
        let path = build_path(3.0, 2.0, &[]);
        assert_eq!(path.len(), 1);
        assert_eq!(path.commands().collect::<Vec<_>>(), vec![StrokeCommand::MoveTo(Point::new(3.0, 3.0))]);
    }

    #[test]
    fn stroke_replays_move_then_lines() {
        let mut surface = Recorder::default();
        build_path(0.0, 1.0, &[4.0, 5.0]).stroke(&mut surface, Rgba::WHITE);
        assert_eq!(surface.log, vec!["M0 0", "L0 4", "L1 5", "Sffffff"]);
    }

    #[test]
    fn magnitude_path_uses_magnitudes() {
        let mags = MagnitudeSeries::from_planes(&[3.0, 0.0], &[4.0, 2.0]);
        let path = magnitude_path(1.0, 1.0, &mags);
        assert_eq!(path.points()[1], Point::new(1.0, 6.0));
        assert_eq!(path.points()[2], Point::new(2.0, 3.0));
    }
}
