//! Open polylines built from move/line verbs.

use alloc::vec::Vec;

use embedded_graphics::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathVerb {
    MoveTo(Point),
    LineTo(Point),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphicsPath {
    verbs: Vec<PathVerb>,
}

impl GraphicsPath {
    pub const fn new() -> Self {
        Self { verbs: Vec::new() }
    }

    /// Starts a new sub-path at `(x, y)` without drawing.
    pub fn move_to(&mut self, x: i32, y: i32) {
        self.verbs.push(PathVerb::MoveTo(Point::new(x, y)));
    }

    /// Adds a segment from the current point to `(x, y)`.
    ///
    /// A `line_to` with no current point only sets it.
    pub fn line_to(&mut self, x: i32, y: i32) {
        self.verbs.push(PathVerb::LineTo(Point::new(x, y)));
    }

    pub fn verbs(&self) -> &[PathVerb] {
        &self.verbs
    }

    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }

    /// The drawable segments, in order.
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.verbs
            .iter()
            .scan(None, |cursor: &mut Option<Point>, verb| {
                Some(match *verb {
                    PathVerb::MoveTo(to) => {
                        *cursor = Some(to);
                        None
                    }
                    PathVerb::LineTo(to) => cursor.replace(to).map(|from| (from, to)),
                })
            })
            .flatten()
    }
}
