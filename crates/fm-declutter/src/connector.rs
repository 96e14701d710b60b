//! Leader lines from a marker anchor to its label.

use fm_core::{Rect, ScreenPoint, Vec2};

/// Which side of the label box a connector terminates on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConnectorEdge {
    Left,
    Right,
    Top,
    Bottom,
    /// The anchor lies inside (or on) the box; the connector is degenerate.
    Inside,
}

/// A straight segment from the anchor to a label edge midpoint.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Connector {
    pub from: ScreenPoint,
    pub to:   ScreenPoint,
    pub edge: ConnectorEdge,
}

impl Connector {
    #[inline]
    pub fn length(&self) -> f64 {
        self.from.distance(self.to)
    }

    /// Compute the connector from `anchor` to the label box `rect`.
    ///
    /// Edge choice compares the anchor offset against the box aspect ratio:
    /// when `|dx|·h >= |dy|·w` the anchor is beyond a vertical side and the
    /// left/right midpoint is used, otherwise top/bottom.  Ties go to the
    /// left/right edge.  An anchor inside the box yields an `Inside`
    /// connector of zero length at the anchor.
    pub fn between(anchor: ScreenPoint, rect: &Rect) -> Self {
        if rect.contains(anchor) {
            return Self { from: anchor, to: anchor, edge: ConnectorEdge::Inside };
        }

        let c = rect.center();
        let d = anchor - c;
        let (w, h) = (rect.width(), rect.height());

        let (edge, to) = if d.x.abs() * h >= d.y.abs() * w {
            if d.x < 0.0 {
                (ConnectorEdge::Left, Vec2::new(rect.min.x, c.y))
            } else {
                (ConnectorEdge::Right, Vec2::new(rect.max.x, c.y))
            }
        } else if d.y < 0.0 {
            (ConnectorEdge::Top, Vec2::new(c.x, rect.min.y))
        } else {
            (ConnectorEdge::Bottom, Vec2::new(c.x, rect.max.y))
        };

        Self { from: anchor, to, edge }
    }
}
