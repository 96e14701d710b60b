//! Layout input and output records.

use fm_core::{LabelId, Rect, ScreenPoint, Size};

use crate::Connector;

/// One open label tied to a marker.
///
/// `position` is the label **centre** in screen coordinates.  `None` marks a
/// label that has just been opened; the layout seeds it near its anchor.
/// Labels that already have a position resume from it, so settled labels do
/// not jump when the layout is re-run after a pan or zoom.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnchoredLabel {
    pub id:       LabelId,
    pub anchor:   ScreenPoint,
    pub size:     Size,
    pub position: Option<ScreenPoint>,
}

impl AnchoredLabel {
    /// A newly opened label with no position yet.
    pub fn new(id: LabelId, anchor: ScreenPoint, size: Size) -> Self {
        Self { id, anchor, size, position: None }
    }

    pub fn with_position(mut self, position: ScreenPoint) -> Self {
        self.position = Some(position);
        self
    }

    /// Current bounding box, if the label has been placed.
    pub fn rect(&self) -> Option<Rect> {
        self.position.map(|p| Rect::from_center(p, self.size))
    }
}

/// Final placement of one label.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlacedLabel {
    pub id:        LabelId,
    /// Label centre.
    pub position:  ScreenPoint,
    pub rect:      Rect,
    pub connector: Connector,
}

/// Result of one layout run, in input order.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    pub labels: Vec<PlacedLabel>,
}

impl Placement {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn get(&self, id: LabelId) -> Option<&PlacedLabel> {
        self.labels.iter().find(|l| l.id == id)
    }

    /// Number of label pairs whose boxes still overlap by more than `tol` on
    /// both axes.
    pub fn overlap_count(&self, tol: f64) -> usize {
        let mut count = 0;
        for (i, a) in self.labels.iter().enumerate() {
            for b in &self.labels[i + 1..] {
                if let Some(pen) = a.rect.penetration(&b.rect) {
                    if pen.x > tol && pen.y > tol {
                        count += 1;
                    }
                }
            }
        }
        count
    }
}
