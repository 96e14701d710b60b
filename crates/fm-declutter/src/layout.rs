//! The declutter pipeline: validate, simulate, separate, clamp, connect.

use fm_core::{Rect, Size, Vec2, Viewport};
use tracing::{debug, warn};

use crate::force::{self, CentreBounds, SpringModel};
use crate::{
    AnchoredLabel, Connector, DeclutterConfig, LayoutError, LayoutResult, PlacedLabel, Placement,
};

/// Computes non-overlapping label placements for a snapshot of open labels.
///
/// The layout holds only its configuration; labels and viewport are passed
/// in on every call.  Output is deterministic for identical input.
#[derive(Clone, Debug, Default)]
pub struct DeclutterLayout {
    config: DeclutterConfig,
}

impl DeclutterLayout {
    pub fn new(config: DeclutterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DeclutterConfig {
        &self.config
    }

    /// Compute placements without touching `labels`.
    ///
    /// Every label box ends up inside the viewport.  With fewer than two
    /// labels there is nothing to declutter: no simulation runs and a new
    /// label is only seeded, but the viewport clamp still applies, so a lone
    /// label lying partly off-screen is moved back in.
    ///
    /// # Errors
    ///
    /// [`LayoutError`] for a degenerate viewport, negative or non-finite label
    /// sizes, non-finite points, or an invalid configuration.
    pub fn compute(&self, labels: &[AnchoredLabel], viewport: Viewport) -> LayoutResult<Placement> {
        self.validate(labels, &viewport)?;
        let cfg = &self.config;
        let n = labels.len();

        let anchors: Vec<Vec2> = labels.iter().map(|l| l.anchor).collect();
        let bounds: Vec<CentreBounds> =
            labels.iter().map(|l| CentreBounds::new(l.size, &viewport)).collect();
        let mut positions: Vec<Vec2> = labels
            .iter()
            .enumerate()
            .map(|(i, l)| l.position.unwrap_or_else(|| force::seed(l.anchor, i, cfg.seed_radius)))
            .collect();

        if n >= 2 {
            let model = SpringModel::new(&viewport, n);
            let t0 = force::initial_temperature(&viewport);
            force::cool(&model, &mut positions, &anchors, &bounds, t0, cfg.iterations, cfg.damping);
            clamp_all(&mut positions, &bounds);
            let settle_steps = force::settle(
                &model,
                &mut positions,
                &anchors,
                &bounds,
                cfg.settle_iterations,
                cfg.settle_tolerance,
                cfg.damping,
            );
            let separated = self.separate_overlaps(labels, &bounds, &mut positions);
            debug!(labels = n, k = model.k(), t0, settle_steps, separated, "declutter layout");
        } else {
            clamp_all(&mut positions, &bounds);
        }

        let placed = labels
            .iter()
            .zip(positions)
            .map(|(label, position)| {
                let rect = Rect::from_center(position, label.size);
                PlacedLabel {
                    id: label.id,
                    position,
                    rect,
                    connector: Connector::between(label.anchor, &rect),
                }
            })
            .collect();

        Ok(Placement { labels: placed })
    }

    /// Compute placements and write every new position back into `labels`.
    ///
    /// All-or-nothing: on error no label is modified.
    pub fn run(&self, labels: &mut [AnchoredLabel], viewport: Viewport) -> LayoutResult<Placement> {
        let placement = self.compute(labels, viewport)?;
        for (label, placed) in labels.iter_mut().zip(&placement.labels) {
            label.position = Some(placed.position);
        }
        Ok(placement)
    }

    fn validate(&self, labels: &[AnchoredLabel], viewport: &Viewport) -> LayoutResult<()> {
        self.config.validate()?;
        viewport.validate()?;

        for label in labels {
            let Size { width, height } = label.size;
            if !(width.is_finite() && height.is_finite() && width >= 0.0 && height >= 0.0) {
                return Err(LayoutError::InvalidLabelSize { id: label.id, width, height });
            }
            let position_ok = label.position.is_none_or(|p| p.is_finite());
            if !label.anchor.is_finite() || !position_ok {
                return Err(LayoutError::NonFinitePoint { id: label.id });
            }
        }
        Ok(())
    }

    /// Push apart any label boxes the spring model left overlapping.
    ///
    /// Each overlapping pair is split symmetrically along its axis of least
    /// penetration; coincident pairs split with the lower-index label moving
    /// up or left.  Both labels stay inside their bounds: when one is held by
    /// a viewport edge, the other takes the rest of the move, and when the
    /// pair cannot be split along that axis at all the other axis is tried.
    /// Returns the number of pair separations performed.
    fn separate_overlaps(
        &self,
        labels:    &[AnchoredLabel],
        bounds:    &[CentreBounds],
        positions: &mut [Vec2],
    ) -> usize {
        let boxes = Boxes { labels, bounds, padding: self.config.overlap_padding };

        let mut separations = 0;
        for _ in 0..self.config.overlap_passes {
            let mut moved = false;
            for a in 0..positions.len() {
                for b in a + 1..positions.len() {
                    let Some(pen) = boxes.penetration(positions, a, b) else {
                        continue;
                    };
                    moved = true;
                    separations += 1;

                    let axes = if pen.x <= pen.y { [Axis::X, Axis::Y] } else { [Axis::Y, Axis::X] };
                    let saved = (positions[a], positions[b]);
                    let split = axes.into_iter().any(|axis| {
                        positions[a] = saved.0;
                        positions[b] = saved.1;
                        boxes.push_apart(positions, a, b, axis, pen)
                    });
                    if !split {
                        positions[a] = saved.0;
                        positions[b] = saved.1;
                        boxes.push_apart(positions, a, b, axes[0], pen);
                    }
                }
            }
            if !moved {
                return separations;
            }
        }

        if separations > 0 {
            warn!(
                passes = self.config.overlap_passes,
                "declutter overlap pass exhausted; some labels may still overlap"
            );
        }
        separations
    }
}

fn clamp_all(positions: &mut [Vec2], bounds: &[CentreBounds]) {
    for (p, b) in positions.iter_mut().zip(bounds) {
        *p = b.clamp(*p);
    }
}

#[derive(Copy, Clone)]
enum Axis {
    X,
    Y,
}

impl Axis {
    fn of(self, v: Vec2) -> f64 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
        }
    }

    fn shift(self, v: &mut Vec2, by: f64) {
        match self {
            Axis::X => v.x += by,
            Axis::Y => v.y += by,
        }
    }
}

/// Padded label boxes for the overlap pass.
struct Boxes<'a> {
    labels:  &'a [AnchoredLabel],
    bounds:  &'a [CentreBounds],
    padding: f64,
}

impl Boxes<'_> {
    fn rect(&self, i: usize, center: Vec2) -> Rect {
        let s = self.labels[i].size;
        Rect::from_center(center, Size::new(s.width + self.padding, s.height + self.padding))
    }

    fn penetration(&self, positions: &[Vec2], a: usize, b: usize) -> Option<Vec2> {
        self.rect(a, positions[a]).penetration(&self.rect(b, positions[b]))
    }

    /// Split `a` and `b` along `axis`, keeping both in bounds.  Returns
    /// `true` when the pair no longer overlaps.
    fn push_apart(&self, positions: &mut [Vec2], a: usize, b: usize, axis: Axis, pen: Vec2) -> bool {
        let depth = axis.of(pen);
        let dir = if axis.of(positions[a]) <= axis.of(positions[b]) { -1.0 } else { 1.0 };

        axis.shift(&mut positions[a], dir * depth * 0.5);
        axis.shift(&mut positions[b], -dir * depth * 0.5);
        positions[a] = self.bounds[a].clamp(positions[a]);
        positions[b] = self.bounds[b].clamp(positions[b]);

        if let Some(rest) = self.penetration(positions, a, b) {
            axis.shift(&mut positions[b], -dir * axis.of(rest));
            positions[b] = self.bounds[b].clamp(positions[b]);
        }
        if let Some(rest) = self.penetration(positions, a, b) {
            axis.shift(&mut positions[a], dir * axis.of(rest));
            positions[a] = self.bounds[a].clamp(positions[a]);
        }
        self.penetration(positions, a, b).is_none()
    }
}
