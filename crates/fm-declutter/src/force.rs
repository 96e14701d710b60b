//! The spring model behind the declutter layout.
//!
//! Labels repel each other with magnitude `k² / d` and each label is pulled
//! to its own anchor with magnitude `d² / k`.  Both forces derive from the
//! potential
//!
//! ```text
//! E = Σ_a |p_a − anchor_a|³ / 3k  −  k² Σ_{a<b} ln |p_a − p_b|
//! ```
//!
//! which [`settle`] descends after the temperature-limited [`cool`] loop.
//! Pairs at distance zero contribute neither force nor energy.
//!
//! Both phases keep every label centre inside its [`CentreBounds`], so a
//! cluster near the viewport edge settles against the edge instead of
//! settling off-screen and being clamped back on top of its neighbours.

use fm_core::{Size, Vec2, Viewport};

/// Halvings tried before a settle step gives up.
const MAX_BACKTRACK: usize = 30;

/// Largest force → displacement factor the settle phase will try.
const MAX_SETTLE_STEP: f64 = 1.0;

/// Spring constants for one layout run.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpringModel {
    k: f64,
}

impl SpringModel {
    /// `k = sqrt(W·H / 10 / max(1, n))` — the natural inter-label spacing.
    pub fn new(viewport: &Viewport, label_count: usize) -> Self {
        let area = viewport.width() * viewport.height();
        Self { k: (area / 10.0 / label_count.max(1) as f64).sqrt() }
    }

    #[inline]
    pub fn k(&self) -> f64 {
        self.k
    }

    /// Net force on every label, written into `out`.
    pub fn forces(&self, positions: &[Vec2], anchors: &[Vec2], out: &mut [Vec2]) {
        let k2 = self.k * self.k;
        out.fill(Vec2::ZERO);

        for a in 0..positions.len() {
            for b in a + 1..positions.len() {
                let delta = positions[a] - positions[b];
                let d2 = delta.x * delta.x + delta.y * delta.y;
                if d2 > 0.0 {
                    // unit(delta) · k²/d
                    let f = delta * (k2 / d2);
                    out[a] += f;
                    out[b] -= f;
                }
            }
        }

        for ((f, &p), &anchor) in out.iter_mut().zip(positions).zip(anchors) {
            let delta = anchor - p;
            // unit(delta) · d²/k
            *f += delta * (delta.length() / self.k);
        }
    }

    /// Potential energy of a configuration; see the module docs.
    pub fn energy(&self, positions: &[Vec2], anchors: &[Vec2]) -> f64 {
        let k2 = self.k * self.k;
        let mut e = 0.0;
        for (a, (&p, &anchor)) in positions.iter().zip(anchors).enumerate() {
            e += (anchor - p).length().powi(3) / (3.0 * self.k);
            for &q in &positions[a + 1..] {
                let d = p.distance(q);
                if d > 0.0 {
                    e -= k2 * d.ln();
                }
            }
        }
        e
    }
}

/// Region a label centre may occupy so its whole box stays in the viewport.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CentreBounds {
    min: Vec2,
    max: Vec2,
}

impl CentreBounds {
    /// A box larger than the viewport on some axis is pinned to the top or
    /// left edge on that axis.
    pub fn new(size: Size, viewport: &Viewport) -> Self {
        let half = size.half();
        let min = viewport.top_left + half;
        let max = viewport.bottom_right - half;
        Self { min, max: Vec2::new(max.x.max(min.x), max.y.max(min.y)) }
    }

    #[inline]
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x.clamp(self.min.x, self.max.x), p.y.clamp(self.min.y, self.max.y))
    }

    /// Drop the force components that push a centre further into a wall it
    /// already touches.
    #[inline]
    pub fn project(&self, p: Vec2, f: Vec2) -> Vec2 {
        Vec2::new(
            project_axis(p.x, f.x, self.min.x, self.max.x),
            project_axis(p.y, f.y, self.min.y, self.max.y),
        )
    }
}

fn project_axis(p: f64, f: f64, lo: f64, hi: f64) -> f64 {
    if (p <= lo && f < 0.0) || (p >= hi && f > 0.0) { 0.0 } else { f }
}

/// Seed position for a newly opened label: `radius` away from its anchor at
/// angle `2π/6 · index`, so coincident anchors do not start perfectly
/// overlapped.
pub fn seed(anchor: Vec2, index: usize, radius: f64) -> Vec2 {
    let angle = std::f64::consts::TAU / 6.0 * index as f64;
    anchor + Vec2::new(angle.cos(), angle.sin()) * radius
}

/// `T0 = ceil(W / 10)`.
#[inline]
pub fn initial_temperature(viewport: &Viewport) -> f64 {
    (viewport.width() / 10.0).ceil()
}

/// Linear cooling `T(i) = T0 · (1 − i / (iterations − 1))`.
#[inline]
pub fn temperature(t0: f64, i: usize, iterations: usize) -> f64 {
    if iterations <= 1 {
        return t0;
    }
    t0 * (1.0 - i as f64 / (iterations - 1) as f64)
}

/// Fruchterman–Reingold loop: each iteration moves every label by its net
/// force × `damping`, limited to `±T(i)` per axis, then clamps it to its
/// bounds.
pub fn cool(
    model:      &SpringModel,
    positions:  &mut [Vec2],
    anchors:    &[Vec2],
    bounds:     &[CentreBounds],
    t0:         f64,
    iterations: usize,
    damping:    f64,
) {
    let mut forces = vec![Vec2::ZERO; positions.len()];
    for i in 0..iterations {
        let t = temperature(t0, i, iterations);
        model.forces(positions, anchors, &mut forces);
        for ((p, f), b) in positions.iter_mut().zip(&forces).zip(bounds) {
            let step = *f * damping;
            *p = b.clamp(Vec2::new(p.x + step.x.clamp(-t, t), p.y + step.y.clamp(-t, t)));
        }
    }
}

/// Projected energy descent with backtracking, run after cooling so the
/// layout reaches a true equilibrium within its bounds.  Re-running the
/// layout from its own output then leaves labels where they are.
///
/// `positions` must already lie inside `bounds`.  Returns the number of
/// accepted steps.
pub fn settle(
    model:        &SpringModel,
    positions:    &mut [Vec2],
    anchors:      &[Vec2],
    bounds:       &[CentreBounds],
    max_steps:    usize,
    tolerance:    f64,
    initial_step: f64,
) -> usize {
    let mut forces = vec![Vec2::ZERO; positions.len()];
    let mut candidate = positions.to_vec();
    let mut energy = model.energy(positions, anchors);
    let mut step = initial_step;

    for taken in 0..max_steps {
        model.forces(positions, anchors, &mut forces);
        for ((f, &p), b) in forces.iter_mut().zip(positions.iter()).zip(bounds) {
            *f = b.project(p, *f);
        }
        let max_force = forces.iter().map(|f| f.length()).fold(0.0, f64::max);
        if max_force < tolerance {
            return taken;
        }

        step = (step * 2.0).min(MAX_SETTLE_STEP);
        let mut accepted = false;
        for _ in 0..MAX_BACKTRACK {
            for (((c, &p), &f), b) in
                candidate.iter_mut().zip(positions.iter()).zip(&forces).zip(bounds)
            {
                *c = b.clamp(p + f * step);
            }
            let e = model.energy(&candidate, anchors);
            if e < energy {
                energy = e;
                accepted = true;
                break;
            }
            step *= 0.5;
        }
        if !accepted {
            return taken;
        }
        positions.copy_from_slice(&candidate);
    }
    max_steps
}
