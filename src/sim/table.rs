//! Table geometry: cushions, pockets and the cue spawn point
//!
//! Everything is described with scalar intervals over *edge coordinates*:
//! `|position[axis]| + radius`, the distance from the table center to the
//! ball's leading edge along one axis. Because edge coordinates fold both
//! halves of the table onto one side, a single cushion interval covers the
//! matching stretch on both ends of a rail and a single pocket rectangle
//! covers all four mirrored pockets.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::BALL_RADIUS;

/// Half extent of the playable cloth along X
pub const TABLE_HALF_WIDTH: f32 = 2.0;
/// Half extent of the playable cloth along Z
pub const TABLE_HALF_LENGTH: f32 = 4.0;
/// Length of rail left open at each corner (measured along the rail)
pub const CORNER_GAP: f32 = 0.35;
/// Half length of rail left open at each side pocket
pub const SIDE_GAP: f32 = 0.35;
/// How far inside the rail line a ball edge must reach to drop into a pocket
pub const POCKET_LIP: f32 = 0.05;
/// Depth of the cushion band beyond the rail line
pub const CUSHION_DEPTH: f32 = 0.5;

/// A table-plane axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Z,
}

impl Axis {
    /// Component of a table-plane vector along this axis
    #[inline]
    pub fn of(self, v: Vec2) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Z => v.y,
        }
    }

    /// The other table-plane axis
    #[inline]
    pub fn perpendicular(self) -> Axis {
        match self {
            Axis::X => Axis::Z,
            Axis::Z => Axis::X,
        }
    }
}

/// Distance from the table center to a ball's leading edge along `axis`
#[inline]
pub fn edge_coordinate(pos: Vec2, radius: f32, axis: Axis) -> f32 {
    axis.of(pos).abs() + radius
}

/// Half-open scalar interval `[min, max)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, v: f32) -> bool {
        v >= self.min && v < self.max
    }

    /// True if the two intervals share any point
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.min < other.max && other.min < self.max
    }
}

/// One rail of the table
///
/// The cushion reflects along `axis`. It sits on the `side` (+1/-1) half of
/// that axis, its contact band is an edge-coordinate interval along `axis`,
/// and `solid` is the stretch of rail (as a distance from the center along the
/// perpendicular axis) that is actually cushioned. Everything outside `solid`
/// is a pocket gap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cushion {
    pub axis: Axis,
    pub side: f32,
    pub band: Interval,
    pub solid: Interval,
}

impl Cushion {
    /// Does a ball at `pos` currently press into this cushion?
    pub fn touches(&self, pos: Vec2, radius: f32) -> bool {
        let on_side = self.axis.of(pos) * self.side > 0.0;
        let in_band = self.band.contains(edge_coordinate(pos, radius, self.axis));
        let along = self.axis.perpendicular().of(pos).abs();
        on_side && in_band && self.solid.contains(along)
    }

    /// Unit vector pointing from the table into this cushion
    pub fn outward(&self) -> Vec2 {
        match self.axis {
            Axis::X => Vec2::new(self.side, 0.0),
            Axis::Z => Vec2::new(0.0, self.side),
        }
    }
}

/// Pocket flavor (for events)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PocketKind {
    Corner,
    Side,
}

/// A capture rectangle over ball edge coordinates
///
/// Ranges are already inflated by the ball radius so they can be compared
/// directly with `edge_coordinate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pocket {
    pub kind: PocketKind,
    pub x: Interval,
    pub z: Interval,
}

impl Pocket {
    /// Does a ball at `pos` sit in this pocket?
    pub fn captures(&self, pos: Vec2, radius: f32) -> bool {
        self.x.contains(edge_coordinate(pos, radius, Axis::X))
            && self.z.contains(edge_coordinate(pos, radius, Axis::Z))
    }
}

/// Static table description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableGeometry {
    /// Half extent of the cloth along X
    pub half_width: f32,
    /// Half extent of the cloth along Z
    pub half_length: f32,
    /// Rails, evaluated in order
    pub cushions: Vec<Cushion>,
    /// Pocket rectangles, evaluated in order (first match wins)
    pub pockets: Vec<Pocket>,
    /// Where the cue ball is placed on rack and after a scratch
    pub cue_spawn: Vec2,
}

impl Default for TableGeometry {
    fn default() -> Self {
        Self::standard()
    }
}

impl TableGeometry {
    /// Six-pocket table with all four rails cushioned
    pub fn standard() -> Self {
        let w = TABLE_HALF_WIDTH;
        let l = TABLE_HALF_LENGTH;
        let r = BALL_RADIUS;

        // Long rails (reflect X) are open at the side pockets and the corners;
        // end rails (reflect Z) are open at the corners only.
        let long_band = Interval::new(w, w + CUSHION_DEPTH);
        let long_solid = Interval::new(SIDE_GAP, l - CORNER_GAP);
        let end_band = Interval::new(l, l + CUSHION_DEPTH);
        let end_solid = Interval::new(0.0, w - CORNER_GAP);

        let cushions = vec![
            Cushion { axis: Axis::X, side: 1.0, band: long_band, solid: long_solid },
            Cushion { axis: Axis::X, side: -1.0, band: long_band, solid: long_solid },
            Cushion { axis: Axis::Z, side: 1.0, band: end_band, solid: end_solid },
            Cushion { axis: Axis::Z, side: -1.0, band: end_band, solid: end_solid },
        ];

        let pockets = vec![
            // Corner, reached along a long rail
            Pocket {
                kind: PocketKind::Corner,
                x: Interval::new(w - POCKET_LIP, w + CUSHION_DEPTH),
                z: Interval::new(l - CORNER_GAP + r, l + CUSHION_DEPTH),
            },
            // Corner, reached along an end rail
            Pocket {
                kind: PocketKind::Corner,
                x: Interval::new(w - CORNER_GAP + r, w + CUSHION_DEPTH),
                z: Interval::new(l - POCKET_LIP, l + CUSHION_DEPTH),
            },
            // Side pockets in the middle of the long rails
            Pocket {
                kind: PocketKind::Side,
                x: Interval::new(w - POCKET_LIP, w + CUSHION_DEPTH),
                z: Interval::new(0.0, SIDE_GAP + r),
            },
        ];

        Self {
            half_width: w,
            half_length: l,
            cushions,
            pockets,
            cue_spawn: Vec2::ZERO,
        }
    }

    /// Index of the first pocket capturing a ball at `pos`
    pub fn pocket_at(&self, pos: Vec2, radius: f32) -> Option<usize> {
        self.pockets.iter().position(|p| p.captures(pos, radius))
    }

    /// True if a ball at `pos` lies fully on the cloth
    pub fn on_cloth(&self, pos: Vec2, radius: f32) -> bool {
        edge_coordinate(pos, radius, Axis::X) <= self.half_width
            && edge_coordinate(pos, radius, Axis::Z) <= self.half_length
    }
}
