//! Screen-space rectangles

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in screen pixels
///
/// `x`/`y` is the top-left corner relative to the virtual desktop origin and
/// may be negative on multi-monitor setups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Rect {
    /// Create a new rectangle
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Right edge (exclusive)
    pub fn right(&self) -> i64 {
        i64::from(self.x) + i64::from(self.width)
    }

    /// Bottom edge (exclusive)
    pub fn bottom(&self) -> i64 {
        i64::from(self.y) + i64::from(self.height)
    }

    /// Area shared with `other`, in square pixels
    pub fn overlap_area(&self, other: &Self) -> u64 {
        let left = i64::from(self.x.max(other.x));
        let top = i64::from(self.y.max(other.y));
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right <= left || bottom <= top {
            return 0;
        }

        // Both spans are positive and bounded by u32 widths.
        (right - left).unsigned_abs() * (bottom - top).unsigned_abs()
    }

    /// Grow the rectangle outwards by the given margins, saturating at the
    /// coordinate and size limits
    pub fn expand(&self, margins: Margins) -> Self {
        Self {
            x: self.x.saturating_sub(offset(margins.left)),
            y: self.y.saturating_sub(offset(margins.top)),
            width: self.width.saturating_add(margins.horizontal()),
            height: self.height.saturating_add(margins.vertical()),
        }
    }

    /// Shrink the rectangle inwards by the given margins, saturating at zero size
    pub fn shrink(&self, margins: Margins) -> Self {
        Self {
            x: self.x.saturating_add(offset(margins.left)),
            y: self.y.saturating_add(offset(margins.top)),
            width: self.width.saturating_sub(margins.horizontal()),
            height: self.height.saturating_sub(margins.vertical()),
        }
    }
}

fn offset(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Thickness of a window frame on each side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Margins {
    /// Left border
    pub left: u32,
    /// Title bar plus top border
    pub top: u32,
    /// Right border
    pub right: u32,
    /// Bottom border
    pub bottom: u32,
}

impl Margins {
    /// No frame at all
    pub const NONE: Self = Self { left: 0, top: 0, right: 0, bottom: 0 };

    /// Create margins from the four edge thicknesses
    pub const fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self { left, top, right, bottom }
    }

    /// Combined left and right thickness
    pub const fn horizontal(&self) -> u32 {
        self.left.saturating_add(self.right)
    }

    /// Combined top and bottom thickness
    pub const fn vertical(&self) -> u32 {
        self.top.saturating_add(self.bottom)
    }
}
