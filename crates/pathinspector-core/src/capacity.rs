//! How much content fits a preview pane without scrolling.
//!
//! Budgets are recomputed for every request because the pane may have been
//! resized since the last one. A zero glyph dimension yields a zero budget.

/// Drawable size of the preview pane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Surface {
    pub width_px: u32,
    pub height_px: u32,
}

impl Surface {
    pub fn new(width_px: u32, height_px: u32) -> Self {
        Self {
            width_px,
            height_px,
        }
    }
}

/// Metrics of the font the preview is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphMetrics {
    pub avg_width_px: u32,
    pub line_height_px: u32,
}

impl GlyphMetrics {
    pub fn new(avg_width_px: u32, line_height_px: u32) -> Self {
        Self {
            avg_width_px,
            line_height_px,
        }
    }

    /// One unit per character cell, for surfaces measured in cells.
    pub fn cell() -> Self {
        Self::new(1, 1)
    }
}

impl Default for GlyphMetrics {
    fn default() -> Self {
        Self::cell()
    }
}

/// Lines and characters that fit a surface. `None` means unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CapacityBudget {
    pub max_lines: Option<usize>,
    pub max_bytes: Option<usize>,
}

impl CapacityBudget {
    /// A budget that never truncates.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Estimates both bounds for `surface` rendered with `glyphs`.
    pub fn estimate(surface: &Surface, glyphs: &GlyphMetrics) -> Self {
        Self {
            max_lines: Some(estimate_line_capacity(
                surface.height_px,
                glyphs.line_height_px,
            )),
            max_bytes: Some(estimate_byte_capacity(
                surface.width_px,
                surface.height_px,
                glyphs.avg_width_px,
                glyphs.line_height_px,
            )),
        }
    }
}

/// Characters that fit: columns times rows, each truncated.
pub fn estimate_byte_capacity(
    width_px: u32,
    height_px: u32,
    avg_glyph_width_px: u32,
    line_height_px: u32,
) -> usize {
    let columns = width_px.checked_div(avg_glyph_width_px).unwrap_or(0) as usize;
    let rows = estimate_line_capacity(height_px, line_height_px);
    columns.saturating_mul(rows)
}

/// Whole lines that fit.
pub fn estimate_line_capacity(height_px: u32, line_height_px: u32) -> usize {
    height_px.checked_div(line_height_px).unwrap_or(0) as usize
}
