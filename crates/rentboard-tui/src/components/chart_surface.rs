//! Chart geometry recorded at render time and used to map mouse
//! coordinates back to the element under the pointer.
//!
//! Tabs store the layout of the last frame; a click is translated into an
//! index into the same slice that was drawn, so the selected record is the
//! exact one backing the element.

use ratatui::layout::Rect;

/// Horizontal strip of equal-width bars, left aligned in `area`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarLayout {
    pub area: Rect,
    pub bar_width: u16,
    pub gap: u16,
    pub count: usize,
}

impl BarLayout {
    /// Widest bars that fit `count` bars into `area`, capped at `max_width`
    pub fn fit(area: Rect, count: usize, max_width: u16, gap: u16) -> Self {
        let bar_width = if count == 0 {
            0
        } else {
            let n = count as u16;
            let gaps = gap.saturating_mul(n.saturating_sub(1));
            (area.width.saturating_sub(gaps) / n).clamp(1, max_width.max(1))
        };

        Self {
            area,
            bar_width,
            gap,
            count,
        }
    }

    /// Index of the bar at terminal cell (`column`, `row`), if any
    pub fn bar_at(&self, column: u16, row: u16) -> Option<usize> {
        if self.count == 0 || !contains(self.area, column, row) {
            return None;
        }

        let stride = self.bar_width + self.gap;
        if stride == 0 {
            return None;
        }
        let offset = column - self.area.x;
        let index = (offset / stride) as usize;
        let within = offset % stride;

        (index < self.count && within < self.bar_width).then_some(index)
    }
}

/// Evenly spaced points across the plot area of a line chart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointLayout {
    /// Region the line is drawn in (axes excluded)
    pub plot: Rect,
    pub count: usize,
}

impl PointLayout {
    /// Plot region inside a chart block, leaving room for the y labels on the
    /// left and the x axis plus labels at the bottom
    pub fn from_chart_area(inner: Rect, y_label_width: u16, count: usize) -> Self {
        let left = y_label_width.saturating_add(1).min(inner.width);
        let plot = Rect {
            x: inner.x + left,
            y: inner.y,
            width: inner.width - left,
            height: inner.height.saturating_sub(2),
        };
        Self { plot, count }
    }

    /// Terminal column of point `index`
    pub fn column_of(&self, index: usize) -> u16 {
        if self.count <= 1 || self.plot.width == 0 {
            return self.plot.x;
        }
        let span = f64::from(self.plot.width - 1);
        let fraction = index as f64 / (self.count - 1) as f64;
        self.plot.x + (fraction * span).round() as u16
    }

    /// Point whose column is closest to `column`, within the plot's rows
    pub fn nearest(&self, column: u16, row: u16) -> Option<usize> {
        if self.count == 0 || !contains(self.plot, column, row) {
            return None;
        }

        (0..self.count).min_by_key(|&i| self.column_of(i).abs_diff(column))
    }
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}
