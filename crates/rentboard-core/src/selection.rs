//! Chart drill-down selection
//!
//! Two states, `Closed` and `Open`. Which detail surface is shown while open
//! is a separate, per-render decision driven by the current viewport width.

/// Viewports at least this many columns wide get the popover
pub const DESKTOP_BREAKPOINT: u16 = 100;

/// Presentation of the detail surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailSurface {
    /// Centered modal over the chart (wide viewports)
    Popover,
    /// Bottom-anchored sheet (narrow viewports)
    Sheet,
}

impl DetailSurface {
    /// Pick the surface for a viewport width
    pub fn for_width(width: u16) -> Self {
        if is_desktop(width) {
            DetailSurface::Popover
        } else {
            DetailSurface::Sheet
        }
    }
}

/// Width predicate; re-evaluated on every render
pub fn is_desktop(width: u16) -> bool {
    width >= DESKTOP_BREAKPOINT
}

/// Selected chart element plus open/closed detail state
///
/// Invariant: `open` implies `selected.is_some()`.
#[derive(Debug, Clone)]
pub struct Selection<T> {
    selected: Option<T>,
    open: bool,
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Self {
            selected: None,
            open: false,
        }
    }
}

impl<T> Selection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the detail surface for `item` (from any state)
    pub fn select(&mut self, item: T) {
        self.selected = Some(item);
        self.open = true;
    }

    /// Close the detail surface; the item is dropped immediately.
    /// No-op when already closed.
    pub fn close(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        self.selected = None;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Selected item, only while open
    pub fn visible(&self) -> Option<&T> {
        if self.open {
            self.selected.as_ref()
        } else {
            None
        }
    }

    /// Surface to render for this frame, `None` while closed
    pub fn surface(&self, viewport_width: u16) -> Option<DetailSurface> {
        self.visible()
            .map(|_| DetailSurface::for_width(viewport_width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Bar {
        label: &'static str,
        value: f64,
    }

    #[test]
    fn test_select_opens_with_exact_item() {
        let mut selection = Selection::new();
        let bar = Bar { label: "Area", value: 0.3 };
        selection.select(bar.clone());

        assert!(selection.is_open());
        assert_eq!(selection.visible(), Some(&bar));
    }

    #[test]
    fn test_select_replaces_while_open() {
        let mut selection = Selection::new();
        selection.select(Bar { label: "Area", value: 0.3 });
        selection.select(Bar { label: "HOA", value: 0.1 });
        assert_eq!(selection.visible().map(|b| b.label), Some("HOA"));
    }

    #[test]
    fn test_close_is_idempotent_and_hides_item() {
        let mut selection: Selection<Bar> = Selection::new();
        selection.close();
        assert!(!selection.is_open());

        selection.select(Bar { label: "Floor", value: 0.05 });
        selection.close();
        selection.close();
        assert!(!selection.is_open());
        assert!(selection.visible().is_none());
        assert!(selection.surface(200).is_none());
    }

    #[test]
    fn test_surface_follows_live_width() {
        let mut selection = Selection::new();
        selection.select(Bar { label: "Rooms", value: 0.2 });

        assert_eq!(selection.surface(DESKTOP_BREAKPOINT), Some(DetailSurface::Popover));
        assert_eq!(selection.surface(DESKTOP_BREAKPOINT - 1), Some(DetailSurface::Sheet));
        // Same open selection, resized viewport
        assert_eq!(selection.surface(160), Some(DetailSurface::Popover));
    }
}
