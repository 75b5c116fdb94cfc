//! Popup placement.

/// What the opener window knows about itself. The optional fields mirror
/// browser APIs that older engines report differently (`screenX` vs
/// nothing, `innerWidth` missing in odd embed contexts).
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowMetrics {
    pub outer_width: u32,
    pub outer_height: u32,
    pub inner_width: Option<u32>,
    pub inner_height: Option<u32>,
    pub screen_x: Option<i32>,
    pub screen_y: Option<i32>,
}

/// Computed popup placement, clamped to the visible screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopupGeometry {
    pub width: u32,
    pub height: u32,
    pub left: u32,
    pub top: u32,
}

impl PopupGeometry {
    /// Centers a popup of half the opener's outer width (and a quarter of
    /// it tall) over the opener's viewport. Coordinates never go negative;
    /// a window hanging off the left screen edge still gets a visible
    /// popup.
    pub fn centered(metrics: &WindowMetrics) -> Self {
        let width = metrics.outer_width / 2;
        let height = metrics.outer_width / 4;

        let base_x = metrics.screen_x.unwrap_or(0);
        let base_y = metrics.screen_y.unwrap_or(0);
        let viewport_width = metrics.inner_width.unwrap_or(metrics.outer_width);
        let viewport_height = metrics.inner_height.unwrap_or(metrics.outer_height);

        let left = base_x + (viewport_width as i32 - width as i32) / 2;
        let top = base_y + (viewport_height as i32 - height as i32) / 2;

        Self {
            width,
            height,
            left: left.max(0) as u32,
            top: top.max(0) as u32,
        }
    }

    /// The `window.open` feature string for this placement.
    pub fn feature_string(&self) -> String {
        format!(
            "width={},height={},left={},top={},menubar=no,toolbar=no,location=no,status=no,resizable=yes,scrollbars=yes",
            self.width, self.height, self.left, self.top
        )
    }
}
