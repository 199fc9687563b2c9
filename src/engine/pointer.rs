//! Pointer samples fed into the engine during a gesture.
//!
//! Hosts either hand over coordinates directly as a [`PointerSample`] or pass
//! a DOM-shaped [`PointerEvent`], which resolves its position from the first
//! touch point, then `pageX/pageY`, then `clientX/clientY`.

use serde::{Deserialize, Serialize};

/// A pointer position in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerSample {
    pub x: f64,
    pub y: f64,
}

impl PointerSample {
    pub fn new(x: f64, y: f64) -> Self {
        PointerSample { x, y }
    }
}

impl From<(f64, f64)> for PointerSample {
    fn from((x, y): (f64, f64)) -> Self {
        PointerSample { x, y }
    }
}

/// One entry of a touch list.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TouchPoint {
    pub page_x: f64,
    pub page_y: f64,
}

/// Mouse or touch event payload with every coordinate optional.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PointerEvent {
    pub page_x: Option<f64>,
    pub page_y: Option<f64>,
    pub client_x: Option<f64>,
    pub client_y: Option<f64>,
    pub target_touches: Vec<TouchPoint>,
}

impl PointerEvent {
    pub fn mouse(page_x: f64, page_y: f64) -> Self {
        PointerEvent {
            page_x: Some(page_x),
            page_y: Some(page_y),
            ..Default::default()
        }
    }

    pub fn touch(page_x: f64, page_y: f64) -> Self {
        PointerEvent {
            target_touches: vec![TouchPoint { page_x, page_y }],
            ..Default::default()
        }
    }

    /// Resolve the event to a single position.
    ///
    /// Returns `None` when no complete coordinate pair is present.
    pub fn position(&self) -> Option<PointerSample> {
        if let Some(touch) = self.target_touches.first() {
            return Some(PointerSample::new(touch.page_x, touch.page_y));
        }
        let x = self.page_x.or(self.client_x)?;
        let y = self.page_y.or(self.client_y)?;
        Some(PointerSample::new(x, y))
    }
}
