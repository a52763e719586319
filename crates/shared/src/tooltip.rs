/// Gap between the cursor and the tooltip box, in CSS pixels.
const CURSOR_OFFSET: f64 = 12.0;

/// Primary pointer as reported by the `(pointer: …)` media queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerCapability {
    Fine,
    Coarse,
    NoPointer,
}

impl PointerCapability {
    /// Build from the results of `(pointer: coarse)` and `(pointer: fine)`.
    /// A coarse match wins so hybrid touch devices never get hover tooltips.
    pub fn from_media(coarse: bool, fine: bool) -> Self {
        if coarse {
            PointerCapability::Coarse
        } else if fine {
            PointerCapability::Fine
        } else {
            PointerCapability::NoPointer
        }
    }

    pub fn supports_hover(&self) -> bool {
        *self == PointerCapability::Fine
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TooltipSide {
    Left,
    Right,
}

/// Where the tooltip sits relative to the cursor, in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipPosition {
    pub side: TooltipSide,
    /// Distance from the viewport's left edge (side `Right`) or right edge (side `Left`).
    pub inset: f64,
    pub top: f64,
}

impl TooltipPosition {
    /// In the rightmost third of the viewport the box hangs to the left of
    /// the cursor so it cannot push past the edge and add a scrollbar.
    pub fn near_cursor(client_x: f64, client_y: f64, viewport_width: f64) -> Self {
        let top = client_y + CURSOR_OFFSET;
        if client_x > viewport_width * 2.0 / 3.0 {
            TooltipPosition {
                side: TooltipSide::Left,
                inset: viewport_width - client_x + CURSOR_OFFSET,
                top,
            }
        } else {
            TooltipPosition {
                side: TooltipSide::Right,
                inset: client_x + CURSOR_OFFSET,
                top,
            }
        }
    }

    pub fn css(&self) -> String {
        match self.side {
            TooltipSide::Right => format!("position:fixed;left:{}px;top:{}px;", self.inset, self.top),
            TooltipSide::Left => format!("position:fixed;right:{}px;top:{}px;", self.inset, self.top),
        }
    }
}
