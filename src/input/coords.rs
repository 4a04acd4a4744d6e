//! Client → canvas coordinate conversion.
//!
//! The canvas backing store may be larger or smaller than the area it is
//! displayed in (HiDPI scaling, CSS-style stretching). Pointer positions come
//! in display units relative to the canvas origin and are divided back into
//! backing-store pixels here. Zoom and pan are not applied: element
//! coordinates live in this same pixel space and the render pass applies the
//! camera once per frame.

/// Maps client positions onto backing-store pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    /// Backing-store size in device pixels
    pub backing_width: f64,
    pub backing_height: f64,
    /// Displayed size in client units
    pub display_width: f64,
    pub display_height: f64,
    /// Canvas origin in client coordinates
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for CoordinateMapper {
    fn default() -> Self {
        Self::identity(0.0, 0.0)
    }
}

impl CoordinateMapper {
    /// Backing store and display share the same size and origin.
    pub fn identity(width: f64, height: f64) -> Self {
        Self {
            backing_width: width,
            backing_height: height,
            display_width: width,
            display_height: height,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }

    /// Horizontal and vertical backing/display ratios.
    ///
    /// A collapsed display (zero or negative size) maps 1:1 instead of
    /// dividing by zero.
    #[inline]
    pub fn scale(&self) -> (f64, f64) {
        let ratio = |backing: f64, display: f64| {
            if display > 0.0 && backing > 0.0 {
                backing / display
            } else {
                1.0
            }
        };
        (
            ratio(self.backing_width, self.display_width),
            ratio(self.backing_height, self.display_height),
        )
    }

    /// Converts a client position to backing-store pixels.
    #[inline]
    pub fn to_logical(&self, client_x: f64, client_y: f64) -> (f64, f64) {
        let (sx, sy) = self.scale();
        (
            (client_x - self.offset_x) * sx,
            (client_y - self.offset_y) * sy,
        )
    }

    /// Converts backing-store pixels back to a client position.
    #[inline]
    pub fn to_client(&self, x: f64, y: f64) -> (f64, f64) {
        let (sx, sy) = self.scale();
        (x / sx + self.offset_x, y / sy + self.offset_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_passes_through() {
        let mapper = CoordinateMapper::identity(800.0, 500.0);
        assert_eq!(mapper.to_logical(120.0, 45.0), (120.0, 45.0));
    }

    #[test]
    fn hidpi_backing_store_scales_up() {
        let mapper = CoordinateMapper {
            backing_width: 1600.0,
            backing_height: 1000.0,
            display_width: 800.0,
            display_height: 500.0,
            offset_x: 10.0,
            offset_y: 20.0,
        };
        assert_eq!(mapper.to_logical(110.0, 70.0), (200.0, 100.0));
        assert_eq!(mapper.to_client(200.0, 100.0), (110.0, 70.0));
    }

    #[test]
    fn collapsed_display_does_not_divide_by_zero() {
        let mapper = CoordinateMapper {
            backing_width: 800.0,
            backing_height: 500.0,
            display_width: 0.0,
            display_height: 0.0,
            offset_x: 0.0,
            offset_y: 0.0,
        };
        let (x, y) = mapper.to_logical(5.0, 6.0);
        assert!(x.is_finite() && y.is_finite());
        assert_eq!((x, y), (5.0, 6.0));
    }
}
