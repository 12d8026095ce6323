//=========================================================================
// Screen
//=========================================================================
//
// Bidirectional mapping between the device ("actual") resolution and the
// application-defined ("virtual") resolution.
//
// Architecture:
//   actual (device pixels) ──to_virtual_*──> virtual (logical units)
//                          <──to_actual_*──
//
// A Screen never changes after construction. When the device resolution
// changes, build a new one with `resized()`.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::{IVec2, Vec2};

//=== Screen ==============================================================

/// Immutable affine mapping between actual and virtual coordinates.
///
/// All conversions scale by the ratio of extents and truncate toward
/// zero, so converting there and back is exact up to one unit of the
/// coarser space.
///
/// ```rust
/// use cadence::core::screen::Screen;
///
/// let screen = Screen::new(1920, 1080, 480, 270);
/// assert_eq!(screen.to_virtual_x(960.0), 240);
/// assert_eq!(screen.to_actual_y(135.0), 540);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Screen {
    actual_width: i32,
    actual_height: i32,
    virtual_width: i32,
    virtual_height: i32,
}

impl Screen {
    //--- Construction -----------------------------------------------------

    /// Creates a mapper between an actual and a virtual extent.
    ///
    /// # Panics
    ///
    /// Panics if any extent is not strictly positive.
    pub fn new(
        actual_width: i32,
        actual_height: i32,
        virtual_width: i32,
        virtual_height: i32,
    ) -> Self {
        assert!(
            actual_width > 0 && actual_height > 0,
            "Screen actual extent must be positive, got {}x{}",
            actual_width,
            actual_height
        );
        assert!(
            virtual_width > 0 && virtual_height > 0,
            "Screen virtual extent must be positive, got {}x{}",
            virtual_width,
            virtual_height
        );

        Self {
            actual_width,
            actual_height,
            virtual_width,
            virtual_height,
        }
    }

    /// Builds the mapper for a new device resolution, keeping the
    /// virtual extent.
    pub fn resized(&self, actual_width: i32, actual_height: i32) -> Self {
        Self::new(actual_width, actual_height, self.virtual_width, self.virtual_height)
    }

    //--- Extents ----------------------------------------------------------

    pub fn actual_width(&self) -> i32 {
        self.actual_width
    }

    pub fn actual_height(&self) -> i32 {
        self.actual_height
    }

    pub fn virtual_width(&self) -> i32 {
        self.virtual_width
    }

    pub fn virtual_height(&self) -> i32 {
        self.virtual_height
    }

    pub fn actual_size(&self) -> IVec2 {
        IVec2::new(self.actual_width, self.actual_height)
    }

    pub fn virtual_size(&self) -> IVec2 {
        IVec2::new(self.virtual_width, self.virtual_height)
    }

    /// Height over width of the device.
    pub fn actual_aspect_ratio(&self) -> f32 {
        self.actual_height as f32 / self.actual_width as f32
    }

    /// Height over width of the virtual space.
    pub fn virtual_aspect_ratio(&self) -> f32 {
        self.virtual_height as f32 / self.virtual_width as f32
    }

    //--- Actual → Virtual -------------------------------------------------

    pub fn to_virtual_x(&self, actual_x: f32) -> i32 {
        scale(actual_x, self.virtual_width, self.actual_width)
    }

    pub fn to_virtual_y(&self, actual_y: f32) -> i32 {
        scale(actual_y, self.virtual_height, self.actual_height)
    }

    /// Converts both axes of an actual-space point.
    pub fn to_virtual(&self, actual: Vec2) -> IVec2 {
        IVec2::new(self.to_virtual_x(actual.x), self.to_virtual_y(actual.y))
    }

    //--- Virtual → Actual -------------------------------------------------

    pub fn to_actual_x(&self, virtual_x: f32) -> i32 {
        scale(virtual_x, self.actual_width, self.virtual_width)
    }

    pub fn to_actual_y(&self, virtual_y: f32) -> i32 {
        scale(virtual_y, self.actual_height, self.virtual_height)
    }

    /// Converts both axes of a virtual-space point.
    pub fn to_actual(&self, virtual_point: Vec2) -> IVec2 {
        IVec2::new(self.to_actual_x(virtual_point.x), self.to_actual_y(virtual_point.y))
    }
}

//--- Internal Helpers ----------------------------------------------------

// Multiply before dividing so integral inputs that land exactly on a
// target unit are not pushed below it by rounding.
fn scale(value: f32, to_extent: i32, from_extent: i32) -> i32 {
    (f64::from(value) * f64::from(to_extent) / f64::from(from_extent)) as i32
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //=====================================================================
    // Construction Tests
    //=====================================================================

    #[test]
    fn exposes_extents() {
        let screen = Screen::new(800, 600, 400, 300);
        assert_eq!(screen.actual_size(), IVec2::new(800, 600));
        assert_eq!(screen.virtual_size(), IVec2::new(400, 300));
    }

    #[test]
    #[should_panic(expected = "actual extent must be positive")]
    fn rejects_zero_actual_width() {
        Screen::new(0, 600, 400, 300);
    }

    #[test]
    #[should_panic(expected = "virtual extent must be positive")]
    fn rejects_negative_virtual_height() {
        Screen::new(800, 600, 400, -1);
    }

    #[test]
    fn resized_keeps_virtual_extent() {
        let screen = Screen::new(800, 600, 400, 300).resized(1600, 1200);
        assert_eq!(screen.actual_size(), IVec2::new(1600, 1200));
        assert_eq!(screen.virtual_size(), IVec2::new(400, 300));
        assert_eq!(screen.to_virtual_x(1600.0), 400);
    }

    //=====================================================================
    // Mapping Tests
    //=====================================================================

    #[test]
    fn scales_down_and_truncates() {
        let screen = Screen::new(800, 600, 400, 300);
        assert_eq!(screen.to_virtual_x(401.0), 200);
        assert_eq!(screen.to_virtual_y(599.0), 299);
    }

    #[test]
    fn truncates_toward_zero_for_negatives() {
        let screen = Screen::new(800, 600, 400, 300);
        assert_eq!(screen.to_virtual_x(-3.0), -1);
    }

    #[test]
    fn y_uses_height_ratio() {
        // Width and height ratios differ, so a width-based Y would be wrong.
        let screen = Screen::new(1000, 500, 100, 100);
        assert_eq!(screen.to_actual_y(50.0), 250);
        assert_eq!(screen.to_actual_x(50.0), 500);
    }

    #[test]
    fn exact_thirds_do_not_round_down() {
        let screen = Screen::new(3, 3, 1, 1);
        assert_eq!(screen.to_virtual_x(3.0), 1);
        assert_eq!(screen.to_virtual_y(3.0), 1);
    }

    #[test]
    fn vector_forms_apply_both_axes() {
        let screen = Screen::new(800, 600, 400, 300);
        assert_eq!(screen.to_virtual(Vec2::new(100.0, 60.0)), IVec2::new(50, 30));
        assert_eq!(screen.to_actual(Vec2::new(50.0, 30.0)), IVec2::new(100, 60));
    }

    #[test]
    fn aspect_ratios_are_height_over_width() {
        let screen = Screen::new(1920, 1080, 300, 400);
        assert!((screen.actual_aspect_ratio() - 0.5625).abs() < 1e-6);
        assert!((screen.virtual_aspect_ratio() - 4.0 / 3.0).abs() < 1e-6);
    }

    //=====================================================================
    // Round-Trip Tests
    //=====================================================================

    #[test]
    fn upscaled_round_trip_is_exact_within_one_unit() {
        for &(aw, ah, vw, vh) in &[(320, 240, 1280, 960), (100, 70, 333, 211), (7, 5, 7, 5)] {
            let screen = Screen::new(aw, ah, vw, vh);
            for x in 0..=aw {
                let back = screen.to_actual_x(screen.to_virtual_x(x as f32) as f32);
                assert!((back - x).abs() <= 1, "x={} back={} for {:?}", x, back, screen);
            }
            for y in 0..=ah {
                let back = screen.to_actual_y(screen.to_virtual_y(y as f32) as f32);
                assert!((back - y).abs() <= 1, "y={} back={} for {:?}", y, back, screen);
            }
        }
    }

    #[test]
    fn downscaled_round_trip_stays_within_one_virtual_unit() {
        let screen = Screen::new(1920, 1080, 480, 270);
        // One virtual unit spans four actual pixels on both axes.
        for x in 0..=1920 {
            let back = screen.to_actual_x(screen.to_virtual_x(x as f32) as f32);
            assert!(x - back >= 0 && x - back < 4, "x={} back={}", x, back);
        }
        for v in 0..=270 {
            let back = screen.to_virtual_y(screen.to_actual_y(v as f32) as f32);
            assert_eq!(back, v);
        }
    }
}
