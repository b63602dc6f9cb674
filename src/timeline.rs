use crate::error::{BridgeError, BridgeResult};
use crate::properties::PropertyStore;

/// Inclusive timeline bounds of the active window, in frame positions.
///
/// Derived from the host's `in`/`out` properties on every render call; the
/// bridge never caches it, so the host may retrim mid-playback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimelineWindow {
    pub in_point: i64,
    pub out_point: i64,
}

impl TimelineWindow {
    pub fn new(in_point: i64, out_point: i64) -> BridgeResult<Self> {
        if out_point < in_point {
            return Err(BridgeError::validation(
                "TimelineWindow out must be >= in",
            ));
        }
        Ok(Self {
            in_point,
            out_point,
        })
    }

    /// Read the window from the host's `in`/`out` properties (absent keys
    /// read as 0, matching the host framework's defaulting).
    pub fn from_properties(properties: &dyn PropertyStore) -> BridgeResult<Self> {
        Self::new(
            properties.get_position("in"),
            properties.get_position("out"),
        )
    }

    pub fn length(self) -> i64 {
        self.out_point - self.in_point + 1
    }

    /// Map a frame position into the effect's sole time input, a double in
    /// `[0, 1)` for positions inside the window.
    pub fn normalized_time(self, position: i64) -> f64 {
        (position - self.in_point) as f64 / self.length() as f64
    }
}

/// Frame geometry handed to the media factory when building auxiliary
/// producers, so sources can decode to the host's raster size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Profile {
    pub width: u32,
    pub height: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::MemoryProperties;

    #[test]
    fn in_position_maps_to_zero() {
        let w = TimelineWindow::new(25, 124).unwrap();
        assert_eq!(w.normalized_time(25), 0.0);
    }

    #[test]
    fn interior_positions_stay_below_one() {
        let w = TimelineWindow::new(0, 99).unwrap();
        assert_eq!(w.length(), 100);
        assert_eq!(w.normalized_time(49), 0.49);
        for p in 0..100 {
            let t = w.normalized_time(p);
            assert!((0.0..1.0).contains(&t), "position {p} mapped to {t}");
        }
    }

    #[test]
    fn single_frame_window_has_length_one() {
        let w = TimelineWindow::new(10, 10).unwrap();
        assert_eq!(w.length(), 1);
        assert_eq!(w.normalized_time(10), 0.0);
    }

    #[test]
    fn inverted_window_is_rejected() {
        assert!(TimelineWindow::new(5, 4).is_err());
    }

    #[test]
    fn from_properties_reads_in_out() {
        let mut props = MemoryProperties::new();
        props.set("in", "25");
        props.set("out", "124");
        let w = TimelineWindow::from_properties(&props).unwrap();
        assert_eq!(w.in_point, 25);
        assert_eq!(w.out_point, 124);

        // Absent keys default to 0.
        let empty = MemoryProperties::new();
        let w = TimelineWindow::from_properties(&empty).unwrap();
        assert_eq!(w.length(), 1);
    }
}
