/// Frame-rate statistics published by [`FpsCounter`].
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct FpsSample {
    pub fps: f64,
    /// Average milliseconds per frame over the sampling window.
    pub frame_ms: f64,
}

impl FpsSample {
    /// Window title in the form `"<base>, 16.67 ms/frame (60.0 FPS)"`.
    pub fn title(&self, base: &str) -> String {
        format!("{base}, {:.2} ms/frame ({:.1} FPS)", self.frame_ms, self.fps)
    }
}

/// Frame-rate meter for a single render loop.
///
/// Call [`frame`](Self::frame) once per presented frame. Statistics are
/// refreshed on the very first frame (as zeros) and then whenever more than
/// one second has passed since the last refresh.
#[derive(Debug, Clone, Default)]
pub struct FpsCounter {
    window_start: f64,
    frames: u32,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a frame at time `t` (seconds). Returns a new sample when the
    /// statistics were refreshed.
    pub fn frame(&mut self, t: f64) -> Option<FpsSample> {
        let span = t - self.window_start;
        let mut refreshed = None;

        if span > 1.0 || self.frames == 0 {
            let sample = if self.frames > 0 {
                FpsSample {
                    fps: f64::from(self.frames) / span,
                    frame_ms: 1000.0 * span / f64::from(self.frames),
                }
            } else {
                FpsSample::default()
            };
            self.window_start = t;
            self.frames = 0;
            refreshed = Some(sample);
        }

        self.frames += 1;
        refreshed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_publishes_zeros() {
        let mut fps = FpsCounter::new();
        assert_eq!(fps.frame(0.0), Some(FpsSample::default()));
        assert_eq!(fps.frame(0.5), None);
    }

    #[test]
    fn refreshes_after_one_second() {
        let mut fps = FpsCounter::new();
        fps.frame(0.0);
        for i in 1..50 {
            assert_eq!(fps.frame(i as f64 * 0.02), None);
        }
        // 50 frames counted over 1.25 s.
        let sample = fps.frame(1.25).expect("refresh after a second");
        assert!((sample.fps - 40.0).abs() < 1e-9);
        assert!((sample.frame_ms - 25.0).abs() < 1e-9);
        // The next window starts at the refresh.
        assert_eq!(fps.frame(2.0), None);
        assert!(fps.frame(2.3).is_some());
    }

    #[test]
    fn counters_are_independent() {
        let mut a = FpsCounter::new();
        let mut b = FpsCounter::new();
        a.frame(0.0);
        a.frame(0.1);
        assert_eq!(b.frame(5.0), Some(FpsSample::default()));
    }

    #[test]
    fn title_format() {
        let sample = FpsSample { fps: 59.94, frame_ms: 16.6833 };
        assert_eq!(sample.title("Orrery"), "Orrery, 16.68 ms/frame (59.9 FPS)");
    }
}
