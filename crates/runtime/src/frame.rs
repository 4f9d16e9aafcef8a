use foundation::time::Time;

/// Frame metadata handed to the render loop.
///
/// `time` is the clock value at the start of the frame. Frames are produced
/// either on a fixed step (`new`/`next`) or from measured deltas (`advance`).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    /// 0-based frame index.
    pub index: u64,
    /// Delta since the previous frame (seconds).
    pub dt_s: f64,
    pub time: Time,
}

impl Frame {
    pub fn new(index: u64, dt_s: f64) -> Self {
        Self {
            index,
            dt_s,
            time: Time(index as f64 * dt_s),
        }
    }

    pub fn next(self) -> Self {
        Self::new(self.index + 1, self.dt_s)
    }

    /// Next frame after a measured delta. Negative or non-finite deltas count
    /// as zero so the clock never runs backwards.
    pub fn advance(self, dt_s: f64) -> Self {
        let dt_s = if dt_s.is_finite() { dt_s.max(0.0) } else { 0.0 };
        Self {
            index: self.index + 1,
            dt_s,
            time: self.time.after(dt_s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Frame;
    use foundation::time::Time;

    #[test]
    fn frame_time_is_deterministic() {
        let a = Frame::new(10, 0.25);
        let b = Frame::new(10, 0.25);
        assert_eq!(a, b);
        assert_eq!(a.time, Time(2.5));
    }

    #[test]
    fn next_advances_index_and_time() {
        let f0 = Frame::new(0, 0.5);
        let f1 = f0.next();
        assert_eq!(f1.index, 1);
        assert_eq!(f1.time, Time(0.5));
    }

    #[test]
    fn advance_accumulates_measured_deltas() {
        let f = Frame::new(0, 0.0).advance(0.5).advance(0.25).advance(-3.0);
        assert_eq!(f.index, 3);
        assert_eq!(f.time, Time(0.75));
        assert_eq!(f.dt_s, 0.0);
    }
}
