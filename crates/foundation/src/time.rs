/// Time primitives
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Default)]
pub struct Time(pub f64); // seconds

impl Time {
    pub const ZERO: Time = Time(0.0);

    pub fn after(self, seconds: f64) -> Time {
        Time(self.0 + seconds)
    }

    pub fn is_at_or_after(self, deadline: Time) -> bool {
        self.0 >= deadline.0
    }
}

#[cfg(test)]
mod tests {
    use super::Time;

    #[test]
    fn deadlines_are_inclusive() {
        let deadline = Time(1.0).after(1.5);
        assert_eq!(deadline, Time(2.5));
        assert!(!Time(2.4).is_at_or_after(deadline));
        assert!(Time(2.5).is_at_or_after(deadline));
    }
}
