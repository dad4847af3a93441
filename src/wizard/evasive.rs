use rand::Rng;

/// Escalating labels for the decline button; the last one sticks.
pub const DECLINE_PHRASES: [&str; 10] = [
    "No",
    "Are you sure?",
    "Really sure?",
    "Think again!",
    "Last chance!",
    "Surely not?",
    "You might regret this!",
    "Have a heart!",
    "Don't be so cold!",
    "PLEASE! 😭",
];

/// Half-width of the square the decline button jumps within
pub const EVADE_RANGE: f32 = 150.0;

/// Where the decline button has run off to, and how often
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HoverState {
    pub offset_x: f32,
    pub offset_y: f32,
    pub hover_count: u32,
}

impl HoverState {
    /// Jump to a fresh random offset and count the attempt.
    ///
    /// Offsets are independent of the previous position and are not clamped.
    pub fn evade<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.offset_x = rng.random_range(-EVADE_RANGE..=EVADE_RANGE);
        self.offset_y = rng.random_range(-EVADE_RANGE..=EVADE_RANGE);
        self.hover_count = self.hover_count.saturating_add(1);
    }

    pub fn label_index(&self) -> usize {
        (self.hover_count as usize).min(DECLINE_PHRASES.len() - 1)
    }

    pub fn label(&self) -> &'static str {
        DECLINE_PHRASES[self.label_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_starts_at_no() {
        let hover = HoverState::default();
        assert_eq!(hover.label(), "No");
        assert_eq!(hover.offset_x, 0.0);
    }

    #[test]
    fn test_label_saturates_on_last_phrase() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut hover = HoverState::default();
        for _ in 0..DECLINE_PHRASES.len() + 5 {
            hover.evade(&mut rng);
        }
        assert_eq!(hover.label(), "PLEASE! 😭");
        assert_eq!(hover.hover_count as usize, DECLINE_PHRASES.len() + 5);
    }

    proptest! {
        #[test]
        fn prop_evade_counts_and_stays_in_range(seed in any::<u64>(), events in 1usize..40) {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut hover = HoverState::default();
            for i in 0..events {
                let before = hover.hover_count;
                hover.evade(&mut rng);
                prop_assert_eq!(hover.hover_count, before + 1);
                prop_assert!(hover.offset_x.abs() <= EVADE_RANGE);
                prop_assert!(hover.offset_y.abs() <= EVADE_RANGE);
                prop_assert_eq!(hover.label_index(), (i + 1).min(DECLINE_PHRASES.len() - 1));
            }
        }
    }
}
