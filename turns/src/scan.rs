//! Threshold-crossing scan over a cumulative heading trace.
//!
//! The angle is measured against a reference sample that moves to every
//! detected turn, so each turn is relative to the previous one and not to the
//! start of the trace. A turn also has to come more than the minimum spacing
//! after the previous one. The positive branch is tested first.

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum TurnDirection {
    /// Heading increased by at least the threshold
    Clockwise,
    /// Heading decreased by at least the threshold
    CounterClockwise,
}

impl std::fmt::Display for TurnDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Clockwise => f.write_str("clockwise"),
            Self::CounterClockwise => f.write_str("counter-clockwise"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossing {
    pub index: usize,
    /// Heading change since the previous turn, signed
    pub angle_degrees: f64,
    pub direction: TurnDirection,
}

/// Scan state carried from one sample to the next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TurnScan {
    /// Sample the heading change is measured from
    pub reference_index: usize,
    pub last_turn_index: usize,
}

impl TurnScan {
    /// Inspect sample `index` of `angles`, updating the state on a turn.
    ///
    /// # Params
    /// - `threshold_degrees` - absolute heading change that counts as a turn
    /// - `min_spacing_samples` - a turn needs strictly more samples than this since the last one
    pub fn advance(
        &mut self,
        angles: &[f64],
        index: usize,
        threshold_degrees: f64,
        min_spacing_samples: f64,
    ) -> Option<Crossing> {
        let angle_degrees = angles[index] - angles[self.reference_index];
        // a sample at or before the last turn is never spaced from it
        let spaced = index.saturating_sub(self.last_turn_index) as f64 > min_spacing_samples;

        let direction = if angle_degrees >= threshold_degrees {
            TurnDirection::Clockwise
        } else if angle_degrees <= -threshold_degrees {
            TurnDirection::CounterClockwise
        } else {
            return None;
        };

        if !spaced {
            return None;
        }

        self.reference_index = index;
        self.last_turn_index = index;

        Some(Crossing {
            index,
            angle_degrees,
            direction,
        })
    }
}

/// Run a fresh [`TurnScan`] over the whole trace.
pub fn scan_turns(angles: &[f64], threshold_degrees: f64, min_spacing_samples: f64) -> Vec<Crossing> {
    let mut scan = TurnScan::default();

    (1..angles.len())
        .filter_map(|index| scan.advance(angles, index, threshold_degrees, min_spacing_samples))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(from: f64, to: f64, samples: usize) -> impl Iterator<Item = f64> {
        (1..=samples).map(move |i| from + (to - from) * i as f64 / samples as f64)
    }

    #[test]
    fn single_right_angle() {
        let angles = std::iter::once(0.0)
            .chain(ramp(0.0, 90.0, 9))
            .chain(std::iter::repeat_n(90.0, 10))
            .collect::<Vec<_>>();

        let turns = scan_turns(&angles, 85.0, 5.0);

        assert_eq!(
            turns,
            vec![Crossing {
                index: 9,
                angle_degrees: 90.0,
                direction: TurnDirection::Clockwise
            }]
        );
    }

    #[test]
    fn single_left_angle() {
        let angles = std::iter::once(0.0)
            .chain(ramp(0.0, -90.0, 9))
            .chain(std::iter::repeat_n(-90.0, 10))
            .collect::<Vec<_>>();

        let turns = scan_turns(&angles, 85.0, 5.0);

        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].direction, TurnDirection::CounterClockwise);
        assert_eq!(turns[0].angle_degrees, -90.0);
    }

    #[test]
    fn threshold_is_inclusive() {
        let angles = [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 85.0];

        assert_eq!(scan_turns(&angles, 85.0, 5.0).len(), 1);
    }

    #[test]
    fn reference_moves_to_last_turn() {
        // 0 -> 90 -> 180 is two turns, 180 -> 100 is not a third
        let angles = std::iter::once(0.0)
            .chain(ramp(0.0, 90.0, 10))
            .chain(ramp(90.0, 180.0, 10))
            .chain(ramp(180.0, 100.0, 10))
            .collect::<Vec<_>>();

        let turns = scan_turns(&angles, 85.0, 5.0);

        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].index, 10);
        assert_eq!(turns[1].index, 20);
        assert!(turns.iter().all(|turn| turn.direction == TurnDirection::Clockwise));
    }

    #[test]
    fn right_then_left_returns_to_start() {
        let angles = std::iter::once(0.0)
            .chain(ramp(0.0, 90.0, 10))
            .chain(ramp(90.0, 0.0, 10))
            .collect::<Vec<_>>();

        let directions = scan_turns(&angles, 85.0, 5.0)
            .into_iter()
            .map(|turn| turn.direction)
            .collect::<Vec<_>>();

        assert_eq!(
            directions,
            vec![TurnDirection::Clockwise, TurnDirection::CounterClockwise]
        );
    }

    #[test]
    fn spacing_guard_delays_turn() {
        // jumps past the threshold at sample 3 but sample 6 is the first far
        // enough from the start
        let angles = [0.0, 0.0, 0.0, 100.0, 100.0, 100.0, 100.0, 100.0];

        let turns = scan_turns(&angles, 85.0, 5.0);

        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].index, 6);
        assert_eq!(turns[0].angle_degrees, 100.0);
    }

    #[test]
    fn spacing_guard_is_strict() {
        let angles = [0.0, 0.0, 0.0, 0.0, 0.0, 100.0];

        assert!(scan_turns(&angles, 85.0, 5.0).is_empty());
    }

    #[test]
    fn state_is_replayable() {
        let angles = [0.0, 50.0, 90.0, 90.0];
        let mut scan = TurnScan::default();

        assert_eq!(scan.advance(&angles, 1, 85.0, 1.0), None);
        assert_eq!(scan, TurnScan::default());

        let turn = scan.advance(&angles, 2, 85.0, 1.0).unwrap();
        assert_eq!(turn.index, 2);
        assert_eq!(
            scan,
            TurnScan {
                reference_index: 2,
                last_turn_index: 2
            }
        );

        assert_eq!(scan.advance(&angles, 3, 85.0, 1.0), None);
    }

    #[test]
    fn sample_before_last_turn_is_not_spaced() {
        let angles = [0.0, 100.0, 0.0, 0.0];
        let mut scan = TurnScan {
            reference_index: 0,
            last_turn_index: 3,
        };

        assert_eq!(scan.advance(&angles, 1, 85.0, 0.0), None);
        assert_eq!(
            scan,
            TurnScan {
                reference_index: 0,
                last_turn_index: 3
            }
        );
    }

    #[test]
    fn flat_heading_has_no_turns() {
        assert!(scan_turns(&[0.0; 100], 85.0, 5.0).is_empty());
        assert!(scan_turns(&[], 85.0, 5.0).is_empty());
    }

    #[test]
    fn direction_names() {
        assert_eq!(TurnDirection::Clockwise.to_string(), "clockwise");
        assert_eq!(TurnDirection::CounterClockwise.to_string(), "counter-clockwise");
    }
}
