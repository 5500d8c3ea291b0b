//! Six-session periodization cycle.
//!
//! The prescription for a session depends only on the position within a
//! repeating six-step scheme. The position is derived from an external,
//! monotonically increasing session counter.

use crate::{Reps, Sets, Weight};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleStep {
    /// Position within the cycle, 1 to 6.
    pub index: u8,
    pub percent_of_max: f32,
    pub target_reps: Reps,
    pub target_sets: Sets,
}

pub const STEPS: [CycleStep; 6] = [
    CycleStep {
        index: 1,
        percent_of_max: 0.60,
        target_reps: Reps(8),
        target_sets: Sets(4),
    },
    CycleStep {
        index: 2,
        percent_of_max: 0.70,
        target_reps: Reps(8),
        target_sets: Sets(5),
    },
    CycleStep {
        index: 3,
        percent_of_max: 0.70,
        target_reps: Reps(7),
        target_sets: Sets(5),
    },
    CycleStep {
        index: 4,
        percent_of_max: 0.75,
        target_reps: Reps(6),
        target_sets: Sets(4),
    },
    CycleStep {
        index: 5,
        percent_of_max: 0.80,
        target_reps: Reps(5),
        target_sets: Sets(4),
    },
    CycleStep {
        index: 6,
        percent_of_max: 0.85,
        target_reps: Reps(3),
        target_sets: Sets(4),
    },
];

/// Returns the prescription for the session identified by `counter`.
///
/// Total over all counters; the cycle wraps after six sessions.
#[must_use]
pub fn plan_for(counter: u32) -> CycleStep {
    STEPS[(counter % 6) as usize]
}

impl CycleStep {
    /// Prescribed load for this step, rounded to 0.1 kg.
    #[must_use]
    pub fn target_weight(&self, one_rep_max: Weight) -> Weight {
        // one_rep_max < 1000 and percent_of_max <= 0.85, so the product
        // stays within the valid weight range.
        Weight((f32::from(one_rep_max) * self.percent_of_max * 10.0).round() / 10.0)
    }

    #[must_use]
    pub fn phase(&self) -> &'static str {
        match self.index {
            1 => "volume base",
            2 => "volume build",
            3 => "rep quality",
            4 => "transition",
            5 => "intensity",
            _ => "peak",
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0, CycleStep { index: 1, percent_of_max: 0.60, target_reps: Reps(8), target_sets: Sets(4) })]
    #[case(5, CycleStep { index: 6, percent_of_max: 0.85, target_reps: Reps(3), target_sets: Sets(4) })]
    #[case(6, CycleStep { index: 1, percent_of_max: 0.60, target_reps: Reps(8), target_sets: Sets(4) })]
    fn test_plan_for(#[case] counter: u32, #[case] expected: CycleStep) {
        assert_eq!(plan_for(counter), expected);
    }

    #[test]
    fn test_plan_for_is_cyclic() {
        for counter in 0..100 {
            assert_eq!(plan_for(counter), plan_for(counter + 6));
        }
    }

    #[test]
    fn test_table_closure() {
        for counter in 0..6 {
            let step = plan_for(counter);
            assert!([Sets(4), Sets(5)].contains(&step.target_sets));
            assert!([Reps(3), Reps(5), Reps(6), Reps(7), Reps(8)].contains(&step.target_reps));
            assert!((0.60..=0.85).contains(&step.percent_of_max));
        }
    }

    #[rstest]
    #[case(0, Weight(103.5), Weight(62.1))]
    #[case(5, Weight(103.5), Weight(88.0))]
    #[case(3, Weight(168.8), Weight(126.6))]
    fn test_target_weight(#[case] counter: u32, #[case] max: Weight, #[case] expected: Weight) {
        assert_eq!(plan_for(counter).target_weight(max), expected);
    }

    #[test]
    fn test_phase_labels_are_distinct() {
        let phases = STEPS.iter().map(CycleStep::phase).collect::<Vec<_>>();
        let mut deduplicated = phases.clone();
        deduplicated.dedup();
        assert_eq!(phases, deduplicated);
        assert_eq!(phases.len(), 6);
    }
}
