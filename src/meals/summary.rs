use serde::Serialize;

/// Aggregate statistics for one session's meals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealSummary {
    pub total_meals: u64,
    pub total_meals_on_diet: u64,
    pub total_meals_off_diet: u64,
    pub best_sequence: u64,
}

/// Running state for the longest on-diet run.
///
/// An off-diet meal closes the open run (even an empty one) and starts a new
/// one; `finish` closes the last run. Only the best length is kept.
#[derive(Debug, Clone, Copy, Default)]
struct StreakFold {
    current: u64,
    best: u64,
}

impl StreakFold {
    fn push(mut self, on_diet: bool) -> Self {
        if on_diet {
            self.current += 1;
        } else {
            self = self.close();
        }
        self
    }

    fn close(self) -> Self {
        Self {
            current: 0,
            best: self.best.max(self.current),
        }
    }

    fn finish(self) -> u64 {
        self.close().best
    }
}

/// Single pass over diet flags given oldest meal first.
pub fn summarize<I>(flags: I) -> MealSummary
where
    I: IntoIterator<Item = bool>,
{
    let (streak, on, off) = flags.into_iter().fold(
        (StreakFold::default(), 0u64, 0u64),
        |(streak, on, off), on_diet| {
            let streak = streak.push(on_diet);
            if on_diet {
                (streak, on + 1, off)
            } else {
                (streak, on, off + 1)
            }
        },
    );

    MealSummary {
        total_meals: on + off,
        total_meals_on_diet: on,
        total_meals_off_diet: off,
        best_sequence: streak.finish(),
    }
}
