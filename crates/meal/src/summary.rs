use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailySummary {
    pub current: u32,
    pub goal: u32,
    pub percentage: f64,
    pub is_over: bool,
}

impl DailySummary {
    pub fn new(current: u32, goal: u32) -> Self {
        let percentage = if goal > 0 {
            f64::from(current) / f64::from(goal) * 100.0
        } else {
            0.0
        };

        Self {
            current,
            goal,
            percentage,
            is_over: current > goal,
        }
    }

    /// Width of the progress bar, 0 to 100.
    pub fn progress(&self) -> u32 {
        self.percentage.clamp(0.0, 100.0).round() as u32
    }

    pub fn remaining(&self) -> u32 {
        self.goal.saturating_sub(self.current)
    }

    pub fn exceeded_by(&self) -> u32 {
        self.current.saturating_sub(self.goal)
    }

    pub fn message(&self) -> String {
        if self.is_over {
            format!(
                "You've exceeded your goal by {} calories.",
                self.exceeded_by()
            )
        } else {
            format!("You have {} calories remaining.", self.remaining())
        }
    }
}
