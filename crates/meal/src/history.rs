use rand::Rng;
use time::{Date, Duration};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayIntake {
    pub date: Date,
    pub calories: u32,
}

impl DayIntake {
    /// Short chart label such as "Oct 3".
    pub fn label(&self) -> String {
        let month = self.date.month().to_string();
        let short: String = month.chars().take(3).collect();

        format!("{short} {}", self.date.day())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartBar {
    pub label: String,
    pub calories: u32,
    /// Bar height as a percentage of the tallest bar.
    pub height: u32,
}

/// Daily intake for the last thirty days, oldest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthlyHistory {
    days: Vec<DayIntake>,
}

impl MonthlyHistory {
    pub const DAYS: i64 = 30;
    pub const MIN_CALORIES: u32 = 1500;
    pub const MAX_CALORIES: u32 = 2800;

    pub fn new(days: Vec<DayIntake>) -> Self {
        Self { days }
    }

    /// Mock history ending on `today`, one random intake per day.
    pub fn simulate<R: Rng>(today: Date, rng: &mut R) -> Self {
        let days = (0..Self::DAYS)
            .rev()
            .filter_map(|offset| today.checked_sub(Duration::days(offset)))
            .map(|date| DayIntake {
                date,
                calories: rng.random_range(Self::MIN_CALORIES..=Self::MAX_CALORIES),
            })
            .collect();

        Self { days }
    }

    pub fn days(&self) -> &[DayIntake] {
        &self.days
    }

    /// Rounded mean of the daily intakes, 0 when empty.
    pub fn average(&self) -> u32 {
        if self.days.is_empty() {
            return 0;
        }

        let sum: u64 = self.days.iter().map(|day| u64::from(day.calories)).sum();
        (sum as f64 / self.days.len() as f64).round() as u32
    }

    pub fn bars(&self) -> Vec<ChartBar> {
        let max = self
            .days
            .iter()
            .map(|day| day.calories)
            .max()
            .unwrap_or_default();

        self.days
            .iter()
            .map(|day| ChartBar {
                label: day.label(),
                calories: day.calories,
                height: if max == 0 {
                    0
                } else {
                    (f64::from(day.calories) / f64::from(max) * 100.0).round() as u32
                },
            })
            .collect()
    }
}
