/// Tracks which side of the daily goal the total was last seen on and
/// reports upward crossings.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GoalWatch {
    over: bool,
}

impl GoalWatch {
    /// Records `total` and returns `true` only when it moves from at or
    /// below `goal` to above it.
    pub fn observe(&mut self, total: u32, goal: u32) -> bool {
        let over = total > goal;
        let crossed = over && !self.over;
        self.over = over;

        if crossed {
            tracing::debug!(total, goal, "daily goal crossed");
        }

        crossed
    }

    pub fn is_over(&self) -> bool {
        self.over
    }
}
