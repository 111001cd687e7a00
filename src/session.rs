use caloriewise_meal::{Action, GoalWatch, MealState};

/// The single tracking session owned by the server.
#[derive(Debug, Clone)]
pub struct Session {
    state: MealState,
    watch: GoalWatch,
    suggestion_pending: bool,
}

impl Session {
    pub fn new(daily_goal: u32) -> Self {
        Self {
            state: MealState::new(daily_goal),
            watch: GoalWatch::default(),
            suggestion_pending: false,
        }
    }

    pub fn state(&self) -> &MealState {
        &self.state
    }

    /// Whether the "goal exceeded" prompt should be shown.
    pub fn suggestion_pending(&self) -> bool {
        self.suggestion_pending
    }

    /// Applies `action` and arms the suggestion prompt when the total
    /// crosses the goal from below. Returns `true` on such a crossing.
    pub fn dispatch(&mut self, action: Action) -> bool {
        self.apply(self.state.reduce(action))
    }

    pub fn dispatch_with(&mut self, action: Action, mint_id: impl FnOnce() -> String) -> bool {
        self.apply(self.state.reduce_with(action, mint_id))
    }

    fn apply(&mut self, next: MealState) -> bool {
        self.state = next;

        let crossed = self
            .watch
            .observe(self.state.total_calories(), self.state.daily_goal);

        if crossed {
            self.suggestion_pending = true;
        } else if !self.watch.is_over() {
            self.suggestion_pending = false;
        }

        crossed
    }

    pub fn dismiss_suggestion(&mut self) {
        self.suggestion_pending = false;
    }

    /// Hands the pending prompt to the page that shows it. The prompt is
    /// shown at most once per crossing.
    pub fn take_suggestion(&mut self) -> bool {
        std::mem::take(&mut self.suggestion_pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use caloriewise_meal::{MealType, NewFood};

    fn food(calories: u32) -> NewFood {
        NewFood {
            name: "Pasta".to_owned(),
            quantity: "200 g".to_owned(),
            calories,
        }
    }

    #[test]
    fn one_activation_per_crossing() {
        let mut session = Session::new(2000);
        let mut ids = 0..;
        let mut next_id = || ids.next().unwrap_or_default().to_string();

        assert!(!session.dispatch_with(Action::add(MealType::Lunch, food(1500)), &mut next_id));
        assert!(!session.suggestion_pending());

        assert!(session.dispatch_with(Action::add(MealType::Dinner, food(600)), &mut next_id));
        assert!(session.suggestion_pending());

        assert!(!session.dispatch_with(Action::add(MealType::Snacks, food(100)), &mut next_id));
        assert!(session.suggestion_pending());
    }

    #[test]
    fn single_item_over_goal() {
        let mut session = Session::new(2000);

        assert!(session.dispatch(Action::add(MealType::Breakfast, food(2100))));
        assert_eq!(session.state().total_calories(), 2100);
        assert!(session.suggestion_pending());
    }

    #[test]
    fn dropping_below_rearms() {
        let mut session = Session::new(2000);
        let mut ids = 0..;
        let mut next_id = || ids.next().unwrap_or_default().to_string();

        session.dispatch_with(Action::add(MealType::Lunch, food(2500)), &mut next_id);
        session.dismiss_suggestion();
        assert!(!session.suggestion_pending());

        session.dispatch(Action::remove(MealType::Lunch, "0"));
        assert_eq!(session.state().total_calories(), 0);
        assert!(!session.suggestion_pending());

        assert!(session.dispatch_with(Action::add(MealType::Lunch, food(2500)), &mut next_id));
        assert!(session.suggestion_pending());
    }

    #[test]
    fn taken_prompt_is_not_shown_again() {
        let mut session = Session::new(2000);
        let mut ids = 0..;
        let mut next_id = || ids.next().unwrap_or_default().to_string();

        session.dispatch_with(Action::add(MealType::Dinner, food(2100)), &mut next_id);
        assert!(session.take_suggestion());
        assert!(!session.take_suggestion());

        session.dispatch_with(Action::add(MealType::Snacks, food(300)), &mut next_id);
        assert!(!session.take_suggestion());
    }

    #[test]
    fn staying_below_never_triggers() {
        let mut session = Session::new(2000);

        for _ in 0..4 {
            assert!(!session.dispatch(Action::add(MealType::Snacks, food(500))));
        }

        assert_eq!(session.state().total_calories(), 2000);
        assert!(!session.suggestion_pending());
    }
}
