use std::sync::Mutex;

use async_trait::async_trait;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{AddFoodInput, NewFood};

/// Estimates the calories of a logged food.
#[async_trait]
pub trait NutritionLookup: Send + Sync {
    async fn estimate(&self, input: &AddFoodInput) -> caloriewise_shared::Result<u32>;
}

/// Stand-in for a nutrition database: a uniformly random estimate in
/// `[50, 450)` regardless of the food.
pub struct SimulatedNutrition {
    rng: Mutex<StdRng>,
}

impl SimulatedNutrition {
    pub const MIN_CALORIES: u32 = 50;
    pub const MAX_CALORIES: u32 = 450;

    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for SimulatedNutrition {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NutritionLookup for SimulatedNutrition {
    async fn estimate(&self, input: &AddFoodInput) -> caloriewise_shared::Result<u32> {
        let calories = {
            let Ok(mut rng) = self.rng.lock() else {
                caloriewise_shared::bail!("nutrition rng lock poisoned");
            };

            rng.random_range(Self::MIN_CALORIES..Self::MAX_CALORIES)
        };

        tracing::debug!(food = %input.name, calories, "simulated calorie estimate");

        Ok(calories)
    }
}

impl AddFoodInput {
    pub async fn into_new_food(
        self,
        nutrition: &dyn NutritionLookup,
    ) -> caloriewise_shared::Result<NewFood> {
        let calories = nutrition.estimate(&self).await?;

        Ok(NewFood {
            quantity: self.quantity_label(),
            name: self.name,
            calories,
        })
    }
}
