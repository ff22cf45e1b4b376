#[derive(Debug, Clone, PartialEq)]
pub struct FoodEntry {
    pub name: String,
    pub grams: f64,
    pub kcal: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutEntry {
    pub kind: String,
    pub minutes: u32,
    pub kcal_burned: u32,
    /// Вода, добавленная к дневной норме за эту тренировку.
    pub extra_water_ml: u32,
}

/// Одна запись за день.
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerEvent {
    Water { ml: u32 },
    Food(FoodEntry),
    Workout(WorkoutEntry),
}

/// Итоги пользователя за один календарный день.
///
/// Счётчики только растут: в событиях неотрицательные величины, записи
/// только добавляются.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailyLedger {
    pub water_ml: u32,
    pub workout_extra_water_ml: u32,
    pub calories_in: f64,
    pub calories_out: f64,
    pub foods: Vec<FoodEntry>,
    pub workouts: Vec<WorkoutEntry>,
}

impl DailyLedger {
    pub fn apply(&mut self, event: LedgerEvent) {
        match event {
            LedgerEvent::Water { ml } => {
                self.water_ml = self.water_ml.saturating_add(ml);
            }
            LedgerEvent::Food(entry) => {
                self.calories_in += entry.kcal;
                self.foods.push(entry);
            }
            LedgerEvent::Workout(entry) => {
                self.calories_out += entry.kcal_burned as f64;
                self.workout_extra_water_ml =
                    self.workout_extra_water_ml.saturating_add(entry.extra_water_ml);
                self.workouts.push(entry);
            }
        }
    }

    pub fn calorie_balance(&self) -> f64 {
        self.calories_in - self.calories_out
    }
}
