//! The optimizer's reply and what the UI does with it.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

/// Status reported for a solved problem.
pub const OPTIMAL: &str = "Optimal";

/// Share of energy from each macronutrient, in percent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct PfcRatio {
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub fat: f64,
    #[serde(default)]
    pub carbohydrates: f64,
}

/// Totals over the chosen foods: kcal for energy, grams otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct NutrientTotals {
    #[serde(default)]
    pub energy: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub fat: f64,
    #[serde(default)]
    pub carbohydrates: f64,
}

/// Units of each food, in the order the optimizer listed them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FoodIntakes(pub Vec<(String, f64)>);

impl<'de> Deserialize<'de> for FoodIntakes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IntakesVisitor;

        impl<'de> Visitor<'de> for IntakesVisitor {
            type Value = FoodIntakes;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of food name to intake")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut intakes = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, amount)) = map.next_entry::<String, f64>()? {
                    intakes.push((name, amount));
                }
                Ok(FoodIntakes(intakes))
            }
        }

        deserializer.deserialize_map(IntakesVisitor)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeResult {
    pub status: String,
    #[serde(default)]
    pub pfc_ratio: PfcRatio,
    #[serde(default)]
    pub total_nutrient_values: NutrientTotals,
    #[serde(default)]
    pub food_intakes: FoodIntakes,
    #[serde(default)]
    pub message: Option<String>,
}

/// What a result asks the UI to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Draw both charts.
    Draw,
    /// Clear the charts and raise an alert with this text.
    Alert(String),
}

impl OptimizeResult {
    pub fn is_optimal(&self) -> bool {
        self.status == OPTIMAL
    }

    /// Decides what the UI does with this result.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nutrition_tui::optimizer::{OptimizeResult, Outcome};
    ///
    /// let result: OptimizeResult =
    ///     serde_json::from_str(r#"{"status": "Infeasible", "message": "test message"}"#).unwrap();
    ///
    /// assert_eq!(
    ///     result.outcome(),
    ///     Outcome::Alert("status: Infeasible\nmessage: test message".to_string())
    /// );
    /// ```
    pub fn outcome(&self) -> Outcome {
        if self.is_optimal() {
            Outcome::Draw
        } else {
            Outcome::Alert(format!(
                "status: {}\nmessage: {}",
                self.status,
                self.message.as_deref().unwrap_or("")
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optimal_result_draws() {
        let result: OptimizeResult = serde_json::from_str(
            r#"{
                "status": "Optimal",
                "pfcRatio": {"protein": 20.5, "fat": 25, "carbohydrates": 54.5},
                "totalNutrientValues": {"energy": 1800, "protein": 92.3, "fat": 50, "carbohydrates": 245},
                "foodIntakes": {"Rice": 3, "Egg": 2, "Chicken": 1.5}
            }"#,
        )
        .unwrap();

        assert_eq!(result.outcome(), Outcome::Draw);
        assert_eq!(result.pfc_ratio.fat, 25.0);
        assert_eq!(result.total_nutrient_values.energy, 1800.0);
        let names: Vec<_> = result.food_intakes.0.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["Rice", "Egg", "Chicken"]);
    }

    #[test]
    fn other_status_raises_alert() {
        let result: OptimizeResult =
            serde_json::from_str(r#"{"status": "Infeasible", "message": "test message"}"#).unwrap();

        assert_eq!(
            result.outcome(),
            Outcome::Alert("status: Infeasible\nmessage: test message".to_string())
        );
    }

    #[test]
    fn missing_message_renders_empty() {
        let result: OptimizeResult = serde_json::from_str(r#"{"status": "Unbounded"}"#).unwrap();

        assert_eq!(
            result.outcome(),
            Outcome::Alert("status: Unbounded\nmessage: ".to_string())
        );
    }
}
