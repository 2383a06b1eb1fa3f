//! The optimization problem submitted to `/optimize`.
//!
//! Problems are authored as TOML with snake_case keys and sent as camelCase
//! JSON. Each row is read into a typed record; a row that lacks a required
//! field is rejected with [`ProblemError::MissingField`] before anything is
//! sent.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ProblemError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sense {
    Maximize,
    Minimize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Nutrient {
    Energy,
    Protein,
    Fat,
    Carbohydrates,
}

impl Nutrient {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Energy => "energy",
            Self::Protein => "protein",
            Self::Fat => "fat",
            Self::Carbohydrates => "carbohydrates",
        }
    }
}

impl fmt::Display for Nutrient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MinMax {
    Min,
    Max,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Amount,
    Energy,
    Ratio,
}

impl Unit {
    /// Units a constraint on `nutrient` may use. Energy is only ever
    /// constrained in kcal; macronutrients by grams or share of energy.
    pub fn allowed_for(nutrient: Nutrient) -> &'static [Unit] {
        match nutrient {
            Nutrient::Energy => &[Unit::Energy],
            _ => &[Unit::Amount, Unit::Ratio],
        }
    }
}

/// One food the optimizer may choose, with per-unit nutrient values.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodInformation {
    pub name: String,
    pub grams_per_unit: i64,
    pub minimum_intake: i64,
    pub maximum_intake: i64,
    pub energy: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbohydrates: f64,
}

impl FoodInformation {
    fn validate(&self) -> Result<(), ProblemError> {
        let name = &self.name;
        if name.trim().is_empty() {
            return invalid("Food name must be provided.".to_string());
        }
        if [self.energy, self.protein, self.fat, self.carbohydrates]
            .iter()
            .any(|v| v.is_nan() || *v < 0.0)
        {
            return invalid(format!(
                "Invalid values for {name}. All nutrient values must be non-negative."
            ));
        }
        if self.grams_per_unit <= 0 {
            return invalid(format!(
                "Invalid grams per unit for {name}. It must be greater than zero."
            ));
        }
        if self.minimum_intake < 0 || self.maximum_intake < 0 {
            return invalid(format!(
                "Invalid intake values for {name}. Both minimum_intake and maximum_intake must be non-negative."
            ));
        }
        if self.minimum_intake > self.maximum_intake {
            return invalid(format!(
                "Invalid intake range for {name}. Maximum_intake must be greater than minimum_intake."
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Objective {
    pub sense: Sense,
    pub nutrient: Nutrient,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Constraint {
    pub min_max: MinMax,
    pub nutrient: Nutrient,
    pub unit: Unit,
    pub value: f64,
}

impl Constraint {
    fn validate(&self) -> Result<(), ProblemError> {
        if self.value.is_nan() || self.value < 0.0 {
            return invalid(format!(
                "Constraint value must be non-negative. Got {}.",
                self.value
            ));
        }
        if !Unit::allowed_for(self.nutrient).contains(&self.unit) {
            let expected = match self.nutrient {
                Nutrient::Energy => "the energy unit",
                _ => "the amount or ratio unit",
            };
            return invalid(format!(
                "Constraints on {} must use {expected}.",
                self.nutrient
            ));
        }
        Ok(())
    }
}

/// Request body for `POST /optimize`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    pub food_information: Vec<FoodInformation>,
    pub objective: Objective,
    pub constraints: Vec<Constraint>,
}

fn invalid<T>(message: String) -> Result<T, ProblemError> {
    Err(ProblemError::Invalid(message))
}

fn required<T>(
    value: Option<T>,
    section: &'static str,
    index: usize,
    field: &'static str,
) -> Result<T, ProblemError> {
    value.ok_or(ProblemError::MissingField {
        section,
        index,
        field,
    })
}

#[derive(Debug, Default, Deserialize)]
struct RawProblem {
    #[serde(default)]
    objective: RawObjective,
    #[serde(default)]
    foods: Vec<RawFood>,
    #[serde(default)]
    constraints: Vec<RawConstraint>,
}

#[derive(Debug, Default, Deserialize)]
struct RawObjective {
    sense: Option<Sense>,
    nutrient: Option<Nutrient>,
}

#[derive(Debug, Deserialize)]
struct RawFood {
    name: Option<String>,
    grams_per_unit: Option<i64>,
    minimum_intake: Option<i64>,
    maximum_intake: Option<i64>,
    energy: Option<f64>,
    protein: Option<f64>,
    fat: Option<f64>,
    carbohydrates: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawConstraint {
    min_max: Option<MinMax>,
    nutrient: Option<Nutrient>,
    unit: Option<Unit>,
    value: Option<f64>,
}

impl RawFood {
    fn read(self, index: usize) -> Result<FoodInformation, ProblemError> {
        const S: &str = "foods";
        Ok(FoodInformation {
            name: required(self.name, S, index, "name")?,
            grams_per_unit: required(self.grams_per_unit, S, index, "grams_per_unit")?,
            minimum_intake: required(self.minimum_intake, S, index, "minimum_intake")?,
            maximum_intake: required(self.maximum_intake, S, index, "maximum_intake")?,
            energy: required(self.energy, S, index, "energy")?,
            protein: required(self.protein, S, index, "protein")?,
            fat: required(self.fat, S, index, "fat")?,
            carbohydrates: required(self.carbohydrates, S, index, "carbohydrates")?,
        })
    }
}

impl RawConstraint {
    fn read(self, index: usize) -> Result<Constraint, ProblemError> {
        const S: &str = "constraints";
        Ok(Constraint {
            min_max: required(self.min_max, S, index, "min_max")?,
            nutrient: required(self.nutrient, S, index, "nutrient")?,
            unit: required(self.unit, S, index, "unit")?,
            value: required(self.value, S, index, "value")?,
        })
    }
}

impl Problem {
    /// Parses and validates a problem from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ProblemError> {
        let raw: RawProblem = toml::from_str(text)?;

        let objective = Objective {
            sense: required(raw.objective.sense, "objective", 0, "sense")?,
            nutrient: required(raw.objective.nutrient, "objective", 0, "nutrient")?,
        };
        let food_information = raw
            .foods
            .into_iter()
            .enumerate()
            .map(|(i, food)| food.read(i))
            .collect::<Result<Vec<_>, _>>()?;
        let constraints = raw
            .constraints
            .into_iter()
            .enumerate()
            .map(|(i, constraint)| constraint.read(i))
            .collect::<Result<Vec<_>, _>>()?;

        let problem = Self {
            food_information,
            objective,
            constraints,
        };
        problem.validate()?;
        Ok(problem)
    }

    /// Reads and parses a problem file.
    pub async fn load(path: &Path) -> Result<Self, ProblemError> {
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ProblemError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ProblemError> {
        if self.food_information.is_empty() {
            return invalid("At least one food must be provided.".to_string());
        }
        for food in &self.food_information {
            food.validate()?;
        }
        for constraint in &self.constraints {
            constraint.validate()?;
        }
        Ok(())
    }
}
