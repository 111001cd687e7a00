use std::str::FromStr;

use caloriewise_shared::FieldErrors;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};
use validator::Validate;

#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snacks,
}

impl MealType {
    pub fn title(&self) -> &'static str {
        match self {
            MealType::Breakfast => "Breakfast",
            MealType::Lunch => "Lunch",
            MealType::Dinner => "Dinner",
            MealType::Snacks => "Snacks",
        }
    }
}

#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Default,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
)]
pub enum Unit {
    #[default]
    #[strum(serialize = "g")]
    #[serde(rename = "g")]
    Gram,
    #[strum(serialize = "cup")]
    #[serde(rename = "cup")]
    Cup,
    #[strum(serialize = "oz")]
    #[serde(rename = "oz")]
    Ounce,
    #[strum(serialize = "pcs")]
    #[serde(rename = "pcs")]
    Piece,
}

impl Unit {
    pub fn label(&self) -> &'static str {
        match self {
            Unit::Gram => "grams",
            Unit::Cup => "cups",
            Unit::Ounce => "oz",
            Unit::Piece => "pcs",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    pub id: String,
    pub name: String,
    pub quantity: String,
    pub calories: u32,
}

/// A food entry before an identifier has been minted for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewFood {
    pub name: String,
    pub quantity: String,
    pub calories: u32,
}

impl NewFood {
    pub fn with_id(self, id: impl Into<String>) -> FoodItem {
        FoodItem {
            id: id.into(),
            name: self.name,
            quantity: self.quantity,
            calories: self.calories,
        }
    }
}

pub const NAME_MESSAGE: &str = "Food name must be at least 2 characters.";
pub const QUANTITY_MESSAGE: &str = "Quantity must be a positive number.";
pub const UNIT_MESSAGE: &str = "Please select a unit.";

#[derive(Debug, Clone, Validate)]
pub struct AddFoodInput {
    #[validate(length(min = 2, message = "Food name must be at least 2 characters."))]
    pub name: String,
    #[validate(range(exclusive_min = 0.0, message = "Quantity must be a positive number."))]
    pub quantity: f64,
    pub unit: Unit,
}

impl AddFoodInput {
    /// Builds a validated input from raw form fields.
    pub fn parse(name: &str, quantity: &str, unit: &str) -> Result<Self, FieldErrors> {
        let mut fields = FieldErrors::default();

        let parsed_quantity = quantity
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|q| q.is_finite());

        let parsed_unit = Unit::from_str(unit.trim()).ok();

        let input = AddFoodInput {
            name: name.to_owned(),
            quantity: parsed_quantity.unwrap_or_default(),
            unit: parsed_unit.unwrap_or_default(),
        };

        if let Err(errors) = input.validate() {
            for (field, message) in FieldErrors::from(&errors).iter() {
                fields.insert(field, message);
            }
        }

        if parsed_quantity.is_none() {
            fields.insert("quantity", QUANTITY_MESSAGE);
        }

        if parsed_unit.is_none() {
            fields.insert("unit", UNIT_MESSAGE);
        }

        if fields.is_empty() {
            Ok(input)
        } else {
            Err(fields)
        }
    }

    /// Quantity as it is displayed and stored on the food item, e.g. "100 g".
    pub fn quantity_label(&self) -> String {
        format!("{} {}", self.quantity, self.unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meal_type_round_trips_through_tag() {
        for meal_type in MealType::VARIANTS {
            let tag = meal_type.to_string();
            assert_eq!(MealType::from_str(&tag).unwrap(), *meal_type);
            assert_eq!(tag, tag.to_lowercase());
        }

        assert!(MealType::from_str("brunch").is_err());
        assert_eq!(MealType::Snacks.title(), "Snacks");
    }

    #[test]
    fn parse_accepts_valid_form() {
        let input = AddFoodInput::parse("Apple", "100", "g").unwrap();
        assert_eq!(input.quantity_label(), "100 g");

        let input = AddFoodInput::parse("Rice", "1.5", "cup").unwrap();
        assert_eq!(input.quantity_label(), "1.5 cup");
    }

    #[test]
    fn parse_reports_every_invalid_field() {
        let fields = AddFoodInput::parse("A", "-3", "spoon").unwrap_err();

        assert_eq!(fields.get("name"), Some(NAME_MESSAGE));
        assert_eq!(fields.get("quantity"), Some(QUANTITY_MESSAGE));
        assert_eq!(fields.get("unit"), Some(UNIT_MESSAGE));
    }

    #[test]
    fn parse_rejects_non_numeric_and_non_finite_quantity() {
        for quantity in ["", "abc", "NaN", "inf", "0"] {
            let fields = AddFoodInput::parse("Apple", quantity, "pcs").unwrap_err();
            assert_eq!(fields.get("quantity"), Some(QUANTITY_MESSAGE), "{quantity}");
            assert_eq!(fields.get("name"), None);
        }
    }
}
