//! Coordinatewise Layer
//!
//! Applies one scalar per output element to a single input coordinate,
//! e.g. a per-feature scale or shift.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::coordinate::CoordinateList;
use super::layer::{malformed, Layer};
use crate::error::{Result, StackError};
use crate::impl_layer_common;

/// Operation applied between the input value and the layer's value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    #[default]
    Add,
    Multiply,
}

impl Operation {
    /// Parse an operation name (also accepts the "shift"/"scale" aliases)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "add" | "shift" => Some(Operation::Add),
            "multiply" | "scale" => Some(Operation::Multiply),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Multiply => "multiply",
        }
    }
}

/// Element-wise add or multiply over selected input coordinates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinatewise {
    operation: Operation,
    values: Vec<f64>,
    input_coordinates: CoordinateList,
}

impl Coordinatewise {
    pub const TYPE_NAME: &'static str = "Coordinatewise";

    /// Create a coordinatewise layer
    ///
    /// # Errors
    /// Returns `StackError::InvalidLayer` if `values` and `input_coordinates`
    /// differ in length, or if any value is NaN or infinite (those cannot be
    /// persisted).
    pub fn new(
        operation: Operation,
        values: Vec<f64>,
        input_coordinates: CoordinateList,
    ) -> Result<Self> {
        if values.len() != input_coordinates.len() {
            return Err(StackError::InvalidLayer {
                reason: format!(
                    "{} values for {} input coordinates",
                    values.len(),
                    input_coordinates.len()
                ),
            });
        }
        if let Some(position) = values.iter().position(|v| !v.is_finite()) {
            return Err(StackError::InvalidLayer {
                reason: format!(
                    "value {} at position {} is not finite",
                    values[position], position
                ),
            });
        }
        Ok(Self {
            operation,
            values,
            input_coordinates,
        })
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

impl Layer for Coordinatewise {
    impl_layer_common!(Coordinatewise::TYPE_NAME);

    fn output_dimension(&self) -> usize {
        self.values.len()
    }

    fn input_coordinates(&self) -> CoordinateList {
        self.input_coordinates.clone()
    }

    fn to_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    fn from_json(&mut self, json: &Value) -> Result<()> {
        let parsed: Coordinatewise = serde_json::from_value(json.clone())
            .map_err(|e| malformed(Self::TYPE_NAME, e.to_string()))?;
        *self = Self::new(parsed.operation, parsed.values, parsed.input_coordinates)
            .map_err(|e| malformed(Self::TYPE_NAME, e.to_string()))?;
        Ok(())
    }
}
