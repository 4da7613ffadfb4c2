//! Sum Layer
//!
//! Each output element is the sum of one group of input coordinates.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::coordinate::CoordinateList;
use super::layer::{malformed, Layer};
use crate::error::Result;
use crate::impl_layer_common;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sum {
    input_coordinates: Vec<CoordinateList>,
}

impl Sum {
    pub const TYPE_NAME: &'static str = "Sum";

    /// Create a sum layer with one output per group
    pub fn new(input_coordinates: Vec<CoordinateList>) -> Self {
        Self { input_coordinates }
    }

    /// Input coordinates summed into output `index`
    pub fn group(&self, index: usize) -> Option<&CoordinateList> {
        self.input_coordinates.get(index)
    }
}

impl Layer for Sum {
    impl_layer_common!(Sum::TYPE_NAME);

    fn output_dimension(&self) -> usize {
        self.input_coordinates.len()
    }

    fn input_coordinates(&self) -> CoordinateList {
        self.input_coordinates
            .iter()
            .flat_map(|group| group.iter().copied())
            .collect()
    }

    fn to_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    fn from_json(&mut self, json: &Value) -> Result<()> {
        *self = serde_json::from_value(json.clone())
            .map_err(|e| malformed(Self::TYPE_NAME, e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::Coordinate;

    #[test]
    fn test_sum_dimension_and_inputs() {
        let layer = Sum::new(vec![
            CoordinateList::for_layer(0, 3),
            CoordinateList::for_layer(1, 2),
        ]);

        assert_eq!(layer.output_dimension(), 2);
        assert_eq!(layer.group(1).map(|g| g.len()), Some(2));

        let inputs = layer.input_coordinates();
        assert_eq!(inputs.len(), 5);
        assert_eq!(inputs.get(4), Some(&Coordinate::new(1, 1)));
    }

    #[test]
    fn test_to_from_json() {
        let original = Sum::new(vec![CoordinateList::for_layer(0, 2)]);
        let json = original.to_json().unwrap();

        let mut restored = Sum::default();
        restored.from_json(&json).unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn test_from_json_malformed() {
        let mut layer = Sum::default();
        let err = layer
            .from_json(&serde_json::json!({ "input_coordinates": 5 }))
            .unwrap_err();
        assert_eq!(err.error_code(), "MALFORMED_LAYER");
    }
}
