//! Input Layer
//!
//! Always sits at index 0 of a stack. It has no inputs of its own; its
//! size is the number of values the stack expects from the caller.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::layer::{malformed, Layer};
use crate::error::Result;
use crate::impl_layer_common;

/// Placeholder for the values fed into a stack
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Input {
    size: usize,
}

impl Input {
    pub const TYPE_NAME: &'static str = "Input";

    /// Create an input layer with `size` elements
    pub fn new(size: usize) -> Self {
        Self { size }
    }

    /// Get the number of input elements
    pub fn size(&self) -> usize {
        self.size
    }

    /// Grow to at least `min_size` elements. Never shrinks.
    pub fn increase_size(&mut self, min_size: usize) {
        if min_size > self.size {
            self.size = min_size;
        }
    }
}

impl Layer for Input {
    impl_layer_common!(Input::TYPE_NAME);

    fn output_dimension(&self) -> usize {
        self.size
    }

    fn to_json(&self) -> Result<Value> {
        Ok(json!({ "size": self.size }))
    }

    fn from_json(&mut self, json: &Value) -> Result<()> {
        let size = json
            .get("size")
            .and_then(|v| v.as_u64())
            .ok_or_else(|| malformed(Self::TYPE_NAME, "missing unsigned integer 'size'"))?;
        self.size = usize::try_from(size)
            .map_err(|_| malformed(Self::TYPE_NAME, format!("size {} is too large", size)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_default_is_empty() {
        let input = Input::default();
        assert_eq!(input.size(), 0);
        assert_eq!(input.output_dimension(), 0);
        assert_eq!(input.layer_type(), "Input");
    }

    #[test]
    fn test_increase_size() {
        let mut input = Input::new(2);
        input.increase_size(5);
        assert_eq!(input.size(), 5);

        // Smaller requests leave the size alone
        input.increase_size(3);
        assert_eq!(input.size(), 5);
    }

    #[test]
    fn test_to_from_json() {
        let original = Input::new(7);
        let json = original.to_json().unwrap();

        let mut restored = Input::default();
        restored.from_json(&json).unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn test_from_json_large_size() {
        let mut input = Input::default();
        let result = input.from_json(&json!({ "size": u64::MAX }));

        if usize::BITS >= 64 {
            assert_eq!(input.size(), usize::MAX);
        } else {
            assert_eq!(result.unwrap_err().error_code(), "MALFORMED_LAYER");
        }
    }

    #[test]
    fn test_from_json_missing_size() {
        let mut input = Input::default();
        let err = input.from_json(&json!({ "width": 3 })).unwrap_err();
        assert_eq!(err.error_code(), "MALFORMED_LAYER");
    }
}
