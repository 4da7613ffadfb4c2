//! Layer trait definition
//!
//! Base capability for every unit a stack can hold.

use std::any::Any;

use serde_json::Value;

use super::coordinate::CoordinateList;
use crate::error::{Result, StackError};

/// Base trait for all layers
///
/// Layers are opaque to the stack. It only needs the type name (for
/// polymorphic reconstruction), the output dimension (for coordinates) and
/// the JSON hooks. Concrete layers must also implement `Default` so that a
/// `LayerRegistry` factory can build an empty instance to read into.
pub trait Layer: Send + Sync {
    /// Get the stable type identifier written to persisted stacks
    fn layer_type(&self) -> &'static str;

    /// Number of output elements this layer produces
    fn output_dimension(&self) -> usize;

    /// Coordinates of earlier layers this layer consumes
    fn input_coordinates(&self) -> CoordinateList {
        CoordinateList::new()
    }

    /// Serialize layer parameters to JSON
    fn to_json(&self) -> Result<Value>;

    /// Deserialize layer parameters from JSON
    fn from_json(&mut self, json: &Value) -> Result<()>;

    /// View as `Any` for typed retrieval
    fn as_any(&self) -> &dyn Any;

    /// Mutable view as `Any`
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl std::fmt::Debug for dyn Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Layer")
            .field("type", &self.layer_type())
            .field("output_dimension", &self.output_dimension())
            .finish()
    }
}

/// Build the error for a missing or mistyped field in a layer's params
pub(crate) fn malformed(type_name: &str, reason: impl Into<String>) -> StackError {
    StackError::MalformedLayer {
        type_name: type_name.to_string(),
        reason: reason.into(),
    }
}

/// Helper macro to implement common Layer trait methods
#[macro_export]
macro_rules! impl_layer_common {
    ($type_name:expr) => {
        fn layer_type(&self) -> &'static str {
            $type_name
        }

        fn as_any(&self) -> &dyn ::std::any::Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
            self
        }
    };
}
