//! Layer type registry
//!
//! Maps persisted type names to factories so a stack can rebuild its
//! layers polymorphically while reading.

use std::collections::HashMap;

use super::coordinatewise::Coordinatewise;
use super::input::Input;
use super::layer::Layer;
use super::sum::Sum;
use crate::error::{Result, StackError};

/// Builds an empty, default-constructed layer to read params into
pub type LayerFactory = fn() -> Box<dyn Layer>;

/// Registry of constructible layer types
pub struct LayerRegistry {
    factories: HashMap<String, LayerFactory>,
}

impl LayerRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Create registry with all built-in layer types
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(Input::TYPE_NAME, || Box::new(Input::default()));
        registry.register(Coordinatewise::TYPE_NAME, || {
            Box::new(Coordinatewise::default())
        });
        registry.register(Sum::TYPE_NAME, || Box::new(Sum::default()));

        registry
    }

    /// Register a layer type. A later registration under the same name wins.
    pub fn register(&mut self, type_name: &str, factory: LayerFactory) {
        self.factories.insert(type_name.to_string(), factory);
    }

    /// Build an empty layer of the named type
    pub fn create(&self, type_name: &str) -> Result<Box<dyn Layer>> {
        self.factories
            .get(type_name)
            .map(|factory| factory())
            .ok_or_else(|| StackError::UnknownLayerType {
                type_name: type_name.to_string(),
            })
    }

    /// Check if a type name is registered
    pub fn has_type(&self, type_name: &str) -> bool {
        self.factories.contains_key(type_name)
    }

    /// List registered type names, sorted
    pub fn registered_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.factories.keys().map(|s| s.as_str()).collect();
        types.sort_unstable();
        types
    }
}

impl Default for LayerRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let registry = LayerRegistry::with_defaults();
        assert_eq!(
            registry.registered_types(),
            vec!["Coordinatewise", "Input", "Sum"]
        );
    }

    #[test]
    fn test_create_builds_named_type() {
        let registry = LayerRegistry::default();
        let layer = registry.create("Sum").unwrap();
        assert_eq!(layer.layer_type(), "Sum");
        assert_eq!(layer.output_dimension(), 0);
    }

    #[test]
    fn test_create_unknown_type() {
        let registry = LayerRegistry::new();
        assert!(!registry.has_type("Input"));

        let err = registry.create("Input").unwrap_err();
        assert!(matches!(err, StackError::UnknownLayerType { .. }));
    }
}
