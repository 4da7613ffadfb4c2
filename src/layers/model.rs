//! Model
//!
//! A stack that keeps its input layer large enough for the layers added
//! to it. When a new layer reads input element `k`, the input layer grows
//! to at least `k + 1` elements before the layer is appended.

use std::io::Write;
use std::ops::Deref;
use std::path::Path;

use super::layer::Layer;
use super::registry::LayerRegistry;
use super::stack::{
    fingerprint_document, save_document, save_document_to_file, Stack, StackDocument, StackType,
};
use crate::error::{Result, StackError};
use crate::utilities::Cursor;

/// Stack extension that sizes the input layer from layer inputs
///
/// Read-only queries go through `Deref<Target = Stack>`.
#[derive(Debug, Default)]
pub struct Model {
    stack: Stack,
}

impl Model {
    pub const TYPE_NAME: &'static str = "Model";

    /// Create a model with an empty input layer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a model whose input layer starts with `size` elements
    pub fn with_input_size(size: usize) -> Self {
        Self {
            stack: Stack::with_input_size(size),
        }
    }

    /// Append a layer, growing the input layer to cover its inputs
    ///
    /// # Errors
    /// - `IndexOutOfRange` if the layer reads from a layer that is not
    ///   already in the model
    /// - `InvalidLayer` if an input element index is too large to size the
    ///   input layer for
    ///
    /// The model is unchanged on error.
    pub fn add_layer(&mut self, layer: Box<dyn Layer>) -> Result<usize> {
        let num_layers = self.stack.num_layers();
        let inputs = layer.input_coordinates();

        if let Some(layer_index) = inputs.max_layer_index() {
            if layer_index >= num_layers {
                return Err(StackError::IndexOutOfRange {
                    index: layer_index,
                    num_layers,
                });
            }
        }

        let mut required_input_size: usize = 0;
        let mut cursor = inputs.cursor();
        while cursor.is_valid() {
            let coordinate = cursor.get()?;
            if coordinate.layer_index == 0 {
                let size = coordinate.element_index.checked_add(1).ok_or_else(|| {
                    StackError::InvalidLayer {
                        reason: format!("input coordinate {} is out of range", coordinate),
                    }
                })?;
                required_input_size = required_input_size.max(size);
            }
            cursor.next();
        }

        self.stack.increase_input_layer_size(required_input_size)?;
        Ok(self.stack.add_layer(layer))
    }

    /// Serialize the model into a document
    pub fn write(&self) -> Result<StackDocument> {
        self.stack.write_as(Self::TYPE_NAME)
    }

    /// Save the model as JSON to `writer`
    pub fn save<W: Write>(&self, writer: W) -> Result<()> {
        save_document(&self.write()?, writer)
    }

    /// Save the model to a file, replacing any existing file
    pub fn save_file(&self, path: &Path) -> Result<()> {
        save_document_to_file(&self.write()?, path)
    }

    /// SHA-256 of the saved bytes, as lowercase hex
    pub fn fingerprint(&self) -> Result<String> {
        fingerprint_document(&self.write()?)
    }
}

impl Deref for Model {
    type Target = Stack;

    fn deref(&self) -> &Stack {
        &self.stack
    }
}

impl StackType for Model {
    fn type_name() -> &'static str {
        Self::TYPE_NAME
    }

    fn read(&mut self, document: &StackDocument, registry: &LayerRegistry) -> Result<()> {
        self.stack.read_as(document, registry, Self::TYPE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::{Coordinate, CoordinateList, Coordinatewise, Input, Operation, Sum};

    #[test]
    fn test_add_layer_grows_input() {
        let mut model = Model::new();
        let inputs: CoordinateList = vec![Coordinate::new(0, 4), Coordinate::new(0, 1)].into();
        let layer = Coordinatewise::new(Operation::Add, vec![1.0, 1.0], inputs).unwrap();

        let index = model.add_layer(Box::new(layer)).unwrap();
        assert_eq!(index, 1);
        assert_eq!(model.input_size().unwrap(), 5);
    }

    #[test]
    fn test_add_layer_never_shrinks_input() {
        let mut model = Model::new();
        model
            .add_layer(Box::new(Sum::new(vec![CoordinateList::for_layer(0, 6)])))
            .unwrap();
        model
            .add_layer(Box::new(Sum::new(vec![CoordinateList::for_layer(0, 2)])))
            .unwrap();

        assert_eq!(model.get_layer::<Input>(0).unwrap().size(), 6);
        assert_eq!(model.num_layers(), 3);
    }

    #[test]
    fn test_add_layer_from_later_layer_fails() {
        let mut model = Model::new();
        let layer = Sum::new(vec![CoordinateList::for_layer(3, 1)]);

        let err = model.add_layer(Box::new(layer)).unwrap_err();
        assert!(matches!(err, StackError::IndexOutOfRange { index: 3, .. }));
        assert_eq!(model.num_layers(), 1);
        assert_eq!(model.input_size().unwrap(), 0);
    }

    #[test]
    fn test_add_layer_with_largest_element_index_fails() {
        let mut model = Model::new();
        let inputs: CoordinateList = vec![Coordinate::new(0, usize::MAX)].into();

        let err = model.add_layer(Box::new(Sum::new(vec![inputs]))).unwrap_err();
        assert!(matches!(err, StackError::InvalidLayer { .. }));
        assert_eq!(model.num_layers(), 1);
        assert_eq!(model.input_size().unwrap(), 0);
    }

    #[test]
    fn test_inputs_from_hidden_layers_do_not_grow_input() {
        let mut model = Model::new();
        model
            .add_layer(Box::new(Sum::new(vec![CoordinateList::for_layer(0, 2)])))
            .unwrap();
        model
            .add_layer(Box::new(Sum::new(vec![CoordinateList::for_layer(1, 1)])))
            .unwrap();

        assert_eq!(model.input_size().unwrap(), 2);
    }

    #[test]
    fn test_model_round_trip() {
        let mut model = Model::new();
        model
            .add_layer(Box::new(Sum::new(vec![CoordinateList::for_layer(0, 3)])))
            .unwrap();

        let mut buffer = Vec::new();
        model.save(&mut buffer).unwrap();

        let registry = LayerRegistry::with_defaults();
        let restored: Model = Stack::load_from_reader(buffer.as_slice(), &registry).unwrap();
        assert_eq!(restored.num_layers(), 2);
        assert_eq!(restored.input_size().unwrap(), 3);
        assert_eq!(restored.fingerprint().unwrap(), model.fingerprint().unwrap());
    }

    #[test]
    fn test_plain_stack_document_is_not_a_model() {
        let document = Stack::new().write().unwrap();
        let mut model = Model::new();
        let err = model
            .read(&document, &LayerRegistry::with_defaults())
            .unwrap_err();
        assert!(matches!(err, StackError::StackTypeMismatch { .. }));
    }
}
