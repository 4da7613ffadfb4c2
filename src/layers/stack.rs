//! Layer Stack
//!
//! An insertion-ordered, owning sequence of layers. Index 0 always holds
//! the `Input` layer created with the stack; every later layer is appended
//! and never moves.
//!
//! Persisted form:
//! ```text
//! { "type": "Stack", "version": 1,
//!   "layers": [ { "type": "Input", "params": { "size": 3 } }, ... ] }
//! ```

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

use super::coordinate::CoordinateList;
use super::input::Input;
use super::layer::Layer;
use super::registry::LayerRegistry;
use crate::error::{Result, StackError};

/// One persisted layer: its runtime type name and its own params
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerRecord {
    #[serde(rename = "type")]
    pub layer_type: String,
    pub params: Value,
}

/// Root of a persisted stack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackDocument {
    /// Type name of the stack that wrote the document
    #[serde(rename = "type")]
    pub stack_type: String,
    /// Format version tag
    pub version: u32,
    /// Layers in insertion order
    pub layers: Vec<LayerRecord>,
}

/// A stack type that can be the target of [`Stack::load`]
pub trait StackType: Default {
    /// Stable identifier written at the document root
    fn type_name() -> &'static str;

    /// Replace the contents of `self` with the layers in `document`
    fn read(&mut self, document: &StackDocument, registry: &LayerRegistry) -> Result<()>;
}

/// Owning stack of layers
///
/// Not `Clone`: each layer has exactly one owner. Moving a stack moves its
/// layers with it.
#[derive(Debug)]
pub struct Stack {
    layers: Vec<Box<dyn Layer>>,
}

impl Stack {
    /// Version tag written by `write` and required by `read`
    pub const CURRENT_VERSION: u32 = 1;

    pub const TYPE_NAME: &'static str = "Stack";

    /// Create a stack holding a single, empty input layer
    pub fn new() -> Self {
        Self::with_input_size(0)
    }

    /// Create a stack whose input layer starts with `size` elements
    pub fn with_input_size(size: usize) -> Self {
        let input: Box<dyn Layer> = Box::new(Input::new(size));
        Self {
            layers: vec![input],
        }
    }

    /// Get the name of this type (for serialization)
    pub fn type_name() -> &'static str {
        Self::TYPE_NAME
    }

    /// Append a layer
    ///
    /// No shape or coordinate checks are made here.
    ///
    /// # Returns
    /// The index of the newly added layer
    pub fn add_layer(&mut self, layer: Box<dyn Layer>) -> usize {
        let index = self.layers.len();
        debug!("Adding '{}' layer at index {}", layer.layer_type(), index);
        self.layers.push(layer);
        index
    }

    /// Get the number of layers in the stack
    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    /// Get a layer through the base capability
    pub fn layer(&self, index: usize) -> Result<&dyn Layer> {
        self.layers
            .get(index)
            .map(|l| l.as_ref())
            .ok_or(StackError::IndexOutOfRange {
                index,
                num_layers: self.layers.len(),
            })
    }

    /// Get a layer as its concrete type
    ///
    /// # Errors
    /// - `IndexOutOfRange` if `index >= num_layers()`
    /// - `TypeMismatch` if the stored layer is not an `L`
    pub fn get_layer<L: Layer + 'static>(&self, index: usize) -> Result<&L> {
        let layer = self.layer(index)?;
        layer
            .as_any()
            .downcast_ref::<L>()
            .ok_or_else(|| StackError::TypeMismatch {
                index,
                expected: short_type_name::<L>(),
                actual: layer.layer_type().to_string(),
            })
    }

    /// Get the list of output coordinates of a layer
    pub fn get_coordinate_list(&self, index: usize) -> Result<CoordinateList> {
        let layer = self.layer(index)?;
        Ok(CoordinateList::for_layer(index, layer.output_dimension()))
    }

    /// Iterate over layers in order
    pub fn iter(&self) -> impl Iterator<Item = &dyn Layer> {
        self.layers.iter().map(|l| l.as_ref())
    }

    /// Get the current size of the input layer
    pub fn input_size(&self) -> Result<usize> {
        self.get_layer::<Input>(0).map(Input::size)
    }

    /// Grow the input layer to at least `min_size` elements
    ///
    /// Only extensions of the stack (such as `Model`) may call this.
    pub(crate) fn increase_input_layer_size(&mut self, min_size: usize) -> Result<()> {
        let num_layers = self.layers.len();
        let layer = self
            .layers
            .first_mut()
            .ok_or(StackError::IndexOutOfRange {
                index: 0,
                num_layers,
            })?;
        let actual = layer.layer_type().to_string();
        let input = layer
            .as_any_mut()
            .downcast_mut::<Input>()
            .ok_or(StackError::TypeMismatch {
                index: 0,
                expected: Input::TYPE_NAME,
                actual,
            })?;

        if min_size > input.size() {
            debug!("Growing input layer from {} to {}", input.size(), min_size);
            input.increase_size(min_size);
        }
        Ok(())
    }

    /// Serialize the stack into a document
    pub fn write(&self) -> Result<StackDocument> {
        self.write_as(Self::TYPE_NAME)
    }

    pub(crate) fn write_as(&self, stack_type: &str) -> Result<StackDocument> {
        let layers = self
            .layers
            .iter()
            .map(|layer| {
                Ok(LayerRecord {
                    layer_type: layer.layer_type().to_string(),
                    params: layer.to_json()?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(StackDocument {
            stack_type: stack_type.to_string(),
            version: Self::CURRENT_VERSION,
            layers,
        })
    }

    /// Save the stack as JSON to `writer`
    pub fn save<W: Write>(&self, writer: W) -> Result<()> {
        save_document(&self.write()?, writer)
    }

    /// Save the stack to a file, replacing any existing file
    pub fn save_file(&self, path: &Path) -> Result<()> {
        save_document_to_file(&self.write()?, path)
    }

    /// SHA-256 of the saved bytes, as lowercase hex
    pub fn fingerprint(&self) -> Result<String> {
        fingerprint_document(&self.write()?)
    }

    /// Read a stack from a document, replacing the current contents
    ///
    /// On failure the stack is left empty and every indexed query fails.
    pub fn read(&mut self, document: &StackDocument, registry: &LayerRegistry) -> Result<()> {
        self.read_as(document, registry, Self::TYPE_NAME)
    }

    pub(crate) fn read_as(
        &mut self,
        document: &StackDocument,
        registry: &LayerRegistry,
        expected_type: &str,
    ) -> Result<()> {
        self.layers.clear();

        if document.version != Self::CURRENT_VERSION {
            warn!(
                "Rejecting stack document with version {} (expected {})",
                document.version,
                Self::CURRENT_VERSION
            );
            return Err(StackError::VersionMismatch {
                found: document.version,
                expected: Self::CURRENT_VERSION,
            });
        }

        if document.stack_type != expected_type {
            warn!(
                "Rejecting '{}' document where a '{}' was expected",
                document.stack_type, expected_type
            );
            return Err(StackError::StackTypeMismatch {
                found: document.stack_type.clone(),
                expected: expected_type.to_string(),
            });
        }

        let mut layers = Vec::with_capacity(document.layers.len());
        for (index, record) in document.layers.iter().enumerate() {
            let mut layer = registry.create(&record.layer_type)?;
            layer.from_json(&record.params)?;

            if index == 0 && layer.as_any().downcast_ref::<Input>().is_none() {
                return Err(StackError::MalformedLayer {
                    type_name: record.layer_type.clone(),
                    reason: "the first layer must be an Input layer".to_string(),
                });
            }
            layers.push(layer);
        }

        if layers.is_empty() {
            return Err(StackError::MalformedLayer {
                type_name: Input::TYPE_NAME.to_string(),
                reason: "document contains no layers".to_string(),
            });
        }

        debug!("Read {} layers into '{}'", layers.len(), expected_type);
        self.layers = layers;
        Ok(())
    }

    /// Load a stack of type `S` from a reader
    pub fn load_from_reader<S: StackType, R: io::Read>(
        reader: R,
        registry: &LayerRegistry,
    ) -> Result<S> {
        let document: StackDocument = serde_json::from_reader(reader)?;
        let mut stack = S::default();
        stack.read(&document, registry)?;
        Ok(stack)
    }

    /// Load a stack of type `S` from a file
    ///
    /// # Errors
    /// - `FileNotFound` if the path does not exist
    /// - `Io` if it cannot be opened
    /// - `Serialization`, `VersionMismatch` or a layer error if reading fails
    pub fn load<S: StackType>(path: &Path, registry: &LayerRegistry) -> Result<S> {
        let file = File::open(path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                StackError::FileNotFound {
                    path: path.to_path_buf(),
                    source: e,
                }
            } else {
                StackError::Io(e)
            }
        })?;

        let stack = Self::load_from_reader::<S, _>(BufReader::new(file), registry)?;
        info!("Loaded {} from {}", S::type_name(), path.display());
        Ok(stack)
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}

impl StackType for Stack {
    fn type_name() -> &'static str {
        Self::TYPE_NAME
    }

    fn read(&mut self, document: &StackDocument, registry: &LayerRegistry) -> Result<()> {
        Stack::read(self, document, registry)
    }
}

/// Type name without its module path, e.g. `Sum` for `layer_stack::layers::sum::Sum`
fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

pub(crate) fn save_document<W: Write>(document: &StackDocument, writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, document)?;
    Ok(())
}

pub(crate) fn save_document_to_file(document: &StackDocument, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    save_document(document, &mut writer)?;
    writer.flush()?;

    info!(
        "Saved {} layers to {}",
        document.layers.len(),
        path.display()
    );
    Ok(())
}

pub(crate) fn fingerprint_document(document: &StackDocument) -> Result<String> {
    let mut bytes = Vec::new();
    save_document(document, &mut bytes)?;

    let hash = Sha256::digest(&bytes);
    Ok(format!("{:x}", hash))
}
