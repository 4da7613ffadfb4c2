//! Layer Stack Module
//!
//! Layers, their coordinates, and the owning stack that holds them:
//! - `Stack`: ordered, owning collection with typed access and persistence
//! - `Model`: stack extension that sizes the input layer automatically
//! - `LayerRegistry`: type name to factory map used when reading

mod coordinate;
mod coordinatewise;
mod input;
mod layer;
mod model;
mod registry;
mod stack;
mod sum;

pub use coordinate::{Coordinate, CoordinateList};
pub use coordinatewise::{Coordinatewise, Operation};
pub use input::Input;
pub use layer::Layer;
pub use model::Model;
pub use registry::{LayerFactory, LayerRegistry};
pub use stack::{LayerRecord, Stack, StackDocument, StackType};
pub use sum::Sum;
