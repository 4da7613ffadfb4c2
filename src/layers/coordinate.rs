//! Output addressing for layers
//!
//! A coordinate names one output element of one layer. Layers consume
//! coordinates of earlier layers as their inputs.

use std::fmt;
use std::slice;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StackError};
use crate::utilities::IteratorAdapter;

/// A single `(layer, element)` address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    /// Zero-based index of the layer in its stack
    pub layer_index: usize,
    /// Zero-based index of the element within the layer's output
    pub element_index: usize,
}

impl Coordinate {
    pub fn new(layer_index: usize, element_index: usize) -> Self {
        Self {
            layer_index,
            element_index,
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.layer_index, self.element_index)
    }
}

impl FromStr for Coordinate {
    type Err = StackError;

    /// Parse the `<layer>:<element>` text form
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || StackError::InvalidCoordinate {
            text: s.to_string(),
        };

        let (layer, element) = s.trim().split_once(':').ok_or_else(invalid)?;
        let layer_index = layer.trim().parse().map_err(|_| invalid())?;
        let element_index = element.trim().parse().map_err(|_| invalid())?;

        Ok(Self::new(layer_index, element_index))
    }
}

/// Ordered list of coordinates
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoordinateList {
    coordinates: Vec<Coordinate>,
}

impl CoordinateList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// All output coordinates of a layer: `(layer_index, 0) .. (layer_index, size - 1)`
    pub fn for_layer(layer_index: usize, size: usize) -> Self {
        (0..size)
            .map(|element_index| Coordinate::new(layer_index, element_index))
            .collect()
    }

    /// Append a coordinate
    pub fn push(&mut self, coordinate: Coordinate) {
        self.coordinates.push(coordinate);
    }

    /// Get the number of coordinates
    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    /// Check if the list is empty
    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    /// Get a coordinate by position
    pub fn get(&self, index: usize) -> Option<&Coordinate> {
        self.coordinates.get(index)
    }

    /// Iterate over coordinates
    pub fn iter(&self) -> slice::Iter<'_, Coordinate> {
        self.coordinates.iter()
    }

    /// Cursor over the whole list
    pub fn cursor(&self) -> IteratorAdapter<slice::Iter<'_, Coordinate>> {
        IteratorAdapter::new(self.coordinates.iter())
    }

    /// Largest layer index referenced, if any
    pub fn max_layer_index(&self) -> Option<usize> {
        self.coordinates.iter().map(|c| c.layer_index).max()
    }
}

impl FromIterator<Coordinate> for CoordinateList {
    fn from_iter<T: IntoIterator<Item = Coordinate>>(iter: T) -> Self {
        Self {
            coordinates: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Coordinate>> for CoordinateList {
    fn from(coordinates: Vec<Coordinate>) -> Self {
        Self { coordinates }
    }
}

impl<'a> IntoIterator for &'a CoordinateList {
    type Item = &'a Coordinate;
    type IntoIter = slice::Iter<'a, Coordinate>;

    fn into_iter(self) -> Self::IntoIter {
        self.coordinates.iter()
    }
}

impl fmt::Display for CoordinateList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.coordinates.iter().map(|c| c.to_string()).collect();
        write!(f, "[{}]", parts.join(", "))
    }
}
