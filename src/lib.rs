//! Layer Stack - runtime container for feed-forward layer stacks
//!
//! A `Stack` owns an ordered sequence of heterogeneous layers. Index 0 is
//! always the input layer; later layers consume the output coordinates of
//! earlier ones.
//!
//! # Architecture
//!
//! - `layers`: the `Layer` capability, coordinates, the owning `Stack`, the
//!   `Model` extension and the `LayerRegistry` used to rebuild layers by
//!   type name
//! - `utilities`: the `Cursor` abstraction for walking ranges lazily
//! - `cli`: command-line front end
//!
//! ```
//! use layer_stack::layers::{CoordinateList, LayerRegistry, Stack, Sum};
//!
//! let mut stack = Stack::with_input_size(3);
//! let index = stack.add_layer(Box::new(Sum::new(vec![CoordinateList::for_layer(0, 3)])));
//! assert_eq!(index, 1);
//!
//! let mut buffer = Vec::new();
//! stack.save(&mut buffer).unwrap();
//!
//! let restored: Stack =
//!     Stack::load_from_reader(buffer.as_slice(), &LayerRegistry::with_defaults()).unwrap();
//! assert_eq!(restored.num_layers(), 2);
//! assert!(restored.get_layer::<Sum>(1).is_ok());
//! ```

pub mod cli;
pub mod error;
pub mod layers;
pub mod utilities;

pub use error::{Result, StackError};
pub use layers::{Layer, LayerRegistry, Model, Stack, StackType};
