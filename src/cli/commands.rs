//! CLI Command Implementations
//!
//! Every command works on a `Model` file so that appended layers keep the
//! input layer sized correctly.

use std::path::Path;

use log::info;

use crate::error::{Result, StackError};
use crate::layers::{
    Coordinate, Coordinatewise, Layer, LayerRegistry, Model, Operation, Stack, Sum,
};

/// Create a new model file.
pub fn create(path: &Path, input_size: usize) -> Result<()> {
    info!("Creating model at: {}", path.display());

    let model = Model::with_input_size(input_size);
    model.save_file(path)?;

    println!("Model created: {}", path.display());
    println!("Input size: {}", model.input_size()?);
    Ok(())
}

/// Append a coordinatewise layer.
pub fn add_coordinatewise(
    path: &Path,
    operation: &str,
    values: Vec<f64>,
    inputs: Vec<Coordinate>,
) -> Result<()> {
    let operation = Operation::from_name(operation).ok_or_else(|| StackError::InvalidLayer {
        reason: format!("Unknown operation '{}': expected add or multiply", operation),
    })?;
    let layer = Coordinatewise::new(operation, values, inputs.into())?;
    append(path, Box::new(layer))
}

/// Append a single-output sum layer.
pub fn add_sum(path: &Path, inputs: Vec<Coordinate>) -> Result<()> {
    append(path, Box::new(Sum::new(vec![inputs.into()])))
}

fn append(path: &Path, layer: Box<dyn Layer>) -> Result<()> {
    let registry = LayerRegistry::with_defaults();
    let mut model: Model = Stack::load(path, &registry)?;

    let layer_type = layer.layer_type();
    let index = model.add_layer(layer)?;
    model.save_file(path)?;

    println!("Added {} layer at index {}", layer_type, index);
    println!("Input size: {}", model.input_size()?);
    Ok(())
}

/// Print every layer with its output coordinates.
pub fn inspect(path: &Path) -> Result<()> {
    info!("Inspecting: {}", path.display());

    let registry = LayerRegistry::with_defaults();
    let model: Model = Stack::load(path, &registry)?;

    println!("Layers: {}", model.num_layers());
    println!("{:-<60}", "");
    for index in 0..model.num_layers() {
        let layer = model.layer(index)?;
        println!(
            "{:>4}  {:<16} {}",
            index,
            layer.layer_type(),
            model.get_coordinate_list(index)?
        );
    }
    println!("{:-<60}", "");

    Ok(())
}

/// Load a model file and print its fingerprint.
pub fn verify(path: &Path) -> Result<()> {
    info!("Verifying: {}", path.display());

    let registry = LayerRegistry::with_defaults();
    let model: Model = Stack::load(path, &registry)?;

    println!(
        "OK: {} layers, format version {}",
        model.num_layers(),
        Stack::CURRENT_VERSION
    );
    println!("SHA-256: {}", model.fingerprint()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::Input;
    use tempfile::TempDir;

    #[test]
    fn test_create_and_append() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("model.json");

        create(&path, 0).unwrap();
        add_coordinatewise(
            &path,
            "scale",
            vec![2.0, 4.0],
            vec![Coordinate::new(0, 0), Coordinate::new(0, 3)],
        )
        .unwrap();
        add_sum(&path, vec![Coordinate::new(1, 0), Coordinate::new(1, 1)]).unwrap();

        let model: Model = Stack::load(&path, &LayerRegistry::with_defaults()).unwrap();
        assert_eq!(model.num_layers(), 3);
        assert_eq!(model.get_layer::<Input>(0).unwrap().size(), 4);
        assert!(model.get_layer::<Sum>(2).is_ok());

        inspect(&path).unwrap();
        verify(&path).unwrap();
    }

    #[test]
    fn test_create_with_input_size() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("model.json");

        create(&path, 3).unwrap();

        let model: Model = Stack::load(&path, &LayerRegistry::with_defaults()).unwrap();
        assert_eq!(model.input_size().unwrap(), 3);
    }

    #[test]
    fn test_unknown_operation() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("model.json");
        create(&path, 0).unwrap();

        let err = add_coordinatewise(&path, "divide", vec![1.0], vec![Coordinate::new(0, 0)])
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_LAYER");
    }

    #[test]
    fn test_append_to_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = add_sum(&temp_dir.path().join("missing.json"), vec![]).unwrap_err();
        assert!(matches!(err, StackError::FileNotFound { .. }));
    }
}
