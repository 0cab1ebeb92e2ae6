//! Model serialization

pub mod onnx;

pub use onnx::{logistic_regression_to_onnx, Graph, ModelFile, OnnxExporter};
