//! Portable model export
//!
//! Builds an ONNX-style tensor graph for a fitted classifier and writes a
//! single-file JSON rendition with inline float32 weights. The graph is
//! sized to the feature width the model was trained on, with a dynamic
//! batch dimension.

use crate::error::{Result, StepError};
use crate::training::LogisticRegression;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Tensor element types, numbered as ONNX numbers them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataKind {
    Float = 1,
    Int64 = 7,
}

/// One dimension of a tensor shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Dim {
    Fixed(i64),
    Dynamic(String),
}

/// Typed tensor declaration for a graph input or output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TensorSpec {
    pub name: String,
    pub kind: DataKind,
    pub shape: Vec<Dim>,
}

impl TensorSpec {
    pub fn float(name: impl Into<String>, shape: Vec<Dim>) -> Self {
        Self {
            name: name.into(),
            kind: DataKind::Float,
            shape,
        }
    }
}

/// An operator node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    pub op_type: String,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
}

impl Node {
    pub fn new(
        name: impl Into<String>,
        op_type: impl Into<String>,
        inputs: Vec<String>,
        outputs: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            op_type: op_type.into(),
            inputs,
            outputs,
        }
    }
}

/// A constant tensor with inline float32 data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Initializer {
    pub name: String,
    pub dims: Vec<i64>,
    pub data: Vec<f32>,
}

impl Initializer {
    pub fn float(name: impl Into<String>, dims: Vec<i64>, data: Vec<f32>) -> Self {
        Self {
            name: name.into(),
            dims,
            data,
        }
    }
}

/// The tensor graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Graph {
    pub name: String,
    pub inputs: Vec<TensorSpec>,
    pub outputs: Vec<TensorSpec>,
    pub nodes: Vec<Node>,
    pub initializers: Vec<Initializer>,
}

impl Graph {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            nodes: Vec::new(),
            initializers: Vec::new(),
        }
    }
}

/// Top-level model file layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelFile {
    pub ir_version: i64,
    pub opset_version: i64,
    pub producer_name: String,
    pub producer_version: String,
    pub graph: Graph,
}

/// Writes tensor graphs to disk
pub struct OnnxExporter {
    opset_version: i64,
    producer_name: String,
}

impl Default for OnnxExporter {
    fn default() -> Self {
        Self {
            opset_version: 15,
            producer_name: "tabular-steps".to_string(),
        }
    }
}

impl OnnxExporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize the graph to a single JSON file, creating parent
    /// directories as needed
    pub fn export(&self, graph: Graph, path: impl AsRef<Path>) -> Result<()> {
        let model = ModelFile {
            ir_version: 8,
            opset_version: self.opset_version,
            producer_name: self.producer_name.clone(),
            producer_version: env!("CARGO_PKG_VERSION").to_string(),
            graph,
        };

        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path.as_ref())
            .map_err(|e| StepError::ExportError(format!("{}: {e}", path.as_ref().display())))?;
        let writer = BufWriter::new(file);

        serde_json::to_writer_pretty(writer, &model)
            .map_err(|e| StepError::ExportError(e.to_string()))?;
        Ok(())
    }
}

/// Build the MatMul → Add → Sigmoid graph for a fitted logistic model.
/// The input tensor is `[batch, n_features]`; the output is the
/// positive-class probability per row.
pub fn logistic_regression_to_onnx(model: &LogisticRegression) -> Result<Graph> {
    let coefficients = model
        .coefficients
        .as_ref()
        .ok_or(StepError::ModelNotFitted)?;
    let intercept = model.intercept.ok_or(StepError::ModelNotFitted)?;
    let n_features = coefficients.len() as i64;

    let mut graph = Graph::new("logistic_regression");

    graph.inputs.push(TensorSpec::float(
        "float_input",
        vec![Dim::Dynamic("batch".to_string()), Dim::Fixed(n_features)],
    ));
    graph.outputs.push(TensorSpec::float(
        "probabilities",
        vec![Dim::Dynamic("batch".to_string()), Dim::Fixed(1)],
    ));

    graph.initializers.push(Initializer::float(
        "coefficients",
        vec![n_features, 1],
        coefficients.iter().map(|&w| w as f32).collect(),
    ));
    graph.initializers.push(Initializer::float(
        "intercept",
        vec![1],
        vec![intercept as f32],
    ));

    graph.nodes.push(Node::new(
        "matmul",
        "MatMul",
        vec!["float_input".to_string(), "coefficients".to_string()],
        vec!["linear".to_string()],
    ));
    graph.nodes.push(Node::new(
        "add",
        "Add",
        vec!["linear".to_string(), "intercept".to_string()],
        vec!["logits".to_string()],
    ));
    graph.nodes.push(Node::new(
        "sigmoid",
        "Sigmoid",
        vec!["logits".to_string()],
        vec!["probabilities".to_string()],
    ));

    Ok(graph)
}
