// File: client/src/operation/mod.rs
//! Management operations as JSON documents
//!
//! An operation is a plain `serde_json::Value` on the wire:
//!
//! ```text
//! {
//!   "operation": "add",
//!   "address": [{"subsystem": "datasources"}, {"xa-data-source": "ExampleDS"}],
//!   "jndi-name": "java:jboss/datasources/ExampleDS",
//!   ...
//! }
//! ```
//!
//! The types here only help build such documents. The transport never looks
//! inside them.

pub mod address;
pub mod response;

use serde::Serialize;
use serde_json::{json, Map, Value};

pub use address::Address;
pub use response::{ModelResponse, Outcome};

/// Binary side-channel data sent alongside an operation (e.g. deployment content)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub data: Vec<u8>,
}

impl Attachment {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self { data: data.into() }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    document: Value,
    attachments: Vec<Attachment>,
}

impl Operation {
    pub fn new(name: &str, address: &Address) -> Self {
        Self::from_document(json!({
            "operation": name,
            "address": address,
        }))
    }

    pub fn from_document(document: Value) -> Self {
        Self {
            document,
            attachments: Vec::new(),
        }
    }

    /// Add a parameter. Non-object documents are left untouched.
    pub fn with_param(mut self, key: &str, value: impl Into<Value>) -> Self {
        if let Some(fields) = self.document.as_object_mut() {
            fields.insert(key.to_string(), value.into());
        }
        self
    }

    /// Merge every field of a serialized parameter record into the document
    pub fn with_params(mut self, params: Map<String, Value>) -> Self {
        if let Some(fields) = self.document.as_object_mut() {
            fields.extend(params);
        }
        self
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.document.get("operation").and_then(Value::as_str)
    }

    pub fn document(&self) -> &Value {
        &self.document
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    pub fn into_document(self) -> Value {
        self.document
    }
}

impl From<Value> for Operation {
    fn from(document: Value) -> Self {
        Self::from_document(document)
    }
}

/// Steps executed atomically by the server as one `composite` operation
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Batch {
    steps: Vec<Value>,
}

impl Batch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, operation: Operation) -> &mut Self {
        self.steps.push(operation.into_document());
        self
    }

    /// Shorthand for an operation without parameters
    pub fn invoke(&mut self, name: &str, address: &Address) -> &mut Self {
        self.add(Operation::new(name, address))
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn into_operation(self) -> Operation {
        Operation::new("composite", &Address::root()).with_param("steps", Value::Array(self.steps))
    }
}
