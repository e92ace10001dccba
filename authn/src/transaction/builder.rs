//! Request construction via the builder pattern.
//!
//! The builder never signs. Transfer inputs are created with an empty
//! signature slot that [`super::signing::sign_transfer_inputs`] fills in
//! later, which keeps construction testable without key material.

use serde_json::{Map, Value};

use super::types::{Input, Operation, Output, Request, TransactionType};

/// Fluent builder for unsigned [`Request`]s.
///
/// # Example
///
/// ```
/// use token_authn::transaction::{RequestBuilder, TransactionType};
///
/// let req = RequestBuilder::transfer()
///     .req_id(7)
///     .input("addrA", 1)
///     .output("addrB", 50)
///     .build();
/// assert_eq!(req.txn_type(), TransactionType::Transfer);
/// assert!(req.operation.inputs[0].signature.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    txn_type: TransactionType,
    identifier: Option<String>,
    req_id: u64,
    inputs: Vec<Input>,
    outputs: Vec<Output>,
    protocol_version: Option<u32>,
    operation_extra: Map<String, Value>,
    extra: Map<String, Value>,
}

impl RequestBuilder {
    pub fn new(txn_type: TransactionType) -> Self {
        Self {
            txn_type,
            identifier: None,
            req_id: 0,
            inputs: Vec::new(),
            outputs: Vec::new(),
            protocol_version: None,
            operation_extra: Map::new(),
            extra: Map::new(),
        }
    }

    pub fn mint() -> Self {
        Self::new(TransactionType::Mint)
    }

    pub fn transfer() -> Self {
        Self::new(TransactionType::Transfer)
    }

    pub fn identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    pub fn req_id(mut self, req_id: u64) -> Self {
        self.req_id = req_id;
        self
    }

    /// Spend output `seq_no` owned by `address`. The signature is left empty.
    pub fn input(mut self, address: impl Into<String>, seq_no: u64) -> Self {
        self.inputs.push(Input::new(address, seq_no, String::new()));
        self
    }

    pub fn output(mut self, address: impl Into<String>, amount: u64) -> Self {
        self.outputs.push(Output::new(address, amount));
        self
    }

    pub fn protocol_version(mut self, version: u32) -> Self {
        self.protocol_version = Some(version);
        self
    }

    /// Set an extra field inside `operation`.
    pub fn operation_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.operation_extra.insert(key.into(), value);
        self
    }

    /// Set an extra top-level field.
    pub fn field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    pub fn build(self) -> Request {
        Request {
            identifier: self.identifier,
            req_id: self.req_id,
            operation: Operation {
                txn_type: self.txn_type,
                inputs: self.inputs,
                outputs: self.outputs,
                extra: self.operation_extra,
            },
            signature: None,
            signatures: None,
            protocol_version: self.protocol_version,
            extra: self.extra,
        }
    }
}
