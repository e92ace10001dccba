//! Core type definitions for token requests.
//!
//! The shapes follow the ledger's JSON wire format:
//!
//! ```text
//! {
//!   "identifier": "<submitter DID>",          (optional for transfers)
//!   "reqId": 1,
//!   "operation": {
//!     "type": "10001",
//!     "inputs":  [["<address>", <seqNo>, "<base58 signature>"], ...],
//!     "outputs": [["<address>", <amount>], ...],
//!     ...
//!   },
//!   "signature": "...", "signatures": {...}, ...
//! }
//! ```
//!
//! Fields this crate does not know about are kept in `extra` maps and travel
//! through the signing serializer untouched.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use super::serialization::serialize_for_signing;
use crate::config::{AuthConfig, MINT_PUBLIC, XFER_PUBLIC};

// ---------------------------------------------------------------------------
// TransactionType
// ---------------------------------------------------------------------------

/// The request types this authenticator knows how to check.
///
/// Closed on purpose: every match over it is exhaustive, so a new type
/// cannot slip past the dispatcher unhandled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    /// Create new tokens. Signed once by the submitting DID.
    #[serde(rename = "10000")]
    Mint,
    /// Spend outputs. Signed per input by each input's address.
    #[serde(rename = "10001")]
    Transfer,
}

impl TransactionType {
    /// The wire code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Mint => MINT_PUBLIC,
            Self::Transfer => XFER_PUBLIC,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mint => write!(f, "MINT_PUBLIC"),
            Self::Transfer => write!(f, "XFER_PUBLIC"),
        }
    }
}

// ---------------------------------------------------------------------------
// Input / Output
// ---------------------------------------------------------------------------

type WireInput = (String, u64, String);
type WireOutput = (String, u64);

/// A spent output plus the signature authorising the spend.
///
/// On the wire: `[address, seqNo, signature]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WireInput", into = "WireInput")]
pub struct Input {
    /// Address that owns the output being spent.
    pub address: String,
    /// Sequence number of the transaction that created the output.
    pub seq_no: u64,
    /// Base58 signature over the owner's canonical view.
    pub signature: String,
}

impl Input {
    pub fn new(address: impl Into<String>, seq_no: u64, signature: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            seq_no,
            signature: signature.into(),
        }
    }

    /// The part of the input that gets signed: `(address, seqNo)`.
    pub fn signed_part(&self) -> (&str, u64) {
        (&self.address, self.seq_no)
    }
}

impl From<WireInput> for Input {
    fn from((address, seq_no, signature): WireInput) -> Self {
        Self {
            address,
            seq_no,
            signature,
        }
    }
}

impl From<Input> for WireInput {
    fn from(input: Input) -> Self {
        (input.address, input.seq_no, input.signature)
    }
}

/// A newly created output. On the wire: `[address, amount]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WireOutput", into = "WireOutput")]
pub struct Output {
    pub address: String,
    /// Amount in the token's smallest unit.
    pub amount: u64,
}

impl Output {
    pub fn new(address: impl Into<String>, amount: u64) -> Self {
        Self {
            address: address.into(),
            amount,
        }
    }
}

impl From<WireOutput> for Output {
    fn from((address, amount): WireOutput) -> Self {
        Self { address, amount }
    }
}

impl From<Output> for WireOutput {
    fn from(output: Output) -> Self {
        (output.address, output.amount)
    }
}

// ---------------------------------------------------------------------------
// Operation / Request
// ---------------------------------------------------------------------------

/// The `operation` payload of a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    #[serde(rename = "type")]
    pub txn_type: TransactionType,

    /// Spent outputs. Only transfers carry them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inputs: Vec<Input>,

    #[serde(default)]
    pub outputs: Vec<Output>,

    /// Any other operation fields (`extra`, fee hints, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Operation {
    /// `(address, signature)` for every input, in order.
    pub fn input_signatures(&self) -> Vec<(&str, &str)> {
        self.inputs
            .iter()
            .map(|i| (i.address.as_str(), i.signature.as_str()))
            .collect()
    }
}

/// A ledger write request as submitted by a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Submitter DID. Transfers may omit it; it is never part of what
    /// transfer inputs sign.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,

    #[serde(rename = "reqId")]
    pub req_id: u64,

    pub operation: Operation,

    /// Single base58 signature by `identifier`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,

    /// Multi-signature map `{identifier: base58 signature}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signatures: Option<BTreeMap<String, String>>,

    #[serde(
        rename = "protocolVersion",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub protocol_version: Option<u32>,

    /// Any other top-level fields (`fees`, `taaAcceptance`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Request {
    pub fn txn_type(&self) -> TransactionType {
        self.operation.txn_type
    }

    /// Parse a request from its JSON wire form.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Hex SHA-256 of the default signing serialization.
    ///
    /// Stable across signing (signature fields are excluded), so it works
    /// as a correlation id in logs before and after a request is signed.
    pub fn payload_digest(&self, config: &AuthConfig) -> Result<String, serde_json::Error> {
        let bytes = serialize_for_signing(self, &config.excluded_from_signing)?;
        Ok(hex::encode(Sha256::digest(&bytes)))
    }
}
