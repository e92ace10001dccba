//! The bytes a signature covers.
//!
//! Requests are signed over a canonical JSON rendering: object keys sorted,
//! compact separators, UTF-8. `serde_json`'s default map is a `BTreeMap`, so
//! going through [`serde_json::Value`] gives us the key order for free, and
//! JSON itself keeps the encoding injective (`"a|b"` can never collide with
//! two fields the way a hand-rolled `key:value|key:value` scheme can).
//!
//! Two renderings exist:
//!
//! - [`serialize_for_signing`]: the whole request. Used for DID-signed
//!   requests such as mints.
//! - [`canonical_view`]: what a single transfer signer signs. It is built
//!   fresh from borrowed fields rather than by copying the request and
//!   deleting from the copy, so one signer's view can never leak into the
//!   next.
//!
//! Top-level keys in the configured exclusion set (signatures, fees) are
//! dropped from both.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use serde_json::{Map, Value};

use super::types::{Output, Request, TransactionType};

/// Serialize `request` for a DID signature over the whole payload.
pub fn serialize_for_signing(
    request: &Request,
    excluded: &BTreeSet<String>,
) -> Result<Vec<u8>, serde_json::Error> {
    encode(request, excluded)
}

/// The canonical view of a transfer request for `signer`.
///
/// Built from the request with:
/// 1. the top-level `identifier` left out,
/// 2. `operation.inputs` reduced to the inputs whose address is `signer`,
///    in their original order, each as `[address, seqNo]`,
/// 3. everything else unchanged.
///
/// A `signer` that owns no input still gets a valid view with an empty
/// input list. The authenticator never asks for one (it always derives
/// `signer` from an input), but wallets computing what to sign may.
pub fn canonical_view(
    request: &Request,
    signer: &str,
    excluded: &BTreeSet<String>,
) -> Result<Vec<u8>, serde_json::Error> {
    let op = &request.operation;
    let view = TransferView {
        req_id: request.req_id,
        operation: OperationView {
            txn_type: op.txn_type,
            inputs: op
                .inputs
                .iter()
                .filter(|input| input.address == signer)
                .map(|input| input.signed_part())
                .collect(),
            outputs: &op.outputs,
            extra: &op.extra,
        },
        signature: request.signature.as_deref(),
        signatures: request.signatures.as_ref(),
        protocol_version: request.protocol_version,
        extra: &request.extra,
    };
    encode(&view, excluded)
}

/// Render `value` as canonical JSON, minus the excluded top-level keys.
fn encode<T: Serialize>(
    value: &T,
    excluded: &BTreeSet<String>,
) -> Result<Vec<u8>, serde_json::Error> {
    let value = match serde_json::to_value(value)? {
        Value::Object(map) => Value::Object(sorted(
            map.into_iter().filter(|(key, _)| !excluded.contains(key)),
        )),
        other => canonicalize(other),
    };
    serde_json::to_vec(&value)
}

// Key order must not depend on whether serde_json's `preserve_order`
// feature got switched on somewhere else in the dependency graph.
fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(sorted(map.into_iter())),
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize).collect()),
        other => other,
    }
}

fn sorted(entries: impl Iterator<Item = (String, Value)>) -> Map<String, Value> {
    let mut entries: Vec<_> = entries.map(|(k, v)| (k, canonicalize(v))).collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    entries.into_iter().collect()
}

/// A transfer request as one signer sees it. No `identifier` field.
#[derive(Serialize)]
struct TransferView<'a> {
    #[serde(rename = "reqId")]
    req_id: u64,
    operation: OperationView<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    signature: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    signatures: Option<&'a BTreeMap<String, String>>,
    #[serde(rename = "protocolVersion", skip_serializing_if = "Option::is_none")]
    protocol_version: Option<u32>,
    #[serde(flatten)]
    extra: &'a Map<String, Value>,
}

#[derive(Serialize)]
struct OperationView<'a> {
    #[serde(rename = "type")]
    txn_type: TransactionType,
    inputs: Vec<(&'a str, u64)>,
    outputs: &'a [Output],
    #[serde(flatten)]
    extra: &'a Map<String, Value>,
}
