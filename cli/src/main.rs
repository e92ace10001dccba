// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Token Authenticator CLI
//!
//! Entry point for the `token-authn` binary. Parses CLI arguments,
//! initializes logging, and runs one of:
//!
//! - `verify`        - authenticate a request, print who signed it
//! - `signing-bytes` - print the bytes an identifier must sign
//! - `sign`          - sign a request with local seeds
//! - `keygen`        - generate a keypair
//!
//! Command output is JSON on stdout. Logs go to stderr.

mod cli;
mod logging;

use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde_json::{json, Value};

use token_authn::auth::TokenAuthenticator;
use token_authn::config::AuthConfig;
use token_authn::crypto::SigningKeypair;
use token_authn::identity::MemoryKeyRegistry;
use token_authn::transaction::{
    add_request_signature, sign_request, sign_transfer_inputs, Request, TransactionType,
};

use cli::{Commands, SignArgs, SigningBytesArgs, TokenAuthnCli, VerifyArgs};

fn main() -> Result<()> {
    let cli = TokenAuthnCli::parse();
    logging::init_logging("token_authn=info,token_authn_cli=info", cli.log_format);

    let config = load_config(cli.config.as_deref())?;

    let output = match cli.command {
        Commands::Verify(args) => verify(&args, config)?,
        Commands::SigningBytes(args) => {
            let bytes = signing_bytes(&args, config)?;
            println!("{}", bytes);
            return Ok(());
        }
        Commands::Sign(args) => sign(&args, &config)?,
        Commands::Keygen => keygen(),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<AuthConfig> {
    let Some(path) = path else {
        return Ok(AuthConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    let config = AuthConfig::from_json(&text)
        .with_context(|| format!("invalid config file: {}", path.display()))?;
    tracing::debug!(path = %path.display(), excluded = ?config.excluded_from_signing, "config loaded");
    Ok(config)
}

fn read_request(path: &Path) -> Result<Request> {
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read request from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read request file: {}", path.display()))?
    };
    Request::from_json(&text).context("request is not a valid token request")
}

fn load_registry(path: Option<&Path>) -> Result<MemoryKeyRegistry> {
    let Some(path) = path else {
        return Ok(MemoryKeyRegistry::new());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read registry file: {}", path.display()))?;
    let registry = MemoryKeyRegistry::from_json(&text)
        .with_context(|| format!("invalid registry file: {}", path.display()))?;
    tracing::info!(path = %path.display(), entries = registry.len(), "registry loaded");
    Ok(registry)
}

/// Authenticates the request. Rejection is an error, so the exit code
/// tells scripts whether the request passed.
fn verify(args: &VerifyArgs, config: AuthConfig) -> Result<Value> {
    let request = read_request(&args.input.request)?;
    let registry = load_registry(args.registry.as_deref())?;
    let digest = request.payload_digest(&config)?;

    let authn = TokenAuthenticator::new(registry, config);
    let signers = authn
        .authenticate(&request)
        .with_context(|| format!("request {} rejected", request.req_id))?;

    Ok(json!({
        "reqId": request.req_id,
        "type": request.txn_type().code(),
        "digest": digest,
        "signers": signers,
    }))
}

fn signing_bytes(args: &SigningBytesArgs, config: AuthConfig) -> Result<String> {
    let request = read_request(&args.input.request)?;
    let authn = TokenAuthenticator::new(MemoryKeyRegistry::new(), config);
    let bytes = authn.serialize_for_sig(&request, &args.identifier)?;

    if args.hex {
        Ok(hex::encode(bytes))
    } else {
        String::from_utf8(bytes).context("signing bytes are not UTF-8")
    }
}

fn sign(args: &SignArgs, config: &AuthConfig) -> Result<Value> {
    let mut request = read_request(&args.input.request)?;
    let keypairs = args
        .keys
        .iter()
        .enumerate()
        .map(|(i, key)| {
            SigningKeypair::from_hex(key).with_context(|| format!("key #{} is unusable", i + 1))
        })
        .collect::<Result<Vec<_>>>()?;

    match request.txn_type() {
        TransactionType::Transfer => {
            let signed = sign_transfer_inputs(&mut request, &keypairs, config)?;
            if signed == 0 {
                bail!("none of the supplied keys owns an input of this transfer");
            }
            tracing::info!(req_id = request.req_id, inputs = signed, "transfer inputs signed");
        }
        TransactionType::Mint => match keypairs.as_slice() {
            [single] => {
                sign_request(&mut request, single, config)?;
            }
            many => {
                for keypair in many {
                    add_request_signature(&mut request, keypair, config)?;
                }
            }
        },
    }

    Ok(serde_json::to_value(&request)?)
}

fn keygen() -> Value {
    let keypair = SigningKeypair::generate();
    json!({
        "seed": keypair.seed_hex(),
        "address": keypair.address(),
        "did": keypair.did(),
        "verkey": keypair.abbreviated_verkey(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    use cli::RequestArg;
    use token_authn::transaction::RequestBuilder;

    fn write_json(dir: &tempfile::TempDir, name: &str, value: &impl serde::Serialize) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(serde_json::to_string(value).unwrap().as_bytes())
            .unwrap();
        path
    }

    #[test]
    fn sign_then_verify_transfer() {
        let dir = tempfile::tempdir().unwrap();
        let x = SigningKeypair::generate();
        let request = RequestBuilder::transfer()
            .req_id(1)
            .input(x.address(), 1)
            .output("Z", 3)
            .build();
        let unsigned = write_json(&dir, "unsigned.json", &request);

        let signed = sign(
            &SignArgs {
                input: RequestArg { request: unsigned },
                keys: vec![x.seed_hex()],
            },
            &AuthConfig::default(),
        )
        .unwrap();
        let signed = write_json(&dir, "signed.json", &signed);

        let out = verify(
            &VerifyArgs {
                input: RequestArg { request: signed },
                registry: None,
            },
            AuthConfig::default(),
        )
        .unwrap();
        assert_eq!(out["signers"], json!([x.address()]));
        assert_eq!(out["type"], json!("10001"));
    }

    #[test]
    fn sign_with_foreign_key_fails() {
        let dir = tempfile::tempdir().unwrap();
        let x = SigningKeypair::generate();
        let request = RequestBuilder::transfer()
            .req_id(1)
            .input(x.address(), 1)
            .output("Z", 3)
            .build();
        let path = write_json(&dir, "req.json", &request);

        let err = sign(
            &SignArgs {
                input: RequestArg { request: path },
                keys: vec![SigningKeypair::generate().seed_hex()],
            },
            &AuthConfig::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("none of the supplied keys"));
    }

    #[test]
    fn verify_mint_with_registry_file() {
        let dir = tempfile::tempdir().unwrap();
        let trustee = SigningKeypair::generate();
        let mut request = RequestBuilder::mint().req_id(2).output("Z", 100).build();
        sign_request(&mut request, &trustee, &AuthConfig::default()).unwrap();

        let request = write_json(&dir, "mint.json", &request);
        let mut entries = serde_json::Map::new();
        entries.insert(trustee.did(), json!(trustee.abbreviated_verkey()));
        let registry = write_json(&dir, "registry.json", &entries);

        let out = verify(
            &VerifyArgs {
                input: RequestArg { request },
                registry: Some(registry),
            },
            AuthConfig::default(),
        )
        .unwrap();
        assert_eq!(out["signers"], json!([trustee.did()]));
    }

    #[test]
    fn verify_rejection_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut request = RequestBuilder::transfer()
            .req_id(3)
            .input(SigningKeypair::generate().address(), 1)
            .output("Z", 3)
            .build();
        // Signed by the wrong key over the wrong bytes.
        request.operation.inputs[0].signature =
            SigningKeypair::generate().sign_base58(b"something else");
        let path = write_json(&dir, "bad.json", &request);

        let err = verify(
            &VerifyArgs {
                input: RequestArg { request: path },
                registry: None,
            },
            AuthConfig::default(),
        )
        .unwrap_err();
        assert!(format!("{:#}", err).contains("0 out of 1 correct"));
    }

    #[test]
    fn signing_bytes_omit_identifier_for_transfers() {
        let dir = tempfile::tempdir().unwrap();
        let x = SigningKeypair::generate();
        let request = RequestBuilder::transfer()
            .identifier("6ouriXMZkLeHsuXrN1X1fd")
            .req_id(4)
            .input(x.address(), 1)
            .output("Z", 3)
            .build();
        let path = write_json(&dir, "req.json", &request);

        let text = signing_bytes(
            &SigningBytesArgs {
                input: RequestArg { request: path },
                identifier: x.address(),
                hex: false,
            },
            AuthConfig::default(),
        )
        .unwrap();
        assert!(!text.contains("identifier"));
        assert!(text.contains(&x.address()));
    }

    #[test]
    fn config_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_json(
            &dir,
            "config.json",
            &json!({ "excludedFromSigning": ["signature", "signatures", "fees", "taaAcceptance"] }),
        );
        let config = load_config(Some(&path)).unwrap();
        assert!(config.excluded_from_signing.contains("taaAcceptance"));
        assert_eq!(load_config(None).unwrap(), AuthConfig::default());
    }

    #[test]
    fn keygen_outputs_consistent_identities() {
        let out = keygen();
        let seed = out["seed"].as_str().unwrap();
        let keypair = SigningKeypair::from_hex(seed).unwrap();
        assert_eq!(out["address"], json!(keypair.address()));
        assert_eq!(out["did"], json!(keypair.did()));
    }
}
