//! # CLI Interface
//!
//! Command-line argument structure for `token-authn`, via `clap` derive.
//! Four subcommands: `verify`, `signing-bytes`, `sign` and `keygen`.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::logging::LogFormat;

/// Token request authenticator.
///
/// Checks who signed a token ledger request, shows the exact bytes a signer
/// is expected to sign, and signs requests with local keys.
#[derive(Parser, Debug)]
#[command(
    name = "token-authn",
    about = "Token request signature authenticator",
    version,
    propagate_version = true
)]
pub struct TokenAuthnCli {
    /// Authenticator configuration file (JSON).
    ///
    /// When omitted, the built-in defaults apply (signature, signatures and
    /// fees are excluded from signing).
    #[arg(long, short = 'c', global = true, env = "TOKEN_AUTHN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log output format.
    #[arg(
        long,
        global = true,
        env = "TOKEN_AUTHN_LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Pretty
    )]
    pub log_format: LogFormat,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Authenticate a request and print the identities that signed it.
    Verify(VerifyArgs),
    /// Print the bytes an identifier must sign for a request.
    SigningBytes(SigningBytesArgs),
    /// Sign a request with one or more local keys.
    Sign(SignArgs),
    /// Generate a fresh keypair.
    Keygen,
}

/// Where to read a request from.
#[derive(Args, Debug)]
pub struct RequestArg {
    /// Request file (JSON). Use `-` for stdin.
    #[arg(long, short = 'r', default_value = "-")]
    pub request: PathBuf,
}

#[derive(Args, Debug)]
pub struct VerifyArgs {
    #[command(flatten)]
    pub input: RequestArg,

    /// Key registry snapshot: a JSON object of `{identifier: verkey}`.
    ///
    /// Only needed for mints and for inputs whose address is not a full
    /// verkey.
    #[arg(long, env = "TOKEN_AUTHN_REGISTRY")]
    pub registry: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct SigningBytesArgs {
    #[command(flatten)]
    pub input: RequestArg,

    /// Address (transfers) or DID (mints) of the signer.
    #[arg(long, short = 'i')]
    pub identifier: String,

    /// Print the bytes hex-encoded instead of as text.
    #[arg(long)]
    pub hex: bool,
}

#[derive(Args, Debug)]
pub struct SignArgs {
    #[command(flatten)]
    pub input: RequestArg,

    /// Hex-encoded 32-byte Ed25519 seed. Repeat for several signers.
    ///
    /// Transfers: each key signs the inputs its address owns.
    /// Mints: each key adds a DID signature.
    #[arg(
        long = "key",
        short = 'k',
        env = "TOKEN_AUTHN_SIGNING_KEY",
        value_delimiter = ',',
        required = true
    )]
    pub keys: Vec<String>,
}
