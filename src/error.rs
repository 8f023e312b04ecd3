//! Everything that can go wrong while running a wallet command.
//!
//! Errors are caught once, at the command dispatch boundary, where they are printed and turned into
//! a process exit code.

use std::path::PathBuf;

use solana_sdk::{pubkey::Pubkey, signature::Signature};
use thiserror::Error;

use crate::amount::Xrs;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("Error reading a keypair from {}: {reason}", path.display())]
    KeyFile { path: PathBuf, reason: String },

    #[error("Invalid address \"{address}\": {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error(
        "Insufficient local balance: {balance}.\n\
         Required to cover the amount and the fee: {required}"
    )]
    InsufficientBalance { balance: Xrs, required: Xrs },

    #[error("Transaction {signature} was not confirmed: {reason}")]
    Confirmation { signature: Signature, reason: String },

    #[error("Program {program_id} failed to execute `{method}`: {message}")]
    ProgramInvocation {
        program_id: Pubkey,
        method: String,
        /// Custom error code returned by the program, if the failure carried one.
        code: Option<u32>,
        message: String,
    },

    #[error("Local Airdrop to {address} failed: {message}")]
    Airdrop { address: String, message: String },

    #[error("{0}")]
    Argument(String),

    #[error("Failed to reach the node at {url}: {reason}")]
    Connection { url: String, reason: String },

    #[error("{operation} timed out after {after}")]
    Timeout {
        operation: &'static str,
        after: humantime::Duration,
    },

    #[error("{operation} failed: {reason}")]
    Rpc {
        operation: &'static str,
        reason: String,
    },

    #[error("Bundled stake program interface is unusable: {0}")]
    Idl(String),

    #[error("`{command}` is not implemented yet")]
    NotImplemented { command: &'static str },
}

impl WalletError {
    /// `2` for command line usage problems, `1` for everything else.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Argument(_) => 2,
            _ => 1,
        }
    }
}
