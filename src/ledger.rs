//! Everything the wallet needs from an XRS node, expressed as the [`LedgerClient`] trait.
//!
//! [`RpcLedger`] talks to a real node over Solana JSON-RPC.  Tests provide their own
//! implementations.

use std::{str::FromStr as _, time::Duration};

use reqwest::Url;
use solana_sdk::{
    commitment_config::CommitmentConfig, instruction::Instruction, pubkey::Pubkey,
    signature::Keypair, signature::Signature,
};

use crate::error::WalletError;

pub mod rpc;

pub use rpc::RpcLedger;

/// Connection settings for a node.
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// Solana JSON-RPC endpoint.
    pub rpc_url: Url,
    /// Base URL for the node faucet, that serves `POST /airdrop/{address}/{lamports}`.
    pub faucet_url: Url,
    pub commitment: CommitmentConfig,
    /// Upper bound on waiting for a transaction confirmation or for a faucet reply.
    pub timeout: Duration,
    pub stake_program_id: Pubkey,
}

#[allow(async_fn_in_trait)]
pub trait LedgerClient {
    /// Current balance of `address`, in lamports.
    async fn get_balance(&self, address: &Pubkey) -> Result<u64, WalletError>;

    /// Signs a transaction made of `instructions` with a recent blockhash and sends it.
    ///
    /// Does not wait for the transaction to be confirmed.
    async fn submit_transaction(
        &self,
        instructions: &[Instruction],
        payer: &Pubkey,
        signers: &[&Keypair],
    ) -> Result<Signature, WalletError>;

    /// Waits until the transaction reaches the configured commitment level.
    async fn confirm_transaction(&self, signature: &Signature) -> Result<(), WalletError>;

    /// Submits a single program instruction and waits for it to be confirmed.
    ///
    /// `method` names the program entry point, for error reporting.
    async fn invoke_program(
        &self,
        method: &str,
        instruction: Instruction,
        signers: &[&Keypair],
    ) -> Result<Signature, WalletError>;

    /// Asks the node faucet to credit `lamports` to `address`.
    ///
    /// Returns the faucet's text reply, when it sent one.
    async fn request_airdrop(
        &self,
        address: &Pubkey,
        lamports: u64,
    ) -> Result<Option<String>, WalletError>;

    /// Program derived address for the given seeds, along with the bump seed.
    ///
    /// A pure function of the inputs.
    fn derive_program_address(&self, seeds: &[&[u8]], program_id: &Pubkey) -> (Pubkey, u8) {
        Pubkey::find_program_address(seeds, program_id)
    }
}

/// Parses a base58 encoded address.
pub fn parse_address(address: &str) -> Result<Pubkey, WalletError> {
    Pubkey::from_str(address).map_err(|err| WalletError::InvalidAddress {
        address: address.to_owned(),
        reason: err.to_string(),
    })
}
