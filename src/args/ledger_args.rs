use std::time::Duration;

use clap::Args;
use reqwest::Url;
use solana_sdk::{commitment_config::CommitmentConfig, pubkey::Pubkey};

use crate::{error::WalletError, ledger::LedgerConfig, stake::idl::StakeProgramIdl};

/// Where the local alpha node listens, for both RPC and the faucet.
pub const DEFAULT_NODE_URL: &str = "http://127.0.0.1:4001";

/// Node connection settings shared by all the commands.
#[derive(Args, Debug, Clone)]
pub struct LedgerArgs {
    /// An HTTP address of the XRS node that speaks Solana RPC.
    #[arg(long, global = true, value_name = "URL", default_value = DEFAULT_NODE_URL)]
    pub rpc_url: Url,

    /// An HTTP address of the node faucet.
    ///
    /// Defaults to the `--rpc-url`.
    #[arg(long, global = true, value_name = "URL")]
    pub faucet_url: Option<Url>,

    /// Commitment level used for balance queries and transaction confirmation.
    #[arg(long, global = true, value_name = "LEVEL", default_value = "confirmed")]
    pub commitment: CommitmentConfig,

    /// How long to wait for a transaction confirmation or a faucet reply.
    #[arg(
        long,
        global = true,
        value_name = "DURATION",
        default_value = "60s",
        value_parser = humantime::parse_duration
    )]
    pub timeout: Duration,

    /// An address of the stake program.
    ///
    /// Defaults to the address recorded in the bundled stake program IDL.
    #[arg(long, global = true, value_name = "PUBKEY")]
    pub stake_program_id: Option<Pubkey>,
}

impl LedgerArgs {
    pub fn into_config(self) -> Result<LedgerConfig, WalletError> {
        let Self {
            rpc_url,
            faucet_url,
            commitment,
            timeout,
            stake_program_id,
        } = self;

        let stake_program_id = match stake_program_id {
            Some(program_id) => program_id,
            None => StakeProgramIdl::bundled()?.program_id()?,
        };

        Ok(LedgerConfig {
            faucet_url: faucet_url.unwrap_or_else(|| rpc_url.clone()),
            rpc_url,
            commitment,
            timeout,
            stake_program_id,
        })
    }
}
