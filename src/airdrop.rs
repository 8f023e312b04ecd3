//! Faucet credits from the local node.

use std::fmt;

use solana_sdk::pubkey::Pubkey;

use crate::{
    amount::{LAMPORTS_PER_XRS, Xrs},
    error::WalletError,
    ledger::{LedgerClient, parse_address},
};

/// Every airdrop is for 1,000 XRS.
pub const AIRDROP_LAMPORTS: u64 = 1_000 * LAMPORTS_PER_XRS;

#[derive(Debug)]
pub struct AirdropRequest {
    pub address: String,
}

#[derive(Debug)]
pub struct AirdropReceipt {
    pub recipient: Pubkey,
    pub amount: u64,
    /// What the faucet said, if it replied with text.  The local node reports some failures this
    /// way, so it is shown to the user as is.
    pub faucet_reply: Option<String>,
}

impl fmt::Display for AirdropReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Local Airdrop Claimed: {} to {}",
            Xrs(self.amount),
            self.recipient
        )?;
        if let Some(reply) = &self.faucet_reply {
            write!(f, "\nFaucet: {reply}")?;
        }
        Ok(())
    }
}

pub async fn run<L: LedgerClient>(
    ledger: &L,
    AirdropRequest { address }: AirdropRequest,
) -> Result<AirdropReceipt, WalletError> {
    let recipient = parse_address(&address)?;

    let faucet_reply = ledger.request_airdrop(&recipient, AIRDROP_LAMPORTS).await?;

    Ok(AirdropReceipt {
        recipient,
        amount: AIRDROP_LAMPORTS,
        faucet_reply,
    })
}
