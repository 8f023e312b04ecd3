//! Plain XRS transfers between two accounts.

use std::{fmt, path::PathBuf};

use log::debug;
use solana_sdk::{
    pubkey::Pubkey, signature::Signature, signer::Signer as _, system_instruction,
};

use crate::{
    amount::{Xrs, fee_for},
    error::WalletError,
    keypair_ext::read_keypair_file,
    ledger::{LedgerClient, parse_address},
};

#[derive(Debug)]
pub struct TransferRequest {
    /// Keypair of the sender.  Pays for and signs the transaction.
    pub key_path: PathBuf,
    /// Base58 address of the recipient, as given on the command line.
    pub recipient: String,
    /// In lamports.
    pub amount: u64,
}

#[derive(Debug)]
pub struct TransferReceipt {
    pub amount: u64,
    pub fee: u64,
    pub recipient: Pubkey,
    pub signature: Signature,
}

impl fmt::Display for TransferReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            amount,
            fee,
            recipient,
            signature,
        } = self;
        write!(
            f,
            "Local Send: {} to {recipient}. Fee: {}. Sig: {signature}",
            Xrs(*amount),
            Xrs(*fee),
        )
    }
}

/// Moves `amount` lamports from the sender to the recipient.
///
/// The sender balance has to cover the amount plus the 0.1% fee.  The fee is only checked here,
/// the node is the one charging it.
pub async fn run<L: LedgerClient>(
    ledger: &L,
    TransferRequest {
        key_path,
        recipient,
        amount,
    }: TransferRequest,
) -> Result<TransferReceipt, WalletError> {
    let sender = read_keypair_file(&key_path)?;
    let sender_pubkey = sender.pubkey();

    let balance = ledger.get_balance(&sender_pubkey).await?;
    let fee = fee_for(amount);
    if u128::from(balance) < u128::from(amount) + u128::from(fee) {
        return Err(WalletError::InsufficientBalance {
            balance: Xrs(balance),
            required: Xrs(amount.saturating_add(fee)),
        });
    }

    let recipient = parse_address(&recipient)?;

    let instruction = system_instruction::transfer(&sender_pubkey, &recipient, amount);
    let signature = ledger
        .submit_transaction(&[instruction], &sender_pubkey, &[&sender])
        .await?;
    debug!("Transfer of {amount} lamports to {recipient} sent: {signature}");

    ledger.confirm_transaction(&signature).await?;

    Ok(TransferReceipt {
        amount,
        fee,
        recipient,
        signature,
    })
}
