use std::path::PathBuf;

use clap::Args;

use crate::{amount::xrs_amount_parser, transfer::TransferRequest};

#[derive(Args, Debug)]
pub struct SendArgs {
    /// A keypair file for the sender.  It also pays for the transaction.
    pub key_path: PathBuf,

    /// Address to send XRS to.
    pub to: String,

    /// Amount to send, in XRS.  A 0.1% fee on top of it must be covered by the sender balance.
    #[arg(value_name = "AMOUNT", value_parser = xrs_amount_parser)]
    pub amount: u64,
}

impl From<SendArgs> for TransferRequest {
    fn from(SendArgs { key_path, to, amount }: SendArgs) -> Self {
        Self {
            key_path,
            recipient: to,
            amount,
        }
    }
}
