use std::path::PathBuf;

use clap::Args;

use crate::{amount::xrs_amount_parser, stake::StakeRequest};

#[derive(Args, Debug)]
pub struct StakeArgs {
    /// A keypair file for the stake owner.
    pub key_path: PathBuf,

    /// Amount in XRS.
    #[arg(value_name = "AMOUNT", value_parser = xrs_amount_parser)]
    pub amount: u64,
}

impl From<StakeArgs> for StakeRequest {
    fn from(StakeArgs { key_path, amount }: StakeArgs) -> Self {
        Self { key_path, amount }
    }
}
