use clap::Args;

use crate::airdrop::AirdropRequest;

#[derive(Args, Debug)]
pub struct AirdropArgs {
    /// Address to credit.
    pub address: String,
}

impl From<AirdropArgs> for AirdropRequest {
    fn from(AirdropArgs { address }: AirdropArgs) -> Self {
        Self { address }
    }
}
