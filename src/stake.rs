//! Staking through the XRS stake program.

use std::{fmt, path::PathBuf};

use anchor_lang::Discriminator as _;
use log::debug;
use solana_sdk::{pubkey::Pubkey, signature::Signature, signer::Signer as _};

use crate::{
    amount::Xrs, error::WalletError, keypair_ext::read_keypair_file, ledger::LedgerClient,
};

pub mod idl;
pub mod instructions;

use idl::StakeProgramIdl;
use instructions::{INITIALIZE_STAKE, stake_account_seeds};

#[derive(Debug)]
pub struct StakeRequest {
    /// Keypair of the stake owner.  Pays for and signs the transaction.
    pub key_path: PathBuf,
    /// In lamports.
    pub amount: u64,
}

#[derive(Debug)]
pub struct StakeReceipt {
    pub amount: u64,
    pub stake_account: Pubkey,
    pub bump: u8,
    pub signature: Signature,
}

impl fmt::Display for StakeReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            amount,
            stake_account,
            bump: _,
            signature,
        } = self;
        write!(
            f,
            "Local Stake: {} into {stake_account}. Sig: {signature}",
            Xrs(*amount)
        )
    }
}

/// Creates a stake account for the owner, funded with `amount`.
pub async fn run<L: LedgerClient>(
    ledger: &L,
    program_id: Pubkey,
    StakeRequest { key_path, amount }: StakeRequest,
) -> Result<StakeReceipt, WalletError> {
    let owner = read_keypair_file(&key_path)?;
    let owner_pubkey = owner.pubkey();

    let (stake_account, bump) =
        ledger.derive_program_address(&stake_account_seeds(&owner_pubkey), &program_id);
    debug!("Stake account for {owner_pubkey}: {stake_account}, bump {bump}");

    let instruction =
        instructions::initialize_stake(program_id, stake_account, owner_pubkey, amount);

    let idl = StakeProgramIdl::bundled()?;
    idl.instruction(INITIALIZE_STAKE)?.check_layout(
        &instructions::instruction::InitializeStake::DISCRIMINATOR,
        &instruction.accounts,
    )?;

    let signature = ledger
        .invoke_program(INITIALIZE_STAKE, instruction, &[&owner])
        .await
        .map_err(|err| idl.explain(err))?;

    Ok(StakeReceipt {
        amount,
        stake_account,
        bump,
        signature,
    })
}

/// The stake program has no withdrawal entry point we could call yet.
pub fn unstake(_request: StakeRequest) -> Result<StakeReceipt, WalletError> {
    Err(WalletError::NotImplemented { command: "unstake" })
}
