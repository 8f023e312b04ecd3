//! There is no Rust crate for the stake program, only the bundled IDL.  These types mirror what
//! `anchor` generates for a program crate: `accounts::*` implement [`ToAccountMetas`] and
//! `instruction::*` implement [`InstructionData`].
//!
//! Anchor instruction data is an 8 byte discriminator, `sha256("global:<name>")[..8]`, followed by
//! the Borsh encoded arguments.

use anchor_lang::{InstructionData, ToAccountMetas};
use solana_program::{instruction::Instruction, pubkey::Pubkey, system_program};

pub const INITIALIZE_STAKE: &str = "initialize_stake";

/// Stake accounts are PDAs of the stake program, seeded by this label and the owner address.
pub const STAKE_SEED: &[u8] = b"stake";

pub fn stake_account_seeds(owner: &Pubkey) -> [&[u8]; 2] {
    [STAKE_SEED, owner.as_ref()]
}

pub mod accounts {
    use anchor_lang::ToAccountMetas;
    use solana_program::{instruction::AccountMeta, pubkey::Pubkey};

    // account[0] stake account     [writable]
    // account[1] owner             [signer writable]
    // account[2] system program    []
    pub struct InitializeStake {
        pub stake_account: Pubkey,
        pub owner: Pubkey,
        pub system_program: Pubkey,
    }

    impl ToAccountMetas for InitializeStake {
        fn to_account_metas(&self, _is_signer: Option<bool>) -> Vec<AccountMeta> {
            vec![
                AccountMeta::new(self.stake_account, false),
                AccountMeta::new(self.owner, true),
                AccountMeta::new_readonly(self.system_program, false),
            ]
        }
    }
}

pub mod instruction {
    use std::io::{self, Write};

    use anchor_lang::{AnchorSerialize, Discriminator, InstructionData};

    pub struct InitializeStake {
        /// Amount to stake, in lamports.
        pub amount: u64,
    }

    impl Discriminator for InitializeStake {
        const DISCRIMINATOR: [u8; 8] = [33, 175, 216, 4, 116, 130, 164, 177];
    }

    impl AnchorSerialize for InitializeStake {
        fn serialize<W: Write>(&self, writer: &mut W) -> io::Result<()> {
            AnchorSerialize::serialize(&self.amount, writer)
        }
    }

    impl InstructionData for InitializeStake {}
}

pub fn initialize_stake(
    program_id: Pubkey,
    stake_account: Pubkey,
    owner: Pubkey,
    amount: u64,
) -> Instruction {
    let accounts = accounts::InitializeStake {
        stake_account,
        owner,
        system_program: system_program::id(),
    };

    Instruction {
        program_id,
        accounts: accounts.to_account_metas(None),
        data: instruction::InitializeStake { amount }.data(),
    }
}
