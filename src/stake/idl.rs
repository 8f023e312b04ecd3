//! The stake program is only known to us through its Anchor IDL, bundled with the wallet.
//!
//! We only read the parts of the IDL we need: the program address, the instruction layouts, and
//! the error codes.  Instruction encoding itself lives in [`super::instructions`], and is checked
//! against the IDL before anything is sent.

use std::str::FromStr as _;

use serde::Deserialize;
use solana_program::{instruction::AccountMeta, pubkey::Pubkey};

use crate::error::WalletError;

const BUNDLED_IDL: &str = include_str!("../../idl/xeris_stake.json");

#[derive(Debug, Deserialize)]
pub struct StakeProgramIdl {
    pub address: String,
    pub metadata: IdlMetadata,
    pub instructions: Vec<IdlInstruction>,
    #[serde(default)]
    pub errors: Vec<IdlError>,
}

#[derive(Debug, Deserialize)]
pub struct IdlMetadata {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Deserialize)]
pub struct IdlInstruction {
    pub name: String,
    pub discriminator: [u8; 8],
    pub accounts: Vec<IdlAccount>,
    pub args: Vec<IdlField>,
}

#[derive(Debug, Deserialize)]
pub struct IdlAccount {
    pub name: String,
    #[serde(default)]
    pub writable: bool,
    #[serde(default)]
    pub signer: bool,
}

#[derive(Debug, Deserialize)]
pub struct IdlField {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub struct IdlError {
    pub code: u32,
    pub name: String,
    #[serde(default)]
    pub msg: Option<String>,
}

impl StakeProgramIdl {
    pub fn bundled() -> Result<Self, WalletError> {
        serde_json::from_str(BUNDLED_IDL).map_err(|err| WalletError::Idl(err.to_string()))
    }

    /// Address the program is deployed at.
    pub fn program_id(&self) -> Result<Pubkey, WalletError> {
        Pubkey::from_str(&self.address).map_err(|err| {
            WalletError::Idl(format!("Bad program address \"{}\": {err}", self.address))
        })
    }

    pub fn instruction(&self, name: &str) -> Result<&IdlInstruction, WalletError> {
        self.instructions
            .iter()
            .find(|instruction| instruction.name == name)
            .ok_or_else(|| {
                WalletError::Idl(format!(
                    "`{}` v{} has no `{name}` instruction",
                    self.metadata.name, self.metadata.version
                ))
            })
    }

    pub fn error(&self, code: u32) -> Option<&IdlError> {
        self.errors.iter().find(|error| error.code == code)
    }

    /// Adds the program's own description of a custom error code, when the IDL has one.
    pub fn explain(&self, err: WalletError) -> WalletError {
        let (program_id, method, code, message) = match err {
            WalletError::ProgramInvocation {
                program_id,
                method,
                code: Some(code),
                message,
            } => (program_id, method, code, message),
            err => return err,
        };

        let message = match self.error(code) {
            Some(IdlError {
                name,
                msg: Some(msg),
                ..
            }) => format!("{message} ({name}: {msg})"),
            Some(IdlError { name, msg: None, .. }) => format!("{message} ({name})"),
            None => message,
        };

        WalletError::ProgramInvocation {
            program_id,
            method,
            code: Some(code),
            message,
        }
    }
}

impl IdlInstruction {
    /// Makes sure a hand encoded instruction agrees with the IDL.
    pub fn check_layout(
        &self,
        discriminator: &[u8; 8],
        accounts: &[AccountMeta],
    ) -> Result<(), WalletError> {
        if self.discriminator != *discriminator {
            return Err(WalletError::Idl(format!(
                "`{}` discriminator mismatch.\n\
                 IDL: {:?}\n\
                 Encoded: {:?}",
                self.name, self.discriminator, discriminator
            )));
        }

        if self.accounts.len() != accounts.len() {
            return Err(WalletError::Idl(format!(
                "`{}` expects {} accounts, but {} were provided",
                self.name,
                self.accounts.len(),
                accounts.len()
            )));
        }

        for (expected, actual) in self.accounts.iter().zip(accounts) {
            if expected.writable != actual.is_writable || expected.signer != actual.is_signer {
                return Err(WalletError::Idl(format!(
                    "`{}` account `{}` should be {}writable and {}a signer",
                    self.name,
                    expected.name,
                    if expected.writable { "" } else { "not " },
                    if expected.signer { "" } else { "not " },
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_idl_parses() {
        let idl = StakeProgramIdl::bundled().unwrap();
        assert_eq!(idl.metadata.name, "xeris_stake");
        assert_eq!(
            idl.program_id().unwrap().to_string(),
            "A68Gb8eP3e4Z3vnUG9hv73SPN63V5b5gjWLbv27ct34"
        );

        let initialize_stake = idl.instruction("initialize_stake").unwrap();
        let accounts = initialize_stake
            .accounts
            .iter()
            .map(|account| account.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(accounts, ["stake_account", "owner", "system_program"]);
        assert_eq!(initialize_stake.args.len(), 1);
        assert_eq!(initialize_stake.args[0].name, "amount");
        assert_eq!(initialize_stake.args[0].ty, "u64");
    }

    #[test]
    fn unknown_instruction() {
        let idl = StakeProgramIdl::bundled().unwrap();
        assert!(matches!(idl.instruction("unstake"), Err(WalletError::Idl(_))));
    }

    #[test]
    fn layout_mismatch_is_reported() {
        let idl = StakeProgramIdl::bundled().unwrap();
        let initialize_stake = idl.instruction("initialize_stake").unwrap();

        let accounts = [
            AccountMeta::new(Pubkey::new_unique(), false),
            AccountMeta::new_readonly(Pubkey::new_unique(), true),
            AccountMeta::new_readonly(Pubkey::new_unique(), false),
        ];
        let err = initialize_stake
            .check_layout(&initialize_stake.discriminator, &accounts)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Bundled stake program interface is unusable: `initialize_stake` account `owner` \
             should be writable and a signer"
        );

        assert!(
            initialize_stake
                .check_layout(&[0; 8], &accounts)
                .is_err()
        );
    }

    #[test]
    fn explains_known_error_codes() {
        let idl = StakeProgramIdl::bundled().unwrap();
        let program_id = Pubkey::new_unique();

        let err = idl.explain(WalletError::ProgramInvocation {
            program_id,
            method: "initialize_stake".to_owned(),
            code: Some(6000),
            message: "Error processing Instruction 0: custom program error: 0x1770".to_owned(),
        });
        let WalletError::ProgramInvocation { code, message, .. } = err else {
            panic!("Expected a ProgramInvocation error, got: {err:?}");
        };
        assert_eq!(code, Some(6000));
        assert_eq!(
            message,
            "Error processing Instruction 0: custom program error: 0x1770 \
             (StakeBelowMinimum: Stake must be at least 1,000 XRS)"
        );
    }

    #[test]
    fn leaves_other_errors_alone() {
        let idl = StakeProgramIdl::bundled().unwrap();

        let err = idl.explain(WalletError::ProgramInvocation {
            program_id: Pubkey::new_unique(),
            method: "initialize_stake".to_owned(),
            code: Some(42),
            message: "custom program error: 0x2a".to_owned(),
        });
        assert!(
            matches!(err, WalletError::ProgramInvocation { ref message, .. } if message == "custom program error: 0x2a")
        );

        let err = idl.explain(WalletError::NotImplemented { command: "unstake" });
        assert!(matches!(err, WalletError::NotImplemented { .. }));
    }
}
