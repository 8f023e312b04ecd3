//! In-memory [`LedgerClient`] that records every call it receives.

#![allow(dead_code)]

use std::{
    fs,
    path::PathBuf,
    sync::{Arc, Mutex},
};

use solana_sdk::{
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer as _,
};
use tempfile::TempDir;
use xrs_wallet::{WalletError, ledger::LedgerClient};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    GetBalance(Pubkey),
    Submit {
        instructions: Vec<Instruction>,
        payer: Pubkey,
        signers: Vec<Pubkey>,
    },
    Confirm(Signature),
    Invoke {
        method: String,
        instruction: Instruction,
        signers: Vec<Pubkey>,
    },
    Airdrop {
        address: Pubkey,
        lamports: u64,
    },
}

/// Canned replies.  Everything succeeds unless told otherwise.
#[derive(Debug, Clone, Default)]
pub struct Replies {
    pub balance: u64,
    pub signature: Signature,
    pub confirmation_failure: Option<String>,
    pub program_failure: Option<(Option<u32>, String)>,
    pub airdrop_failure: Option<String>,
    pub faucet_reply: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct MockLedger {
    replies: Replies,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl MockLedger {
    pub fn new(replies: Replies) -> Self {
        Self {
            replies,
            calls: Arc::default(),
        }
    }

    pub fn with_balance(balance: u64) -> Self {
        Self::new(Replies {
            balance,
            signature: Signature::new_unique(),
            ..Replies::default()
        })
    }

    pub fn signature(&self) -> Signature {
        self.replies.signature
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

fn pubkeys(signers: &[&Keypair]) -> Vec<Pubkey> {
    signers.iter().map(|signer| signer.pubkey()).collect()
}

impl LedgerClient for MockLedger {
    async fn get_balance(&self, address: &Pubkey) -> Result<u64, WalletError> {
        self.record(Call::GetBalance(*address));
        Ok(self.replies.balance)
    }

    async fn submit_transaction(
        &self,
        instructions: &[Instruction],
        payer: &Pubkey,
        signers: &[&Keypair],
    ) -> Result<Signature, WalletError> {
        self.record(Call::Submit {
            instructions: instructions.to_vec(),
            payer: *payer,
            signers: pubkeys(signers),
        });
        Ok(self.replies.signature)
    }

    async fn confirm_transaction(&self, signature: &Signature) -> Result<(), WalletError> {
        self.record(Call::Confirm(*signature));
        match &self.replies.confirmation_failure {
            Some(reason) => Err(WalletError::Confirmation {
                signature: *signature,
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }

    async fn invoke_program(
        &self,
        method: &str,
        instruction: Instruction,
        signers: &[&Keypair],
    ) -> Result<Signature, WalletError> {
        let program_id = instruction.program_id;
        self.record(Call::Invoke {
            method: method.to_owned(),
            instruction,
            signers: pubkeys(signers),
        });
        match &self.replies.program_failure {
            Some((code, message)) => Err(WalletError::ProgramInvocation {
                program_id,
                method: method.to_owned(),
                code: *code,
                message: message.clone(),
            }),
            None => Ok(self.replies.signature),
        }
    }

    async fn request_airdrop(
        &self,
        address: &Pubkey,
        lamports: u64,
    ) -> Result<Option<String>, WalletError> {
        self.record(Call::Airdrop {
            address: *address,
            lamports,
        });
        match &self.replies.airdrop_failure {
            Some(message) => Err(WalletError::Airdrop {
                address: address.to_string(),
                message: message.clone(),
            }),
            None => Ok(self.replies.faucet_reply.clone()),
        }
    }
}

/// A keypair file in a temporary directory, in the `solana-keygen` format.
pub struct KeyFile {
    pub keypair: Keypair,
    pub path: PathBuf,
    _dir: TempDir,
}

impl KeyFile {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let keypair = Keypair::new();
        let path = dir.path().join("wallet.json");
        fs::write(
            &path,
            serde_json::to_string(&keypair.to_bytes().to_vec()).unwrap(),
        )
        .unwrap();
        Self {
            keypair,
            path,
            _dir: dir,
        }
    }

    pub fn path_str(&self) -> &str {
        self.path.to_str().unwrap()
    }
}
