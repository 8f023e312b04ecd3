//! Commonly used functionality related to the `rpc_client`.

use solana_rpc_client::nonblocking::rpc_client::RpcClient;
use solana_rpc_client_api::client_error::Error as ClientError;
use solana_sdk::{
    commitment_config::CommitmentConfig, instruction::Instruction, message::Message,
    pubkey::Pubkey, signer::SignerError, signer::signers::Signers, transaction::Transaction,
};

/// Ways to fail while preparing a transaction.
#[derive(Debug)]
pub enum PrepareError {
    Blockhash(ClientError),
    Signing(SignerError),
}

pub trait RpcClientExt {
    async fn sign_with_latest_blockhash<SigningKeypairs: Signers + ?Sized>(
        &self,
        instructions: &[Instruction],
        payer: &Pubkey,
        signing_keypairs: &SigningKeypairs,
    ) -> Result<Transaction, PrepareError>;
}

impl RpcClientExt for RpcClient {
    async fn sign_with_latest_blockhash<SigningKeypairs: Signers + ?Sized>(
        &self,
        instructions: &[Instruction],
        payer: &Pubkey,
        signing_keypairs: &SigningKeypairs,
    ) -> Result<Transaction, PrepareError> {
        // When the RpcClient is configured with a commitment that is not Finalized, "Blockhash not
        // found" errors are common.  We send right away, so an older blockhash costs nothing.
        let (latest_blockhash, _) = self
            .get_latest_blockhash_with_commitment(CommitmentConfig::finalized())
            .await
            .map_err(PrepareError::Blockhash)?;

        let mut transaction = Transaction::new_unsigned(Message::new(instructions, Some(payer)));
        transaction
            .try_sign(signing_keypairs, latest_blockhash)
            .map_err(PrepareError::Signing)?;

        Ok(transaction)
    }
}
