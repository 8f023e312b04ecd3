//! [`LedgerClient`] backed by a Solana JSON-RPC node and its HTTP faucet.

use std::time::Duration;

use log::{debug, info};
use reqwest::{StatusCode, Url};
use serde_json::Value;
use solana_rpc_client::{
    http_sender::HttpSender, nonblocking::rpc_client::RpcClient, rpc_client::RpcClientConfig,
};
use solana_rpc_client_api::client_error::{Error as ClientError, ErrorKind as ClientErrorKind};
use solana_sdk::{
    instruction::{Instruction, InstructionError},
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer as _,
    transaction::{Transaction, TransactionError},
};
use tokio::time::{sleep, timeout};

use crate::{
    error::WalletError,
    rpc_client_ext::{PrepareError, RpcClientExt as _},
};

use super::{LedgerClient, LedgerConfig};

/// Roughly one slot.
const STATUS_POLL_INTERVAL: Duration = Duration::from_millis(400);

pub struct RpcLedger {
    rpc_client: RpcClient,
    http_client: reqwest::Client,
    config: LedgerConfig,
}

impl RpcLedger {
    /// Sets up clients for the node described by `config`.
    ///
    /// Nothing is sent to the node here.  In particular, there is no version handshake.
    pub fn connect(config: &LedgerConfig) -> Self {
        let rpc_client = RpcClient::new_sender(
            HttpSender::new(config.rpc_url.to_string()),
            RpcClientConfig {
                commitment_config: config.commitment,
                confirm_transaction_initial_timeout: Some(config.timeout),
            },
        );

        info!("Connected to local XRS node at {}", config.rpc_url);

        Self {
            rpc_client,
            http_client: reqwest::Client::new(),
            config: config.clone(),
        }
    }

    fn rpc_error(&self, operation: &'static str, err: ClientError) -> WalletError {
        match err.kind() {
            ClientErrorKind::Io(_) | ClientErrorKind::Reqwest(_) => WalletError::Connection {
                url: self.config.rpc_url.to_string(),
                reason: err.to_string(),
            },
            _ => WalletError::Rpc {
                operation,
                reason: err.to_string(),
            },
        }
    }

    async fn prepare(
        &self,
        instructions: &[Instruction],
        payer: &Pubkey,
        signers: &[&Keypair],
    ) -> Result<Transaction, WalletError> {
        self.rpc_client
            .sign_with_latest_blockhash(instructions, payer, signers)
            .await
            .map_err(|err| match err {
                PrepareError::Blockhash(err) => {
                    self.rpc_error("Getting a blockhash from the node", err)
                }
                PrepareError::Signing(err) => WalletError::Rpc {
                    operation: "Signing the transaction",
                    reason: err.to_string(),
                },
            })
    }

    /// Polls the signature status until the node reports one at the configured commitment.
    async fn poll_status(
        &self,
        signature: &Signature,
    ) -> Result<Result<(), TransactionError>, WalletError> {
        loop {
            let status = self
                .rpc_client
                .get_signature_status_with_commitment(signature, self.config.commitment)
                .await
                .map_err(|err| self.rpc_error("Getting the transaction status", err))?;

            if let Some(result) = status {
                return Ok(result);
            }

            sleep(STATUS_POLL_INTERVAL).await;
        }
    }

    async fn wait_for_status(
        &self,
        signature: &Signature,
    ) -> Result<Result<(), TransactionError>, WalletError> {
        timeout(self.config.timeout, self.poll_status(signature))
            .await
            .map_err(|_| WalletError::Timeout {
                operation: "Transaction confirmation",
                after: self.config.timeout.into(),
            })?
    }

    fn airdrop_url(&self, address: &Pubkey, lamports: u64) -> Result<Url, WalletError> {
        let address = address.to_string();
        let lamports = lamports.to_string();

        let mut url = self.config.faucet_url.clone();
        url.path_segments_mut()
            .map_err(|()| WalletError::Connection {
                url: self.config.faucet_url.to_string(),
                reason: "Faucet URL can not be used as a base".to_owned(),
            })?
            .pop_if_empty()
            .extend(["airdrop", address.as_str(), lamports.as_str()]);

        Ok(url)
    }

    async fn post_airdrop(&self, url: Url) -> Result<(StatusCode, String), WalletError> {
        let connection_error = |err: reqwest::Error| WalletError::Connection {
            url: self.config.faucet_url.to_string(),
            reason: err.to_string(),
        };

        let response = self
            .http_client
            .post(url)
            .send()
            .await
            .map_err(connection_error)?;
        let status = response.status();
        let body = response.text().await.map_err(connection_error)?;

        Ok((status, body))
    }
}

impl LedgerClient for RpcLedger {
    async fn get_balance(&self, address: &Pubkey) -> Result<u64, WalletError> {
        let balance = self
            .rpc_client
            .get_balance_with_commitment(address, self.config.commitment)
            .await
            .map_err(|err| self.rpc_error("Reading the account balance", err))?
            .value;
        debug!("Balance of {address}: {balance} lamports");
        Ok(balance)
    }

    async fn submit_transaction(
        &self,
        instructions: &[Instruction],
        payer: &Pubkey,
        signers: &[&Keypair],
    ) -> Result<Signature, WalletError> {
        let transaction = self.prepare(instructions, payer, signers).await?;

        let signature = self
            .rpc_client
            .send_transaction(&transaction)
            .await
            .map_err(|err| self.rpc_error("Sending the transaction", err))?;
        debug!("Sent transaction: {signature}");

        Ok(signature)
    }

    async fn confirm_transaction(&self, signature: &Signature) -> Result<(), WalletError> {
        self.wait_for_status(signature)
            .await?
            .map_err(|err| WalletError::Confirmation {
                signature: *signature,
                reason: err.to_string(),
            })
    }

    async fn invoke_program(
        &self,
        method: &str,
        instruction: Instruction,
        signers: &[&Keypair],
    ) -> Result<Signature, WalletError> {
        let program_id = instruction.program_id;
        let program_error = |err: TransactionError| WalletError::ProgramInvocation {
            program_id,
            method: method.to_owned(),
            code: custom_error_code(&err),
            message: err.to_string(),
        };

        let Some(payer) = signers.first().map(|payer| payer.pubkey()) else {
            return Err(WalletError::Rpc {
                operation: "Signing the transaction",
                reason: "No signers provided".to_owned(),
            });
        };

        let transaction = self.prepare(&[instruction], &payer, signers).await?;

        // Preflight simulation catches most program failures before the transaction is sent.
        let signature = match self.rpc_client.send_transaction(&transaction).await {
            Ok(signature) => signature,
            Err(err) => {
                return Err(match err.get_transaction_error() {
                    Some(tx_err) => program_error(tx_err),
                    None => self.rpc_error("Sending the transaction", err),
                });
            }
        };
        debug!("Sent `{method}` to {program_id}: {signature}");

        self.wait_for_status(&signature)
            .await?
            .map_err(program_error)?;

        Ok(signature)
    }

    async fn request_airdrop(
        &self,
        address: &Pubkey,
        lamports: u64,
    ) -> Result<Option<String>, WalletError> {
        let airdrop_error = |message: String| WalletError::Airdrop {
            address: address.to_string(),
            message,
        };

        let url = self.airdrop_url(address, lamports)?;
        debug!("Requesting an airdrop: POST {url}");

        let (status, body) = timeout(self.config.timeout, self.post_airdrop(url))
            .await
            .map_err(|_| WalletError::Timeout {
                operation: "Airdrop request",
                after: self.config.timeout.into(),
            })??;

        let reply: Value = serde_json::from_str(&body).map_err(|err| {
            airdrop_error(format!("Faucet reply is not JSON (HTTP {status}): {err}"))
        })?;

        if let Some(message) = faucet_error(&reply) {
            return Err(airdrop_error(message));
        }

        if !status.is_success() {
            return Err(airdrop_error(format!("Faucet replied with HTTP {status}")));
        }

        match reply {
            Value::String(message) => {
                debug!("Faucet: {message}");
                Ok(Some(message))
            }
            _ => Ok(None),
        }
    }
}

/// Custom program error code, if the transaction failed with one.
fn custom_error_code(err: &TransactionError) -> Option<u32> {
    match err {
        TransactionError::InstructionError(_, InstructionError::Custom(code)) => Some(*code),
        _ => None,
    }
}

/// Faucet signals failures with an `error` field in a JSON object.
fn faucet_error(reply: &Value) -> Option<String> {
    match reply.get("error")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(message) if message.is_empty() => None,
        Value::String(message) => Some(message.clone()),
        other => Some(other.to_string()),
    }
}
