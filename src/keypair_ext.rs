//! Helpers for dealing with `Keypair`s.

use std::path::Path;

use solana_sdk::{
    signature::Keypair,
    signer::{EncodableKey as _, Signer as _, keypair::keypair_from_seed},
};

use crate::error::WalletError;

/// Reads a keypair stored as a JSON array of bytes, the format `solana-keygen` produces.
pub fn read_keypair_file(path: impl AsRef<Path>) -> Result<Keypair, WalletError> {
    let path = path.as_ref();
    let key_file_error = |reason: String| WalletError::KeyFile {
        path: path.to_owned(),
        reason,
    };

    let keypair = Keypair::read_from_file(path).map_err(|err| key_file_error(err.to_string()))?;

    // `Keypair::from_bytes()` trusts the public half as is.
    let derived = keypair_from_seed(&keypair.to_bytes()[..32])
        .map_err(|err| key_file_error(err.to_string()))?;
    if derived.pubkey() != keypair.pubkey() {
        return Err(key_file_error(
            "Public key does not match the secret key".to_owned(),
        ));
    }

    Ok(keypair)
}
