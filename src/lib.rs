//! Local wallet for an XRS node.
//!
//! [`main()`] is the whole command line program, minus logging setup.  [`execute()`] is the same,
//! but with the node connection injected, and with the outcome returned instead of printed.

use std::{ffi::OsString, fmt, process::ExitCode};

use args::{Args, Command, ParseFailure};
use ledger::{LedgerClient, LedgerConfig, RpcLedger};

pub mod airdrop;
pub mod amount;
pub mod args;
pub mod error;
pub(crate) mod keypair_ext;
pub mod ledger;
pub(crate) mod rpc_client_ext;
pub mod stake;
pub mod transfer;

pub use error::WalletError;

/// What a successful invocation has to say.
#[derive(Debug)]
pub enum Outcome {
    /// Nothing was run, usage text was requested or the command was not recognized.
    Usage(String),
    /// A command completed.
    Report(String),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Usage(text) | Self::Report(text) => f.write_str(text.trim_end()),
        }
    }
}

/// Parses `argv` (including the program name) and runs the selected command.
///
/// `connect` is only called for commands that need to talk to the node.
pub async fn execute<I, T, L>(
    argv: I,
    connect: impl FnOnce(&LedgerConfig) -> L,
) -> Result<Outcome, WalletError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    L: LedgerClient,
{
    let Args { ledger, command } = match Args::try_parse_argv(argv) {
        Ok(args) => args,
        Err(ParseFailure::Usage(usage)) => return Ok(Outcome::Usage(usage)),
        Err(ParseFailure::Invalid(err)) => return Err(err),
    };

    let config = ledger.into_config()?;

    let report = match command {
        Command::Send(args) => transfer::run(&connect(&config), args.into())
            .await?
            .to_string(),
        Command::Stake(args) => {
            stake::run(&connect(&config), config.stake_program_id, args.into())
                .await?
                .to_string()
        }
        Command::Unstake(args) => stake::unstake(args.into())?.to_string(),
        Command::Airdrop(args) => airdrop::run(&connect(&config), args.into())
            .await?
            .to_string(),
    };

    Ok(Outcome::Report(report))
}

/// Runs the wallet against a live node.  Results go to stdout, errors to stderr.
pub async fn main<I, T>(argv: I) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match execute(argv, RpcLedger::connect).await {
        Ok(outcome) => {
            println!("{outcome}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}
