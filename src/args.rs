use clap::{CommandFactory as _, Parser, Subcommand, error::ErrorKind};

use crate::error::WalletError;

pub mod airdrop;
pub mod ledger_args;
pub mod send;
pub mod stake;

pub use ledger_args::LedgerArgs;

/// Local wallet for an XRS node: send, stake and claim airdrops.
#[derive(Parser, Debug)]
#[command(name = "xrs-wallet", version, about, arg_required_else_help = true)]
pub struct Args {
    #[command(flatten)]
    pub ledger: LedgerArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// A specific action to perform.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Transfer XRS to another address.
    Send(send::SendArgs),

    /// Stake XRS with the stake program.
    Stake(stake::StakeArgs),

    /// Withdraw staked XRS.  Not implemented yet.
    Unstake(stake::StakeArgs),

    /// Claim 1,000 XRS from the local node faucet.
    Airdrop(airdrop::AirdropArgs),
}

/// What to do with a command line that did not parse.
pub enum ParseFailure {
    /// No command, an unknown command, `--help` or `--version`: show this text and succeed.
    Usage(String),
    Invalid(WalletError),
}

impl Args {
    pub fn try_parse_argv<I, T>(argv: I) -> Result<Self, ParseFailure>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::try_parse_from(argv).map_err(|err| match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                ParseFailure::Usage(err.to_string())
            }
            ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            | ErrorKind::MissingSubcommand
            | ErrorKind::InvalidSubcommand => {
                ParseFailure::Usage(Self::command().render_help().to_string())
            }
            _ => {
                let message = err.render().to_string();
                let message = message.strip_prefix("error: ").unwrap_or(&message);
                ParseFailure::Invalid(WalletError::Argument(message.trim_end().to_owned()))
            }
        })
    }
}
