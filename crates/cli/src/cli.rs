use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "respect")]
#[command(about = "Fractal Respect issuance command line interface", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to respect.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<String>,

    /// State snapshot path, overriding the configured one
    #[arg(long, global = true, value_name = "PATH")]
    pub state: Option<PathBuf>,

    /// Use this UNIX time in seconds instead of the system clock
    #[arg(long, global = true, value_name = "SECS")]
    pub now: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a fresh state snapshot from the configuration
    Init {
        /// Replace an existing snapshot
        #[arg(long)]
        force: bool,
    },
    /// Close the next period with group rankings read from a JSON file
    SubmitRanks {
        #[arg(long)]
        caller: String,
        /// JSON array of `{ "group_num": n, "ranks": [6 addresses, lowest first] }`
        #[arg(long, value_name = "PATH")]
        groups: PathBuf,
    },
    /// Issue a single token (issuer only)
    Mint(MintCommand),
    /// Destroy a token (issuer only)
    Burn {
        #[arg(long)]
        caller: String,
        /// Token id, decimal or 0x hex
        id: String,
    },
    /// Change the executor (issuer or current executor)
    SetExecutor {
        #[arg(long)]
        caller: String,
        /// New executor; the zero address clears it
        executor: String,
    },
    /// Change the minimum delay between submissions (issuer only)
    SetRanksDelay {
        #[arg(long)]
        caller: String,
        /// Seconds
        delay: u64,
    },
    /// Change the token URI prefix (issuer only)
    SetBaseUri {
        #[arg(long)]
        caller: String,
        uri: String,
    },
    /// Show issuance settings, schedule and supply
    Status,
    /// Show an owner's respect balance
    Balance { address: String },
    /// List an owner's tokens
    Tokens { address: String },
    /// Show a token's URI
    TokenUri { id: String },
    /// Respect earned over the last N periods
    Earnings { address: String, periods: u64 },
    /// Encode owner, period and mint type into a token id
    PackTokenId(PackCommand),
    /// Decode a token id
    UnpackTokenId { id: String },
    /// Record a group's consensus results
    LogInputs {
        #[arg(long)]
        submitter: String,
        /// JSON `{ "group_num": n, "ranks": [...], "delegate": optional address }`
        #[arg(long, value_name = "PATH")]
        results: PathBuf,
        /// Record only the Keccak-256 commitment
        #[arg(long)]
        hashed: bool,
    },
}

#[derive(Args, Debug)]
pub struct MintCommand {
    #[arg(long)]
    pub caller: String,
    #[arg(long)]
    pub to: String,
    #[arg(long)]
    pub value: u64,
    #[arg(long)]
    pub period: u64,
    #[arg(long, default_value_t = 0)]
    pub mint_type: u8,
}

#[derive(Args, Debug)]
pub struct PackCommand {
    #[arg(long)]
    pub owner: String,
    /// Wider values are truncated to 64 bits
    #[arg(long)]
    pub period: u128,
    /// Wider values are truncated to 8 bits
    #[arg(long, default_value_t = 0)]
    pub mint_type: u32,
}
