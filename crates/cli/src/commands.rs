use anyhow::{Context, Result};
use respect_inputs_logger::{GroupResults, InputsLogger};
use respect_issuance::FractalRespect;
use respect_types::{
    pack_token_id_lossy, Address, Clock, GroupRanking, ManualClock, SystemClock, TokenId,
    TokenIdData,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use crate::cli::{Cli, Commands, MintCommand, PackCommand};
use crate::settings::CliConfig;
use crate::state;

/// Execute one command and return its JSON output. Mutating commands save
/// the snapshot only when they succeed.
pub fn run(cli: Cli, config: &CliConfig) -> Result<Value> {
    let state_path = cli.state.unwrap_or_else(|| config.state_path.clone());
    let clock: Arc<dyn Clock> = match cli.now {
        Some(now) => Arc::new(ManualClock::new(now)),
        None => Arc::new(SystemClock),
    };
    debug!("Using state {}", state_path.display());

    match cli.command {
        Commands::Init { force } => init(&state_path, config, clock, force),
        Commands::SubmitRanks { caller, groups } => {
            let respect = state::load(&state_path, clock)?;
            let groups: Vec<GroupRanking> = read_json(&groups)?;
            let report = respect.submit_ranks(&parse_address(&caller)?, &groups)?;
            state::save(&state_path, &respect)?;
            Ok(json!({
                "period_number": report.period_number,
                "groups": report.groups,
                "tokens_minted": report.tokens_minted,
                "respect_minted": report.respect_minted.to_string(),
            }))
        }
        Commands::Mint(MintCommand {
            caller,
            to,
            value,
            period,
            mint_type,
        }) => {
            let respect = state::load(&state_path, clock)?;
            let id = respect.mint(
                &parse_address(&caller)?,
                parse_address(&to)?,
                value,
                period,
                mint_type,
            )?;
            state::save(&state_path, &respect)?;
            Ok(json!({ "token_id": id, "value": value }))
        }
        Commands::Burn { caller, id } => {
            let respect = state::load(&state_path, clock)?;
            let id = parse_token_id(&id)?;
            let value = respect.burn(&parse_address(&caller)?, &id)?;
            state::save(&state_path, &respect)?;
            Ok(json!({ "token_id": id, "burned_value": value }))
        }
        Commands::SetExecutor { caller, executor } => {
            let respect = state::load(&state_path, clock)?;
            respect.set_executor(&parse_address(&caller)?, parse_address(&executor)?)?;
            state::save(&state_path, &respect)?;
            Ok(json!({ "executor": respect.executor() }))
        }
        Commands::SetRanksDelay { caller, delay } => {
            let respect = state::load(&state_path, clock)?;
            respect.set_ranks_delay(&parse_address(&caller)?, delay)?;
            state::save(&state_path, &respect)?;
            Ok(json!({ "ranks_delay": respect.ranks_delay() }))
        }
        Commands::SetBaseUri { caller, uri } => {
            let respect = state::load(&state_path, clock)?;
            respect.set_base_uri(&parse_address(&caller)?, uri)?;
            state::save(&state_path, &respect)?;
            Ok(json!({ "base_uri": respect.base_uri() }))
        }
        Commands::Status => Ok(status(&state::load(&state_path, clock)?)),
        Commands::Balance { address } => {
            let respect = state::load(&state_path, clock)?;
            let owner = parse_address(&address)?;
            Ok(json!({
                "address": owner,
                "balance": respect.balance_of(&owner).to_string(),
                "token_count": respect.token_supply_of_owner(&owner),
            }))
        }
        Commands::Tokens { address } => {
            let respect = state::load(&state_path, clock)?;
            let owner = parse_address(&address)?;
            let tokens = respect
                .tokens_of_owner(&owner)
                .into_iter()
                .map(|id| {
                    let value = respect.value_of_token(&id)?;
                    Ok(json!({
                        "token_id": id,
                        "period_number": id.period_number(),
                        "mint_type": id.mint_type(),
                        "value": value,
                    }))
                })
                .collect::<Result<Vec<Value>>>()?;
            Ok(json!({ "address": owner, "tokens": tokens }))
        }
        Commands::TokenUri { id } => {
            let respect = state::load(&state_path, clock)?;
            let id = parse_token_id(&id)?;
            Ok(json!({ "token_id": id, "token_uri": respect.token_uri(&id)? }))
        }
        Commands::Earnings { address, periods } => {
            let respect = state::load(&state_path, clock)?;
            let owner = parse_address(&address)?;
            Ok(json!({
                "address": owner,
                "current_period": respect.period_number(),
                "periods": periods,
                "earnings": respect.earnings_per_last_periods(&owner, periods).to_string(),
            }))
        }
        Commands::PackTokenId(PackCommand {
            owner,
            period,
            mint_type,
        }) => {
            let id = pack_token_id_lossy(parse_address(&owner)?, period, mint_type);
            Ok(json!({
                "token_id": id,
                "hex": format!("0x{}", hex::encode(id.to_be_bytes())),
                "data": TokenIdData::from(id),
            }))
        }
        Commands::UnpackTokenId { id } => {
            let id = parse_token_id(&id)?;
            Ok(json!({
                "token_id": id,
                "data": TokenIdData::from(id),
                "reserved_bits_set": id.has_reserved_bits(),
            }))
        }
        Commands::LogInputs {
            submitter,
            results,
            hashed,
        } => {
            let submitter = parse_address(&submitter)?;
            let results: GroupResults = read_json(&results)?;
            let logger = InputsLogger::new();
            let entry = if hashed {
                logger.submit_cons_hashed(submitter, &results)
            } else {
                logger.submit_cons(submitter, results)
            };
            Ok(serde_json::to_value(entry)?)
        }
    }
}

fn init(path: &Path, config: &CliConfig, clock: Arc<dyn Clock>, force: bool) -> Result<Value> {
    if path.exists() && !force {
        anyhow::bail!(
            "state {} already exists (use --force to replace it)",
            path.display()
        );
    }
    let respect = FractalRespect::new(config.issuance_config()?, clock)?;
    state::save(path, &respect)?;
    Ok(status(&respect))
}

fn status(respect: &FractalRespect) -> Value {
    json!({
        "name": respect.name(),
        "symbol": respect.symbol(),
        "base_uri": respect.base_uri(),
        "issuer": respect.issuer(),
        "executor": respect.executor(),
        "period_number": respect.period_number(),
        "last_submission_time": respect.last_submission_time(),
        "ranks_delay": respect.ranks_delay(),
        "next_submission_time": respect.next_submission_time(),
        "token_supply": respect.token_supply(),
        "total_supply": respect.total_supply().to_string(),
    })
}

fn parse_address(value: &str) -> Result<Address> {
    value
        .parse()
        .with_context(|| format!("invalid address {value}"))
}

fn parse_token_id(value: &str) -> Result<TokenId> {
    value
        .parse()
        .with_context(|| format!("invalid token id {value}"))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}
