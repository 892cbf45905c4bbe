//! # CLI Layer
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Installs a tracing subscriber
//! - Formats output for human consumption
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: clap, in `setup.rs`
//! 2. **Context Setup**: resolve the data root and load `bumo.toml`
//! 3. **Dispatch**: route each command to the `RecordService`
//! 4. **Output Formatting**: `render.rs`

use super::render::{print_config, print_result};
use super::setup::{Cli, Commands, FieldArgs, RecordAction};
use anyhow::{bail, Context, Result};
use bumoapp::api::RecordService;
use bumoapp::assets::Upload;
use bumoapp::commands::CmdResult;
use bumoapp::error::BumoError;
use bumoapp::init::{initialize, BumoContext};
use bumoapp::model::{Collection, Fields};
use bumoapp::store::FsBackend;
use clap::Parser;
use serde_json::Value;
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = initialize(cli.data_dir.clone())?;
    debug!(data_root = %ctx.data_root.display(), "context ready");

    if let Commands::Config = cli.command {
        return handle_config(&ctx);
    }

    let result = match cli.command.collection() {
        Some((collection, action)) => handle_record(&ctx.service, collection, action)?,
        None => ctx.service.doctor()?,
    };
    print_result(&result)?;
    Ok(())
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn handle_record(
    service: &RecordService<FsBackend>,
    collection: Collection,
    action: &RecordAction,
) -> Result<CmdResult> {
    let result = match action {
        RecordAction::List => service.list(collection)?,
        RecordAction::Get { id } => {
            let record = service.get(collection, id)?;
            CmdResult::default().with_listed_records(vec![record])
        }
        RecordAction::Create(args) => {
            let (fields, upload) = read_field_args(args, max_upload_bytes(service))?;
            service.create(collection, fields, upload.as_ref())?
        }
        RecordAction::Update { id, fields } => {
            let (fields, upload) = read_field_args(fields, max_upload_bytes(service))?;
            service.update(collection, id, fields, upload.as_ref())?
        }
        RecordAction::Delete { id } => service.delete(collection, id)?,
    };
    Ok(result)
}

fn max_upload_bytes(service: &RecordService<FsBackend>) -> u64 {
    service.assets().policy().max_bytes
}

fn handle_config(ctx: &BumoContext) -> Result<()> {
    print_config(&ctx.data_root, &ctx.config)
}

fn read_field_args(args: &FieldArgs, max_upload_bytes: u64) -> Result<(Fields, Option<Upload>)> {
    let mut fields = Fields::new();
    for raw in &args.set {
        let (key, value) = parse_field(raw)?;
        fields.insert(key, value);
    }
    let upload = args
        .file
        .as_deref()
        .map(|path| {
            Upload::from_path(path, max_upload_bytes)
                .with_context(|| format!("reading {}", path.display()))
        })
        .transpose()?;
    Ok((fields, upload))
}

/// Parse `key=value` (stored as a string) or `key:=json` (stored as the JSON value).
pub(crate) fn parse_field(raw: &str) -> Result<(String, Value)> {
    let Some((key, value)) = raw.split_once('=') else {
        bail!("expected key=value or key:=json, got '{}'", raw);
    };
    let (key, value) = match key.strip_suffix(':') {
        Some(key) => {
            let parsed: Value = serde_json::from_str(value)
                .with_context(|| format!("'{}' is not a JSON value", value))?;
            (key, parsed)
        }
        None => (key, Value::String(value.to_string())),
    };
    let key = key.trim();
    if key.is_empty() {
        bail!("field name missing in '{}'", raw);
    }
    Ok((key.to_string(), value))
}

/// Exit status for a failed run: 2 when the store rejected the request, 1 otherwise.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<BumoError>() {
        Some(e) if e.is_client_error() => 2,
        _ => 1,
    }
}
