use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use knotes_core::{CallerId, ExposureMode, Note, WriteIntent};

use crate::app::AppContext;
use crate::cli::SealArgs;
use crate::envelope_file::write_envelope;
use crate::errors::CliError;
use crate::helpers::{read_note_body, read_password};

pub fn handle_seal(ctx: &AppContext, args: SealArgs) -> anyhow::Result<()> {
    let engine = ctx.engine()?;
    let owner = args
        .owner
        .as_deref()
        .map(CallerId::new)
        .unwrap_or_else(CallerId::anonymous);
    let mode = args.mode.map(ExposureMode::from);

    let effective = if owner.is_anonymous() {
        ExposureMode::Public
    } else {
        mode.unwrap_or(ExposureMode::Private)
    };
    let password = if effective == ExposureMode::PasswordShared {
        read_password(&args.password, true)?
    } else {
        None
    };

    let intent = mode.map(|mode| match mode {
        ExposureMode::Public => WriteIntent::Public,
        ExposureMode::Private => WriteIntent::Private,
        ExposureMode::PasswordShared => WriteIntent::PasswordShared {
            password: password.as_deref().map_or("", String::as_str),
        },
    });

    let body = read_note_body(args.body, args.input.as_deref())?;
    let envelope = engine
        .encode(Some(&body), intent, &owner)
        .map_err(CliError::from)?;

    let now = Utc::now();
    let note = Note {
        id: Uuid::now_v7(),
        envelope,
        created_at: now,
        modified_at: now,
    };
    write_envelope(&note, args.out.as_deref())?;

    if let Some(path) = &args.out {
        info!(id = %note.id, mode = %note.envelope.mode(), path = %path, "Sealed note");
        if !ctx.quiet {
            eprintln!("Sealed {} note {} to {}", note.envelope.mode(), note.id, path);
        }
    }
    Ok(())
}
