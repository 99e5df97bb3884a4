use std::io::Write;
use std::path::Path;

use knotes_core::CallerId;

use crate::app::AppContext;
use crate::cli::OpenArgs;
use crate::envelope_file::read_envelope;
use crate::errors::CliError;
use crate::helpers::read_password;

pub fn handle_open(ctx: &AppContext, args: &OpenArgs) -> anyhow::Result<()> {
    let engine = ctx.engine()?;
    let note = read_envelope(Path::new(&args.path))?;
    let requester = args
        .requester
        .as_deref()
        .map(CallerId::new)
        .unwrap_or_else(CallerId::anonymous);

    let password = if note.envelope.requires_password() {
        read_password(&args.password, false)?
    } else {
        None
    };

    let content = engine
        .decode(
            &note.envelope,
            &requester,
            password.as_deref().map(String::as_str),
        )
        .map_err(CliError::from)?;

    let mut stdout = std::io::stdout().lock();
    if let Some(text) = content {
        stdout.write_all(text.as_bytes())?;
        if !text.ends_with('\n') {
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}
