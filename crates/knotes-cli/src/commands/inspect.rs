use std::path::Path;

use knotes_core::NoteMetadata;

use crate::cli::InspectArgs;
use crate::envelope_file::read_envelope;

pub fn handle_inspect(args: &InspectArgs) -> anyhow::Result<()> {
    let note = read_envelope(Path::new(&args.path))?;
    let metadata = NoteMetadata::from(&note);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&metadata)?);
        return Ok(());
    }

    println!("ID:                {}", metadata.id);
    println!("Owner:             {}", note.owner());
    println!("Mode:              {}", metadata.mode);
    println!(
        "Requires password: {}",
        if metadata.requires_password { "yes" } else { "no" }
    );
    println!(
        "Created:           {}",
        metadata.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!(
        "Modified:          {}",
        metadata.modified_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    if let Some(payload) = note.envelope.payload() {
        println!("Payload bytes:     {}", payload.len());
    } else {
        println!("Payload bytes:     (none)");
    }
    Ok(())
}
