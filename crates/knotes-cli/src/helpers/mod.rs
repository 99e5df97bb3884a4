pub mod input;

pub use input::{read_note_body, read_password};
