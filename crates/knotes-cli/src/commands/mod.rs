pub mod inspect;
pub mod misc;
pub mod open;
pub mod seal;
