// handlers/mod.rs
//
// Every route this service exposes is public: the login endpoint is how a
// client obtains its token in the first place.
pub mod public;

pub use public::*;
