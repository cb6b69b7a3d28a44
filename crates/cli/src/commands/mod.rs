// Path: crates/cli/src/commands/mod.rs

pub mod ensure_uuids;
pub mod normalize;
