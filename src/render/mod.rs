/// Persistent accumulation surface for captured snapshots.
pub mod composite;
/// Captured bitmap type.
pub mod frame;
