//! Entity — the capability shared by everything the classifier produces.

/// Something the hub can address by identifier and show by name.
pub trait Entity {
    /// Hub identifier used for commands and registry lookups.
    fn identifier(&self) -> &str;

    /// Human-readable name.
    fn friendly_name(&self) -> &str;
}
