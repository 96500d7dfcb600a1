//! Preference lookup interface

/// Whether the user overrides the bundled builder home
pub const USE_SPECIFIC_BUILDER_HOME: &str = "use-specific-builder-home";

/// Absolute path of the user-chosen builder home
pub const MANUAL_BUILDER_HOME: &str = "manual-builder-home";

/// Workspace- or project-scoped preference store.
///
/// Missing keys read as `false` and the empty string, matching how host
/// preference stores report unset values.
pub trait PreferenceSource: Send + Sync {
    fn get_bool(&self, name: &str) -> bool;

    fn get_string(&self, name: &str) -> String;
}
