//! Options for loading service configuration

/// What to do when two layers share a name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateLayerPolicy {
    /// The later layer replaces the earlier one, keeping the earlier position
    #[default]
    LastWriteWins,
    /// A duplicate name is an [`InvalidConfig`](crate::Error::InvalidConfig) error
    Reject,
}

/// Configuration for loading service and dataset documents
///
/// The defaults read a service document the way GeoQuadTree servers always
/// have: duplicate layer names silently replace earlier ones, dataset paths
/// are used exactly as written and any root element name is accepted.
///
/// # Example
///
/// ```
/// use geoquadtree::{DuplicateLayerPolicy, LoaderConfig};
///
/// let config = LoaderConfig::new()
///     .with_duplicate_layers(DuplicateLayerPolicy::Reject)
///     .with_relative_paths_resolved(true)
///     .with_expected_root("GeoQuadTreeServer");
///
/// assert_eq!(config.expected_root(), Some("geoquadtreeserver"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoaderConfig {
    duplicate_layers: DuplicateLayerPolicy,
    resolve_relative_paths: bool,
    expected_root: Option<String>,
}

impl LoaderConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how duplicate layer names are handled
    pub fn with_duplicate_layers(mut self, policy: DuplicateLayerPolicy) -> Self {
        self.duplicate_layers = policy;
        self
    }

    /// Resolve relative dataset paths against the service document's directory
    pub fn with_relative_paths_resolved(mut self, resolve: bool) -> Self {
        self.resolve_relative_paths = resolve;
        self
    }

    /// Require the service document root element to have this name
    ///
    /// The name is compared case-insensitively.
    pub fn with_expected_root(mut self, name: impl Into<String>) -> Self {
        self.expected_root = Some(name.into().to_lowercase());
        self
    }

    /// Policy for duplicate layer names
    pub fn duplicate_layers(&self) -> DuplicateLayerPolicy {
        self.duplicate_layers
    }

    /// Whether relative dataset paths are resolved against the service document
    pub fn resolves_relative_paths(&self) -> bool {
        self.resolve_relative_paths
    }

    /// Required root element name, lower-cased
    pub fn expected_root(&self) -> Option<&str> {
        self.expected_root.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LoaderConfig::new();
        assert_eq!(config.duplicate_layers(), DuplicateLayerPolicy::LastWriteWins);
        assert!(!config.resolves_relative_paths());
        assert_eq!(config.expected_root(), None);
        assert_eq!(config, LoaderConfig::default());
    }

    #[test]
    fn test_builder() {
        let config = LoaderConfig::new()
            .with_duplicate_layers(DuplicateLayerPolicy::Reject)
            .with_relative_paths_resolved(true)
            .with_expected_root("GeoQuadTreeServer");
        assert_eq!(config.duplicate_layers(), DuplicateLayerPolicy::Reject);
        assert!(config.resolves_relative_paths());
        assert_eq!(config.expected_root(), Some("geoquadtreeserver"));
    }
}
