//! Configured provider ordering used for deterministic tie-breaks

/// Fixed provider order taken from configuration.
///
/// A lower rank wins ties. Providers missing from the order rank after all
/// configured ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderPriority {
    order: Vec<String>,
}

impl ProviderPriority {
    pub fn new<I, S>(order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            order: order.into_iter().map(Into::into).collect(),
        }
    }

    /// Position of the provider in the configured order
    pub fn rank(&self, provider: &str) -> usize {
        self.order
            .iter()
            .position(|p| p == provider)
            .unwrap_or(self.order.len())
    }

    /// Sort key: configured rank first, then name for unconfigured providers
    pub fn sort_key<'a>(&self, provider: &'a str) -> (usize, &'a str) {
        (self.rank(provider), provider)
    }

    pub fn providers(&self) -> &[String] {
        &self.order
    }
}
