use crate::aggregator::RemoteStatsAggregator;
use crate::models::{ProfileStats, RepositorySummary, StatsReport};

#[derive(Debug, Clone, PartialEq)]
pub enum Loadable<T> {
    Idle,
    Loading,
    Ready(T),
}

impl<T> Default for Loadable<T> {
    fn default() -> Self {
        Loadable::Idle
    }
}

impl<T> Loadable<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Loadable::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Loadable::Ready(value) => Some(value),
            _ => None,
        }
    }
}

/// Coding-profile stats card.
#[derive(Debug, Default)]
pub struct StatsPanel {
    state: Loadable<StatsReport>,
    username: Option<String>,
}

impl StatsPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &Loadable<StatsReport> {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn stats(&self) -> Option<&ProfileStats> {
        self.state.ready().map(|r| &r.stats)
    }

    pub fn notice(&self) -> Option<&str> {
        self.state.ready().and_then(|r| r.notice())
    }

    pub fn start_loading(&mut self) {
        self.state = Loadable::Loading;
    }

    pub fn finish(&mut self, report: StatsReport) {
        self.state = Loadable::Ready(report);
    }

    /// Fetches on mount.
    pub async fn activate(&mut self, aggregator: &RemoteStatsAggregator, username: &str) {
        self.username = Some(username.to_string());
        self.start_loading();
        let report = aggregator.fetch_profile_stats(username).await;
        self.finish(report);
    }

    /// Re-runs the last fetch. Returns false if the panel was never activated.
    pub async fn retry(&mut self, aggregator: &RemoteStatsAggregator) -> bool {
        let Some(username) = self.username.clone() else {
            return false;
        };
        self.activate(aggregator, &username).await;
        true
    }
}

/// Recent repositories list.
#[derive(Debug, Default)]
pub struct RepositoryPanel {
    state: Loadable<Vec<RepositorySummary>>,
    request: Option<(String, u32)>,
}

impl RepositoryPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &Loadable<Vec<RepositorySummary>> {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn repositories(&self) -> &[RepositorySummary] {
        self.state.ready().map(Vec::as_slice).unwrap_or(&[])
    }

    /// True once a load finished without producing anything; the renderer
    /// may offer a retry.
    pub fn is_empty_after_load(&self) -> bool {
        self.state.ready().map(Vec::is_empty).unwrap_or(false)
    }

    pub fn start_loading(&mut self) {
        self.state = Loadable::Loading;
    }

    pub fn finish(&mut self, repositories: Vec<RepositorySummary>) {
        self.state = Loadable::Ready(repositories);
    }

    pub async fn activate(
        &mut self,
        aggregator: &RemoteStatsAggregator,
        username: &str,
        limit: u32,
    ) {
        self.request = Some((username.to_string(), limit));
        self.start_loading();
        let repositories = aggregator.fetch_repositories(username, limit).await;
        self.finish(repositories);
    }

    /// Re-runs the last listing. Returns false if the panel was never activated.
    pub async fn retry(&mut self, aggregator: &RemoteStatsAggregator) -> bool {
        let Some((username, limit)) = self.request.clone() else {
            return false;
        };
        self.activate(aggregator, &username, limit).await;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_panel_lifecycle() {
        let mut panel = StatsPanel::new();
        assert!(panel.stats().is_none());

        panel.start_loading();
        assert!(panel.is_loading());
        assert!(panel.notice().is_none());

        panel.finish(StatsReport::fallback("HTTP error! status: 500"));
        assert!(!panel.is_loading());
        assert_eq!(panel.stats(), Some(&ProfileStats::fallback()));
        assert_eq!(panel.notice(), Some("HTTP error! status: 500"));
    }

    #[test]
    fn test_repository_panel_empty_only_after_load() {
        let mut panel = RepositoryPanel::new();
        assert!(!panel.is_empty_after_load());
        panel.start_loading();
        assert!(!panel.is_empty_after_load());
        panel.finish(Vec::new());
        assert!(panel.is_empty_after_load());
        assert!(panel.repositories().is_empty());
    }
}
