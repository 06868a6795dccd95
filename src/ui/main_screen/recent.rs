//! Bounded recency list of launched packages.

use std::collections::VecDeque;

use crate::platform::AppInfo;

/// Ordered set of package names, least recent first.
///
/// Recording a package moves it to the most-recent end; going over
/// capacity evicts from the least-recent end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentApps {
    capacity: usize,
    packages: VecDeque<String>,
}

impl RecentApps {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            packages: VecDeque::with_capacity(capacity + 1),
        }
    }

    pub fn record(&mut self, package: &str) {
        if let Some(index) = self.packages.iter().position(|p| p == package) {
            self.packages.remove(index);
        }
        self.packages.push_back(package.to_string());
        while self.packages.len() > self.capacity {
            if let Some(evicted) = self.packages.pop_front() {
                tracing::trace!(package = %evicted, "Evicted from recent apps");
            }
        }
    }

    pub fn contains(&self, package: &str) -> bool {
        self.packages.iter().any(|p| p == package)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Package names, least recent first.
    pub fn packages(&self) -> impl Iterator<Item = &str> {
        self.packages.iter().map(String::as_str)
    }

    /// Installed apps that were launched recently, most recent first.
    ///
    /// Recorded packages that are no longer installed are skipped.
    pub fn select(&self, apps: &[AppInfo]) -> Vec<AppInfo> {
        self.packages
            .iter()
            .rev()
            .filter_map(|package| apps.iter().find(|app| &app.package_name == package))
            .take(self.capacity)
            .cloned()
            .collect()
    }
}
