//! App list construction and search filtering.

use crate::platform::{AppEnumerator, AppInfo, PlatformError};

/// Installed user apps, sorted by display name.
///
/// System packages are dropped. A failing icon load leaves the icon empty
/// instead of failing the whole listing.
pub fn installed_apps(enumerator: &dyn AppEnumerator) -> Result<Vec<AppInfo>, PlatformError> {
    let mut apps: Vec<AppInfo> = enumerator
        .installed_packages()?
        .into_iter()
        .filter(|record| !record.system)
        .map(|record| {
            let icon = match enumerator.load_icon(&record) {
                Ok(icon) => Some(icon),
                Err(err) => {
                    tracing::trace!(package = %record.package_name, error = %err, "Icon not loaded");
                    None
                }
            };
            AppInfo {
                package_name: record.package_name,
                name: record.label,
                icon,
                metadata: record.metadata,
            }
        })
        .collect();
    apps.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(apps)
}

/// Apps whose name contains `query`, ignoring case. Order is preserved.
pub fn filter_apps(query: &str, apps: &[AppInfo]) -> Vec<AppInfo> {
    if query.is_empty() {
        return apps.to_vec();
    }
    let needle = fold_case(query);
    apps.iter()
        .filter(|app| fold_case(&app.name).contains(&needle))
        .cloned()
        .collect()
}

/// Lowercase one char at a time. `str::to_lowercase` maps a word-final
/// `Σ` to `ς`, which would stop it matching a lone `Σ` query.
fn fold_case(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{Icon, PackageRecord};
    use std::collections::BTreeMap;

    struct Fixed(Vec<PackageRecord>);

    impl AppEnumerator for Fixed {
        fn installed_packages(&self) -> Result<Vec<PackageRecord>, PlatformError> {
            Ok(self.0.clone())
        }

        fn load_icon(&self, package: &PackageRecord) -> Result<Icon, PlatformError> {
            if package.package_name.ends_with("noicon") {
                return Err(PlatformError::IconUnavailable {
                    package: package.package_name.clone(),
                    reason: "broken".to_string(),
                });
            }
            Ok(Icon {
                source: format!("{}.png", package.package_name),
            })
        }
    }

    fn record(package: &str, label: &str, system: bool) -> PackageRecord {
        PackageRecord {
            package_name: package.to_string(),
            label: label.to_string(),
            system,
            metadata: BTreeMap::new(),
        }
    }

    fn named(names: &[&str]) -> Vec<AppInfo> {
        names
            .iter()
            .map(|name| AppInfo {
                package_name: format!("pkg.{}", name.to_lowercase()),
                name: name.to_string(),
                icon: None,
                metadata: BTreeMap::new(),
            })
            .collect()
    }

    #[test]
    fn drops_system_apps_and_sorts_by_name() {
        let enumerator = Fixed(vec![
            record("z.mail", "Mail", false),
            record("a.core", "Android System", true),
            record("c.cal", "Calendar", false),
            record("b.lower", "alarm", false),
        ]);
        let names: Vec<_> = installed_apps(&enumerator)
            .unwrap()
            .into_iter()
            .map(|app| app.name)
            .collect();
        // Case-sensitive: uppercase sorts before lowercase.
        assert_eq!(names, vec!["Calendar", "Mail", "alarm"]);
    }

    #[test]
    fn icon_failure_leaves_icon_empty() {
        let enumerator = Fixed(vec![
            record("a.noicon", "Alpha", false),
            record("b.ok", "Beta", false),
        ]);
        let apps = installed_apps(&enumerator).unwrap();
        assert_eq!(apps[0].icon, None);
        assert!(apps[1].icon.is_some());
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let apps = named(&["Calculator", "Calendar", "Camera"]);
        let names: Vec<_> = filter_apps("cal", &apps).into_iter().map(|a| a.name).collect();
        assert_eq!(names, vec!["Calculator", "Calendar"]);

        let names: Vec<_> = filter_apps("CA", &apps).into_iter().map(|a| a.name).collect();
        assert_eq!(names, vec!["Calculator", "Calendar", "Camera"]);

        let greek = named(&["ΟΔΟΣ", "Χάρτες"]);
        let names: Vec<_> = filter_apps("Σ", &greek).into_iter().map(|a| a.name).collect();
        assert_eq!(names, vec!["ΟΔΟΣ"]);
        let names: Vec<_> = filter_apps("οσ", &greek).into_iter().map(|a| a.name).collect();
        assert_eq!(names, vec!["ΟΔΟΣ"]);
    }

    #[test]
    fn empty_query_is_unfiltered() {
        let apps = named(&["Calculator", "Calendar", "Camera"]);
        assert_eq!(filter_apps("", &apps), apps);
    }
}
