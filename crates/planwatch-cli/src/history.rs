//! Dated JSON snapshots of each collection run.
//!
//! The history directory holds one `providers_data_YYYY-MM-DD.json` per run
//! day. The most recent snapshot is the comparison baseline for change
//! detection; an unreadable snapshot degrades to "no baseline" rather than
//! failing the run.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use planwatch_core::Dataset;

const SNAPSHOT_PREFIX: &str = "providers_data_";

/// Loads the most recent snapshot in `dir`, if any.
pub(crate) fn load_latest_snapshot(dir: &Path) -> Option<Dataset> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
        .ok()?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with(SNAPSHOT_PREFIX) && name.ends_with(".json"))
        })
        .collect();
    // Date-stamped names sort chronologically.
    paths.sort();
    let path = paths.pop()?;

    match std::fs::read_to_string(&path) {
        Ok(contents) => match serde_json::from_str(&contents) {
            Ok(dataset) => Some(dataset),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "could not parse previous snapshot");
                None
            }
        },
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "could not read previous snapshot");
            None
        }
    }
}

/// Writes `dataset` as the snapshot for `date`, creating the directory if
/// needed. Re-running on the same day overwrites that day's snapshot.
pub(crate) fn save_snapshot(
    dir: &Path,
    dataset: &Dataset,
    date: NaiveDate,
) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("{SNAPSHOT_PREFIX}{date}.json"));
    let json = serde_json::to_string_pretty(dataset)?;
    std::fs::write(&path, json)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use planwatch_core::{HostingFeatures, HostingPricing, HostingProvider};

    fn temp_dir(test_name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "planwatch-history-{test_name}-{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    fn sample_dataset(provider: &str) -> Dataset {
        Dataset {
            collected_at: Some(Utc::now()),
            hosting: vec![HostingProvider::from_parts(
                provider,
                "Basic",
                None,
                HostingPricing::default(),
                HostingFeatures::default(),
            )],
            vpn: vec![],
            changes_detected: vec![format!("hosting sale: {provider} (Basic) now $2.95/mo")],
        }
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn missing_directory_yields_no_baseline() {
        assert!(load_latest_snapshot(Path::new("/nonexistent/history")).is_none());
    }

    #[test]
    fn snapshot_round_trips_and_latest_wins() {
        let dir = temp_dir("latest");
        save_snapshot(&dir, &sample_dataset("Old Host"), date("2026-08-01")).unwrap();
        save_snapshot(&dir, &sample_dataset("New Host"), date("2026-08-15")).unwrap();

        let loaded = load_latest_snapshot(&dir).expect("snapshot");
        assert_eq!(loaded.hosting[0].provider_name, "New Host");
        // The change list travels with the snapshot.
        assert_eq!(
            loaded.changes_detected,
            vec!["hosting sale: New Host (Basic) now $2.95/mo"]
        );

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn corrupt_snapshot_degrades_to_no_baseline() {
        let dir = temp_dir("corrupt");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("providers_data_2026-08-15.json"), "not json").unwrap();

        assert!(load_latest_snapshot(&dir).is_none());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn unrelated_files_are_ignored() {
        let dir = temp_dir("unrelated");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("notes.txt"), "x").unwrap();

        assert!(load_latest_snapshot(&dir).is_none());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
