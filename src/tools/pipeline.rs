//! Basic pipeline synthesis: unique workflow file names and the
//! hello-world workflow template.

use std::sync::Mutex;

use chrono::{DateTime, TimeZone};

/// Repository-relative directory holding workflow definitions.
pub const WORKFLOWS_DIR: &str = ".github/workflows";

/// A generated workflow identity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineName {
    /// `YYYYMMDD_HHMMSS`, possibly with a `_N` disambiguation suffix.
    pub stamp: String,
    /// `workflow_{stamp}.yml`
    pub filename: String,
}

impl PipelineName {
    /// Repository-relative path, e.g. `.github/workflows/workflow_20260101_120000.yml`.
    pub fn repo_path(&self) -> String {
        format!("{WORKFLOWS_DIR}/{}", self.filename)
    }
}

/// Issues second-resolution pipeline names that never repeat while the
/// clock moves forward.
///
/// Two calls in the same second get `..._HHMMSS` and `..._HHMMSS_2`. Only
/// the most recent second is remembered, since earlier stamps can no longer
/// be produced. Names are not checked against the repository; a file left by
/// an earlier process in the same second surfaces as a failed commit.
#[derive(Debug, Default)]
pub struct PipelineNamer {
    /// Last base stamp issued and how many names it has produced.
    last: Mutex<Option<(String, u32)>>,
}

impl PipelineNamer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> PipelineName
    where
        Tz::Offset: std::fmt::Display,
    {
        let base = now.format("%Y%m%d_%H%M%S").to_string();
        let mut last = self
            .last
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let issued = match last.as_mut() {
            Some((stamp, count)) if *stamp == base => {
                *count += 1;
                *count
            }
            _ => 1,
        };
        if issued == 1 {
            *last = Some((base.clone(), 1));
        }

        let stamp = if issued == 1 {
            base
        } else {
            format!("{base}_{issued}")
        };

        PipelineName {
            filename: format!("workflow_{stamp}.yml"),
            stamp,
        }
    }
}

/// Render the hello-world CI workflow for `stamp`.
pub fn render_workflow(stamp: &str) -> String {
    format!(
        "\
name: CI Pipeline {stamp}
on: [workflow_dispatch]
jobs:
  build:
    runs-on: ubuntu-latest
    steps:
      - name: Run a one-line script
        run: echo \"Hello, world! Pipeline {stamp} is working.\"
"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::HashSet;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 7, h, m, s).unwrap()
    }

    #[test]
    fn name_follows_timestamp_format() {
        let name = PipelineNamer::new().next(&at(9, 5, 1));
        assert_eq!(name.stamp, "20260307_090501");
        assert_eq!(name.filename, "workflow_20260307_090501.yml");
        assert_eq!(name.repo_path(), ".github/workflows/workflow_20260307_090501.yml");
    }

    #[test]
    fn same_second_names_are_disambiguated() {
        let namer = PipelineNamer::new();
        let now = at(12, 0, 0);
        let names: Vec<String> = (0..5).map(|_| namer.next(&now).filename).collect();

        let unique: HashSet<&String> = names.iter().collect();
        assert_eq!(unique.len(), names.len());
        assert_eq!(names[0], "workflow_20260307_120000.yml");
        assert_eq!(names[1], "workflow_20260307_120000_2.yml");
        assert_eq!(names[4], "workflow_20260307_120000_5.yml");
    }

    #[test]
    fn later_second_does_not_get_suffix() {
        let namer = PipelineNamer::new();
        namer.next(&at(12, 0, 0));
        let name = namer.next(&at(12, 0, 1));
        assert_eq!(name.stamp, "20260307_120001");
    }

    #[test]
    fn only_latest_second_is_remembered() {
        let namer = PipelineNamer::new();
        namer.next(&at(12, 0, 0));
        namer.next(&at(12, 0, 0));
        namer.next(&at(12, 0, 1));

        let last = namer.last.lock().unwrap().clone();
        assert_eq!(last, Some(("20260307_120001".to_string(), 1)));

        let name = namer.next(&at(12, 0, 1));
        assert_eq!(name.stamp, "20260307_120001_2");
    }

    #[test]
    fn workflow_template_mentions_stamp() {
        let yaml = render_workflow("20260307_120000");
        assert!(yaml.starts_with("name: CI Pipeline 20260307_120000\n"));
        assert!(yaml.contains("on: [workflow_dispatch]"));
        assert!(yaml.contains("runs-on: ubuntu-latest"));
        assert!(yaml.contains("Pipeline 20260307_120000 is working."));
    }
}
