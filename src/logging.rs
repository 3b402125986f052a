//! JSONL mission log.
//!
//! Each process run appends to `{log_dir}/missions-{ISO8601}.jsonl`, one
//! self-describing JSON object per line, flushed after every event.
//!
//! Uses synchronous `std::fs` since writes are small and infrequent.

use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;

use crate::error::MissionError;
use crate::orchestration::MissionReport;
use crate::planning::Plan;
use crate::tools::ToolOutcome;

fn now_iso() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

#[derive(Debug, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum LogEntry<'a> {
    MissionStart {
        timestamp: String,
        objective: &'a str,
    },
    PlannerResponse {
        timestamp: String,
        mission_id: &'a str,
        raw: &'a str,
    },
    Plan {
        timestamp: String,
        mission_id: &'a str,
        plan: &'a Plan,
    },
    Outcome {
        timestamp: String,
        mission_id: &'a str,
        outcome: &'a ToolOutcome,
    },
    Error {
        timestamp: String,
        objective: &'a str,
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        raw: Option<&'a str>,
    },
}

pub struct MissionLogger {
    writer: BufWriter<fs::File>,
    log_path: PathBuf,
}

impl MissionLogger {
    /// Create `log_dir` if needed and open a fresh log file inside it.
    pub fn new(log_dir: &Path) -> anyhow::Result<Self> {
        fs::create_dir_all(log_dir)?;

        let run_id = Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let log_path = log_dir.join(format!("missions-{run_id}.jsonl"));

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        Ok(Self {
            writer: BufWriter::new(file),
            log_path,
        })
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    pub fn log_event(&mut self, event: &LogEntry<'_>) -> anyhow::Result<()> {
        serde_json::to_writer(&mut self.writer, event)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn log_mission_start(&mut self, objective: &str) -> anyhow::Result<()> {
        self.log_event(&LogEntry::MissionStart {
            timestamp: now_iso(),
            objective,
        })
    }

    /// Log the planner reply, parsed plan and outcome of a finished mission.
    pub fn log_report(&mut self, report: &MissionReport) -> anyhow::Result<()> {
        let mission_id = report.mission_id.as_str();
        self.log_event(&LogEntry::PlannerResponse {
            timestamp: now_iso(),
            mission_id,
            raw: &report.raw_response,
        })?;
        self.log_event(&LogEntry::Plan {
            timestamp: now_iso(),
            mission_id,
            plan: &report.plan,
        })?;
        self.log_event(&LogEntry::Outcome {
            timestamp: now_iso(),
            mission_id,
            outcome: &report.outcome,
        })
    }

    pub fn log_error(&mut self, objective: &str, error: &MissionError) -> anyhow::Result<()> {
        let raw = match error {
            MissionError::PlanParse(e) => Some(e.raw.as_str()),
            _ => None,
        };
        self.log_event(&LogEntry::Error {
            timestamp: now_iso(),
            objective,
            message: error.to_string(),
            raw,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlanParseError;
    use crate::tools::ToolArgs;
    use std::io::BufRead;
    use tempfile::TempDir;

    fn make_logger() -> (MissionLogger, TempDir) {
        let tmp = TempDir::new().expect("tempdir");
        let logger = MissionLogger::new(&tmp.path().join("logs")).expect("MissionLogger::new");
        (logger, tmp)
    }

    fn read_lines(logger: &MissionLogger) -> Vec<serde_json::Value> {
        let file = fs::File::open(logger.log_path()).expect("open log");
        std::io::BufReader::new(file)
            .lines()
            .map(|line| serde_json::from_str(&line.expect("read line")).expect("valid JSON"))
            .collect()
    }

    #[test]
    fn creates_log_file_in_log_dir() {
        let (logger, tmp) = make_logger();
        let log_path = logger.log_path();

        assert!(log_path.exists());
        assert!(log_path.starts_with(tmp.path().join("logs")));

        let name = log_path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("missions-"));
        assert!(name.ends_with(".jsonl"));
    }

    #[test]
    fn report_is_logged_as_three_events() {
        let (mut logger, _tmp) = make_logger();
        let report = MissionReport {
            mission_id: "m-1".to_string(),
            objective: "Check if we have any pipelines.".to_string(),
            raw_response: "{\"tool\":\"list_workflows\"}".to_string(),
            plan: Plan {
                agent_name: Some("DevOps_Runner".to_string()),
                tool: "list_workflows".to_string(),
                args: ToolArgs::new(),
            },
            outcome: ToolOutcome::Success {
                message: "ID: 1 | Name: CI | State: active".to_string(),
                workflow_count: Some(1),
            },
        };

        logger.log_mission_start(&report.objective).unwrap();
        logger.log_report(&report).unwrap();

        let lines = read_lines(&logger);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0]["event_type"], "mission_start");
        assert_eq!(lines[1]["event_type"], "planner_response");
        assert_eq!(lines[1]["mission_id"], "m-1");
        assert_eq!(lines[2]["event_type"], "plan");
        assert_eq!(lines[2]["plan"]["agent_name"], "DevOps_Runner");
        assert_eq!(lines[3]["event_type"], "outcome");
        assert_eq!(lines[3]["outcome"]["status"], "success");
        assert_eq!(lines[3]["outcome"]["workflow_count"], 1);
        assert!(lines.iter().all(|l| l["timestamp"].is_string()));
    }

    #[test]
    fn parse_errors_keep_raw_reply() {
        let (mut logger, _tmp) = make_logger();
        let error = MissionError::PlanParse(PlanParseError {
            reason: "no JSON object found".to_string(),
            raw: "just prose".to_string(),
        });

        logger.log_error("Create a new pipeline.", &error).unwrap();

        let lines = read_lines(&logger);
        assert_eq!(lines[0]["event_type"], "error");
        assert_eq!(lines[0]["raw"], "just prose");
        assert_eq!(lines[0]["objective"], "Create a new pipeline.");
    }

    #[test]
    fn other_errors_omit_raw() {
        let (mut logger, _tmp) = make_logger();

        logger.log_error("x", &MissionError::EmptyObjective).unwrap();

        let lines = read_lines(&logger);
        assert!(lines[0].get("raw").is_none());
        assert_eq!(lines[0]["message"], "Mission objective is empty");
    }
}
