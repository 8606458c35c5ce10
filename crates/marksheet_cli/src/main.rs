//! Marksheet CLI: command-line front end for the student marks file.
//!
//! # Responsibility
//! - Map each roster action to one subcommand over `marksheet_core`.
//! - Keep business rules in core; this binary only parses and prints.

mod render;

use clap::{Args, Parser, Subcommand, ValueEnum};
use log::error;
use marksheet_core::{
    core_version, default_log_level, init_logging, FlatFileRecordStore, RecordUpdate, RecordView,
    RosterService, SortDirection, StudentRecord, DEFAULT_DATA_PATH,
};
use std::error::Error;
use std::path::PathBuf;

const DEFAULT_LOG_DIR_NAME: &str = "marksheet-logs";

#[derive(Parser, Debug)]
#[command(name = "marksheet", author, version, about = "Student marks manager")]
struct Cli {
    /// Student marks file
    #[arg(long, global = true, default_value = DEFAULT_DATA_PATH)]
    data: PathBuf,

    /// Log level: trace|debug|info|warn|error
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Create the marks file if it does not exist
    Init,
    /// List students with derived metrics
    List {
        /// Filter by name (any case) or code
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Show one student
    Show {
        code: String,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Add a student
    Add {
        #[arg(long)]
        code: String,
        #[arg(long)]
        name: String,
        #[command(flatten)]
        scores: ScoreArgs,
    },
    /// Update a student's name and scores; omitted fields keep their value
    Update {
        code: String,
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        scores: PartialScoreArgs,
    },
    /// Delete a student
    Delete { code: String },
    /// Reorder the file by overall percentage
    Sort {
        #[arg(long, value_enum, default_value_t = OrderArg::Desc)]
        order: OrderArg,
    },
    /// Show the student with the highest overall percentage
    Top,
    /// Show the student with the lowest overall percentage
    Lowest,
    /// Class totals, average and grade distribution
    Summary {
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Report lines that could not be loaded
    Check,
}

#[derive(Args, Debug)]
struct ScoreArgs {
    #[arg(long, allow_hyphen_values = true)]
    cw1: String,
    #[arg(long, allow_hyphen_values = true)]
    cw2: String,
    #[arg(long, allow_hyphen_values = true)]
    cw3: String,
    #[arg(long, allow_hyphen_values = true)]
    exam: String,
}

#[derive(Args, Debug)]
struct PartialScoreArgs {
    #[arg(long, allow_hyphen_values = true)]
    cw1: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    cw2: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    cw3: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    exam: Option<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OrderArg {
    Asc,
    Desc,
}

impl From<OrderArg> for SortDirection {
    fn from(value: OrderArg) -> Self {
        match value {
            OrderArg::Asc => SortDirection::Ascending,
            OrderArg::Desc => SortDirection::Descending,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if let Err(err) = start_logging(&cli) {
        eprintln!("warning: file logging disabled: {err}");
    }

    if let Err(err) = run(cli) {
        error!("event=cli_command module=cli status=error error={err}");
        return Err(err);
    }
    Ok(())
}

fn start_logging(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let level = cli.log_level.as_deref().unwrap_or(default_log_level());
    let log_dir = match &cli.log_dir {
        Some(dir) => dir.clone(),
        None => std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME),
    };
    init_logging(level, log_dir)?;
    Ok(())
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let mut service = RosterService::open(FlatFileRecordStore::new(cli.data))?;

    match cli.cmd {
        Cmd::Init => {
            println!(
                "marksheet {} ready: {} student(s) in {}",
                core_version(),
                service.records().len(),
                service.store().path().display()
            );
        }
        Cmd::List { search, json } => {
            let query = search.unwrap_or_default();
            let views: Vec<RecordView> = service
                .search(&query)
                .into_iter()
                .map(RecordView::from_record)
                .collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&views)?);
            } else {
                print!("{}", render::table(&views));
                println!("{}", render::footer(&service.summary()));
            }
        }
        Cmd::Show { code, json } => {
            let record = service
                .find(&code)
                .ok_or_else(|| format!("student not found: {code}"))?;
            print_record(record, json)?;
        }
        Cmd::Add { code, name, scores } => {
            let record = StudentRecord::from_input(
                &code,
                &name,
                [
                    scores.cw1.as_str(),
                    scores.cw2.as_str(),
                    scores.cw3.as_str(),
                ],
                &scores.exam,
            )?;
            service.add_student(record)?;
            println!("Added {}.", code.trim());
        }
        Cmd::Update { code, name, scores } => {
            let update = {
                let current = service
                    .find(&code)
                    .ok_or_else(|| format!("student not found: {code}"))?;
                let [cw1, cw2, cw3] = current.coursework.map(|score| score.to_string());
                let exam = current.exam.to_string();
                RecordUpdate::from_input(
                    name.as_deref().unwrap_or(&current.name),
                    [
                        scores.cw1.as_deref().unwrap_or(&cw1),
                        scores.cw2.as_deref().unwrap_or(&cw2),
                        scores.cw3.as_deref().unwrap_or(&cw3),
                    ],
                    scores.exam.as_deref().unwrap_or(&exam),
                )?
            };
            service.update_student(&code, update)?;
            println!("Updated {code}.");
        }
        Cmd::Delete { code } => match service.delete_student(&code)? {
            Some(removed) => println!("Deleted {}.", removed.code),
            None => println!("No student with code {code}; nothing changed."),
        },
        Cmd::Sort { order } => {
            let direction = SortDirection::from(order);
            service.sort_by_percentage(direction)?;
            println!("Sorted {} student(s) {direction}.", service.records().len());
        }
        Cmd::Top => match service.top_student() {
            Some(record) => print_record(record, false)?,
            None => println!("No students."),
        },
        Cmd::Lowest => match service.lowest_student() {
            Some(record) => print_record(record, false)?,
            None => println!("No students."),
        },
        Cmd::Summary { json } => {
            let summary = service.summary();
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", render::summary(&summary));
            }
        }
        Cmd::Check => {
            print!("{}", render::skipped_lines(service.skipped_lines()));
        }
    }

    Ok(())
}

fn print_record(record: &StudentRecord, json: bool) -> Result<(), serde_json::Error> {
    let view = RecordView::from_record(record);
    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", render::detail(&view));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Cli, Cmd, OrderArg};
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn defaults_to_resources_marks_file() {
        let cli = Cli::try_parse_from(["marksheet", "list"]).unwrap();
        assert_eq!(cli.data, PathBuf::from("Resources/studentMarks.txt"));
        assert!(matches!(cli.cmd, Cmd::List { search: None, json: false }));
    }

    #[test]
    fn add_keeps_scores_as_raw_text() {
        let cli = Cli::try_parse_from([
            "marksheet", "add", "--code", "S01", "--name", "Ada", "--cw1", "18", "--cw2", "-1",
            "--cw3", "x", "--exam", "88",
        ])
        .unwrap();

        let Cmd::Add { code, scores, .. } = cli.cmd else {
            panic!("expected add command");
        };
        assert_eq!(code, "S01");
        assert_eq!(scores.cw2, "-1");
        assert_eq!(scores.cw3, "x");
    }

    #[test]
    fn sort_defaults_to_descending_and_accepts_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["marksheet", "sort", "--data", "/tmp/marks.txt"]).unwrap();
        assert_eq!(cli.data, PathBuf::from("/tmp/marks.txt"));
        assert!(matches!(cli.cmd, Cmd::Sort { order: OrderArg::Desc }));
    }

    #[test]
    fn update_fields_are_optional() {
        let cli = Cli::try_parse_from(["marksheet", "update", "S01", "--exam", "70"]).unwrap();
        let Cmd::Update { code, name, scores } = cli.cmd else {
            panic!("expected update command");
        };
        assert_eq!(code, "S01");
        assert!(name.is_none());
        assert!(scores.cw1.is_none());
        assert_eq!(scores.exam.as_deref(), Some("70"));
    }
}
