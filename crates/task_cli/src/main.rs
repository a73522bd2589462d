use clap::Parser;
use clap::error::ErrorKind;
use log::warn;
use task_cli::cli::{Cli, Command};
use task_core::config::{
    ConfigOverrides, load_config_with_fallback, merge_overrides, parse_config_override,
};
use task_core::error::AppError;
use task_core::messages::MessageKey;
use task_core::model::{Priority, Task};
use task_core::task_api::TaskManager;

fn init_logging() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .format_timestamp_secs()
        .init();
}

fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::invalid_input(message)
}

fn build_manager(raw_overrides: &[String]) -> Result<TaskManager, AppError> {
    let loaded = load_config_with_fallback();
    if let Some(err) = loaded.error {
        warn!("ignoring config file: {err}");
    }

    let mut overrides = ConfigOverrides::default();
    for raw in raw_overrides {
        overrides.apply(parse_config_override(raw)?);
    }

    let config = merge_overrides(&loaded.config, &overrides);
    Ok(TaskManager::from_config(&config))
}

fn print_created(manager: &TaskManager, task: &Task, json: bool) -> Result<(), AppError> {
    if json {
        let rendered =
            serde_json::to_string(task).map_err(|err| AppError::invalid_data(err.to_string()))?;
        println!("{rendered}");
    } else {
        println!(
            "{}",
            manager
                .messages()
                .render(MessageKey::TaskCreated, &[("id", task.id.as_str())])
        );
    }
    Ok(())
}

fn report(manager: &TaskManager, outcome: Result<Task, AppError>, json: bool) -> Result<(), AppError> {
    match outcome {
        Ok(task) => print_created(manager, &task, json),
        Err(err) => {
            eprintln!("ERROR: {}", err);
            Ok(())
        }
    }
}

fn run_demo(manager: &TaskManager, json: bool) -> Result<(), AppError> {
    let heading = |text: &str| {
        if !json {
            println!("\n{text}");
        }
    };

    heading("Adding a valid task:");
    report(
        manager,
        manager.create_task(
            "Buy book",
            "Software Engineering book",
            "2025-07-20",
            "High",
            false,
        ),
        json,
    )?;

    heading("Adding the same task again:");
    report(
        manager,
        manager.create_task(
            "Buy book",
            "Software Engineering book",
            "2025-07-20",
            Priority::High,
            false,
        ),
        json,
    )?;

    heading("Adding a recurring task:");
    report(
        manager,
        manager.create_task("Exercise", "Gym 1h", "2025-07-21", "Medium", true),
        json,
    )?;

    heading("Adding a task with an empty title:");
    report(
        manager,
        manager.create_task("", "No title", "2025-07-22", "Low", false),
        json,
    )?;

    heading("Adding a task with a malformed due date:");
    report(
        manager,
        manager.create_task("Read", "Wrong date format", "20-07-2025", "Low", false),
        json,
    )?;

    Ok(())
}

fn run(cli: Cli) -> Result<(), AppError> {
    let Cli {
        command,
        json,
        config_override,
    } = cli;
    let manager = build_manager(&config_override)?;

    match command.unwrap_or(Command::Demo) {
        Command::Add {
            title,
            due_date,
            description,
            priority,
            recurring,
        } => {
            let task = manager.create_task(&title, &description, &due_date, &priority, recurring)?;
            print_created(&manager, &task, json)?;
        }
        Command::Demo => run_demo(&manager, json)?,
    }

    Ok(())
}

fn main() {
    init_logging();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            eprintln!("ERROR: {}", normalize_parse_error(err));
            std::process::exit(1);
        }
    };

    if let Err(err) = run(cli) {
        eprintln!("ERROR: {}", err);
        std::process::exit(1);
    }
}
