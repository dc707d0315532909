use chrono::Local;
use clap::Parser;
use gymlog::application::{
    dashboard::dashboard, history::history, init::init, manage_config::ConfigService,
    ExportService, RecordService, RoutineService, StagingService,
};
use gymlog::cli::{output, Cli, Commands};
use gymlog::error::GymlogError;
use gymlog::infrastructure::{FileSystemRepository, GymlogRepository};
use std::io::{self, BufRead, Write};

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = run(cli);

    match result {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn run(cli: Cli) -> Result<(), GymlogError> {
    let today = Local::now().date_naive();

    match cli.command {
        Some(Commands::Init { path }) => {
            init(&path, today)?;
            println!("Initialized gymlog workspace at {}", path.display());
            Ok(())
        }
        Some(Commands::Set(args)) => {
            let repo = FileSystemRepository::discover()?;
            let config = repo.load_config()?;
            let update = args.into_update(today)?;

            let service = StagingService::new(repo);
            let view = if update.is_empty() {
                service.show(today)?
            } else {
                service.update(update, today)?
            };
            print!("{}", output::format_staging(&view, &config));
            Ok(())
        }
        Some(Commands::Staging) => {
            let repo = FileSystemRepository::discover()?;
            let config = repo.load_config()?;
            let view = StagingService::new(repo).show(today)?;
            print!("{}", output::format_staging(&view, &config));
            Ok(())
        }
        Some(Commands::Add) => {
            let repo = FileSystemRepository::discover()?;
            let outcome = RecordService::new(repo).append(today)?;
            println!("{}", output::format_append(&outcome));
            Ok(())
        }
        Some(Commands::Clear) => {
            let repo = FileSystemRepository::discover()?;
            let config = repo.load_config()?;
            let staging = RecordService::new(repo).clear(today)?;
            println!("Staging entry cleared (date: {})", config.format_date(staging.date));
            Ok(())
        }
        Some(Commands::Undo { yes }) => {
            let repo = FileSystemRepository::discover()?;
            let config = repo.load_config()?;
            let service = RecordService::new(repo);

            let pending = service.begin_undo()?;
            println!("{}", output::format_undo_preview(pending.preview(), &config));

            if !yes && !confirm()? {
                println!("Undo cancelled");
                return Ok(());
            }

            let removed = service.commit_undo(pending)?;
            println!("Removed {} (set {})", removed.exercise, removed.set_number);
            Ok(())
        }
        Some(Commands::Routine { label }) => {
            let repo = FileSystemRepository::discover()?;
            let listing = RoutineService::new(repo).exercises(&label)?;
            print!("{}", output::format_routine(&listing));
            Ok(())
        }
        Some(Commands::Routines) => {
            let repo = FileSystemRepository::discover()?;
            let catalog = RoutineService::new(repo).catalog()?;
            print!("{}", output::format_routines(&catalog));
            Ok(())
        }
        Some(Commands::History { limit }) => {
            let repo = FileSystemRepository::discover()?;
            let config = repo.load_config()?;
            let rows = history(&repo, limit)?;
            print!("{}", ensure_newline(output::format_history(&rows, &config)));
            Ok(())
        }
        Some(Commands::Dashboard) => {
            let repo = FileSystemRepository::discover()?;
            let config = repo.load_config()?;
            let metrics = dashboard(&repo, today)?;
            print!("{}", output::format_dashboard(&metrics, &config));
            Ok(())
        }
        Some(Commands::Export { output: output_dir }) => {
            let repo = FileSystemRepository::discover()?;
            let report = ExportService::new(repo).export(output_dir.as_deref(), today)?;
            println!("{}", output::format_export(&report));
            Ok(())
        }
        Some(Commands::Config { key, value, list }) => {
            let repo = FileSystemRepository::discover()?;
            let service = ConfigService::new(repo);

            if list {
                let config = service.list()?;
                println!("date_format = {}", config.date_format);
                println!("workbook_file = {}", config.workbook_file);
                println!("macros_file = {}", config.macros_file);
                println!("created = {}", config.created.to_rfc3339());
                Ok(())
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                } else {
                    println!("{}", service.get(&k)?);
                }
                Ok(())
            } else {
                println!("Usage: gymlog config [--list | <key> [<value>]]");
                println!("Valid keys: date_format, workbook_file, macros_file, created");
                Ok(())
            }
        }
        None => {
            println!("gymlog - Home workout log with spreadsheet export");
            println!("Use --help for usage information");
            Ok(())
        }
    }
}

/// Ask for y/N on stdin; anything but yes declines
fn confirm() -> Result<bool, GymlogError> {
    print!("Confirm? [y/N] ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn ensure_newline(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}
