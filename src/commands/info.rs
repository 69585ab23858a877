use clap::{Args, CommandFactory};
use eyre::Context;

use daylog::{ConsoleTarget, LogConfigBuilder};

use crate::commands::Daylog;

#[derive(Args, Debug)]
pub struct Cmd {
    #[arg(long, help = "Print the resolved configuration as JSON.")]
    pub json: bool,
}

impl Cmd {
    pub fn run(&self, builder: &LogConfigBuilder) -> eyre::Result<()> {
        let options = builder.options();
        let console_level = options
            .console_level
            .resolve()
            .context("Invalid console level")?;
        let file_level = options.file_level.resolve().context("Invalid file level")?;
        let file_path = builder
            .file_path()
            .context("Failed resolving log file path")?;

        let console = match options.console_target {
            ConsoleTarget::Stderr => "stderr",
            _ => "stdout",
        };

        if self.json {
            let info = serde_json::json!({
                "logger_name": options.logger_name,
                "console_level": console_level.as_str(),
                "file_level": file_level.as_str(),
                "console": console,
                "log_directory": options.log_directory,
                "date_format": options.date_format,
                "file_path": file_path,
                "backup_count": options.backup_count,
            });
            println!("{}", serde_json::to_string_pretty(&info)?);
            return Ok(());
        }

        println!(
            "Version:        {}",
            Daylog::command().get_version().unwrap_or("")
        );
        println!("Logger:         {}", options.logger_name);
        println!("Console:        {} >= {}", console, console_level);
        println!("File:           {} >= {}", file_path.display(), file_level);
        println!(
            "Keep:           {}",
            options
                .backup_count
                .map(|count| count.to_string())
                .unwrap_or_else(|| "all".to_string())
        );
        Ok(())
    }
}
