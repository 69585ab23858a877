use std::{fmt::Display, path::PathBuf, sync::Arc};

use clap::{Parser, Subcommand};
use eyre::Context;

use daylog::{
    BuilderOptions, ConsoleSink, ConsoleTarget, DefaultFormatter, FormatterConfig,
    LogConfigBuilder, LogSink, Logger, Severity,
};

mod info;
mod path;
mod prune;
mod write;

#[derive(Subcommand, Debug)]
pub enum DaylogCmd {
    Info(info::Cmd),

    Path(path::Cmd),

    Write(write::Cmd),

    Prune(prune::Cmd),
}

impl Display for DaylogCmd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DaylogCmd::Info(_cmd) => write!(f, "info"),
            DaylogCmd::Path(_cmd) => write!(f, "path"),
            DaylogCmd::Write(cmd) => write!(f, "write {}", cmd.level),
            DaylogCmd::Prune(_cmd) => write!(f, "prune"),
        }
    }
}

#[derive(Parser)]
#[command(version, long_version = "")]
#[command(about = "Console and dated-file logging for a named logger.", long_about = None, disable_help_subcommand = true)]
pub struct Daylog {
    #[arg(
        global = true,
        long,
        help = "Logger name. Defaults to DAYLOG_NAME or 'app'.",
        display_order = 0
    )]
    pub name: Option<String>,

    #[arg(
        global = true,
        long,
        help = "Directory holding the dated log files. Defaults to DAYLOG_DIR or the user data dir.",
        display_order = 0
    )]
    pub dir: Option<PathBuf>,

    #[arg(
        global = true,
        long,
        help = "Minimum level written to the console (DEBUG, INFO, WARNING, ERROR, CRITICAL).",
        display_order = 1
    )]
    pub console_level: Option<String>,

    #[arg(
        global = true,
        long,
        help = "Minimum level written to the log file (DEBUG, INFO, WARNING, ERROR, CRITICAL).",
        display_order = 1
    )]
    pub file_level: Option<String>,

    #[arg(
        global = true,
        long,
        help = "strftime pattern for the file name, e.g. %Y-%m-%d.",
        display_order = 2
    )]
    pub date_format: Option<String>,

    #[arg(
        global = true,
        long,
        help = "Number of dated files to keep, or 'none' to keep all.",
        display_order = 2
    )]
    pub backup_count: Option<String>,

    #[arg(
        global = true,
        long,
        help = "Write console output to stderr instead of stdout.",
        display_order = 3
    )]
    pub stderr: bool,

    #[arg(
        long,
        short = 'v',
        action = clap::ArgAction::Count,
        global = true,
        help = "Write verbose messages to stderr for debugging.",
        display_order = 999
    )]
    pub verbose: u8,

    #[command(subcommand)]
    pub cmd: DaylogCmd,
}

impl Daylog {
    fn diagnostics_level(&self) -> Option<Severity> {
        match self.verbose {
            0 => None,
            1 => Some(Severity::Error),
            2 => Some(Severity::Warning),
            3 => Some(Severity::Info),
            4_u8..=u8::MAX => Some(Severity::Debug),
        }
    }

    fn setup_logging(&self) -> eyre::Result<()> {
        let Some(level) = self.diagnostics_level() else {
            return Ok(());
        };

        let target = ConsoleTarget::Stderr;
        let formatter = DefaultFormatter::new(FormatterConfig {
            use_ansi: target.is_terminal(),
            include_location: false,
            ..FormatterConfig::new()
        });
        let sinks: Vec<Box<dyn LogSink>> =
            vec![Box::new(ConsoleSink::new(target, level, Box::new(formatter)))];

        daylog::install(Arc::new(Logger::with_sinks("daylog", sinks)))
            .context("Failed installing diagnostics logger")
    }

    fn options(&self) -> eyre::Result<BuilderOptions> {
        let mut options =
            BuilderOptions::from_env().context("Failed reading DAYLOG_* environment")?;

        if let Some(name) = &self.name {
            options.logger_name = name.clone();
        }
        if let Some(dir) = &self.dir {
            options.log_directory = dir.clone();
        }
        if let Some(level) = &self.console_level {
            options.console_level = level.as_str().into();
        }
        if let Some(level) = &self.file_level {
            options.file_level = level.as_str().into();
        }
        if let Some(format) = &self.date_format {
            options.date_format = format.clone();
        }
        if let Some(count) = &self.backup_count {
            options.backup_count =
                daylog::parse_backup_count(count).context("Invalid --backup-count")?;
        }
        if self.stderr {
            options.console_target = ConsoleTarget::Stderr;
        }

        Ok(options)
    }

    pub fn run(self) -> eyre::Result<()> {
        self.setup_logging()?;

        log::info!(target: "daylog", "running command {}", &self.cmd);

        let builder = LogConfigBuilder::from_options(self.options()?);
        log::debug!(target: "daylog", "options: {:?}", builder.options());

        let result = match &self.cmd {
            DaylogCmd::Info(info) => info.run(&builder),
            DaylogCmd::Path(path) => path.run(&builder),
            DaylogCmd::Write(write) => write.run(&builder),
            DaylogCmd::Prune(prune) => prune.run(&builder),
        };

        if let Err(msg) = &result {
            log::error!(target: "daylog", "failed running command {}, error={} cause={}", &self.cmd, msg, msg.root_cause());
        }

        result
    }
}
