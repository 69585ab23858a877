use clap::Args;
use eyre::Context;

use daylog::{LogConfigBuilder, LogDirectory};

#[derive(Args, Debug)]
pub struct Cmd {
    #[arg(long, help = "Files to keep including today's. Overrides --backup-count.")]
    pub keep: Option<usize>,
}

impl Cmd {
    pub fn run(&self, builder: &LogConfigBuilder) -> eyre::Result<()> {
        let options = builder.options();
        let Some(keep) = self.keep.or(options.backup_count) else {
            log::info!(target: "daylog", "no backup count configured, keeping every file");
            return Ok(());
        };

        let current = builder
            .file_path()
            .context("Failed resolving log file path")?;
        let directory = LogDirectory::new(&options.log_directory);

        if !directory.path().is_dir() {
            log::info!(target: "daylog", "{} does not exist, nothing to prune", directory.path().display());
            return Ok(());
        }

        let removed = directory
            .prune(&options.date_format, keep, &current)
            .with_context(|| format!("Failed pruning {}", directory.path().display()))?;

        for path in removed {
            println!("{}", path.display());
        }

        Ok(())
    }
}
