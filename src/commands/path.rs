use clap::Args;
use eyre::Context;

use daylog::LogConfigBuilder;

#[derive(Args, Debug)]
pub struct Cmd {}

impl Cmd {
    pub fn run(&self, builder: &LogConfigBuilder) -> eyre::Result<()> {
        let path = builder
            .file_path()
            .context("Failed resolving log file path")?;

        println!("{}", path.display());
        Ok(())
    }
}
