use std::io::BufRead;

use clap::Args;
use eyre::Context;

use daylog::{LogConfigBuilder, LoggerRegistry, Severity};

#[derive(Args, Debug)]
pub struct Cmd {
    #[arg(index = 1, value_name = "LEVEL", value_parser = parse_severity)]
    pub level: Severity,

    #[arg(index = 2, value_name = "MESSAGE", required_unless_present = "stdin")]
    pub message: Vec<String>,

    #[arg(long, help = "Log every line read from stdin instead of MESSAGE.")]
    pub stdin: bool,
}

fn parse_severity(level: &str) -> Result<Severity, daylog::Error> {
    level.parse()
}

impl Cmd {
    pub fn run(&self, builder: &LogConfigBuilder) -> eyre::Result<()> {
        let registry = LoggerRegistry::new();
        let logger = builder
            .configure(&registry)
            .context("Failed configuring logger")?;

        if self.stdin {
            for line in std::io::stdin().lock().lines() {
                let line = line.context("Failed reading stdin")?;
                logger.log(self.level, format_args!("{}", line));
            }
        } else {
            logger.log(self.level, format_args!("{}", self.message.join(" ")));
        }

        logger.flush();
        Ok(())
    }
}
