use std::io::{self, Write};

use clap::{Args, CommandFactory};
use clap_complete::Shell;
use eyre::Result;

use super::Cli;

#[derive(Args)]
pub struct CompletionsCommand {
    /// Shell to print the completion script for
    shell: Shell,
}

impl CompletionsCommand {
    pub fn run(&self) -> Result<()> {
        self.write_script(&mut io::stdout().lock())
    }

    fn write_script(&self, out: &mut dyn Write) -> Result<()> {
        let mut cli = Cli::command();
        let bin = cli.get_name().to_string();
        clap_complete::generate(self.shell, &mut cli, bin, out);
        out.flush()?;
        Ok(())
    }
}
