use std::path::PathBuf;

use apigen_design::ApiDefinition;
use clap::Args;
use eyre::{Context, Result};

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to the design file
    #[arg(short, long, default_value = "design.toml")]
    pub design: PathBuf,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl CheckCommand {
    pub fn run(&self) -> Result<()> {
        let api = ApiDefinition::from_file(&self.design).unwrap_or_exit();
        let report = ops::check(&api, &self.design);

        if self.json {
            let json = serde_json::to_string_pretty(&report).wrap_err("Failed to serialize report")?;
            println!("{}", json);
        } else {
            report.render(&mut TerminalOutput);
        }

        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}
