use std::path::PathBuf;

use apigen_codegen_go::GeneratorOptions;
use apigen_design::ApiDefinition;
use clap::Args;
use eyre::Result;

use super::UnwrapOrExit;
use crate::{
    ops::{self, GenerateOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenCommand {
    /// Path to the design file
    #[arg(short, long, default_value = "design.toml")]
    pub design: PathBuf,

    /// Output directory (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Name of the generated package and of its directory
    #[arg(long, default_value = "app")]
    pub package: String,

    /// Go import path of the generated package (defaults to the package name)
    #[arg(long)]
    pub import_path: Option<String>,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

impl GenCommand {
    pub fn run(&self) -> Result<()> {
        let api = ApiDefinition::from_file(&self.design).unwrap_or_exit();

        let report = ops::generate(
            &api,
            GenerateOptions {
                output_dir: &self.output,
                generator: GeneratorOptions {
                    package: self.package.clone(),
                    import_path: self.import_path.clone().unwrap_or_else(|| self.package.clone()),
                },
                dry_run: self.dry_run,
            },
        )?;
        report.render(&mut TerminalOutput);
        Ok(())
    }
}
