use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for sectorspace")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run fmt, clippy, tests and doc in sequence
    Check,
    /// Run cargo fmt --check on all crates
    Fmt,
    /// Run clippy on all targets with warnings denied
    Clippy,
    /// Run all tests, doctests included
    Test,
    /// Run the sector tree benchmark in release mode
    Bench,
    /// Build rustdoc for the workspace
    Doc,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check => {
            for step in [Step::Fmt, Step::Clippy, Step::Test, Step::Doc] {
                step.run()?;
            }
        }
        Commands::Fmt => Step::Fmt.run()?,
        Commands::Clippy => Step::Clippy.run()?,
        Commands::Test => Step::Test.run()?,
        Commands::Bench => Step::Bench.run()?,
        Commands::Doc => Step::Doc.run()?,
    }

    Ok(())
}

#[derive(Clone, Copy)]
enum Step {
    Fmt,
    Clippy,
    Test,
    Bench,
    Doc,
}

impl Step {
    fn args(self) -> &'static [&'static str] {
        match self {
            Step::Fmt => &["fmt", "--all", "--", "--check"],
            Step::Clippy => &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
            Step::Test => &["test", "--workspace"],
            Step::Bench => &["bench", "-p", "sectorspace-index", "--bench", "bench_sector_tree"],
            Step::Doc => &["doc", "--workspace", "--no-deps"],
        }
    }

    fn run(self) -> Result<()> {
        let args = self.args();
        println!("==> Running cargo {}", args.join(" "));
        let status = Command::new("cargo").args(args).status()?;
        if !status.success() {
            bail!("cargo {} failed", args[0]);
        }
        Ok(())
    }
}
