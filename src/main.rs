use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

use clap::Parser;

use jsonpad::{AppContext, Bundle, HeadlessDialogs, Shell};

/// Headless entry point: opens the given files as tabs and reports the
/// resulting session. Window chrome is supplied by an embedding frontend.
#[derive(Parser)]
#[command(name = "jsonpad", version, about = "Multi-tab JSON notepad session core")]
struct Args {
    /// Files to open as tabs at startup; missing paths are skipped.
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let context = Rc::new(AppContext::new(
        args.files,
        Bundle::default(),
        Box::new(HeadlessDialogs),
    ));

    let mut shell = match Shell::new(context) {
        Ok(shell) => shell,
        Err(err) => {
            log::error!("failed to start: {err}");
            return ExitCode::FAILURE;
        }
    };
    shell.pump();

    for tab in shell.main().tabs() {
        println!(
            "{}\t{} bytes",
            tab.document().display_name,
            tab.content().len()
        );
    }
    ExitCode::SUCCESS
}
