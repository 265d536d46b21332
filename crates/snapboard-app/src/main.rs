//! Main application entry point (native).

#[cfg(feature = "native")]
mod cli {
    use clap::{ArgAction, Parser};
    use snapboard_app::{AppResult, Session, load_script, print_controls};
    use snapboard_core::config::WhiteboardConfig;
    use std::path::PathBuf;

    #[derive(Parser, Debug)]
    #[command(name = "snapboard")]
    #[command(version, about = "Replay whiteboard toolbar sessions and save snapshots")]
    pub struct Cli {
        /// JSON script of toolbar steps to replay
        #[arg(long, short = 's', value_name = "FILE")]
        script: Option<PathBuf>,

        /// JSON config file
        #[arg(long, short = 'c', value_name = "FILE")]
        config: Option<PathBuf>,

        /// Directory for saved snapshots
        #[arg(long, short = 'o', value_name = "DIR", default_value = ".")]
        out_dir: PathBuf,

        /// List the toolbar controls and exit
        #[arg(long, action = ArgAction::SetTrue)]
        list_controls: bool,
    }

    pub fn run(cli: Cli) -> AppResult<()> {
        if cli.list_controls {
            print_controls();
            return Ok(());
        }

        let config = match &cli.config {
            Some(path) => WhiteboardConfig::load(path)?,
            None => WhiteboardConfig::default(),
        };

        let Some(script) = &cli.script else {
            println!("snapboard: nothing to do");
            println!();
            println!("Usage:");
            println!("  snapboard --script steps.json [--config board.json] [--out-dir DIR]");
            println!("  snapboard --list-controls");
            return Ok(());
        };

        let steps = load_script(script)?;
        let mut session = Session::new(config);
        session.run(&steps)?;

        let written = session.write_exports(&cli.out_dir)?;
        log::info!(
            "Replayed {} steps, {} objects on canvas, {} snapshots saved",
            steps.len(),
            session.controller().surface().document.len(),
            written.len()
        );
        Ok(())
    }
}

#[cfg(feature = "native")]
fn main() {
    use clap::Parser;

    env_logger::init();
    log::info!("Starting Snapboard");

    if let Err(e) = cli::run(cli::Cli::parse()) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
