mod actions;
mod app;
mod cli;
mod component;
mod config;
mod libs;
mod page;
#[cfg(not(tarpaulin_include))]
mod tui;
mod utils;

pub use app::RootState;

use app::App;
use clap::Parser;
use color_eyre::eyre::Result;
use dotenv::dotenv;

#[cfg(not(tarpaulin_include))]
async fn run() -> Result<()> {
    use cli::{ClapSource, Commands};
    use color_eyre::eyre::Context;

    let args = cli::Cli::parse();

    let config = config::Config::new(Some(ClapSource::new(&args)))
        .context("Error when loading config")?;

    match &args.command {
        Some(Commands::List) => {
            for concentration in &config.picker.concentrations {
                println!("{concentration}");
            }
            Ok(())
        }
        None => {
            let state = RootState::new(config);
            let page = page::picker::Picker::new(&state);
            let mut app = App::new(
                state,
                Box::new(page),
                tui::Tui::new()?
                    .tick_rate(args.tick_rate)
                    .frame_rate(args.frame_rate)
                    .mouse(true)
                    .paste(true)
                    .into(),
            );

            app.run().await?;

            // the TUI drew on stderr; the chosen concentrations go to stdout
            for concentration in app.state.selection() {
                println!("{concentration}");
            }
            Ok(())
        }
    }
}

#[tokio::main]
#[cfg(not(tarpaulin_include))]
async fn main() -> Result<()> {
    dotenv().ok();
    utils::errors::init()?;
    utils::logging::init()?;

    run().await
}
