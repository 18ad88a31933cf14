use clap::Parser;
use log::LevelFilter;

use svgscrub::app::exit_code;
use svgscrub::{run, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if std::env::var_os("RUST_LOG").is_none() {
        logger.filter_level(LevelFilter::Info);
        logger.filter_module("svgscrub", LevelFilter::Debug);
        let core_level = if cli.verbose {
            LevelFilter::Trace
        } else {
            LevelFilter::Debug
        };
        logger.filter_module("svgcore", core_level);
    }
    logger.init();

    let result = run(&cli).await;
    if let Err(e) = &result {
        eprintln!("エラー: {:#}", e);
    }
    std::process::exit(exit_code(&result));
}
