use moviebox::{
    cli::{self, Opts},
    common::{logger, types::AnyResult},
    configs::Config,
};
use structopt::StructOpt;
use tracing::debug;

#[tokio::main(flavor = "current_thread")]
async fn main() -> AnyResult<()> {
    let opts = Opts::from_args();

    let (config, config_path) = Config::load(opts.config.as_deref())?;
    logger::init(&config, opts.log_level.as_deref());

    match config_path {
        Some(path) => debug!("Loaded configuration from {}", path.display()),
        None => debug!("No configuration file found, using built-in defaults"),
    }

    cli::run(opts, config).await
}
