use std::process::ExitCode;

use clap::Parser;
use ota_cli::{Reporter, Status, cli::UpdateOpt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    ota_cli::init_tracing();

    let opt = match UpdateOpt::try_parse() {
        Ok(x) => x,
        Err(e) => return ota_cli::usage_error(e).into(),
    };

    let reporter = Reporter::new(opt.common.quiet);
    Status::from(&ota_cli::update::run(&opt, &reporter).await).into()
}
