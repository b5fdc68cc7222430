use std::process::ExitCode;

use clap::Parser;
use ota_cli::{Reporter, Status, cli::UploadOpt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    ota_cli::init_tracing();

    let opt = match UploadOpt::try_parse() {
        Ok(x) => x,
        Err(e) => return ota_cli::usage_error(e).into(),
    };

    let reporter = Reporter::new(opt.common.quiet);
    Status::from(&ota_cli::upload::run(&opt, &reporter).await).into()
}
