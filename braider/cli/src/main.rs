#![deny(clippy::all)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::process::ExitCode;

use braider_cli::{
    args::CliArgs,
    response::{Response, Status},
    CtrlCBehaviour,
};
use structopt::StructOpt;

fn main() -> ExitCode {
    let args = CliArgs::from_args();
    braider_cli::init_logging(args.log_level());

    let (response, status) = match braider_cli::run(
        &args.input_file,
        &args.options,
        CtrlCBehaviour::RecoverAbort,
    ) {
        Ok(Some(result)) => {
            if !args.options.json {
                result.print(&args.options);
            }
            (result.response(), result.status())
        }
        Ok(None) => return ExitCode::SUCCESS, // Stopped by a debug option
        Err(e) => {
            if !args.options.json {
                log::error!("{:#}", e);
            }
            (Response::bad_request(&e), Status::BadRequest)
        }
    };

    if args.options.json {
        match response.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Can't write response: {}", e),
        }
    }
    ExitCode::from(status.exit_code())
}
