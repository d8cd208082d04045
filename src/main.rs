use clap::Parser;
use mlpipe::assembler::PipelineParams;
use mlpipe::cli::Cli;
use mlpipe::commands::{compile_command, step_command};
use mlpipe::logging;
use tracing::error;

#[tokio::main]
async fn main() {
    logging::init_logging();

    // Usage errors exit 1 like every other failure; help and version exit 0
    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            std::process::exit(if e.use_stderr() { 1 } else { 0 });
        }
    };

    if let Err(e) = run(args).await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(args: Cli) -> mlpipe::Result<()> {
    if let Some(cmd) = args.cmd {
        return step_command(cmd);
    }

    if args.compile {
        compile_command(&PipelineParams::default(), &args.package_path)?;
    }
    Ok(())
}
