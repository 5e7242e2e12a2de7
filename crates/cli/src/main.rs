use std::process::ExitCode;

fn main() -> ExitCode {
    pricely_cli::run()
}
