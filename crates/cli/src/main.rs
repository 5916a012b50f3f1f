use std::process::ExitCode;

fn main() -> ExitCode {
    giftwise_cli::run()
}
