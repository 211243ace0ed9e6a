use std::process::ExitCode;

fn main() -> ExitCode {
    qrgen::run(std::env::args_os())
}
