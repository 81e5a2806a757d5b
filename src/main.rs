use std::process::ExitCode;

fn main() -> ExitCode {
    mcap_snapshot_lib::run()
}
