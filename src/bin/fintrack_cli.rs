use fintrack_core::cli;

fn main() {
    fintrack_core::init();

    if let Err(err) = cli::run() {
        cli::output::error(format!("Fatal error: {err}"));
        std::process::exit(1);
    }
}
