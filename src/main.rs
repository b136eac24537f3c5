mod archive;
mod cli;
mod report;
mod utils;

fn main() {
    use std::io::Write;

    // always capture a backtrace for the error report
    if std::env::var_os("RUST_FAILURE_BACKTRACE").is_none() {
        std::env::set_var("RUST_FAILURE_BACKTRACE", "1");
    }

    if let Err(err) = crate::cli::main() {
        let mut stderr = std::io::stderr();
        writeln!(&mut stderr, "{} {}", console::style("ERROR:").red().bold(), err).ok();
        for cause in err.iter_causes() {
            writeln!(&mut stderr, "  caused by: {}", cause).ok();
        }

        writeln!(&mut stderr, "\nerror details:\n{}", err.backtrace()).ok();

        std::process::exit(1);
    }
}
