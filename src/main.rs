//Enable more cargo lint tests
#![warn(rust_2018_idioms)]
#![warn(clippy::disallowed_types)]

use std::path::Path;
use std::process::ExitCode;

use log::{error, info, warn};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use hlzip::tools::cli::opts_init;
use hlzip::tools::job::{run_file, run_stdio};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

fn main() -> ExitCode {
    let options = opts_init();

    // Log to stderr, stdout may be carrying the data
    if let Err(e) = TermLogger::init(
        options.verbose.level_filter(),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Could not start the logger: {}", e);
    }

    //----- Figure how what we need to do and go do it
    if options.files.is_empty() {
        return match run_stdio(&options) {
            Ok(_) => ExitCode::SUCCESS,
            Err(e) => {
                error!("{}", e);
                ExitCode::FAILURE
            }
        };
    }

    let mut failures = 0;
    for file in &options.files {
        match run_file(&options, Path::new(file)) {
            // The codecs log their own report
            Ok(_) => {}
            Err(e) => {
                error!("{}: {}", file, e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        warn!("{} of {} files failed.", failures, options.files.len());
        return ExitCode::FAILURE;
    }
    info!("Done.\n");
    ExitCode::SUCCESS
}
