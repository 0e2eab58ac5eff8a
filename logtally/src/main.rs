use clap::Parser;
use logtally_core::cli::{AnalyzeArgs, print_config_error, run_analyze};
use logtally_core::logging::{init_logging, use_color};

#[derive(Parser, Debug)]
#[command(
    name = "logtally",
    version,
    about = "logtally: access log traffic report"
)]
struct Cli {
    #[command(flatten)]
    analyze: AnalyzeArgs,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            std::process::exit(1);
        }
        // --help and --version
        Err(e) => e.exit(),
    };

    let cfg = match cli.analyze.resolve_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            print_config_error(&e);
            std::process::exit(1);
        }
    };

    // Logging is best effort; the analysis runs either way.
    let guard = match init_logging(&cfg.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("logging disabled: {e:#}");
            None
        }
    };

    tracing::info!(
        input = %cli.analyze.input.display(),
        output = %cli.analyze.output.display(),
        "logtally starting"
    );

    let code = run_analyze(&cli.analyze, &cfg, use_color());

    // Flush the background log writer before exiting.
    drop(guard);
    std::process::exit(code);
}
