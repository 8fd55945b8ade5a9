use clap::CommandFactory;
use demo::Args;
use log::LevelFilter;

// --------------------------------------------------
fn main() {
    let args = match Args::try_parse_or_help(std::env::args_os()) {
        Ok(Some(args)) => args,
        Ok(None) => {
            print!("{}", Args::command().render_help());
            return;
        }
        Err(e) => e.exit(),
    };

    // Diagnostics go to stderr so they never mix with program output
    env_logger::Builder::new()
        .filter_level(args.log.map_or(LevelFilter::Off, LevelFilter::from))
        .target(env_logger::Target::Stderr)
        .init();

    if let Err(e) = demo::run(args) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
