use std::env;
use std::path::PathBuf;
use std::process;

mod generate;
mod ui;

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().collect();

    let site_root = match args.len() {
        1 => PathBuf::from("."),
        2 => PathBuf::from(&args[1]),
        _ => {
            let program_name = args.first().map(String::as_str).unwrap_or("inkpress");
            eprintln!("Usage: {program_name} [site-root]");
            eprintln!();
            eprintln!("Builds the static site rooted at site-root (default: current directory).");
            process::exit(1);
        }
    };

    log::info!("Building site at {}", site_root.display());

    if let Err(e) = generate::generate(&site_root) {
        log::error!("Build failed: {e:#}");
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
