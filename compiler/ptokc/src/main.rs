//! ptok CLI
//!
//! Lists a source file and the tokens scanned from it, up to the first
//! period.

use std::io::{self, BufWriter};
use std::path::Path;

use ptok_lexer_core::Scanner;
use ptokc::{init_tracing, open_source, tokenize, Listing, ListingConfig};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("help" | "--help" | "-h") => {
            print_usage();
            return;
        }
        Some("version" | "--version" | "-V") => {
            println!("ptok {}", env!("CARGO_PKG_VERSION"));
            return;
        }
        _ => {}
    }

    let mut config = ListingConfig::default();
    let mut path: Option<&str> = None;

    for arg in args.iter().skip(1) {
        if arg == "--no-paging" {
            config.paginate = false;
        } else if let Some(n) = arg.strip_prefix("--page-lines=") {
            config.page_max_lines = parse_positive("--page-lines", n);
        } else if let Some(n) = arg.strip_prefix("--width=") {
            config.max_width = parse_positive("--width", n);
        } else if arg.starts_with('-') {
            usage_error(&format!("unknown option '{arg}'"));
        } else if path.is_none() {
            path = Some(arg);
        } else {
            usage_error(&format!("unexpected argument '{arg}'"));
        }
    }

    let source = match open_source(path.map(Path::new)) {
        Ok(reader) => reader,
        Err(e) => {
            eprintln!("*** Error: {e}.");
            std::process::exit(1);
        }
    };

    let name = path.unwrap_or_default();
    let listing = Listing::new(BufWriter::new(io::stdout().lock()), name, config);
    let scanner = Scanner::with_observer(source, listing);

    if let Err(e) = tokenize(scanner) {
        eprintln!("*** Error: {e}");
        std::process::exit(1);
    }
}

fn usage_error(msg: &str) -> ! {
    eprintln!("error: {msg}");
    eprintln!();
    print_usage();
    std::process::exit(1);
}

fn parse_positive(flag: &str, value: &str) -> usize {
    match value.parse::<usize>() {
        Ok(n) if n > 0 => n,
        _ => {
            eprintln!("error: {flag} expects a positive integer, got '{value}'");
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("ptok: list a source file and the tokens scanned from it");
    println!();
    println!("Usage: ptok <sourcefile> [options]");
    println!();
    println!("Scanning stops at the first '.' token or at end of file.");
    println!();
    println!("Options:");
    println!("  --no-paging          Do not split the listing into pages");
    println!("  --page-lines=<n>     Lines per page (default: 50)");
    println!("  --width=<n>          Truncate printed lines to <n> characters (default: 80)");
    println!("  help, --help, -h     Show this help message");
    println!("  version, --version   Show version information");
    println!();
    println!("Set RUST_LOG (e.g. RUST_LOG=ptok_lexer_core=trace) for scanner tracing on stderr.");
}
