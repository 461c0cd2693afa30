//! CLI tool to split, stream, and quote shell-style words.

use std::fs::File;
use std::io::BufReader;
use std::process::ExitCode;

use wordsplit::{LexerConfig, TokenStream};

fn open(path: &str, config: LexerConfig) -> std::io::Result<TokenStream> {
    if path == "-" {
        return Ok(TokenStream::stdin(config).with_name("<stdin>"));
    }
    let file = File::open(path)?;
    Ok(TokenStream::from_reader(BufReader::new(file), config).with_name(path))
}

fn print_stream(path: &str, config: LexerConfig, keyword: Option<&str>, raw: bool) -> bool {
    let stream = match open(path, config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{path}: {e}");
            return false;
        }
    };
    let stream = match keyword {
        Some(keyword) => stream.with_source_keyword(keyword),
        None => stream,
    };

    for token in stream {
        match token {
            Ok(token) if raw => println!("Token: {token:?}"),
            Ok(token) => println!("{token}"),
            Err(e) => {
                eprintln!("{e}");
                return false;
            }
        }
    }
    true
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        eprintln!("Usage: wordsplit <command> [args...]");
        eprintln!();
        eprintln!("Commands:");
        eprintln!("  split   Print the POSIX words of each file, one per line");
        eprintln!("  tokens  Print raw tokens of each file, following `source` lines");
        eprintln!("  quote   Quote the arguments into one shell-safe line");
        eprintln!();
        eprintln!("Use - to read standard input.");
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  wordsplit split commands.txt");
        eprintln!("  wordsplit tokens -");
        eprintln!("  wordsplit quote rm \"my file\"");
        return ExitCode::from(2);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    if command == "quote" {
        println!("{}", wordsplit::join(rest));
        return ExitCode::SUCCESS;
    }

    if rest.is_empty() {
        eprintln!("Error: no files specified");
        return ExitCode::from(2);
    }

    let mut had_error = false;

    for path in rest {
        let ok = match command {
            "split" => {
                let config = LexerConfig::builder()
                    .posix(true)
                    .whitespace_split(true)
                    .comments(true)
                    .build();
                print_stream(path, config, None, false)
            }
            "tokens" => print_stream(path, LexerConfig::default(), Some("source"), true),
            _ => {
                eprintln!("Unknown command: {command}");
                return ExitCode::from(2);
            }
        };
        had_error |= !ok;
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
