//! `hmacsum`: calculate one or more message digests of the data in a file.
//!
//! A thin CLI collaborator around the `hmacsum` library's hash primitives.
//! Argument parsing follows `clap`'s derive API rather than the getopt-style
//! parsing of the tool this is modeled on (getopt is a C idiom, not a Rust
//! one); the flag semantics, defaults, and output format are unchanged.

use std::fs::File;
use std::io::Read;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{bail, Context as _};
use clap::Parser;

use hmacsum::registry::{parse_digest_list, DigestKind};

const DEFAULT_BUFFER_SIZE: usize = 32768;
const DEFAULT_DIGESTS: &str = "md5";

/// Calculate a Hash-based Message Authentication Code (HMAC) of the data in a file.
#[derive(Parser, Debug)]
#[command(name = "hmacsum", disable_version_flag = true)]
struct Cli {
    /// Digest (hash) types to calculate: md5, sha1, sha224, sha256, sha512
    /// (multiple types can be combined with a ,)
    #[arg(short = 'd', long = "digest", default_value = DEFAULT_DIGESTS)]
    digest: String,

    /// Specify the process buffer size in bytes (accepts a unit suffix,
    /// e.g. `64KB` or `4MiB`)
    #[arg(short = 'p', long = "buffer-size")]
    buffer_size: Option<String>,

    /// Verbose output to stderr
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Print version
    #[arg(short = 'V', long = "version", action = clap::ArgAction::SetTrue)]
    version: bool,

    /// The source file
    source_file: Option<PathBuf>,
}

fn print_version() {
    println!("hmacsum {}\n", env!("CARGO_PKG_VERSION"));
}

fn print_copyright() {
    println!(
        "Copyright (C) 2026, The hmacsum Developers.\n\
         This is free software; see the source for copying conditions. There is NO\n\
         warranty; not even for MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE."
    );
}

fn to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        s.push_str(&format!("{:02x}", b));
    }
    s
}

/// Parse a `-p` buffer size: a decimal (optionally fractional) magnitude
/// followed by an optional case-insensitive unit suffix. Plain `B`/`KB`/
/// `MB`/`GB`/`TB` are decimal (1000-based) multiples; `KiB`/`MiB`/`GiB`/
/// `TiB` are binary (1024-based) ones. A bare number is a plain byte count.
fn parse_process_buffer_size(input: &str) -> Result<usize, String> {
    let input = input.trim();
    let split_at = input
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(input.len());
    let (magnitude, unit) = input.split_at(split_at);

    let magnitude: f64 = magnitude
        .parse()
        .map_err(|_| format!("invalid buffer size `{input}`"))?;
    if magnitude < 0.0 {
        return Err(format!("invalid buffer size `{input}`"));
    }

    let multiplier: f64 = match unit.trim().to_ascii_uppercase().as_str() {
        "" | "B" => 1.0,
        "KB" => 1_000.0,
        "MB" => 1_000.0 * 1_000.0,
        "GB" => 1_000.0 * 1_000.0 * 1_000.0,
        "TB" => 1_000.0 * 1_000.0 * 1_000.0 * 1_000.0,
        "KIB" => 1024.0,
        "MIB" => 1024.0 * 1024.0,
        "GIB" => 1024.0 * 1024.0 * 1024.0,
        "TIB" => 1024.0 * 1024.0 * 1024.0 * 1024.0,
        other => return Err(format!("unknown buffer size unit `{other}`")),
    };

    let bytes = magnitude * multiplier;
    if bytes <= 0.0 || bytes > usize::MAX as f64 {
        return Err(format!("buffer size `{input}` out of range"));
    }
    Ok(bytes as usize)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    print_version();

    if cli.version {
        print_copyright();
        return Ok(());
    }

    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            log::LevelFilter::Info
        } else {
            log::LevelFilter::Warn
        })
        .format_timestamp(None)
        .init();

    let Some(source_file) = cli.source_file else {
        bail!("Missing source file.");
    };

    let buffer_size = match cli.buffer_size.as_deref().map(parse_process_buffer_size) {
        None => DEFAULT_BUFFER_SIZE,
        Some(Ok(0)) | Some(Err(_)) => {
            eprintln!("Unsupported process buffer size defaulting to: {DEFAULT_BUFFER_SIZE}.");
            DEFAULT_BUFFER_SIZE
        }
        Some(Ok(n)) => n,
    };

    let digest_kinds =
        parse_digest_list(&cli.digest).with_context(|| "Unable to set digest types.")?;

    let aborted = Arc::new(AtomicBool::new(false));
    {
        let aborted = aborted.clone();
        ctrlc::set_handler(move || {
            aborted.store(true, Ordering::SeqCst);
        })
        .with_context(|| "Unable to attach signal handler.")?;
    }

    log::info!("opening {}", source_file.display());
    let mut file =
        File::open(&source_file).with_context(|| format!("Unable to open input: {}.", source_file.display()))?;

    let mut hashers: Vec<(DigestKind, Box<dyn hmacsum::digest::Hasher>)> = digest_kinds
        .iter()
        .map(|&kind| (kind, kind.new_hasher()))
        .collect();

    log::info!("reading input in {buffer_size}-byte chunks");
    let mut buffer = vec![0u8; buffer_size];
    loop {
        if aborted.load(Ordering::SeqCst) {
            break;
        }
        let read = file
            .read(&mut buffer)
            .with_context(|| "Unable to read data.")?;
        if read == 0 {
            break;
        }
        for (_, hasher) in hashers.iter_mut() {
            hasher.update(&buffer[..read]);
        }
    }

    if aborted.load(Ordering::SeqCst) {
        println!("hmacsum: ABORTED");
        std::process::exit(1);
    }

    log::info!("finalizing {} digest(s)", hashers.len());
    for (kind, hasher) in hashers.into_iter() {
        let digest = hasher.finalize_boxed();
        println!(
            "{} hash calculated over data:\t{}",
            kind.name().to_uppercase(),
            to_hex(&digest)
        );
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::parse_process_buffer_size;

    #[test]
    fn plain_decimal_is_bytes() {
        assert_eq!(parse_process_buffer_size("32768").unwrap(), 32768);
    }

    #[test]
    fn decimal_units() {
        assert_eq!(parse_process_buffer_size("64KB").unwrap(), 64_000);
        assert_eq!(parse_process_buffer_size("1MB").unwrap(), 1_000_000);
        assert_eq!(parse_process_buffer_size("2gb").unwrap(), 2_000_000_000);
    }

    #[test]
    fn binary_units() {
        assert_eq!(parse_process_buffer_size("4KiB").unwrap(), 4096);
        assert_eq!(parse_process_buffer_size("1MiB").unwrap(), 1_048_576);
    }

    #[test]
    fn fractional_magnitude() {
        assert_eq!(parse_process_buffer_size("1.5KB").unwrap(), 1500);
    }

    #[test]
    fn rejects_garbage_and_unknown_unit() {
        assert!(parse_process_buffer_size("").is_err());
        assert!(parse_process_buffer_size("abc").is_err());
        assert!(parse_process_buffer_size("10XB").is_err());
    }
}
