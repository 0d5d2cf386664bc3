//! Fills a `ChainedHashMap` with random lowercase strings, prints it, and tears it down.
//!
//! ```text
//! random_strings RANDSTRLEN RANDSTRCOUNT
//! ```

use std::io::{self, Write};

use chainmap::{ChainedHashMap, StrCmp, logger::initialize_logger};
use clap::Parser;
use log::info;
use rand::Rng;

mod keygen;

use keygen::random_key;

#[derive(Parser, Debug)]
#[command(version, about = "Populate a chained hash map with random strings and print it")]
struct Args {
    /// Length of every generated key
    #[arg(value_name = "RANDSTRLEN")]
    length: usize,

    /// Number of keys to generate
    #[arg(value_name = "RANDSTRCOUNT")]
    count: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    initialize_logger();
    let args = Args::parse();

    let mut rng = rand::rng();
    let mut table = ChainedHashMap::new(StrCmp);

    for _ in 0..args.count {
        let key = random_key(&mut rng, args.length);
        let value: Box<u32> = Box::new(rng.random_range(10..100));
        table.put(key, value);
    }

    info!(
        "generated {} keys of length {}: {} distinct, {} buckets",
        args.count,
        args.length,
        table.len(),
        table.capacity()
    );

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut write_result = Ok(());
    table.for_each(|key, value| {
        write_result = writeln!(out, "{{{key}: {value}}}");
        write_result.is_ok()
    });
    write_result?;
    out.flush()?;

    table.delete_with(drop, drop);

    Ok(())
}
