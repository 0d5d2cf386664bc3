//! Plots how chain lengths and the load factor of a `ChainedHashMap` evolve as random keys
//! are inserted.

use std::path::PathBuf;

use chainmap::{ChainedHashMap, LOAD_FACTOR_THRESHOLD, StrCmp, logger::initialize_logger};
use clap::Parser;
use log::info;
use plotters::prelude::*;

mod keygen;

use keygen::random_key;

#[derive(Parser, Debug)]
#[command(version, about = "Plot chain length and load factor of a chained hash map")]
struct Args {
    /// Largest number of keys inserted
    #[arg(long, default_value_t = 100_000)]
    max_keys: usize,

    /// Number of measurements between zero and `max_keys`
    #[arg(long, default_value_t = 20)]
    steps: usize,

    /// Length of every generated key
    #[arg(long, default_value_t = 8)]
    key_len: usize,

    /// Where to write the chart
    #[arg(long, default_value = "chain_profile.png")]
    output: PathBuf,
}

/// Shape of the table after a given number of insertions
#[derive(Debug, Clone, Copy)]
struct Sample {
    /// Number of `put` calls so far
    keys: usize,
    /// Mean length over non-empty chains
    mean_chain: f64,
    /// Longest chain
    max_chain: usize,
    /// `len / capacity`
    load_factor: f64,
}

/// Measures the chains of `map` after `keys` insertions
#[allow(clippy::cast_precision_loss)]
fn sample<V>(map: &ChainedHashMap<String, V>, keys: usize) -> Sample {
    let occupied: Vec<usize> = map.chain_lengths().filter(|&len| len > 0).collect();
    let mean_chain = if occupied.is_empty() {
        0.0
    } else {
        occupied.iter().sum::<usize>() as f64 / occupied.len() as f64
    };

    Sample {
        keys,
        mean_chain,
        max_chain: occupied.iter().copied().max().unwrap_or(0),
        load_factor: map.load_factor(),
    }
}

/// Inserts random keys, sampling the table `steps` times along the way
fn profile(args: &Args) -> Vec<Sample> {
    let mut rng = rand::rng();
    let mut map = ChainedHashMap::new(StrCmp);
    let step = (args.max_keys / args.steps.max(1)).max(1);
    let mut samples = vec![sample(&map, 0)];

    for inserted in 1..=args.max_keys {
        map.put(random_key(&mut rng, args.key_len), inserted);

        if inserted % step == 0 || inserted == args.max_keys {
            let current = sample(&map, inserted);
            info!(
                "{} keys: capacity {}, mean chain {:.2}, longest chain {}",
                inserted,
                map.capacity(),
                current.mean_chain,
                current.max_chain
            );
            samples.push(current);
        }
    }

    samples
}

#[allow(clippy::cast_precision_loss)]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    initialize_logger();
    let args = Args::parse();
    let samples = profile(&args);

    let font_family = "sans-serif";
    let max_keys = samples.last().map_or(1, |last| last.keys.max(1));
    let max_chain = samples.iter().map(|s| s.max_chain).max().unwrap_or(1).max(1) as f64 * 1.1;

    let root = BitMapBackend::new(&args.output, (1200, 900)).into_drawing_area();
    root.fill(&WHITE)?;
    let areas = root.split_evenly((2, 1));
    let (upper, lower) = match areas.as_slice() {
        [upper, lower] => (upper, lower),
        _ => return Err("drawing area did not split in two".into()),
    };

    let mut chains = ChartBuilder::on(upper)
        .caption("Chain Length vs. Keys Inserted", (font_family, 30))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(0..max_keys, 0.0..max_chain)?;

    chains
        .configure_mesh()
        .x_desc("Keys Inserted")
        .y_desc("Chain Length")
        .axis_desc_style((font_family, 16))
        .draw()?;

    let mean_style = ShapeStyle::from(&RGBColor(50, 90, 220)).stroke_width(2);
    chains
        .draw_series(LineSeries::new(samples.iter().map(|s| (s.keys, s.mean_chain)), mean_style))?
        .label("Mean (non-empty chains)")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], mean_style));

    let max_style = ShapeStyle::from(&RGBColor(220, 50, 50)).stroke_width(2);
    chains
        .draw_series(LineSeries::new(
            samples.iter().map(|s| (s.keys, s.max_chain as f64)),
            max_style,
        ))?
        .label("Longest chain")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], max_style));

    chains
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    let mut load = ChartBuilder::on(lower)
        .caption("Load Factor vs. Keys Inserted", (font_family, 30))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(0..max_keys, 0.0..1.0)?;

    load.configure_mesh()
        .x_desc("Keys Inserted")
        .y_desc("Load Factor")
        .axis_desc_style((font_family, 16))
        .draw()?;

    // Growth threshold
    let threshold = LOAD_FACTOR_THRESHOLD as f64 / 100.0;
    let threshold_style = ShapeStyle::from(&BLACK.mix(0.3)).stroke_width(1);
    load.draw_series(LineSeries::new(
        vec![(0, threshold), (max_keys, threshold)],
        threshold_style,
    ))?;

    let load_style = ShapeStyle::from(&RGBColor(50, 180, 50)).stroke_width(2);
    load.draw_series(LineSeries::new(samples.iter().map(|s| (s.keys, s.load_factor)), load_style))?;
    load.draw_series(
        samples.iter().map(|s| Circle::new((s.keys, s.load_factor), 3, load_style.filled())),
    )?;

    root.present()?;
    println!("Generated plot image: {}", args.output.display());

    Ok(())
}
