use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use image::{Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use judgement_pool::Config;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Kind {
    Images,
    Text,
}

/// Write a small synthetic corpus plus a matching config.json.
#[derive(Parser, Debug)]
struct Args {
    /// Output directory; samples go to `<out>/samples`
    #[arg(default_value = "sample_data")]
    out: PathBuf,

    #[arg(long, value_enum, default_value_t = Kind::Images)]
    kind: Kind,

    #[arg(long, default_value_t = 60)]
    count: usize,

    #[arg(long, default_value_t = 42)]
    seed: u64,
}

const SIZE: u32 = 32;

const OPENINGS: &[&str] = &["The service", "Our order", "This product", "The delivery", "Support"];
const VERDICTS: &[&str] = &[
    "was excellent",
    "arrived broken",
    "exceeded expectations",
    "was painfully slow",
    "works as described",
    "never showed up",
];

/// A flat background with one square in a contrasting colour.
fn generate_image(rng: &mut StdRng) -> RgbImage {
    let background = Rgb([rng.random(), rng.random(), rng.random()]);
    let Rgb([r, g, b]) = background;
    let foreground = Rgb([255 - r, 255 - g, 255 - b]);

    let side = rng.random_range(4..SIZE / 2);
    let x0 = rng.random_range(0..SIZE - side);
    let y0 = rng.random_range(0..SIZE - side);

    RgbImage::from_fn(SIZE, SIZE, |x, y| {
        let inside = (x0..x0 + side).contains(&x) && (y0..y0 + side).contains(&y);
        if inside {
            foreground
        } else {
            background
        }
    })
}

fn generate_text(rng: &mut StdRng) -> String {
    let sentences = rng.random_range(1..4);
    (0..sentences)
        .filter_map(|_| {
            let opening = OPENINGS.choose(rng)?;
            let verdict = VERDICTS.choose(rng)?;
            Some(format!("{opening} {verdict}."))
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn write_config(out: &Path, samples: &Path, kind: Kind) -> Result<PathBuf> {
    let data_type = match kind {
        Kind::Images => "images",
        Kind::Text => "text",
    };
    let mut config = Config::new(data_type, samples, out.join("labels").join("judgements.csv"));
    if let Kind::Images = kind {
        config.image_width = Some(SIZE);
        config.image_height = Some(SIZE);
    }

    let path = out.join("config.json");
    fs::write(&path, serde_json::to_string_pretty(&config)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mut rng = StdRng::seed_from_u64(args.seed);

    let samples = args.out.join("samples");
    fs::create_dir_all(&samples).with_context(|| format!("creating {}", samples.display()))?;

    for i in 0..args.count {
        match args.kind {
            Kind::Images => {
                let path = samples.join(format!("sample_{i:04}.png"));
                generate_image(&mut rng)
                    .save(&path)
                    .with_context(|| format!("writing {}", path.display()))?;
            }
            Kind::Text => {
                let path = samples.join(format!("sample_{i:04}.txt"));
                fs::write(&path, generate_text(&mut rng))
                    .with_context(|| format!("writing {}", path.display()))?;
            }
        }
    }

    let config = write_config(&args.out, &samples, args.kind)?;
    println!(
        "Wrote {} {:?} samples to {} (config: {})",
        args.count,
        args.kind,
        samples.display(),
        config.display()
    );
    Ok(())
}
