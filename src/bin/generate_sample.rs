use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

const ROWS: usize = 1200;
const COLS: usize = 200;
const FILES: usize = 5;

/// Minimal deterministic PRNG (xoshiro256**), shared with the rusty-panda
/// spectral viewer's sample generator.
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Kinds of noise painted into a segment.
#[derive(Clone, Copy)]
enum Event {
    /// Broadband burst: every frequency bin lights up.
    Impulse,
    /// Narrow persistent line, e.g. mains hum.
    Tonal { bin: usize },
}

/// One spectrogram: rows are frequency bins, columns are time frames.
fn generate_spectrogram(rng: &mut SimpleRng) -> Vec<Vec<f64>> {
    let mut data: Vec<Vec<f64>> = (0..ROWS)
        .map(|r| {
            // Background falls off with frequency.
            let floor = 85.0 - 15.0 * r as f64 / ROWS as f64;
            (0..COLS).map(|_| rng.gauss(floor, 3.0)).collect()
        })
        .collect();

    let width = COLS / 10;
    for segment in 0..10 {
        let event = match rng.next_u64() % 3 {
            0 => None,
            1 => Some(Event::Impulse),
            _ => Some(Event::Tonal {
                bin: (rng.next_u64() % ROWS as u64) as usize,
            }),
        };
        let cols = segment * width..(segment + 1) * width;
        match event {
            None => {}
            Some(Event::Impulse) => {
                let at = cols.start + (rng.next_u64() % width as u64) as usize;
                for row in &mut data {
                    row[at] += rng.gauss(30.0, 4.0);
                }
            }
            Some(Event::Tonal { bin }) => {
                for r in bin.saturating_sub(4)..(bin + 4).min(ROWS) {
                    for c in cols.clone() {
                        data[r][c] += rng.gauss(25.0, 2.0);
                    }
                }
            }
        }
    }
    data
}

fn write_csv(path: &Path, data: &[Vec<f64>]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    writer.write_record((0..COLS).map(|c| format!("t{c}")))?;
    for row in data {
        writer.write_record(row.iter().map(|v| format!("{v:.2}")))?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let out_dir = Path::new("sample_raw");
    fs::create_dir_all(out_dir).context("creating sample_raw/")?;

    for i in 0..FILES {
        let path = out_dir.join(format!("recording_{i:03}.csv"));
        let data = generate_spectrogram(&mut rng);
        write_csv(&path, &data).with_context(|| format!("writing {}", path.display()))?;
    }

    println!(
        "Wrote {FILES} spectrograms ({ROWS} × {COLS}) to {}",
        out_dir.display()
    );
    Ok(())
}
