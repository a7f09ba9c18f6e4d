use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use perfusion_sanitize::data::model::SeriesRole;

/// Write synthetic raw perfusion curves for trying out `sanitize-input`.
#[derive(Parser, Debug)]
#[command(name = "generate_sample", version, about)]
struct Args {
    /// Directory receiving C_000009.txt, AIF_000000.txt and VIF_000001.txt
    #[arg(default_value = "data/raw")]
    out_dir: PathBuf,
}

/// Gamma-variate bolus shape, zero before `t0`.
fn gamma_variate(t: f64, t0: f64, alpha: f64, beta: f64, amplitude: f64) -> f64 {
    if t <= t0 {
        return 0.0;
    }
    let s = (t - t0) / beta;
    amplitude * s.powf(alpha) * (-s).exp()
}

/// Adaptive sampling: dense while the bolus passes, sparse in the washout.
fn sample_times() -> Vec<f64> {
    let mut times = Vec::new();
    let mut t = 0.0;
    while t < 300.0 {
        times.push(t);
        t += match t {
            t if t < 60.0 => 1.2,
            t if t < 150.0 => 3.0,
            _ => 6.0,
        };
    }
    times
}

fn generate_curve(
    times: &[f64],
    bolus: (f64, f64, f64, f64),
    baseline: f64,
    noise_level: f64,
    rng: &mut SimpleRng,
) -> Vec<f64> {
    let (t0, alpha, beta, amplitude) = bolus;
    times
        .iter()
        .map(|&t| {
            // first pass plus a damped recirculation
            let signal = gamma_variate(t, t0, alpha, beta, amplitude)
                + gamma_variate(t, t0 + 25.0, alpha, beta * 2.0, amplitude * 0.2);
            baseline + signal + rng.gauss(0.0, noise_level)
        })
        .collect()
}

/// Minimal deterministic PRNG (xoshiro256**)
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

/// Raw layout: `time slice intensity std`.
fn write_raw(path: &Path, times: &[f64], values: &[f64]) -> Result<()> {
    let file = fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(file);
    for (t, v) in times.iter().zip(values) {
        writeln!(out, "{t:.3} 0 {v:.6} 0")?;
    }
    out.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let out_dir = Args::parse().out_dir;
    fs::create_dir_all(&out_dir).with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = SimpleRng::new(42);
    let times = sample_times();

    for role in SeriesRole::ALL {
        // (t0, alpha, beta, amplitude), baseline, noise
        let (bolus, baseline, noise) = match role {
            SeriesRole::Contrast => ((12.0, 3.0, 6.0, 40.0), 100.0, 1.5),
            SeriesRole::ArterialInput => ((8.0, 2.5, 3.0, 400.0), 100.0, 6.0),
            SeriesRole::VenousInput => ((14.0, 2.8, 4.5, 250.0), 100.0, 4.0),
        };
        let values = generate_curve(&times, bolus, baseline, noise, &mut rng);
        let path = out_dir.join(role.raw_file_name());
        write_raw(&path, &times, &values)?;
        println!("Wrote {} {role} samples to {}", times.len(), path.display());
    }

    Ok(())
}
