use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "sanitize-input",
    version,
    about = "Low-pass filter perfusion contrast and input-function curves",
    long_about = "Reads the contrast curve and the arterial/venous input functions, removes\n\
                  high-frequency noise with a zero-phase 5th-order Butterworth low-pass and\n\
                  writes the sanitized series for kinetic modeling."
)]
pub struct Cli {
    /// Cutoff as a fraction (0 to 1) of the maximum allowable frequency [default: 0.18]
    #[arg(short = 'c', long = "cfreq", value_name = "FRACTION")]
    pub cfreq: Option<String>,

    /// JSON pipeline config; --cfreq overrides its cutoff
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding C_000009.txt, AIF_000000.txt and VIF_000001.txt
    #[arg(long, value_name = "DIR")]
    pub raw_dir: Option<PathBuf>,

    /// Directory the sanitized_*.txt files are written to
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Export the contrast curve before/after filtering as CSV
    #[arg(long, value_name = "FILE")]
    pub plot: Option<PathBuf>,

    /// Print the run report as JSON on stdout
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
