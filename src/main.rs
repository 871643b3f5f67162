use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use clap::Parser;

use bqre_tracker::quantize::RoundingMode;
use bqre_tracker::{report, run_comparison, sim, EstimatorConfig, ScenarioConfig};

#[derive(Parser, Debug)]
#[command(name = "bqre")]
#[command(about = "Fix-outage dead reckoning - frozen baseline vs B-QRE comparison", long_about = None)]
struct Args {
    /// Tick duration (seconds)
    #[arg(long, default_value = "1.0")]
    dt: f64,

    /// Ticks with an absolute fix
    #[arg(long, default_value = "30")]
    fix_ticks: usize,

    /// Ticks after the fix is lost
    #[arg(long, default_value = "30")]
    lost_ticks: usize,

    /// True walking speed (m/s)
    #[arg(long, default_value = "1.2")]
    speed: f64,

    /// True heading, degrees clockwise from North
    #[arg(long, default_value = "10.0")]
    heading_deg: f64,

    /// Constant turn rate (deg/s)
    #[arg(long, default_value = "0.0")]
    turn_rate_deg: f64,

    /// Accelerometer noise std (m/s^2)
    #[arg(long, default_value = "0.15")]
    accel_noise: f64,

    /// Gyro noise std (deg/s)
    #[arg(long, default_value = "2.0")]
    gyro_noise_deg: f64,

    /// Fix noise std per axis (meters)
    #[arg(long, default_value = "3.0")]
    fix_noise: f64,

    /// RNG seed for the scenario
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Quantization unit while learning from fixes
    #[arg(long, default_value = "0.6")]
    unit_learn: f64,

    /// Quantization unit for acceleration after fix loss
    #[arg(long, default_value = "0.6")]
    unit_lost: f64,

    /// Break quantization ties to even instead of away from zero
    #[arg(long, default_value_t = false)]
    half_to_even: bool,

    /// Write the full report as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Write per-tick trajectories as CSV
    #[arg(long)]
    csv: Option<PathBuf>,
}

impl Args {
    fn scenario(&self) -> ScenarioConfig {
        ScenarioConfig {
            dt: self.dt,
            fix_ticks: self.fix_ticks,
            lost_ticks: self.lost_ticks,
            true_speed: self.speed,
            true_heading_deg: self.heading_deg,
            turn_rate_deg: self.turn_rate_deg,
            accel_noise_std: self.accel_noise,
            gyro_noise_std_deg: self.gyro_noise_deg,
            fix_noise_std: self.fix_noise,
            seed: self.seed,
        }
    }

    fn estimator(&self) -> EstimatorConfig {
        EstimatorConfig {
            dt: self.dt,
            unit_learn: self.unit_learn,
            unit_lost: self.unit_lost,
            rounding: if self.half_to_even {
                RoundingMode::HalfToEven
            } else {
                RoundingMode::HalfAwayFromZero
            },
        }
    }
}

fn ts_now() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let scenario = args.scenario();
    let estimator = args.estimator();

    println!("[{}] B-QRE dead reckoning comparison", ts_now());
    println!("  Fix phase:  {} ticks", scenario.fix_ticks);
    println!("  Lost phase: {} ticks (dt={}s)", scenario.lost_ticks, scenario.dt);
    println!(
        "  Truth: {:.2} m/s at {:.1} deg, seed {}",
        scenario.true_speed, scenario.true_heading_deg, scenario.seed
    );

    let timeline = sim::generate(&scenario)?;
    let result = run_comparison(&timeline, &estimator)?;
    let cmp = &result.comparison;

    println!("\n=== Error over the {}-tick fix-lost interval ===", result.lost_ticks);
    println!(
        "Frozen baseline  final: {:.2} m, mean: {:.2} m",
        cmp.baseline.summary.final_error, cmp.baseline.summary.mean_error
    );
    println!(
        "B-QRE            final: {:.2} m, mean: {:.2} m",
        cmp.bqre.summary.final_error, cmp.bqre.summary.mean_error
    );
    println!(
        "Improvement: {:.2} m final, {:.2} m mean",
        cmp.improvement,
        cmp.mean_improvement()
    );
    println!(
        "Learned at fix loss: heading {:.1} deg, speed level {}",
        result.learned.heading.to_degrees(),
        result.learned.speed
    );

    if !cmp.bqre_wins() && scenario.lost_displacement() <= estimator.unit_lost {
        log::warn!(
            "True displacement {:.2} m is within one quantization unit; the frozen baseline is expected to do well here",
            scenario.lost_displacement()
        );
    }

    if let Some(path) = &args.json {
        report::write_json(path, &result, Some(&scenario))?;
    }
    if let Some(path) = &args.csv {
        report::write_csv(path, &timeline, &result)?;
    }

    Ok(())
}
