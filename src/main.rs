//! `qamod` demo: two test tones through the QAM chain and back
//!
//! Usage:
//!
//!   RUST_LOG=debug qamod --carrier 10 --unit khz --tone-a 3 --tone-b 5
//!   qamod --profile-dir ./profiles --profile "Voice 10 kHz"

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use qamod_lib::adapters::{MemorySink, ToneSource};
use qamod_lib::dsp::{normalized_cross_correlation, rms, Spectrum};
use qamod_lib::ports::SignalSource;
use qamod_lib::profiles::ProfileStore;
use qamod_lib::{CarrierSpec, Configuration, QamError, QamPipeline, QamResult};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Carrier magnitude (overrides the profile)
    #[arg(short, long)]
    carrier: Option<f64>,
    /// Carrier unit, kHz or MHz (overrides the profile)
    #[arg(short, long)]
    unit: Option<String>,
    /// Sampling rate of both test tones
    #[arg(short, long, default_value_t = 48_000)]
    rate: u32,
    /// Length of the test tones in seconds
    #[arg(short, long, default_value_t = 1.0)]
    duration: f64,
    /// Frequency of the first test tone in Hz
    #[arg(long, default_value_t = 3.0)]
    tone_a: f64,
    /// Frequency of the second test tone in Hz
    #[arg(long, default_value_t = 5.0)]
    tone_b: f64,
    /// Leave the recovered signals unclipped
    #[arg(long)]
    no_clip: bool,
    /// Directory holding configuration profiles
    #[arg(long)]
    profile_dir: Option<PathBuf>,
    /// Profile to load from --profile-dir
    #[arg(short, long)]
    profile: Option<String>,
    /// Save the effective configuration under this name in --profile-dir
    #[arg(long)]
    save_profile: Option<String>,
}

fn resolve_config(cli: &Cli, store: Option<&ProfileStore>) -> QamResult<Configuration> {
    let mut config = match (&cli.profile, store) {
        (Some(name), Some(store)) => store.load(name)?,
        (Some(_), None) => {
            return Err(QamError::Config("--profile needs --profile-dir".into()));
        }
        _ => Configuration::default(),
    };

    if cli.carrier.is_some() || cli.unit.is_some() {
        let magnitude = cli.carrier.unwrap_or(config.carrier.magnitude());
        let unit = cli.unit.as_deref().unwrap_or(config.carrier.unit().as_str());
        config.carrier = CarrierSpec::parse(magnitude, unit)?;
    }
    if cli.no_clip {
        config.clip_output = false;
    }
    Ok(config)
}

fn run(cli: Cli) -> QamResult<()> {
    let store = cli
        .profile_dir
        .as_ref()
        .map(|dir| ProfileStore::open(dir.clone()))
        .transpose()?;
    let mut config = resolve_config(&cli, store.as_ref())?;

    if let Some(name) = &cli.save_profile {
        let store = store
            .as_ref()
            .ok_or_else(|| QamError::Config("--save-profile needs --profile-dir".into()))?;
        config.name = name.clone();
        store.save(&config)?;
    }

    if !(cli.duration.is_finite() && cli.duration > 0.0) {
        return Err(QamError::InvalidInput("duration must be positive".into()));
    }
    let num_samples = (cli.duration * cli.rate as f64).round() as usize;

    let first = ToneSource::new(cli.tone_a, num_samples, cli.rate)
        .with_amplitude(0.8)
        .load()?;
    let second = ToneSource::new(cli.tone_b, num_samples, cli.rate)
        .with_amplitude(0.8)
        .load()?;

    log::info!(
        "carrier {} ({} Hz), {} samples at {} Hz",
        config.carrier,
        config.carrier.hz(),
        num_samples,
        cli.rate
    );

    let pipeline = QamPipeline::from_config(&config);
    let output = pipeline.run(&first, &second)?;

    let mut sink = MemorySink::new();
    output.deliver(&mut sink)?;

    let envelope = Spectrum::of_real(&output.modulated.magnitudes(), output.sampling_rate());
    println!(
        "modulated: {} samples, envelope spectrum peak at {:.2} Hz",
        output.modulated.len(),
        envelope.peak_frequency().unwrap_or(0.0)
    );

    for (delivery, input) in sink.deliveries().iter().zip([&first, &second]) {
        let spectrum = Spectrum::of_real(&delivery.samples, delivery.sampling_rate);
        println!(
            "{}: rms {:.4} (input {:.4}), correlation {:+.4}, spectrum peak at {:.2} Hz",
            delivery.label,
            rms(&delivery.samples),
            rms(input.samples()),
            normalized_cross_correlation(&delivery.samples, input.samples()),
            spectrum.peak_frequency().unwrap_or(0.0)
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
