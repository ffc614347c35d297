//! Display project contents.

use super::common::{ConfigOverrides, load_profile, print_channels};
use clap::Args;
use swfir_dsp::channel_preamp_db;

/// Display the channels of a `.swproj` project.
#[derive(Args)]
pub struct InfoArgs {
    /// Path to the .swproj file
    pub file: std::path::PathBuf,

    /// Print the full profile as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub overrides: ConfigOverrides,
}

/// Run the info command.
pub fn run(args: InfoArgs) -> anyhow::Result<()> {
    let config = args.overrides.resolve()?;
    let profile = load_profile(&args.file, config.require_stereo)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&profile)?);
        return Ok(());
    }

    println!("File:        {}", profile.source());
    print_channels(profile.channels());

    let preamp = channel_preamp_db(profile.channels(), config.headroom_db);
    println!(
        "Preamp:      {preamp:.1} dB (headroom {:.1} dB)",
        config.headroom_db
    );
    let with_measurement = profile
        .channels()
        .iter()
        .filter(|c| c.has_measurement())
        .count();
    println!(
        "Measurement: {with_measurement} of {} channels",
        profile.len()
    );

    Ok(())
}
