//! Full artifact export for a project.

use super::common::{ConfigOverrides, load_profile, print_channels, project_stem};
use anyhow::Context;
use clap::Args;
use std::path::{Path, PathBuf};
use swfir_dsp::synthesize_channels;
use swfir_io::{
    MULTICHANNEL_WAV_NAME, channel_wav_names, csv_file_name, export_csv, export_graphic_eq,
    graphic_eq_file_name, write_impulse_response, write_multichannel,
};

#[derive(Args)]
pub struct ExportArgs {
    /// Input .swproj file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output directory (default: <INPUT dir>/<name>_export)
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    #[command(flatten)]
    overrides: ConfigOverrides,

    /// Skip the CSV table
    #[arg(long)]
    no_csv: bool,

    /// Skip the GraphicEQ preset
    #[arg(long)]
    no_graphic_eq: bool,

    /// Skip the per-channel mono WAV files
    #[arg(long)]
    no_channel_wavs: bool,

    /// Skip the interleaved multi-channel WAV file
    #[arg(long)]
    no_multichannel: bool,
}

fn default_output_dir(input: &Path) -> PathBuf {
    let parent = input
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    parent.join(format!("{}_export", project_stem(input)))
}

pub fn run(args: ExportArgs) -> anyhow::Result<()> {
    let mut config = args.overrides.resolve()?;
    config.write_csv &= !args.no_csv;
    config.write_graphic_eq &= !args.no_graphic_eq;
    config.write_channel_wavs &= !args.no_channel_wavs;
    config.write_multichannel_wav &= !args.no_multichannel;
    if !config.writes_anything() {
        anyhow::bail!("Nothing to export: every artifact is disabled");
    }

    let profile = load_profile(&args.input, config.require_stereo)?;
    print_channels(profile.channels());

    let outdir = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_dir(&args.input));
    std::fs::create_dir_all(&outdir)
        .with_context(|| format!("failed to create {}", outdir.display()))?;
    println!("\nExporting to {}/\n", outdir.display());

    let stem = project_stem(&args.input);
    let channels = profile.channels();

    if config.write_csv {
        let path = outdir.join(csv_file_name(&stem));
        export_csv(channels, &path)?;
        println!("  CSV: {}", path.display());
    }

    if config.write_graphic_eq {
        let path = outdir.join(graphic_eq_file_name(&stem));
        export_graphic_eq(channels, config.headroom_db, &path)?;
        println!("  GraphicEQ: {}", path.display());
    }

    if config.write_channel_wavs || config.write_multichannel_wav {
        let irs = synthesize_channels(channels, config.synth_config())
            .context("impulse response synthesis failed")?;

        if config.write_channel_wavs {
            for (ir, name) in irs.iter().zip(channel_wav_names(channels)) {
                let path = outdir.join(name);
                write_impulse_response(&path, ir)?;
                println!("  IR ({}): {}", ir.channel, path.display());
            }
        }
        if config.write_multichannel_wav {
            let path = outdir.join(MULTICHANNEL_WAV_NAME);
            write_multichannel(&path, &irs)?;
            println!("  IR (all channels): {}", path.display());
        }
    }

    println!(
        "\nDone. {} taps at {} Hz.",
        config.ir_length, config.sample_rate
    );
    Ok(())
}
