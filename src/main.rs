//! vtf CLI - Command-line tool for inspecting and converting VTF textures.
//!
//! This is the main entry point for the vtf command-line application.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

use vtf::prelude::*;

/// vtf - Valve Texture Format inspection and conversion tool
#[derive(Parser)]
#[command(name = "vtf")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the header and image layout of a VTF file
    Info {
        /// Path to the VTF file
        #[arg(short, long, env = "INPUT_VTF")]
        input: PathBuf,
    },

    /// Convert one image of a VTF file to PNG
    Convert {
        /// Path to the VTF file
        #[arg(short, long, env = "INPUT_VTF")]
        input: PathBuf,

        /// Output PNG file
        #[arg(short, long)]
        output: PathBuf,

        /// Export the thumbnail instead of the full image
        #[arg(long, conflicts_with = "mip")]
        thumbnail: bool,

        /// Export a mipmap by storage index (0 is the 1x1 level)
        #[arg(long)]
        mip: Option<usize>,
    },

    /// Convert every VTF file under a directory to PNG
    Batch {
        /// Input directory
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, env = "OUTPUT_FOLDER")]
        output: PathBuf,

        /// Filter pattern for file names (glob-style)
        #[arg(short, long)]
        filter: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Info { input } => {
            cmd_info(&input)?;
        }
        Commands::Convert {
            input,
            output,
            thumbnail,
            mip,
        } => {
            let selection = match (thumbnail, mip) {
                (true, _) => Selection::Thumbnail,
                (false, Some(level)) => Selection::Mipmap(level),
                (false, None) => Selection::Full,
            };
            cmd_convert(&input, &output, selection)?;
        }
        Commands::Batch {
            input,
            output,
            filter,
        } => {
            cmd_batch(&input, &output, filter.as_deref())?;
        }
    }

    Ok(())
}

/// Which image of a texture to export.
#[derive(Debug, Clone, Copy)]
enum Selection {
    Thumbnail,
    Mipmap(usize),
    Full,
}

fn cmd_info(input: &Path) -> Result<()> {
    let data = fs::read(input).context("Failed to read input file")?;
    let header = Header::parse(&data).context("Failed to parse VTF header")?;

    println!("File:          {}", input.display());
    println!("Version:       {}", header.version);
    println!("Header size:   {} bytes", header.header_size);
    println!("Dimensions:    {}x{} (depth {})", header.width, header.height, header.depth);
    println!("Format:        {}", header.high_res_format);
    println!("Mipmaps:       {}", header.mipmap_count);
    println!(
        "Thumbnail:     {}x{} {}",
        header.low_res_width, header.low_res_height, header.low_res_format
    );
    println!(
        "Frames:        {} (first {})",
        header.frame_count, header.first_frame
    );
    println!(
        "Reflectivity:  {:.3} {:.3} {:.3}",
        header.reflectivity[0], header.reflectivity[1], header.reflectivity[2]
    );
    println!("Bumpmap scale: {}", header.bumpmap_scale);

    let names: Vec<_> = header.flags.iter_names().map(|(name, _)| name).collect();
    let unknown = header.flags.bits() & !TextureFlags::all().bits();
    print!("Flags:         {:#010x} [{}]", header.flags.bits(), names.join(" | "));
    if unknown != 0 {
        print!(" +unknown {:#x}", unknown);
    }
    println!();

    println!();
    println!("{:<12} {:<18} {:>11} {:>10} {:>10}", "Image", "Format", "Size", "Offset", "Length");

    let descriptors = layout(&header, data.len()).context("Invalid image layout")?;
    for descriptor in &descriptors {
        let kind = match descriptor.kind {
            ImageKind::Thumbnail => "thumbnail".to_string(),
            ImageKind::Mipmap(level) => format!("mipmap {}", level),
            ImageKind::Full => "full".to_string(),
        };
        let support = if descriptor.format.info().is_supported() {
            ""
        } else {
            " (unsupported)"
        };
        println!(
            "{:<12} {:<18} {:>11} {:>10} {:>10}{}",
            kind,
            descriptor.format.to_string(),
            format!("{}x{}", descriptor.width, descriptor.height),
            descriptor.offset,
            descriptor.length,
            support
        );
    }

    let trailing = data.len() - descriptors.last().map_or(data.len(), |d| d.end());
    if trailing > 0 {
        println!("\n{} trailing bytes after the full image", trailing);
    }

    Ok(())
}

fn cmd_convert(input: &Path, output: &Path, selection: Selection) -> Result<()> {
    println!("Converting: {} -> {}", input.display(), output.display());

    let start = Instant::now();
    let data = fs::read(input).context("Failed to read input file")?;
    let texture = Texture::assemble(&data).context("Failed to decode VTF")?;
    debug!("decoded {} in {:?}", input.display(), start.elapsed());

    let image = match selection {
        Selection::Full => texture.image(),
        Selection::Thumbnail => texture
            .thumbnail()
            .context("Texture has no thumbnail")?,
        Selection::Mipmap(level) => texture.mipmaps().get(level).with_context(|| {
            format!(
                "Mipmap {} does not exist ({} stored)",
                level,
                texture.mipmaps().len()
            )
        })?,
    };

    write_png(image, output)?;

    println!(
        "Wrote {}x{} image{}",
        image.width(),
        image.height(),
        if image.has_alpha() { " with alpha" } else { "" }
    );

    Ok(())
}

fn cmd_batch(input: &Path, output: &Path, filter: Option<&str>) -> Result<()> {
    println!("Scanning: {}", input.display());

    let files: Vec<PathBuf> = WalkDir::new(input)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("vtf"))
        })
        .filter(|path| match filter {
            Some(pattern) => path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|name| glob_match(pattern, name)),
            None => true,
        })
        .collect();

    println!("Converting {} files to {}...", files.len(), output.display());

    fs::create_dir_all(output)?;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    let converted = AtomicUsize::new(0);
    let failed = AtomicUsize::new(0);

    files.par_iter().for_each(|path| {
        let relative = path.strip_prefix(input).unwrap_or(path);
        let output_path = output.join(relative).with_extension("png");

        match convert_file(path, &output_path) {
            Ok(()) => {
                converted.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                pb.suspend(|| warn!("{}: {:#}", path.display(), e));
                failed.fetch_add(1, Ordering::Relaxed);
            }
        }

        pb.inc(1);
    });

    pb.finish_with_message("Done");
    info!(
        "converted {} files in {:?} ({} failed)",
        converted.load(Ordering::Relaxed),
        start.elapsed(),
        failed.load(Ordering::Relaxed)
    );

    Ok(())
}

fn convert_file(input: &Path, output: &Path) -> Result<()> {
    let data = fs::read(input).context("Failed to read file")?;
    let texture = Texture::assemble(&data).context("Failed to decode VTF")?;

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }
    write_png(texture.image(), output)?;

    debug!("{} -> {}", input.display(), output.display());
    Ok(())
}

fn write_png(image: &DecodedImage, output: &Path) -> Result<()> {
    let buffer = image::RgbaImage::from_raw(image.width(), image.height(), image.data().to_vec())
        .context("Decoded buffer does not match its dimensions")?;
    buffer
        .save_with_format(output, image::ImageFormat::Png)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    Ok(())
}

/// Simple glob matching for filtering.
fn glob_match(pattern: &str, name: &str) -> bool {
    let pattern_lower = pattern.to_lowercase();
    let name_lower = name.to_lowercase();

    if pattern_lower.contains('*') {
        let parts: Vec<&str> = pattern_lower.split('*').collect();
        let mut pos = 0;

        for (i, part) in parts.iter().enumerate() {
            if part.is_empty() {
                continue;
            }

            if let Some(found) = name_lower[pos..].find(part) {
                if i == 0 && found != 0 {
                    // First part must match at start if no leading *
                    return false;
                }
                pos += found + part.len();
            } else {
                return false;
            }
        }

        // Without a trailing * the whole name must be consumed
        parts.last().map_or(true, |p| p.is_empty()) || pos == name_lower.len()
    } else {
        name_lower.contains(&pattern_lower)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glob_match() {
        assert!(glob_match("*.vtf", "brick01.vtf"));
        assert!(glob_match("brick*", "Brick01.VTF"));
        assert!(glob_match("*01*", "brick01.vtf"));
        assert!(!glob_match("wood*", "brick01.vtf"));
        assert!(!glob_match("*.png", "brick01.vtf"));
        assert!(glob_match("ick", "brick01.vtf"));
    }

    #[test]
    fn test_cli_parses() {
        use clap::CommandFactory;
        Cli::command().debug_assert();

        let cli = Cli::try_parse_from(["vtf", "convert", "-i", "a.vtf", "-o", "a.png", "--mip", "2"])
            .unwrap();
        assert!(matches!(cli.command, Commands::Convert { mip: Some(2), thumbnail: false, .. }));

        assert!(Cli::try_parse_from([
            "vtf", "convert", "-i", "a.vtf", "-o", "a.png", "--mip", "2", "--thumbnail"
        ])
        .is_err());
    }
}
