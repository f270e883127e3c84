use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use glint_renderer::PixelBuffer;

/// Write the image, choosing the format from the file extension.
pub fn save(image: &PixelBuffer, path: &Path) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("png") => save_png(image, path),
        Some("ppm") => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_ppm(image, BufWriter::new(file))
        }
        _ => bail!("Unsupported output format: {} (use .png or .ppm)", path.display()),
    }
}

fn save_png(image: &PixelBuffer, path: &Path) -> Result<()> {
    image::save_buffer(
        path,
        &image.to_rgb8(),
        image.width,
        image.height,
        image::ColorType::Rgb8,
    )
    .with_context(|| format!("Failed to write {}", path.display()))
}

/// Write an ASCII PPM (P3), top row first.
pub fn write_ppm<W: Write>(image: &PixelBuffer, mut writer: W) -> Result<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for rgb in image.to_rgb8().chunks_exact(3) {
        writeln!(writer, "{} {} {}", rgb[0], rgb[1], rgb[2])?;
    }

    writer.flush()?;
    Ok(())
}
