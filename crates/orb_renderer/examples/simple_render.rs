//! Simple sphere walk example.
//!
//! Renders one chromatic, slightly defocused walk and saves it in PPM format.

use orb_renderer::{render_scene, BlurModel, CameraParameters, NormalizedImage, Seeds};
use std::fs::File;
use std::io::{BufWriter, Write};

fn main() {
    println!("Orb - Simple Example");
    println!("====================");

    let camera = CameraParameters::new()
        .with_resolution(500, 500)
        .with_radius(200.0)
        .with_samples(100)
        .with_focus(0.0, BlurModel::Power { scaling: 0.02, exponent: 2 })
        .with_aberration([0.99, 1.0, 1.01]);

    let steps = 8000;
    println!(
        "Rendering {} steps at {}x{} @ {} samples per segment...",
        steps, camera.width, camera.height, camera.samples_per_segment
    );

    let start = std::time::Instant::now();
    let image = render_scene(steps, 0.01, &camera, &Seeds::from_master(42)).expect("Render failed");
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.ppm";
    save_ppm(&image, filename).expect("Failed to save image");
    println!("Saved to {}", filename);
}

fn save_ppm(image: &NormalizedImage, filename: &str) -> std::io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width(), image.height())?;
    writeln!(writer, "255")?;

    for y in 0..image.height() {
        for x in 0..image.width() {
            let rgb = image.pixel(x, y);
            let level = |c: f64| (255.0 * c.powf(1.0 / 2.2)).min(255.0) as u8;
            writeln!(writer, "{} {} {}", level(rgb[0]), level(rgb[1]), level(rgb[2]))?;
        }
    }

    Ok(())
}
