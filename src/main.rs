use crater_detector::config::{load_config, RunConfig};
use crater_detector::dataset::{collect_images, image_id_from_path};
use crater_detector::image::load_grayscale_image;
use crater_detector::report::{build_records, ReportWriter};
use crater_detector::CraterDetector;

use log::{info, warn};
use rayon::prelude::*;
use std::env;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let images = collect_images(&config.dataset_root)?;
    info!(
        "Found {} images under {}",
        images.len(),
        config.dataset_root.display()
    );

    let detector = CraterDetector::new(config.detector.to_params());
    let writer = Mutex::new(ReportWriter::from_path(&config.output_csv)?);
    let processed = AtomicUsize::new(0);
    let total = images.len();

    images.par_iter().try_for_each(|path| {
        process_image(path, &config, &detector, &writer)?;
        let done = processed.fetch_add(1, Ordering::Relaxed) + 1;
        if done % 100 == 0 {
            info!("Processed {done}/{total}");
        }
        Ok::<(), String>(())
    })?;

    writer
        .into_inner()
        .map_err(|_| "CSV writer lock poisoned".to_string())?
        .flush()?;
    info!("Done, wrote {}", config.output_csv.display());
    Ok(())
}

fn process_image(
    path: &Path,
    config: &RunConfig,
    detector: &CraterDetector,
    writer: &Mutex<ReportWriter<std::fs::File>>,
) -> Result<(), String> {
    let image_id = match image_id_from_path(path, &config.dataset_root) {
        Ok(id) => id,
        Err(err) => {
            warn!("Skipping image: {err}");
            return Ok(());
        }
    };
    let gray = match load_grayscale_image(path) {
        Ok(gray) => gray,
        Err(err) => {
            warn!("Skipping image: {err}");
            return Ok(());
        }
    };

    let ellipses = detector.detect(gray.as_view());
    let records = build_records(&image_id, &ellipses);

    // One lock acquisition per image keeps its record block contiguous.
    let mut writer = writer.lock().map_err(|_| "CSV writer lock poisoned")?;
    writer.write_records(&records)
}

fn usage() -> String {
    "Usage: crater-detector <config.json>".to_string()
}
