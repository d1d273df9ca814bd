use argh::FromArgs;
use std::path::PathBuf;

use augmenta::image::{Image, ImageSize};
use augmenta::transforms::{AugmentationConfig, AugmentationPipeline, SeededRandom};

#[derive(FromArgs)]
/// Write randomly augmented copies of an image
struct Args {
    /// path to an input image
    #[argh(option, short = 'i')]
    image_path: PathBuf,

    /// directory the augmented images are written to
    #[argh(option, short = 'o')]
    output_dir: PathBuf,

    /// number of augmented copies
    #[argh(option, short = 'n', default = "8")]
    count: usize,

    /// seed of the random source, drawn from the system if omitted
    #[argh(option, short = 's')]
    seed: Option<u64>,

    /// configuration override as name=value, e.g. minScale=8
    #[argh(option)]
    set: Vec<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let mut config = AugmentationConfig::default();
    for item in &args.set {
        let (name, value) = item
            .split_once('=')
            .ok_or_else(|| format!("expected name=value, got {item}"))?;
        config.set(name.trim(), value.trim().parse()?)?;
    }

    let rng = match args.seed {
        Some(seed) => SeededRandom::from_seed(seed),
        None => SeededRandom::from_entropy(),
    };
    let mut pipeline = AugmentationPipeline::new(config, rng)?;

    // read the image
    let img = image::open(&args.image_path)?;
    let image = Image::<u8, 3>::new(
        ImageSize {
            width: img.width() as usize,
            height: img.height() as usize,
        },
        img.to_rgb8().into_raw(),
    )?;
    log::info!("loaded {} ({})", args.image_path.display(), image.size());

    std::fs::create_dir_all(&args.output_dir)?;

    for i in 0..args.count {
        let output = pipeline.transform(&image)?;
        let (width, height) = (output.width() as u32, output.height() as u32);
        let path = args.output_dir.join(format!("augmented_{i:04}.png"));

        match output.channels() {
            1 => image::GrayImage::from_raw(width, height, output.into_vec())
                .ok_or("output buffer does not match its size")?
                .save(&path)?,
            _ => image::RgbImage::from_raw(width, height, output.into_vec())
                .ok_or("output buffer does not match its size")?
                .save(&path)?,
        }
        log::info!("wrote {}", path.display());
    }

    Ok(())
}
