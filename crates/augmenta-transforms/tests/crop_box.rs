use augmenta_image::ImageSize;
use augmenta_transforms::{
    AugmentationConfig, ConfigKey, CropBoxSolver, GeometryError, ReplayRandom, SeededRandom,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_config(rng: &mut StdRng) -> AugmentationConfig {
    AugmentationConfig::default()
        .with(ConfigKey::MinAspectRatio, rng.random_range(1..=100))
        .with(ConfigKey::MinScale, rng.random_range(1..=100))
        .with(ConfigKey::CropRange, rng.random_range(0..=100))
        .with(ConfigKey::MatchAspectRatio, rng.random_range(0..=1))
        .with(
            ConfigKey::FixedScale,
            if rng.random_bool(0.2) {
                rng.random_range(1..=512)
            } else {
                0
            },
        )
        .with(ConfigKey::Width, rng.random_range(1..=512))
        .with(ConfigKey::Height, rng.random_range(1..=512))
}

#[test]
fn boxes_stay_inside_the_source() -> Result<(), GeometryError> {
    let mut params = StdRng::seed_from_u64(1234);
    let mut draws = SeededRandom::from_seed(99);

    for _ in 0..5000 {
        let config = random_config(&mut params);
        let source = ImageSize {
            width: params.random_range(1..=2000),
            height: params.random_range(1..=2000),
        };

        let crop = CropBoxSolver::new(&config).solve(source, &mut draws)?;

        assert!(crop.x >= 0.0 && crop.y >= 0.0, "{crop:?} for {source}");
        assert!(crop.width > 0.0 && crop.height > 0.0, "{crop:?} for {source}");
        assert!(crop.fits_within(source), "{crop:?} for {source}");

        let (x, y, size) = crop.to_pixels(source);
        assert!(x + size.width <= source.width);
        assert!(y + size.height <= source.height);
    }
    Ok(())
}

#[test]
fn portrait_source_with_wide_aspect_range() -> Result<(), GeometryError> {
    let config = AugmentationConfig::default()
        .with(ConfigKey::MinAspectRatio, 75)
        .with(ConfigKey::MinScale, 8);
    let solver = CropBoxSolver::new(&config);
    let source = ImageSize {
        width: 100,
        height: 200,
    };

    // the extremes of the aspect ratio and scale draws
    for draws in [
        vec![0.0, 0.0, 0.0, 0.0],
        vec![0.0, 0.999_999, 0.999_999, 0.999_999],
        vec![0.999_999, 0.0, 0.5, 0.5],
        vec![0.999_999, 0.999_999, 0.0, 0.999_999],
    ] {
        let crop = solver.solve(source, &mut ReplayRandom::new(draws))?;
        assert!(crop.width <= 100.0 + 1e-3, "{crop:?}");
        assert!(crop.height <= 200.0 + 1e-3, "{crop:?}");
        assert!(crop.fits_within(source), "{crop:?}");
    }

    let mut rng = SeededRandom::from_seed(8);
    for _ in 0..1000 {
        let crop = solver.solve(source, &mut rng)?;
        assert!(crop.fits_within(source), "{crop:?}");
    }
    Ok(())
}

#[test]
fn matched_aspect_ratio_draws_nothing_for_it() -> Result<(), GeometryError> {
    let source = ImageSize {
        width: 640,
        height: 360,
    };
    let base = AugmentationConfig::default()
        .with(ConfigKey::MinAspectRatio, 50)
        .with(ConfigKey::MinScale, 30);

    let mut free = ReplayRandom::new(vec![0.3, 0.6, 0.2, 0.9]);
    CropBoxSolver::new(&base).solve(source, &mut free)?;

    let matched = base.with(ConfigKey::MatchAspectRatio, 1);
    let mut rng = ReplayRandom::new(vec![0.3, 0.6, 0.2, 0.9]);
    let crop = CropBoxSolver::new(&matched).solve(source, &mut rng)?;

    assert_eq!(rng.draws_consumed(), free.draws_consumed() - 1);
    approx::assert_relative_eq!(crop.width / crop.height, 640.0 / 360.0, epsilon = 1e-4);

    let mut seeded = SeededRandom::from_seed(5);
    for _ in 0..100 {
        let crop = CropBoxSolver::new(&matched).solve(source, &mut seeded)?;
        approx::assert_relative_eq!(crop.width / crop.height, 640.0 / 360.0, epsilon = 1e-4);
    }
    Ok(())
}

#[test]
fn misconfiguration_is_surfaced() {
    let config = AugmentationConfig::default().with(ConfigKey::CropRange, 500);
    let solver = CropBoxSolver::new(&config);
    let source = ImageSize {
        width: 300,
        height: 100,
    };
    // jitter of up to five times the center offset pushes the box out
    let mut rng = ReplayRandom::new(vec![0.5, 0.5, 0.0, 0.0]);
    let res = solver.solve(source, &mut rng);
    assert!(matches!(res, Err(GeometryError::DegenerateCrop { .. })));
}
