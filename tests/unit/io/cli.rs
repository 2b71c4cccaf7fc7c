//! Tests for command-line interface parsing and command execution

#[cfg(test)]
mod tests {
    use clap::Parser;
    use image::{Rgba, RgbaImage};
    use pixelmorph::io::cli::{Cli, Command, CommandRunner};
    use pixelmorph::io::configuration::{
        DEFAULT_ANIMATION_DURATION_MS, DEFAULT_OUTPUT_SIZE, DEFAULT_SEED,
    };
    use pixelmorph::io::image::load_rgba;
    use pixelmorph::sampling::LuminanceWeights;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn write_inputs(dir: &Path) -> (PathBuf, PathBuf) {
        let source = RgbaImage::from_fn(4, 4, |x, y| {
            let v = (x * 60 + y * 5) as u8;
            Rgba([v, 255 - v, 30, 255])
        });
        let target = RgbaImage::from_fn(4, 4, |x, y| {
            let v = (y * 60 + x * 5) as u8;
            Rgba([v, v, v, 255])
        });
        let source_path = dir.join("source.png");
        let target_path = dir.join("target.png");
        source.save(&source_path).unwrap();
        target.save(&target_path).unwrap();
        (source_path, target_path)
    }

    // Tests CLI parsing with only the required image arguments
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_cli_parse_minimal_args() {
        let cli = Cli::parse_from(["program", "mosaic", "a.png", "b.png"]);

        let Command::Mosaic(args) = &cli.command else {
            panic!("expected mosaic command");
        };
        assert_eq!(args.mapping.source, PathBuf::from("a.png"));
        assert_eq!(args.mapping.target, PathBuf::from("b.png"));
        assert_eq!(args.mapping.width, DEFAULT_OUTPUT_SIZE);
        assert_eq!(args.mapping.seed, DEFAULT_SEED);
        assert_eq!(args.mapping.luminance, LuminanceWeights::Rec601);
        assert!(args.output.is_none());
        assert!(cli.should_show_progress());
        assert_eq!(cli.log_filter(), "warn");
    }

    // Tests animation options flow into the run configuration
    // Verified by dropping the damping override
    #[test]
    fn test_cli_parse_animate_args() {
        let cli = Cli::parse_from([
            "program", "animate", "a.png", "b.png", "-o", "frames", "-W", "32", "-H", "16",
            "-d", "500", "-f", "30", "--damping", "0.5", "--seed", "9", "-l", "rec709", "-q",
        ]);

        let Command::Animate(args) = &cli.command else {
            panic!("expected animate command");
        };
        let config = args.to_config();
        assert_eq!((config.width, config.height), (32, 16));
        assert_eq!(config.engine.duration_ms, 500);
        assert!((config.engine.attraction.damping - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.seed, 9);
        assert_eq!(config.engine.seed, 9);
        assert_eq!(config.luminance, LuminanceWeights::Rec709);
        assert_eq!(args.fps, 30);
        assert!(!cli.should_show_progress());
        assert_eq!(cli.log_filter(), "error");
    }

    // Tests verbosity flags select increasingly detailed log filters
    // Verified by mapping every count to info
    #[test]
    fn test_log_filter_levels() {
        let filter = |flags: &[&str]| {
            let mut args = vec!["program", "mosaic", "a.png", "b.png"];
            args.extend_from_slice(flags);
            Cli::parse_from(args).log_filter()
        };
        assert_eq!(filter(&["-v"]), "info");
        assert_eq!(filter(&["-vv"]), "debug");
        assert_eq!(filter(&["-vvvv"]), "trace");
        assert_eq!(filter(&["-vv", "-q"]), "error");
    }

    // Tests mosaic output defaults to a suffixed file beside the source
    // Verified by changing the output suffix
    #[test]
    fn test_mosaic_default_output() {
        let dir = TempDir::new().unwrap();
        let (source, target) = write_inputs(dir.path());
        let cli = Cli::parse_from([
            "program",
            "mosaic",
            source.to_str().unwrap(),
            target.to_str().unwrap(),
            "-W",
            "4",
            "-H",
            "4",
        ]);

        let Command::Mosaic(args) = &cli.command else {
            panic!("expected mosaic command");
        };
        let written = CommandRunner::new(cli.clone()).mosaic(args).unwrap();

        assert_eq!(written, dir.path().join("source_mosaic.png"));
        assert_eq!(load_rgba(&written).unwrap().dimensions(), (4, 4));
    }

    // Tests animation export writes frames up to completion plus the final mosaic
    // Verified by skipping the final mosaic
    #[test]
    fn test_animate_writes_frames() {
        let dir = TempDir::new().unwrap();
        let (source, target) = write_inputs(dir.path());
        let frames = dir.path().join("frames");
        let cli = Cli::parse_from([
            "program",
            "animate",
            source.to_str().unwrap(),
            target.to_str().unwrap(),
            "-o",
            frames.to_str().unwrap(),
            "-W",
            "4",
            "-H",
            "4",
            "-d",
            "100",
            "-f",
            "20",
            "-q",
        ]);

        let Command::Animate(args) = &cli.command else {
            panic!("expected animate command");
        };
        let written = CommandRunner::new(cli.clone()).animate(args).unwrap();

        assert_eq!(written, 3);
        assert!(frames.join("frame_00000.png").exists());
        assert!(frames.join("frame_00002.png").exists());
        assert!(!frames.join("frame_00003.png").exists());
        assert!(frames.join("final.png").exists());
    }

    // Tests a zero frame rate is rejected before any work
    // Verified by dividing by the frame rate unchecked
    #[test]
    fn test_animate_zero_fps() {
        let cli = Cli::parse_from(["program", "animate", "a.png", "b.png", "-o", "out", "-f", "0"]);
        let Command::Animate(args) = &cli.command else {
            panic!("expected animate command");
        };
        assert!(CommandRunner::new(cli.clone()).animate(args).is_err());
    }

    // Tests missing inputs surface as errors from run
    // Verified by ignoring load failures
    #[test]
    fn test_run_missing_input() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.png");
        let cli = Cli::parse_from([
            "program",
            "mosaic",
            missing.to_str().unwrap(),
            missing.to_str().unwrap(),
        ]);
        assert!(CommandRunner::new(cli).run().is_err());
    }

    // Tests the default animation length comes from configuration
    // Verified by changing the clap default
    #[test]
    fn test_animate_default_duration() {
        let cli = Cli::parse_from(["program", "animate", "a.png", "b.png", "-o", "out"]);
        let Command::Animate(args) = &cli.command else {
            panic!("expected animate command");
        };
        assert_eq!(args.duration_ms, DEFAULT_ANIMATION_DURATION_MS);
    }

    // Tests a divergent attraction force is rejected before any frame is written
    // Verified by validating only the sign of the force
    #[test]
    fn test_animate_rejects_divergent_force() {
        let dir = TempDir::new().unwrap();
        let (source, target) = write_inputs(dir.path());
        let frames = dir.path().join("frames");
        let cli = Cli::parse_from([
            "program",
            "animate",
            source.to_str().unwrap(),
            target.to_str().unwrap(),
            "-o",
            frames.to_str().unwrap(),
            "-W",
            "4",
            "-H",
            "4",
            "--force",
            "10",
            "-q",
        ]);

        let Command::Animate(args) = &cli.command else {
            panic!("expected animate command");
        };
        assert!(CommandRunner::new(cli.clone()).animate(args).is_err());
        assert!(!frames.exists());
    }
}
