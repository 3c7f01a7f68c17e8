use std::io::Read;

use flate2::read::GzDecoder;
use trimpro::api::MANIFEST_FILE_NAME;
use trimpro::{
    Color, Decoder, Encoder, Error, OutputFormat, PixelBuffer, ProcessingParams, SourceImage,
    StandardDecoder, StandardEncoder, Tolerance, process_batch, process_directory_to_archive,
    process_directory_to_path,
};

const MAT: Color = Color::new(250, 250, 250, 255);

/// `w` x `h` photo with a `border` px white mat; interior shade varies by `seed`.
fn matted(w: u32, h: u32, border: u32, seed: u8) -> PixelBuffer {
    PixelBuffer::from_fn(w, h, |x, y| {
        if x < border || y < border || x >= w - border || y >= h - border {
            MAT
        } else {
            Color::new(seed, (x % 128) as u8, (y % 128) as u8, 255)
        }
    })
    .unwrap()
}

fn png(buffer: &PixelBuffer) -> Vec<u8> {
    StandardEncoder
        .encode(buffer, OutputFormat::Png, 1.0)
        .unwrap()
}

fn params(format: OutputFormat, target_height: u32) -> ProcessingParams {
    ProcessingParams {
        tolerance: Tolerance(10),
        format,
        quality: 0.9,
        enhance: false,
        target_height,
    }
}

#[test]
fn batch_results_follow_input_order() {
    // widely different sizes so workers finish out of order
    let sources: Vec<SourceImage> = (0..24u32)
        .map(|i| {
            let size = if i % 3 == 0 { 600 } else { 80 };
            SourceImage {
                name: format!("img-{i:02}.png"),
                bytes: png(&matted(size, size, 20, i as u8)),
            }
        })
        .collect();
    let expected: Vec<String> = sources.iter().map(|s| s.name.clone()).collect();

    let outcome = process_batch(
        sources,
        &params(OutputFormat::Png, 64),
        &StandardDecoder,
        &StandardEncoder,
    )
    .unwrap();
    let names: Vec<String> = outcome.encoded.iter().map(|e| e.name.clone()).collect();
    assert_eq!(names, expected);
    assert!(outcome.failures.is_empty());
    assert!(outcome.encoded.iter().all(|e| e.height == 64));
}

#[test]
fn decode_failure_is_scoped_to_one_image() {
    let sources = vec![
        SourceImage {
            name: "good-1.png".into(),
            bytes: png(&matted(100, 80, 10, 1)),
        },
        SourceImage {
            name: "broken.png".into(),
            bytes: b"\x89PNG but not really".to_vec(),
        },
        SourceImage {
            name: "good-2.png".into(),
            bytes: png(&matted(100, 80, 10, 2)),
        },
    ];
    let outcome = process_batch(
        sources,
        &params(OutputFormat::Jpeg, 50),
        &StandardDecoder,
        &StandardEncoder,
    )
    .unwrap();
    let names: Vec<&str> = outcome.encoded.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["good-1.png", "good-2.png"]);
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].name, "broken.png");
    assert!(matches!(outcome.failures[0].error, Error::Decode(_)));
}

#[test]
fn invalid_params_reject_the_whole_batch() {
    let source = || SourceImage {
        name: "a.png".into(),
        bytes: png(&matted(60, 60, 10, 1)),
    };

    let mut bad_quality = params(OutputFormat::Jpeg, 40);
    bad_quality.quality = 7.5;
    let err = process_batch(vec![source()], &bad_quality, &StandardDecoder, &StandardEncoder)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { arg: "quality", .. }));

    let zero_height = params(OutputFormat::Png, 0);
    let err = process_batch(vec![source()], &zero_height, &StandardDecoder, &StandardEncoder)
        .unwrap_err();
    assert!(matches!(err, Error::ZeroSize { .. }));
}

#[test]
fn known_border_round_trip_through_codecs() {
    // 20px mat, 30px inset -> 140x80 interior; target 80 keeps it 1:1
    let bytes = png(&matted(200, 140, 20, 200));
    let encoded =
        trimpro::process_bytes("mat.png", bytes, &params(OutputFormat::Png, 80)).unwrap();
    assert_eq!((encoded.width, encoded.height), (140, 80));

    let back = StandardDecoder.decode(&encoded.bytes).unwrap();
    assert_eq!(back.dimensions(), (140, 80));
    assert_eq!(back.sample(0, 0).unwrap(), Color::new(200, 30, 30, 255));
}

#[test]
fn uniform_image_is_only_resized() {
    let flat = PixelBuffer::filled(400, 200, MAT).unwrap();
    let encoded =
        trimpro::process_bytes("flat.png", png(&flat), &params(OutputFormat::Png, 500)).unwrap();
    assert_eq!((encoded.width, encoded.height), (1000, 500));
}

#[test]
fn transparent_pixels_become_black_in_jpeg() {
    // already at the target height, so no resampler touches the alpha
    let clear = PixelBuffer::filled(40, 40, Color::new(255, 0, 0, 0)).unwrap();
    let encoded =
        trimpro::process_bytes("clear.png", png(&clear), &params(OutputFormat::Jpeg, 40)).unwrap();
    assert_eq!((encoded.width, encoded.height), (40, 40));
    let back = StandardDecoder.decode(&encoded.bytes).unwrap();
    assert!(back.sample(20, 20).unwrap().matches(Color::new(0, 0, 0, 255), Tolerance(4)));
}

#[test]
fn enhance_runs_before_resize() {
    let mut p = params(OutputFormat::Png, 160);
    p.enhance = true;
    // 100x60 interior -> 200x120 enhanced -> 267x160
    let encoded = trimpro::process_bytes("e.png", png(&matted(160, 120, 20, 9)), &p).unwrap();
    assert_eq!((encoded.width, encoded.height), (267, 160));
}

#[test]
fn directory_batch_writes_outputs_and_manifest() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();

    std::fs::write(input.path().join("a.png"), png(&matted(120, 90, 20, 3))).unwrap();
    std::fs::write(input.path().join("b.png"), png(&matted(90, 120, 20, 4))).unwrap();
    std::fs::write(input.path().join("c.png"), b"garbage").unwrap();
    std::fs::write(input.path().join("notes.txt"), b"not an image").unwrap();

    let report = process_directory_to_path(
        input.path(),
        output.path(),
        &params(OutputFormat::Jpeg, 100),
        true,
    )
    .unwrap();
    assert_eq!(report.processed, 2);
    assert_eq!(report.errors, 1);
    assert_eq!(report.skipped, 1);

    for name in ["a.jpg", "b.jpg"] {
        let bytes = std::fs::read(output.path().join(name)).unwrap();
        let img = StandardDecoder.decode(&bytes).unwrap();
        assert_eq!(img.height(), 100);
    }
    assert!(!output.path().join("c.jpg").exists());

    let manifest: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(output.path().join(MANIFEST_FILE_NAME)).unwrap(),
    )
    .unwrap();
    assert_eq!(manifest["outputs"][0]["source"], "a.png");
    assert_eq!(manifest["outputs"][1]["source"], "b.png");
    assert_eq!(manifest["failures"][0]["source"], "c.png");
}

#[test]
fn fail_fast_returns_first_error_and_writes_nothing() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    std::fs::write(input.path().join("a.png"), png(&matted(60, 60, 10, 1))).unwrap();
    std::fs::write(input.path().join("b.png"), b"garbage").unwrap();

    let out_dir = output.path().join("out");
    let err = process_directory_to_path(
        input.path(),
        &out_dir,
        &params(OutputFormat::Png, 40),
        false,
    )
    .unwrap_err();
    assert!(matches!(err, Error::Decode(_)));
    assert!(!out_dir.exists());
}

#[test]
fn failed_write_leaves_no_partial_outputs() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    std::fs::write(input.path().join("a.png"), png(&matted(60, 60, 10, 1))).unwrap();
    std::fs::write(input.path().join("b.png"), png(&matted(60, 60, 10, 2))).unwrap();
    // a directory squatting on the first output name makes its rename fail
    std::fs::create_dir(output.path().join("a.png")).unwrap();

    let err = process_directory_to_path(
        input.path(),
        output.path(),
        &params(OutputFormat::Png, 40),
        true,
    )
    .unwrap_err();
    assert!(matches!(err, Error::Io(_)));

    let left: Vec<String> = std::fs::read_dir(output.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(left, ["a.png"]);
}

#[test]
fn successful_batch_leaves_no_staging_files() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    std::fs::write(input.path().join("a.png"), png(&matted(60, 60, 10, 1))).unwrap();

    process_directory_to_path(
        input.path(),
        output.path(),
        &params(OutputFormat::Png, 40),
        true,
    )
    .unwrap();
    let mut left: Vec<String> = std::fs::read_dir(output.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    left.sort();
    assert_eq!(left, ["a.png", MANIFEST_FILE_NAME]);
}

#[test]
fn batch_is_capped_at_two_hundred() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let tiny = png(&PixelBuffer::filled(4, 4, MAT).unwrap());
    for i in 0..203 {
        std::fs::write(input.path().join(format!("{i:03}.png")), &tiny).unwrap();
    }
    let report = process_directory_to_path(
        input.path(),
        output.path(),
        &params(OutputFormat::Png, 4),
        true,
    )
    .unwrap();
    assert_eq!(report.processed, 200);
    assert_eq!(report.skipped, 3);
    assert!(output.path().join("199.png").exists());
    assert!(!output.path().join("200.png").exists());
}

#[test]
fn archive_contains_outputs_in_order() {
    let input = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    std::fs::write(input.path().join("b.png"), png(&matted(80, 80, 10, 5))).unwrap();
    std::fs::write(input.path().join("a.tiff"), {
        StandardEncoder
            .encode(&matted(80, 80, 10, 6), OutputFormat::Tiff, 1.0)
            .unwrap()
    })
    .unwrap();

    let archive_path = out.path().join("processed_images.tar.gz");
    let report = process_directory_to_archive(
        input.path(),
        &archive_path,
        &params(OutputFormat::Webp, 30),
        true,
    )
    .unwrap();
    assert_eq!(report.processed, 2);

    let bytes = std::fs::read(&archive_path).unwrap();
    let mut archive = tar::Archive::new(GzDecoder::new(bytes.as_slice()));
    let mut names = Vec::new();
    for entry in archive.entries().unwrap() {
        let mut entry = entry.unwrap();
        names.push(entry.path().unwrap().to_string_lossy().into_owned());
        let mut content = Vec::new();
        entry.read_to_end(&mut content).unwrap();
        assert!(!content.is_empty());
    }
    assert_eq!(names, ["a.webp", "b.webp", MANIFEST_FILE_NAME]);
}
