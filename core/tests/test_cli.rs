// core/tests/test_cli.rs
use std::fs;

use clap::Parser;
use image::{DynamicImage, Rgb as Px, RgbImage};
use marinelayer_core::cli::{run_with_source, Args};
use marinelayer_core::{FileProfilerSource, StaticProfilerSource};

/// 140x10 bilde: bakgrunn grå, kolonne 135..140 blå i rad 4–7.
fn profiler_image() -> DynamicImage {
    let mut img = RgbImage::from_pixel(140, 10, Px([120, 120, 120]));
    for y in 4..8 {
        for x in 135..140 {
            img.put_pixel(x, y, Px([0, 0, 200]));
        }
    }
    DynamicImage::ImageRgb8(img)
}

fn run_to_string(args: &Args, image: DynamicImage) -> (String, Option<i64>) {
    let cfg = args.resolve_config().expect("config");
    let source = StaticProfilerSource { image };
    let mut out = Vec::new();
    let d = run_with_source(args, &cfg, &source, &mut out).expect("run");
    (String::from_utf8(out).unwrap(), d.altitude_ft())
}

#[test]
fn prints_bare_altitude() {
    let args = Args::parse_from(["marinelayer", "--strict"]);
    let (out, alt) = run_to_string(&args, profiler_image());
    assert_eq!(alt, Some(2777));
    assert_eq!(out, "2777\n");
}

#[test]
fn prints_nothing_when_not_detected() {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(140, 10, Px([120, 120, 120])));
    let args = Args::parse_from(["marinelayer"]);
    let (out, alt) = run_to_string(&args, img);
    assert_eq!(alt, None);
    assert!(out.is_empty());
}

#[test]
fn verbose_lists_rows_and_result() {
    let args = Args::parse_from(["marinelayer", "-v", "--required-nonmarine", "1"]);
    let (out, _) = run_to_string(&args, profiler_image());
    assert!(out.contains("    0 ft: (120, 120, 120) => other"), "{out}");
    assert!(out.contains(" ft: (0, 0, 200) => marine"));
    assert!(out.trim_end().ends_with("Detected marine layer top at 2777 ft"));
}

#[test]
fn offset_outside_image_is_an_error() {
    let args = Args::parse_from(["marinelayer", "--offset", "136"]);
    let cfg = args.resolve_config().unwrap();
    let source = StaticProfilerSource { image: profiler_image() };
    let err = run_with_source(&args, &cfg, &source, &mut Vec::new()).unwrap_err();
    assert!(err.to_string().contains("extraction error"), "{err}");
}

#[test]
fn file_source_with_csv_and_png() {
    let img_path = "tests/tmp_cli_profiler.png";
    let csv_path = "tests/tmp_cli_rows.csv";
    let png_path = "tests/tmp_cli_column.png";
    profiler_image().save(img_path).expect("save fixture");

    let args = Args::parse_from([
        "marinelayer", "--image", img_path, "--strict", "--csv", csv_path, "--column-png", png_path,
    ]);
    let cfg = args.resolve_config().unwrap();
    let source = FileProfilerSource::new(img_path);
    let mut out = Vec::new();
    let d = run_with_source(&args, &cfg, &source, &mut out).unwrap();
    assert_eq!(d.altitude_ft(), Some(2777));

    let csv = fs::read_to_string(csv_path).unwrap();
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("row,altitude_ft,r,g,b,label"));
    assert_eq!(lines.next(), Some("9,0,120,120,120,other"));
    // rad 9..3 skannet
    assert_eq!(csv.lines().count(), 1 + 7);

    let strip = image::open(png_path).unwrap();
    assert_eq!((strip.width(), strip.height()), (5, 10));

    for p in [img_path, csv_path, png_path] {
        let _ = fs::remove_file(p);
    }
}

#[test]
fn json_report() {
    let args = Args::parse_from(["marinelayer", "--json"]);
    let (out, _) = run_to_string(&args, profiler_image());
    let v: serde_json::Value = serde_json::from_str(&out).unwrap();
    // debounced(3): rad 3 er eneste grå rad under 3500 ft -> fallback på rad 4
    assert_eq!(v["marine_layer_top_ft"], 2777);
    assert_eq!(v["top"]["kind"], "fallback");
    assert_eq!(v["source"], "static");
    assert!(v.get("rows").is_none());
}
