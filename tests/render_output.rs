use std::fs;
use std::path::Path;

use image::{GenericImageView, Rgb};
use ogpaint::{
    presets, render, Background, BatchConfig, Color, FontFace, ImageRequest, PresetStyle,
    Renderer, TextLayer,
};
use tempfile::tempdir;

const NAVY: Color = Color::rgb(0, 0, 128);

fn guide_request(output: &Path) -> ImageRequest {
    ImageRequest::new(Background::Solid(NAVY), output)
        .layer(TextLayer::centered("Guide", 70.0, Color::WHITE, 200))
        .layer(TextLayer::centered("Quick Start", 40.0, Color::WHITE, 320))
}

/// Rows containing non-background pixels, grouped into contiguous bands,
/// each reported as (y0, y1, x0, x1).
fn ink_bands(img: &image::RgbImage, background: Rgb<u8>) -> Vec<(u32, u32, u32, u32)> {
    let mut bands = Vec::new();
    let mut current: Option<(u32, u32, u32, u32)> = None;
    for y in 0..img.height() {
        let mut cols = (0..img.width()).filter(|&x| *img.get_pixel(x, y) != background);
        let Some(first) = cols.next() else {
            if let Some(band) = current.take() {
                bands.push(band);
            }
            continue;
        };
        let last = cols.last().unwrap_or(first);
        current = Some(match current {
            Some((y0, _, x0, x1)) => (y0, y, x0.min(first), x1.max(last)),
            None => (y, y, first, last),
        });
    }
    if let Some(band) = current {
        bands.push(band);
    }
    bands
}

#[test]
fn guide_scenario_produces_two_centered_regions() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("out")).unwrap();
    let output = dir.path().join("out/test.png");
    let request = guide_request(&output);

    let written = render(&request).unwrap();
    assert_eq!(written, output);

    let img = image::open(&output).unwrap().to_rgb8();
    assert_eq!(img.dimensions(), (1200, 630));

    let bands = ink_bands(&img, NAVY.to_rgb());
    assert_eq!(bands.len(), 2, "bands: {:?}", bands);
    let (title, subtitle) = (bands[0], bands[1]);
    assert!(title.1 < subtitle.0, "regions overlap: {:?} {:?}", title, subtitle);
    for (_, _, x0, x1) in bands {
        let left = x0 as i32;
        let right = 1200 - (x1 as i32 + 1);
        assert!((left - right).abs() <= 2, "not centered: {} vs {}", left, right);
    }
}

#[test]
fn layout_reports_non_overlapping_layers() {
    let request = guide_request(Path::new("unused.png"));
    let renderer = Renderer::for_request(&request);
    let (_, placed) = renderer.rasterize_with_layout(&request);
    assert_eq!(placed.len(), 2);
    assert!(!placed[0].ink.intersects(&placed[1].ink));
}

#[test]
fn unreadable_font_still_renders() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("fallback.png");
    let request = guide_request(&output).with_font(dir.path().join("no-such-font.ttf"));

    render(&request).unwrap();
    let img = image::open(&output).unwrap();
    assert_eq!(img.dimensions(), (1200, 630));
    assert!(img.to_rgb8().pixels().any(|p| *p != NAVY.to_rgb()));
}

#[test]
fn sentinel_face_output_is_valid() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("sentinel.png");
    let request = guide_request(&output);

    Renderer::with_face(FontFace::Fallback).render(&request).unwrap();
    let img = image::open(&output).unwrap().to_rgb8();
    assert_eq!(img.dimensions(), (1200, 630));
    assert_eq!(ink_bands(&img, NAVY.to_rgb()).len(), 2);
}

#[test]
fn rerender_overwrites_with_identical_bytes() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("og.png");
    fs::write(&output, b"stale").unwrap();

    let background = Background::VerticalGradient {
        start: Color::rgb(30, 100, 200),
        end: Color::rgb(60, 150, 150),
    };
    let request = ImageRequest::new(background, &output)
        .layer(TextLayer::centered("Guide", 70.0, Color::WHITE, 200));
    let renderer = Renderer::for_request(&request);

    renderer.render(&request).unwrap();
    let first = fs::read(&output).unwrap();
    renderer.render(&request).unwrap();
    let second = fs::read(&output).unwrap();

    assert_ne!(first, b"stale".to_vec());
    assert_eq!(first, second);
}

#[test]
fn gradient_endpoints_survive_encoding() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("gradient.png");
    let start = Color::rgb(138, 43, 226);
    let end = Color::rgb(88, 23, 146);
    render(&ImageRequest::new(Background::VerticalGradient { start, end }, &output)).unwrap();

    let img = image::open(&output).unwrap().to_rgb8();
    assert_eq!(*img.get_pixel(0, 0), start.to_rgb());
    let last = img.get_pixel(1199, 629);
    for i in 0..3 {
        assert!((last.0[i] as i32 - end.0[i] as i32).abs() <= 1, "{:?}", last);
    }
}

#[test]
fn every_preset_is_og_sized() {
    let dir = tempdir().unwrap();
    for style in [PresetStyle::Gradient, PresetStyle::Solid] {
        let mut batch = presets::requests(style);
        presets::customize(&mut batch, Some(dir.path()), None);
        for request in &batch {
            let path = render(request).unwrap();
            assert!(path.starts_with(dir.path()));
            assert_eq!(image::image_dimensions(&path).unwrap(), (1200, 630));
        }
    }
}

#[test]
fn batch_file_renders_in_order() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("batch.toml");
    fs::write(
        &config_path,
        format!(
            r##"
            [[image]]
            output = '{first}'
            background = {{ solid = "#000080" }}

            [[image]]
            output = '{second}'
            background = {{ solid = "#4B0082" }}
            canvas = {{ width = 600, height = 315 }}
            "##,
            first = dir.path().join("a.png").display(),
            second = dir.path().join("b.png").display(),
        ),
    )
    .unwrap();

    let batch = BatchConfig::load(&config_path).unwrap();
    for request in &batch.requests {
        render(request).unwrap();
    }
    assert_eq!(image::image_dimensions(dir.path().join("a.png")).unwrap(), (1200, 630));
    assert_eq!(image::image_dimensions(dir.path().join("b.png")).unwrap(), (600, 315));
}
