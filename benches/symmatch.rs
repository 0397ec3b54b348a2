use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use symmatch::lowlevel::suppress;
use symmatch::{match_template, DetectConfig, Detection, ImageView, SymbolDetector, Template};

fn make_image(width: usize, height: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let value = ((x * 13) ^ (y * 7) ^ (x * y)) & 0xFF;
            data.push(value as u8);
        }
    }
    data
}

fn extract_patch(
    image: &[u8],
    img_width: usize,
    x0: usize,
    y0: usize,
    width: usize,
    height: usize,
) -> Vec<u8> {
    let mut out = Vec::with_capacity(width * height);
    for y in 0..height {
        let row = (y0 + y) * img_width;
        for x in 0..width {
            out.push(image[row + x0 + x]);
        }
    }
    out
}

fn bench_match_template(c: &mut Criterion) {
    let (img_width, img_height) = (256, 256);
    let image = make_image(img_width, img_height);
    let image_view = ImageView::from_slice(&image, img_width, img_height).unwrap();
    let tpl = extract_patch(&image, img_width, 60, 80, 32, 32);
    let tpl_view = ImageView::from_slice(&tpl, 32, 32).unwrap();

    c.bench_function("match_template_256_32", |b| {
        b.iter(|| match_template(black_box(image_view), black_box(tpl_view)).unwrap())
    });
}

fn bench_detector(c: &mut Criterion) {
    let (img_width, img_height) = (320, 240);
    let image = make_image(img_width, img_height);
    let image_view = ImageView::from_slice(&image, img_width, img_height).unwrap();
    let templates = vec![
        Template::new(
            "a.png",
            extract_patch(&image, img_width, 40, 40, 48, 48),
            48,
            48,
        )
        .unwrap(),
        Template::new(
            "b.png",
            extract_patch(&image, img_width, 200, 120, 40, 32),
            40,
            32,
        )
        .unwrap(),
    ];

    let sequential = SymbolDetector::new(templates.clone()).with_config(DetectConfig {
        min_scale: 0.5,
        max_scale: 1.0,
        scale_steps: 6,
        ..DetectConfig::default()
    });
    c.bench_function("detect_2tpl_6scales_seq", |b| {
        b.iter(|| sequential.detect(black_box(image_view)).unwrap())
    });

    let parallel = SymbolDetector::new(templates).with_config(DetectConfig {
        min_scale: 0.5,
        max_scale: 1.0,
        scale_steps: 6,
        parallel: true,
        ..DetectConfig::default()
    });
    c.bench_function("detect_2tpl_6scales_par", |b| {
        b.iter(|| parallel.detect(black_box(image_view)).unwrap())
    });
}

fn bench_suppress(c: &mut Criterion) {
    let candidates: Vec<Detection> = (0..2000)
        .map(|i| Detection {
            x: (i * 37) % 500,
            y: (i * 91) % 400,
            width: 20 + i % 15,
            height: 20 + i % 11,
            score: 0.5 + ((i * 7919) % 500) as f32 / 1000.0,
            symbol: format!("s{}.png", i % 5),
            scale: 1.0,
        })
        .collect();

    c.bench_function("suppress_2000", |b| {
        b.iter(|| suppress(black_box(candidates.clone()), 0.3))
    });
}

criterion_group!(benches, bench_match_template, bench_detector, bench_suppress);
criterion_main!(benches);
