#![cfg(feature = "rayon")]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use symmatch::{
    match_template, match_template_par, resize_u8_bilinear, CancelToken, DetectConfig,
    ImageView, SymMatchError, SymbolDetector, Template,
};
use std::thread;
use std::time::Duration;

fn make_template(width: usize, height: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let value = ((x * 11) ^ (y * 3) ^ (x * y)) & 0xFF;
            data.push(value as u8);
        }
    }
    data
}

#[test]
fn parallel_score_map_matches_sequential() {
    let mut rng = StdRng::seed_from_u64(31);
    let image: Vec<u8> = (0..90 * 70).map(|_| rng.random_range(0..=255)).collect();
    let tpl = make_template(17, 13);
    let image_view = ImageView::from_slice(&image, 90, 70).unwrap();
    let tpl_view = ImageView::from_slice(&tpl, 17, 13).unwrap();

    let seq = match_template(image_view, tpl_view).unwrap();
    let par = match_template_par(image_view, tpl_view).unwrap();
    assert_eq!(seq, par);
}

#[test]
fn parallel_detection_matches_sequential() {
    let a = Template::new("a.png", make_template(36, 30), 36, 30).unwrap();
    let b = Template::new("b.jpg", make_template(22, 40), 22, 40).unwrap();

    let mut rng = StdRng::seed_from_u64(32);
    let (img_w, img_h) = (160, 120);
    let mut image: Vec<u8> = (0..img_w * img_h)
        .map(|_| rng.random_range(0..=60))
        .collect();
    let small_a = resize_u8_bilinear(a.view(), 27, 22).unwrap();
    for y in 0..small_a.height() {
        for x in 0..small_a.width() {
            image[(40 + y) * img_w + 20 + x] = small_a.at(x, y);
        }
    }
    for y in 0..40 {
        for x in 0..22 {
            image[(60 + y) * img_w + 110 + x] = b.raster().at(x, y);
        }
    }
    let view = ImageView::from_slice(&image, img_w, img_h).unwrap();

    let base_cfg = DetectConfig {
        min_scale: 0.5,
        max_scale: 1.0,
        scale_steps: 5,
        match_threshold: 0.4,
        ..DetectConfig::default()
    };
    let seq = SymbolDetector::new(vec![a.clone(), b.clone()])
        .with_config(DetectConfig {
            parallel: false,
            ..base_cfg.clone()
        })
        .detect_report(view)
        .unwrap();
    let par = SymbolDetector::new(vec![a, b])
        .with_config(DetectConfig {
            parallel: true,
            ..base_cfg
        })
        .detect_report(view)
        .unwrap();

    assert_eq!(seq, par);
    assert!(seq.symbols.contains("a"));
    assert!(seq.symbols.contains("b"));
}

#[test]
fn parallel_sweep_observes_cancel_raised_mid_run() {
    let a = Template::new("a.png", make_template(48, 48), 48, 48).unwrap();
    let b = Template::new("b.png", make_template(40, 56), 40, 56).unwrap();

    let mut rng = StdRng::seed_from_u64(33);
    let (img_w, img_h) = (240, 240);
    let image: Vec<u8> = (0..img_w * img_h).map(|_| rng.random_range(0..=255)).collect();
    let view = ImageView::from_slice(&image, img_w, img_h).unwrap();

    let detector = SymbolDetector::new(vec![a, b]).with_config(DetectConfig {
        min_scale: 0.5,
        max_scale: 1.0,
        scale_steps: 400,
        parallel: true,
        ..DetectConfig::default()
    });
    let token = CancelToken::new();

    let result = thread::scope(|scope| {
        let run = scope.spawn(|| detector.detect_with_cancel(view, &token));
        thread::sleep(Duration::from_millis(50));
        token.cancel();
        run.join().unwrap()
    });
    assert_eq!(result.unwrap_err(), SymMatchError::Cancelled);
}
