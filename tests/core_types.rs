use symmatch::{
    resize_u8_bilinear, DetectConfig, ImageView, RasterImage, SymMatchError, Template,
};

fn is_invalid_image<T>(result: Result<T, SymMatchError>) -> bool {
    matches!(result, Err(SymMatchError::InvalidImage { .. }))
}

#[test]
fn image_view_rejects_invalid_dimensions() {
    let data = [0u8; 4];
    assert!(is_invalid_image(ImageView::from_slice(&data, 0, 1)));
    assert!(is_invalid_image(ImageView::from_slice(&data, 1, 0)));
}

#[test]
fn image_view_rejects_invalid_stride_and_small_buffer() {
    let data = [0u8; 8];
    assert!(is_invalid_image(ImageView::new(&data, 4, 1, 3)));

    let data = [0u8; 3];
    let err = ImageView::new(&data, 2, 2, 2).err().unwrap();
    assert_eq!(
        err,
        SymMatchError::InvalidImage {
            reason: "buffer holds 3 samples, expected 4".to_string(),
        }
    );
}

#[test]
fn image_view_roi_matches_expected_values() {
    let data: Vec<u8> = (0u8..16).collect();
    let view = ImageView::from_slice(&data, 4, 4).unwrap();
    assert_eq!(view.stride(), 4);
    assert_eq!(view.as_slice(), data.as_slice());

    let roi = view.roi(1, 1, 2, 2).unwrap();
    assert_eq!(roi.width(), 2);
    assert_eq!(roi.height(), 2);
    assert_eq!(roi.stride(), 4);
    assert_eq!(roi.row(0).unwrap(), &[5u8, 6u8]);
    assert_eq!(roi.row(1).unwrap(), &[9u8, 10u8]);
    assert_eq!(roi.get(0, 0).copied(), Some(5u8));
    assert!(roi.get(2, 0).is_none());

    assert!(is_invalid_image(view.roi(3, 3, 2, 2)));
    assert!(is_invalid_image(view.roi(0, 0, 0, 2)));
}

#[test]
fn raster_requires_exact_buffer() {
    assert!(RasterImage::new(vec![0u8; 6], 3, 2).is_ok());
    assert!(is_invalid_image(RasterImage::new(vec![0u8; 5], 3, 2)));
    assert!(is_invalid_image(RasterImage::new(vec![0u8; 7], 3, 2)));
    assert!(is_invalid_image(RasterImage::new(Vec::new(), 0, 0)));
}

#[test]
fn raster_from_roi_copies_window() {
    let data: Vec<u8> = (0u8..20).collect();
    let view = ImageView::from_slice(&data, 5, 4).unwrap();
    let raster = RasterImage::from_view(view.roi(1, 2, 3, 2).unwrap()).unwrap();
    assert_eq!(raster.data(), &[11, 12, 13, 16, 17, 18]);
    assert_eq!(raster.at(2, 1), 18);
}

#[test]
fn template_exposes_name_and_base_name() {
    let tpl = Template::new("warning.triangle.png", vec![1u8; 12 * 12], 12, 12).unwrap();
    assert_eq!(tpl.name(), "warning.triangle.png");
    assert_eq!(tpl.base_name(), "warning");
    assert_eq!(tpl.view().width(), 12);
    assert!(is_invalid_image(Template::new("x", vec![0u8; 3], 2, 2)));
}

#[test]
fn resize_reports_invalid_target_size() {
    let raster = RasterImage::new(vec![9u8; 16], 4, 4).unwrap();
    assert!(is_invalid_image(resize_u8_bilinear(raster.view(), 4, 0)));
    let up = resize_u8_bilinear(raster.view(), 9, 5).unwrap();
    assert_eq!((up.width(), up.height()), (9, 5));
}

#[test]
fn default_config_matches_documented_values() {
    let cfg = DetectConfig::default();
    assert_eq!(cfg.min_scale, 0.1);
    assert_eq!(cfg.max_scale, 1.0);
    assert_eq!(cfg.scale_steps, 20);
    assert_eq!(cfg.match_threshold, 0.5);
    assert_eq!(cfg.iou_threshold, 0.3);
    assert!(cfg.validate().is_ok());
}

#[test]
fn config_validation_rejects_out_of_range_values() {
    let bad = [
        DetectConfig {
            scale_steps: 0,
            ..DetectConfig::default()
        },
        DetectConfig {
            min_scale: 0.9,
            max_scale: 0.5,
            ..DetectConfig::default()
        },
        DetectConfig {
            min_scale: 0.0,
            ..DetectConfig::default()
        },
        DetectConfig {
            max_scale: f32::NAN,
            ..DetectConfig::default()
        },
        DetectConfig {
            match_threshold: 1.5,
            ..DetectConfig::default()
        },
        DetectConfig {
            iou_threshold: -0.1,
            ..DetectConfig::default()
        },
        DetectConfig {
            min_var_i: -1.0,
            ..DetectConfig::default()
        },
    ];
    for cfg in bad {
        assert!(
            matches!(cfg.validate(), Err(SymMatchError::InvalidConfig { .. })),
            "expected rejection for {cfg:?}"
        );
    }
}
