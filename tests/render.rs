// End-to-end renders: PNG files written under target/test_out/ and decoded
// back with `image`.

use scan_bench_charts::{BarChartRenderer, ChartConfig, RenderError, Series};
use std::path::PathBuf;

fn out_path(name: &str) -> PathBuf {
    let dir = PathBuf::from("target/test_out/render");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    let _ = std::fs::remove_file(&path);
    path
}

fn two_bars() -> Series {
    Series::from_columns(&["A", "B"], &[0.019144, 0.0174948], &["blue", "red"]).unwrap()
}

fn timing_config(output_path: PathBuf) -> ChartConfig {
    ChartConfig {
        title: "Execution Time".to_string(),
        x_axis_label: "Variant".to_string(),
        y_axis_label: "Time (s)".to_string(),
        y_min: 0.015,
        y_max: 0.020,
        y_ticks: vec![0.015, 0.016, 0.017, 0.018, 0.019, 0.020],
        figure_width: 5.0,
        figure_height: 3.0,
        bar_width: 0.6,
        dpi: 150,
        output_path,
        ..Default::default()
    }
}

fn has_pixel(img: &image::RgbImage, rgb: [u8; 3]) -> bool {
    img.pixels().any(|p| p.0 == rgb)
}

#[test]
fn render_writes_png_with_colored_bars() {
    let path = out_path("two_bars.png");
    BarChartRenderer::render(&two_bars(), &timing_config(path.clone())).expect("render");

    let meta = std::fs::metadata(&path).expect("output exists");
    assert!(meta.len() > 0, "png should be non-empty");

    let img = image::open(&path).expect("decodable png").to_rgb8();
    assert_eq!(img.dimensions(), (750, 450));
    assert!(has_pixel(&img, [0, 0, 255]), "blue bar missing");
    assert!(has_pixel(&img, [255, 0, 0]), "red bar missing");
    assert!(has_pixel(&img, [255, 255, 255]), "background missing");
}

#[test]
fn render_to_bytes_returns_png() {
    let bytes = BarChartRenderer::render_to_bytes(&two_bars(), &timing_config(out_path("unused.png")))
        .expect("render bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");
}

#[test]
fn empty_series_is_invalid_and_writes_nothing() {
    let path = out_path("empty.png");
    let err = BarChartRenderer::render(&Series::default(), &timing_config(path.clone())).unwrap_err();
    assert!(matches!(err, RenderError::InvalidConfig(_)));
    assert!(!path.exists());
}

#[test]
fn inverted_y_range_is_invalid() {
    let path = out_path("inverted.png");
    let config = ChartConfig {
        y_min: 0.020,
        y_max: 0.015,
        ..timing_config(path.clone())
    };
    let err = BarChartRenderer::render(&two_bars(), &config).unwrap_err();
    assert!(matches!(err, RenderError::InvalidConfig(_)));
    assert!(!path.exists());
}

#[test]
fn unwritable_path_is_io_failure() {
    let path = PathBuf::from("target/test_out/render/no_such_dir/chart.png");
    let _ = std::fs::remove_dir_all(path.parent().unwrap());
    let err = BarChartRenderer::render(&two_bars(), &timing_config(path.clone())).unwrap_err();
    match err {
        RenderError::IoFailure { path: failed, .. } => assert_eq!(failed, path),
        other => panic!("expected IoFailure, got {other:?}"),
    }
}

#[test]
fn distinct_output_paths_give_independent_files() {
    let first = out_path("copy_a.png");
    let second = out_path("copy_b.png");
    let series = two_bars();

    BarChartRenderer::render(&series, &timing_config(first.clone())).unwrap();
    BarChartRenderer::render(&series, &timing_config(second.clone())).unwrap();

    let a = std::fs::read(&first).unwrap();
    let b = std::fs::read(&second).unwrap();
    assert!(!a.is_empty());
    assert_eq!(a, b, "identical inputs should render identically");
}

#[test]
fn png_records_configured_dpi() {
    for dpi in [100, 150] {
        let config = ChartConfig {
            dpi,
            ..timing_config(out_path("dpi.png"))
        };
        let bytes = BarChartRenderer::render_to_bytes(&two_bars(), &config).expect("render bytes");

        let reader = png::Decoder::new(std::io::Cursor::new(bytes))
            .read_info()
            .expect("png header");
        let dims = reader.info().pixel_dims.expect("pHYs chunk");
        let expected = (dpi as f64 / 0.0254).round() as u32;
        assert_eq!(dims.unit, png::Unit::Meter);
        assert_eq!((dims.xppu, dims.yppu), (expected, expected));
    }
}

#[test]
fn oversized_figure_is_invalid_not_a_panic() {
    let config = ChartConfig {
        figure_width: 1e10,
        figure_height: 1e10,
        ..timing_config(out_path("huge.png"))
    };
    let err = BarChartRenderer::render_to_bytes(&two_bars(), &config).unwrap_err();
    assert!(matches!(err, RenderError::InvalidConfig(_)));
}
