/*
 *  tests/viewer_integration.rs
 *
 *  End to end: heap log text through replay and render to PNG
 *
 *  HeapLogViewer - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 */

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

use heaplog_viewer::display::color::DEFAULT_PALETTE;
use heaplog_viewer::display::drivers::MockSurface;
use heaplog_viewer::display::export::encode_png;
use heaplog_viewer::display::{FrameCanvas, SurfaceRegistry, DEFAULT_SURFACE_ID};
use heaplog_viewer::{
    nearest_highest_power_of_2, scale_for_max_value, HeapLayout, HeapLog, HeapState, HeapViewer,
};

const HELLO_LOG: &str = r#"{"log":[
{"type":"log","p1":"0", "p2":"info", "p3":"main.cpp:12", "p4":"hello heap", "p5":" - " },
{"type":"mem","p1":"", "p2":"0", "p3":"add", "p4":"1000", "p5":"100" },
{"type":"mem","p1":"", "p2":"1", "p3":"add", "p4":"1100", "p5":"100" },
{"type":"mem","p1":"1", "p2":"0", "p3":"del", "p4":"1000", "p5":"100" }
]}
"#;

fn render_hello() -> (heaplog_viewer::RenderSummary, FrameCanvas) {
    let log = HeapLog::parse(HELLO_LOG).unwrap();
    let heap = HeapState::replay(log.alloc_events());
    let viewer = HeapViewer::default();

    let mut surfaces = SurfaceRegistry::new();
    surfaces.insert(DEFAULT_SURFACE_ID, viewer.frame_canvas(Rgb888::WHITE));
    let summary = viewer.render(&mut surfaces, DEFAULT_SURFACE_ID, &heap);
    (summary, surfaces.remove(DEFAULT_SURFACE_ID).unwrap())
}

#[test]
fn test_hello_log_renders_live_block() {
    let (summary, canvas) = render_hello();
    assert_eq!(summary.scale, 1);
    assert_eq!(summary.blocks, 1);
    assert_eq!(summary.clipped, 0);

    let fb = canvas.target();
    assert_eq!((fb.width(), fb.height()), (1024, 320));
    // canvas outline, then the box for allocator 1 at offset 100
    assert_eq!(fb.pixel(0, 0), Some(Rgb888::BLACK));
    assert_eq!(fb.pixel(50, 5), Some(Rgb888::WHITE));
    assert_eq!(fb.pixel(150, 5), Some(DEFAULT_PALETTE[1]));
    assert_eq!(fb.pixel(100, 0), Some(Rgb888::BLACK));
    assert_eq!(fb.pixel(150, 15), Some(Rgb888::WHITE));
    assert_eq!(fb.count(DEFAULT_PALETTE[0]), 0);
}

#[test]
fn test_hello_log_png() {
    let (_, canvas) = render_hello();
    let png = encode_png(canvas.target()).unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn test_missing_surface_is_silent() {
    let log = HeapLog::parse(HELLO_LOG).unwrap();
    let heap = HeapState::replay(log.alloc_events());
    let viewer = HeapViewer::default();

    let mut surfaces = SurfaceRegistry::new();
    surfaces.insert("detached", MockSurface::detached(1024, 320));
    surfaces.insert(DEFAULT_SURFACE_ID, MockSurface::new(1024, 320));

    viewer.render(&mut surfaces, "detached", &heap);
    viewer.render(&mut surfaces, "nowhere", &heap);
    assert!(surfaces.get(DEFAULT_SURFACE_ID).unwrap().ops().is_empty());
}

#[test]
fn test_scale_properties() {
    assert_eq!(scale_for_max_value(32_768 * 65_536), 131_072);
    assert_eq!(scale_for_max_value(32_768 * 32_768), 4_800);
    assert_eq!(scale_for_max_value(0), 1);
}

#[test]
fn test_pow2_properties() {
    assert_eq!(nearest_highest_power_of_2(0), 1);
    assert_eq!(nearest_highest_power_of_2(2_147_483_649), 4_294_967_296);
    assert_eq!(nearest_highest_power_of_2(3_000_000_000), 4_294_967_296);
    for x in [1u64, 3, 1000, 65_537, 2_147_483_648] {
        let p = nearest_highest_power_of_2(x);
        assert!(p.is_power_of_two() && p >= x && p / 2 < x);
    }
}

#[test]
fn test_big_heap_fits_default_grid() {
    // 64 MiB span picks 4096 bytes/pixel, 16 full rows
    let text = r#"{"log":[
{"type":"mem","p1":"", "p2":"0", "p3":"add", "p4":"0", "p5":"67108864" }
]}"#;
    let heap = HeapState::replay(HeapLog::parse(text).unwrap().alloc_events());
    let viewer = HeapViewer::new(HeapLayout::default(), Default::default());
    assert_eq!(viewer.scale_for(&heap), 4_096);

    let mut surfaces = SurfaceRegistry::new();
    surfaces.insert(DEFAULT_SURFACE_ID, MockSurface::new(1024, 320));
    let summary = viewer.render(&mut surfaces, DEFAULT_SURFACE_ID, &heap);
    assert_eq!(summary.boxes, 16);
    assert_eq!(summary.clipped, 0);
}
