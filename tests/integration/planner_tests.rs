//! Tile planner integration tests.
//!
//! Tests verify:
//! - Grid counts and row-major ordering on realistic slide ROIs
//! - Tiles cover every ROI and start on its top-left corner
//! - Mixed rectangle and shape ROIs plan in input order
//! - Slide info JSON round-trips into a usable plan

use wsi_tiler::coords::{
    normalized_point_to_microns, pixel_width_to_microns, MicronPoint, NativeResolution,
    NormalizedPoint, SlideFrame,
};
use wsi_tiler::slide::SlideInfo;
use wsi_tiler::tile::{
    batch_count, plan_tiles, rois_or_whole_slide, BoundingRect, Roi, ShapeKind, TileBatches,
};

#[test]
fn test_plan_covers_every_roi() {
    let resolution = NativeResolution::new(0.2527, 0.2527).unwrap();
    let (tile_w, tile_h) = pixel_width_to_microns(512, &resolution);

    let rois = vec![
        Roi::rectangle(12_000.0, 8_000.0, 1_500.0, 700.0),
        Roi::shape(
            ShapeKind::Ellipse,
            vec![
                MicronPoint::new(30_000.0, 5_000.0),
                MicronPoint::new(30_400.0, 5_250.0),
            ],
        ),
    ];
    let tiles = plan_tiles(&rois, tile_w, tile_h).unwrap();

    for (index, roi) in rois.iter().enumerate() {
        let rect = roi.bounding_rect();
        let roi_tiles: Vec<_> = tiles.iter().filter(|t| t.roi_index == index).collect();
        let cols = (rect.width / tile_w).ceil() as usize;
        let rows = (rect.height / tile_h).ceil() as usize;
        assert_eq!(roi_tiles.len(), cols * rows);

        assert_eq!(roi_tiles[0].top_left, rect.top_left());

        // The union of tiles reaches past the bottom-right corner
        let last = roi_tiles[roi_tiles.len() - 1];
        assert!(last.bottom_right.x >= rect.x + rect.width);
        assert!(last.bottom_right.y >= rect.y + rect.height);

        for tile in &roi_tiles {
            assert!((tile.width() - tile_w).abs() < 1e-9);
            assert!((tile.height() - tile_h).abs() < 1e-9);
        }
    }

    // ROI tiles are contiguous and in input order
    let indices: Vec<usize> = tiles.iter().map(|t| t.roi_index).collect();
    let mut sorted = indices.clone();
    sorted.sort_unstable();
    assert_eq!(indices, sorted);
}

#[test]
fn test_plan_is_row_major() {
    let rois = vec![Roi::rectangle(0.0, 0.0, 250.0, 250.0)];
    let tiles = plan_tiles(&rois, 100.0, 100.0).unwrap();

    assert_eq!(tiles.len(), 9);
    for pair in tiles.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        let a_key = (a.row, a.col);
        let b_key = (b.row, b.col);
        assert!(a_key < b_key);
        if a.row == b.row {
            assert!(b.top_left.x > a.top_left.x);
        } else {
            assert!(b.top_left.y > a.top_left.y);
        }
    }
}

#[test]
fn test_plan_normalized_window() {
    // A window picked in normalized coordinates, tiled at 2 um tiles
    let frame = SlideFrame::new(-500.0, 1000.0, 40_000.0, 20_000.0).unwrap();
    let top_left = normalized_point_to_microns(&frame, NormalizedPoint::new(0.25, 0.5));
    let rois = vec![Roi::rectangle(top_left.x, top_left.y, 5.0, 3.0)];

    let tiles = plan_tiles(&rois, 2.0, 2.0).unwrap();
    assert_eq!(tiles.len(), 3 * 2);
    assert_eq!(tiles[0].top_left, MicronPoint::new(9_500.0, 11_000.0));
}

#[test]
fn test_whole_slide_plan_and_batches() {
    let frame = SlideFrame::new(0.0, 0.0, 1000.0, 640.0).unwrap();
    let rois = rois_or_whole_slide(Vec::new(), &frame);
    let tiles = plan_tiles(&rois, 100.0, 100.0).unwrap();
    assert_eq!(tiles.len(), 10 * 7);

    assert_eq!(batch_count(tiles.len(), 32).unwrap(), 3);
    let sizes: Vec<usize> = TileBatches::new(&tiles, 32)
        .unwrap()
        .map(|b| b.tiles.len())
        .collect();
    assert_eq!(sizes, vec![32, 32, 6]);
}

#[test]
fn test_slide_info_json_to_plan() {
    let json = r#"{
        "frame": {"x": 0.0, "y": 0.0, "width": 50000.0, "height": 30000.0},
        "native_resolution": {"width": 0.5, "height": 0.5},
        "rois": [
            {"type": "rectangle", "x": 100.0, "y": 100.0, "width": 224.0, "height": 112.0},
            {"type": "bounded_shape", "kind": "Polygon", "points": [
                {"x": 1000.0, "y": 1000.0},
                {"x": 1100.0, "y": 1050.0},
                {"x": 1020.0, "y": 1200.0}
            ]}
        ]
    }"#;

    let slide: SlideInfo = serde_json::from_str(json).unwrap();
    slide.validate().unwrap();

    let (tile_w, tile_h) = pixel_width_to_microns(224, &slide.native_resolution);
    let tiles = plan_tiles(&slide.rois, tile_w, tile_h).unwrap();

    // 2x1 for the rectangle, 1x2 for the polygon's 100x200 bounding box
    assert_eq!(tiles.len(), 4);
    assert_eq!(tiles.iter().filter(|t| t.roi_index == 1).count(), 2);
    assert_eq!(tiles[2].top_left, MicronPoint::new(1000.0, 1000.0));
}
