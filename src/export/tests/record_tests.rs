//! Tests for the normalized record format.

use super::add_image;
use crate::canvas::CanvasEngine;
use crate::config::ExportSettings;
use crate::export::{ExportOptions, export_dataset, format_record};
use crate::geometry::{Point, Rect};
use crate::store::AnnotationStore;
use crate::transform::compute_display_rect;

#[test]
fn test_format_record() {
    let line = format_record(0, &Rect::new(100.0, 50.0, 300.0, 250.0), 800.0, 600.0);
    assert_eq!(line, "0 0.25 0.25 0.25 0.3333333333333333\n");
}

#[test]
fn test_export_single_box() {
    let mut store = AnnotationStore::new();
    let cat = store.add_label("cat");
    add_image(
        &mut store,
        "photo001.jpg",
        (800, 600),
        &[(Some(cat), Rect::new(100.0, 50.0, 300.0, 250.0))],
    );

    let result = export_dataset(&store, &ExportOptions::default());

    assert_eq!(result.files.len(), 2);
    assert_eq!(result.files[0].name, "labels.txt");
    assert_eq!(result.files[0].contents, "0 cat");
    let file = result.file("photo001.txt").unwrap();
    assert_eq!(file.contents, "0 0.25 0.25 0.25 0.3333333333333333\n");
    assert_eq!(result.images_exported, 1);
    assert_eq!(result.annotations_exported, 1);
    assert!(result.warnings.is_empty());
}

#[test]
fn test_labels_file_always_present() {
    let mut store = AnnotationStore::new();
    store.add_label("person");
    store.add_label("car");

    let result = export_dataset(&store, &ExportOptions::default());
    assert_eq!(result.files.len(), 1);
    assert_eq!(result.files[0].contents, "0 person\n1 car");

    let empty = export_dataset(&AnnotationStore::new(), &ExportOptions::default());
    assert_eq!(empty.files.len(), 1);
    assert_eq!(empty.files[0].contents, "");
}

#[test]
fn test_unlabeled_boxes_are_skipped() {
    let mut store = AnnotationStore::new();
    let cat = store.add_label("cat");
    add_image(
        &mut store,
        "only_unlabeled.png",
        (100, 100),
        &[(None, Rect::new(0.0, 0.0, 10.0, 10.0))],
    );
    add_image(
        &mut store,
        "mixed.png",
        (100, 100),
        &[
            (None, Rect::new(0.0, 0.0, 10.0, 10.0)),
            (Some(cat), Rect::new(0.0, 0.0, 50.0, 100.0)),
        ],
    );

    let result = export_dataset(&store, &ExportOptions::default());
    assert!(result.file("only_unlabeled.txt").is_none());
    assert_eq!(
        result.file("mixed.txt").unwrap().contents,
        "0 0.25 0.5 0.5 1\n"
    );
}

#[test]
fn test_deleted_label_is_excluded() {
    let mut store = AnnotationStore::new();
    let cat = store.add_label("cat");
    let dog = store.add_label("dog");
    add_image(
        &mut store,
        "a.png",
        (100, 100),
        &[
            (Some(cat), Rect::new(0.0, 0.0, 10.0, 10.0)),
            (Some(dog), Rect::new(0.0, 0.0, 20.0, 20.0)),
        ],
    );
    add_image(
        &mut store,
        "b.png",
        (100, 100),
        &[(Some(cat), Rect::new(0.0, 0.0, 10.0, 10.0))],
    );

    store.delete_label(cat);
    let result = export_dataset(&store, &ExportOptions::default());

    assert_eq!(result.files[0].contents, "0 dog");
    assert_eq!(result.file("a.txt").unwrap().contents, "0 0.1 0.1 0.2 0.2\n");
    assert!(result.file("b.txt").is_none());
    assert_eq!(result.annotations_exported, 1);
}

#[test]
fn test_label_index_follows_position() {
    let mut store = AnnotationStore::new();
    let first = store.add_label("first");
    let second = store.add_label("second");
    add_image(
        &mut store,
        "a.png",
        (100, 100),
        &[
            (Some(first), Rect::new(0.0, 0.0, 10.0, 10.0)),
            (Some(second), Rect::new(0.0, 0.0, 10.0, 10.0)),
        ],
    );

    store.move_label(1, 0);
    let result = export_dataset(&store, &ExportOptions::default());

    assert_eq!(result.files[0].contents, "0 second\n1 first");
    assert_eq!(
        result.file("a.txt").unwrap().contents,
        "1 0.05 0.05 0.1 0.1\n0 0.05 0.05 0.1 0.1\n"
    );
}

#[test]
fn test_undecoded_image_is_skipped_with_warning() {
    let mut store = AnnotationStore::new();
    let cat = store.add_label("cat");
    add_image(
        &mut store,
        "pending.png",
        (0, 0),
        &[(Some(cat), Rect::new(0.0, 0.0, 10.0, 10.0))],
    );

    let result = export_dataset(&store, &ExportOptions::default());
    assert!(result.file("pending.txt").is_none());
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].image.as_deref(), Some("pending.png"));
}

#[test]
fn test_file_name_cut_at_first_dot() {
    let mut store = AnnotationStore::new();
    let cat = store.add_label("cat");
    add_image(
        &mut store,
        "scan.2024.01.png",
        (100, 100),
        &[(Some(cat), Rect::new(0.0, 0.0, 10.0, 10.0))],
    );

    let result = export_dataset(&store, &ExportOptions::default());
    assert!(result.file("scan.txt").is_some());
}

#[test]
fn test_natural_scale_inverts_display_mapping() {
    let mut store = AnnotationStore::new();
    let cat = store.add_label("cat");
    let id = add_image(
        &mut store,
        "big.png",
        (800, 400),
        &[(Some(cat), Rect::new(50.0, 25.0, 150.0, 125.0))],
    );
    // Drawn at half size.
    let display = compute_display_rect(800.0, 400.0, 400.0, 200.0);
    store.set_image_geometry(id, 800, 400, display);

    let raw = export_dataset(&store, &ExportOptions::default());
    assert_eq!(
        raw.file("big.txt").unwrap().contents,
        "0 0.125 0.1875 0.125 0.25\n"
    );

    let scaled = export_dataset(&store, &ExportOptions { natural_scale: true });
    assert_eq!(
        scaled.file("big.txt").unwrap().contents,
        "0 0.25 0.375 0.25 0.5\n"
    );
}

#[test]
fn test_swapped_corners_are_sorted() {
    let mut store = AnnotationStore::new();
    let cat = store.add_label("cat");
    add_image(
        &mut store,
        "a.png",
        (800, 600),
        &[(Some(cat), Rect::new(300.0, 300.0, 200.0, 200.0))],
    );

    let result = export_dataset(&store, &ExportOptions::default());
    assert_eq!(
        result.file("a.txt").unwrap().contents,
        "0 0.3125 0.4166666666666667 0.125 0.16666666666666666\n"
    );
}

#[test]
fn test_box_dragged_up_left_exports_positive_size() {
    let mut store = AnnotationStore::new();
    let cat = store.add_label("cat");
    store.set_current_label(Some(cat));
    let id = add_image(&mut store, "drawn.png", (800, 600), &[]);

    // 800x600 in an 800x600 viewport: display and natural space coincide.
    let mut engine = CanvasEngine::default();
    engine.resize_viewport(&mut store, 800.0, 600.0);
    engine.select_image(&mut store, id);
    engine.image_decoded(&mut store, id, 800, 600);
    engine.pointer_down(&mut store, Point::new(300.0, 300.0));
    engine.pointer_move(&store, Point::new(200.0, 200.0));
    engine.pointer_up(&mut store);

    let result = export_dataset(&store, &ExportOptions::default());
    assert_eq!(
        result.file("drawn.txt").unwrap().contents,
        "0 0.3125 0.4166666666666667 0.125 0.16666666666666666\n"
    );
}

#[test]
fn test_options_from_settings() {
    let mut settings = ExportSettings::default();
    assert_eq!(ExportOptions::from(&settings), ExportOptions::default());
    settings.natural_scale = true;
    assert!(ExportOptions::from(&settings).natural_scale);
}
