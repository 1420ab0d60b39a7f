//! Annotation round-trip integration tests against a mock slide service.
//!
//! Tests verify:
//! - Stored annotations get ids and can be filtered by shape type and class
//! - Annotations can be reclassified and classes restyled in place
//! - Updates with a missing or unknown id are refused

use wsi_tiler::annotation::{Annotation, AnnotationClass, AnnotationShape};
use wsi_tiler::coords::MicronPoint;
use wsi_tiler::error::ServiceError;
use wsi_tiler::pipeline::ClassificationPipeline;
use wsi_tiler::slide::SlideService;
use wsi_tiler::tile::Roi;

use super::test_utils::{slide_info, MockClassifier, MockSlideService};

fn rectangle(x: f64, y: f64, class_name: &str) -> Annotation {
    Annotation::new(
        AnnotationShape::Rectangle {
            top_left: MicronPoint::new(x, y),
            bottom_right: MicronPoint::new(x + 10.0, y + 10.0),
        },
        class_name,
    )
}

fn ellipse(x: f64, y: f64, class_name: &str) -> Annotation {
    Annotation::new(
        AnnotationShape::Ellipse {
            top_left: MicronPoint::new(x, y),
            bottom_right: MicronPoint::new(x + 20.0, y + 5.0),
        },
        class_name,
    )
}

/// Two classes, three rectangles and two ellipses spread over both.
async fn populated_service() -> MockSlideService {
    let service = MockSlideService::new(slide_info(1000.0, 1000.0, 0.5, Vec::new()));
    service
        .add_annotation_classes(&[
            AnnotationClass::new("Class One", "First class", 3, "#ff0000ff"),
            AnnotationClass::new("Class Two", "Second class", 3, "#ffff0000"),
        ])
        .await
        .unwrap();
    service
        .add_annotations(&[
            rectangle(0.0, 0.0, "Class One"),
            rectangle(50.0, 0.0, "Class One"),
            ellipse(100.0, 0.0, "Class One"),
        ])
        .await
        .unwrap();
    service
        .add_annotations(&[rectangle(0.0, 50.0, "Class Two"), ellipse(50.0, 50.0, "Class Two")])
        .await
        .unwrap();
    service
}

#[tokio::test]
async fn test_stored_annotations_get_ids() {
    let service = populated_service().await;

    let all = service.annotations(None, None).await.unwrap();
    assert_eq!(all.len(), 5);

    let ids: Vec<Option<u64>> = all.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![Some(1), Some(2), Some(3), Some(4), Some(5)]);

    // Submitted copies stay as the caller built them
    assert!(service
        .submitted_annotations()
        .await
        .iter()
        .all(|a| a.id.is_none()));
}

#[tokio::test]
async fn test_filter_annotations() {
    let service = populated_service().await;

    let count = |found: Vec<Annotation>| found.len();
    assert_eq!(count(service.annotations(Some(""), Some("")).await.unwrap()), 5);
    assert_eq!(count(service.annotations(None, Some("Class One")).await.unwrap()), 3);
    assert_eq!(count(service.annotations(Some(""), Some("Class Two")).await.unwrap()), 2);
    assert_eq!(count(service.annotations(Some("Rectangle"), None).await.unwrap()), 3);
    assert_eq!(count(service.annotations(Some("Ellipse"), None).await.unwrap()), 2);
    assert_eq!(count(service.annotations(Some("Polygon"), None).await.unwrap()), 0);

    let both = service
        .annotations(Some("Rectangle"), Some("Class One"))
        .await
        .unwrap();
    assert_eq!(both.len(), 2);
    assert!(both
        .iter()
        .all(|a| a.class_name == "Class One" && a.shape.type_name() == "Rectangle"));

    assert!(service
        .annotations(None, Some("Class Three"))
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_reclassify_annotations() {
    let service = populated_service().await;

    // Move every Class One rectangle to Class Two
    for mut annotation in service
        .annotations(Some("Rectangle"), Some("Class One"))
        .await
        .unwrap()
    {
        annotation.class_name = "Class Two".to_string();
        service.update_annotation(&annotation).await.unwrap();
    }

    let class_two = service.annotations(None, Some("Class Two")).await.unwrap();
    assert_eq!(class_two.len(), 4);

    let class_one = service.annotations(None, Some("Class One")).await.unwrap();
    assert_eq!(class_one.len(), 1);
    assert_eq!(class_one[0].shape.type_name(), "Ellipse");

    // Ids and geometry survive the update
    let all = service.annotations(None, None).await.unwrap();
    let first = &all[0];
    assert_eq!(first.id, Some(1));
    assert_eq!(first.class_name, "Class Two");
    assert_eq!(first.shape, rectangle(0.0, 0.0, "").shape);
}

#[tokio::test]
async fn test_update_requires_known_id() {
    let service = populated_service().await;

    let unsaved = rectangle(0.0, 0.0, "Class Two");
    assert!(matches!(
        service.update_annotation(&unsaved).await,
        Err(ServiceError::Rejected(_))
    ));

    let unknown = unsaved.with_id(99);
    assert!(matches!(
        service.update_annotation(&unknown).await,
        Err(ServiceError::NotFound(_))
    ));

    // Nothing changed
    assert_eq!(
        service
            .annotations(None, Some("Class Two"))
            .await
            .unwrap()
            .len(),
        2
    );
}

#[tokio::test]
async fn test_restyle_annotation_class() {
    let service = populated_service().await;

    let mut classes = service.annotation_classes().await.unwrap();
    assert_eq!(classes.len(), 2);

    let mut class_one = classes.remove(0);
    class_one.outline_width = 5;
    class_one.outline_color = "#ff00ff00".to_string();
    let class_one = class_one.with_fill("#ff00ff00", 0.4);
    service.update_annotation_class(&class_one).await.unwrap();

    let stored = service.annotation_classes().await.unwrap();
    assert_eq!(stored[0], class_one);
    assert_eq!(stored[0].fill_color.as_deref(), Some("#ff00ff00"));
    assert_eq!(stored[1].name, "Class Two");
    assert_eq!(stored[1].outline_width, 3);

    let missing = AnnotationClass::new("Class Three", "", 1, "#ff000000");
    assert!(matches!(
        service.update_annotation_class(&missing).await,
        Err(ServiceError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_query_pipeline_output_by_label() {
    let service = MockSlideService::new(slide_info(
        2000.0,
        2000.0,
        0.5,
        vec![Roi::rectangle(0.0, 0.0, 300.0, 200.0)],
    ));
    let pipeline = ClassificationPipeline::new(MockClassifier::new(&["Tumor", "Stroma"]), 224)
        .with_batch_size(4);
    pipeline.run(&service).await.unwrap();

    // The mock labels the first batch of 4 Tumor and the remaining 2 Stroma
    let tumor = service
        .annotations(Some("Rectangle"), Some("Tumor"))
        .await
        .unwrap();
    let stroma = service.annotations(None, Some("Stroma")).await.unwrap();
    assert_eq!((tumor.len(), stroma.len()), (4, 2));

    let names: Vec<String> = service
        .annotation_classes()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["Tumor", "Stroma"]);
}
