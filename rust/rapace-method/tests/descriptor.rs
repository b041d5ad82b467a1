//! Descriptors assembled from definitions written by hand and by `#[service]`.

use std::collections::HashSet;

use facet::Facet;
use rapace_method::{
    Capability, ContractError, HasIncomingType, HasMethodName, HasOutgoingType, MethodDescriptor,
    MethodInfo, MethodPath, RequestType, ResponseType, Stream, StreamingMode,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("rapace_method=debug")),
        )
        .with_test_writer()
        .try_init();
}

#[derive(Debug, Clone, PartialEq, Facet)]
pub struct Point {
    latitude: i32,
    longitude: i32,
}

#[derive(Debug, Clone, PartialEq, Facet)]
pub struct Rectangle {
    lo: Point,
    hi: Point,
}

#[derive(Debug, Clone, PartialEq, Facet)]
pub struct Feature {
    name: String,
    location: Point,
}

#[derive(Debug, Clone, PartialEq, Facet)]
pub struct RouteSummary {
    point_count: u32,
    feature_count: u32,
    distance: u32,
}

#[derive(Debug, Clone, PartialEq, Facet)]
pub struct RouteNote {
    location: Point,
    message: String,
}

#[rapace_method::service(package = "routeguide")]
pub trait RouteGuide {
    async fn get_feature(&self, point: Point) -> Feature;
    async fn list_features(&self, area: Rectangle) -> Stream<Feature>;
    async fn record_route(&self, points: Stream<Point>) -> RouteSummary;
    async fn route_chat(&self, notes: Stream<RouteNote>) -> Stream<RouteNote>;
}

/// Hand-written equivalent of `ListFeatures`.
struct ListFeaturesByHand;

impl HasMethodName for ListFeaturesByHand {
    const METHOD_NAME: &'static str = "/routeguide.RouteGuide/ListFeatures";
}

impl HasIncomingType for ListFeaturesByHand {
    type IncomingType = Rectangle;
}

impl HasOutgoingType for ListFeaturesByHand {
    type OutgoingType = Stream<Feature>;
}

rapace_method::assert_service_method!(ListFeaturesByHand);

#[test]
fn generated_definitions_cover_every_mode() {
    use route_guide_methods::*;

    assert_eq!(GetFeature::STREAM_TYPE, StreamingMode::Unary);
    assert_eq!(ListFeatures::STREAM_TYPE, StreamingMode::ServerStreaming);
    assert_eq!(RecordRoute::STREAM_TYPE, StreamingMode::ClientStreaming);
    assert_eq!(RouteChat::STREAM_TYPE, StreamingMode::BidiStreaming);

    let modes: HashSet<_> = method_infos().iter().map(|i| i.streaming_mode).collect();
    assert_eq!(modes.len(), StreamingMode::ALL.len());
}

#[test]
fn generated_names_follow_package_and_trait() {
    init_tracing();

    assert_eq!(
        route_guide_methods::METHOD_NAMES,
        [
            "/routeguide.RouteGuide/GetFeature",
            "/routeguide.RouteGuide/ListFeatures",
            "/routeguide.RouteGuide/RecordRoute",
            "/routeguide.RouteGuide/RouteChat",
        ]
    );

    for info in route_guide_methods::method_infos() {
        let path = info.path().unwrap();
        assert_eq!(path.package(), Some("routeguide"));
        assert_eq!(path.service_name(), "RouteGuide");
        assert_eq!(info.method_name, format!("/{}/{}", path.service(), path.method()));
    }
}

#[test]
fn hand_written_and_generated_descriptors_agree() {
    init_tracing();

    let by_hand = ListFeaturesByHand::info();
    let generated = route_guide_methods::ListFeatures::info();
    assert_eq!(by_hand, generated);
    assert_eq!(by_hand.to_string(), generated.to_string());
}

#[test]
fn payloads_are_the_declared_messages() {
    use route_guide_methods::*;

    let area: RequestType<ListFeatures> = Rectangle {
        lo: Point {
            latitude: 400_000_000,
            longitude: -750_000_000,
        },
        hi: Point {
            latitude: 420_000_000,
            longitude: -730_000_000,
        },
    };
    let feature: ResponseType<ListFeatures> = Feature {
        name: "Patriots Path, Mendham, NJ 07945, USA".to_owned(),
        location: area.lo.clone(),
    };
    assert_eq!(feature.location, area.lo);

    let summary: ResponseType<RecordRoute> = RouteSummary {
        point_count: 10,
        feature_count: 2,
        distance: 1200,
    };
    assert_eq!(summary.feature_count, 2);

    let note: RequestType<RouteChat> = RouteNote {
        location: feature.location,
        message: "first".to_owned(),
    };
    let echoed: ResponseType<RouteChat> = note.clone();
    assert_eq!(echoed, note);
}

#[test]
fn info_display_marks_streamed_sides() {
    let shown = route_guide_methods::RouteChat::info().to_string();
    assert!(shown.starts_with("/routeguide.RouteGuide/RouteChat (stream "));
    assert!(shown.contains("-> stream "));

    let shown = route_guide_methods::GetFeature::info().to_string();
    assert!(!shown.contains("stream "));
}

#[test]
fn probes_report_partial_definitions() {
    init_tracing();

    struct Named;
    impl HasMethodName for Named {
        const METHOD_NAME: &'static str = "/routeguide.RouteGuide/Named";
    }

    assert!(rapace_method::probe!(route_guide_methods::GetFeature).is_complete());

    let report = rapace_method::probe!(Named);
    assert!(report.has(Capability::MethodName));
    assert_eq!(
        report.missing().collect::<Vec<_>>(),
        [Capability::IncomingType, Capability::OutgoingType]
    );

    let messages: Vec<String> = report.violations().iter().map(|e| e.to_string()).collect();
    assert_eq!(messages.len(), 2);
    assert!(messages[0].contains("must provide"));
    assert!(matches!(
        report.violations()[1],
        ContractError::MissingCapability {
            capability: Capability::OutgoingType,
            ..
        }
    ));
}

#[test]
fn method_info_is_type_erased() {
    let infos: Vec<MethodInfo> = route_guide_methods::method_infos();
    let by_name = infos
        .iter()
        .find(|info| info.method_name.ends_with("/RecordRoute"))
        .unwrap();
    assert!(by_name.request_type.ends_with("Point"));
    assert!(by_name.response_type.ends_with("RouteSummary"));
    assert!(MethodPath::parse(by_name.method_name).is_ok());
}
