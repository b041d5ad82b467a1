use facet::Facet;
use rapace_method::{HasMethodName, MethodDescriptor, Stream, StreamingMode};

#[derive(Facet)]
pub struct Point {
    latitude: i32,
    longitude: i32,
}

#[derive(Facet)]
pub struct Feature {
    name: String,
    location: Point,
}

#[derive(Facet)]
pub struct RouteSummary {
    point_count: u32,
    distance: u32,
}

#[derive(Facet)]
pub struct RouteNote {
    location: Point,
    message: String,
}

#[rapace_method::service(package = "routeguide")]
pub trait RouteGuide {
    /// Feature at a point.
    async fn get_feature(&self, point: Point) -> Feature;
    async fn list_features(&self, area: Point) -> Stream<Feature>;
    async fn record_route(&self, points: Stream<Point>) -> RouteSummary;
    async fn route_chat(&self, notes: rapace_method::Stream<RouteNote>) -> Stream<RouteNote>;
}

fn main() {
    use route_guide_methods::*;

    assert_eq!(GetFeature::METHOD_NAME, "/routeguide.RouteGuide/GetFeature");
    assert_eq!(GetFeature::STREAM_TYPE, StreamingMode::Unary);
    assert_eq!(ListFeatures::STREAM_TYPE, StreamingMode::ServerStreaming);
    assert_eq!(RecordRoute::STREAM_TYPE, StreamingMode::ClientStreaming);
    assert_eq!(RouteChat::STREAM_TYPE, StreamingMode::BidiStreaming);

    let summary: <RecordRoute as MethodDescriptor>::Response = RouteSummary {
        point_count: 3,
        distance: 10,
    };
    assert_eq!(summary.point_count + summary.distance, 13);

    assert_eq!(METHOD_NAMES.len(), 4);
    let infos = method_infos();
    assert_eq!(infos.len(), 4);
    assert_eq!(infos[3].method_name, "/routeguide.RouteGuide/RouteChat");
    assert_eq!(infos, method_infos());
}
