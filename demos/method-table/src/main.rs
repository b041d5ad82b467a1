//! method-table: prints the descriptors of a route guide service.
//!
//! # Usage
//!
//! ```bash
//! RUST_LOG=rapace_method=debug method-table --mode server-streaming
//! ```

use clap::Parser;
use facet::Facet;
use rapace_method::{
    HasIncomingType, HasMethodName, HasOutgoingType, MethodDescriptor, MethodInfo, Stream,
    StreamingMode,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "method-table")]
#[command(about = "Print the descriptor table of the route guide service")]
struct Args {
    /// Only list methods with this streaming mode (e.g. "bidi-streaming")
    #[arg(long)]
    mode: Option<StreamingMode>,

    /// Print the wire value of each streaming mode instead of its name
    #[arg(long)]
    wire: bool,
}

#[derive(Debug, Facet)]
pub struct Point {
    latitude: i32,
    longitude: i32,
}

#[derive(Debug, Facet)]
pub struct Rectangle {
    lo: Point,
    hi: Point,
}

#[derive(Debug, Facet)]
pub struct Feature {
    name: String,
    location: Point,
}

#[derive(Debug, Facet)]
pub struct RouteSummary {
    point_count: u32,
    feature_count: u32,
    distance: u32,
    elapsed_time: u32,
}

#[derive(Debug, Facet)]
pub struct RouteNote {
    location: Point,
    message: String,
}

#[derive(Debug, Facet)]
pub struct HealthCheckRequest {
    service: String,
}

#[derive(Debug, Facet)]
#[repr(u8)]
pub enum ServingStatus {
    Unknown,
    Serving,
    NotServing,
}

#[derive(Debug, Facet)]
pub struct HealthCheckResponse {
    status: ServingStatus,
}

/// Interface exported by the route guide server.
#[rapace_method::service(package = "routeguide")]
pub trait RouteGuide {
    /// Obtains the feature at a given position.
    async fn get_feature(&self, point: Point) -> Feature;

    /// Obtains the features available within the given rectangle.
    async fn list_features(&self, area: Rectangle) -> Stream<Feature>;

    /// Accepts a stream of points on a route being traversed.
    async fn record_route(&self, points: Stream<Point>) -> RouteSummary;

    /// Accepts notes sent while a route is traversed, while receiving other notes.
    async fn route_chat(&self, notes: Stream<RouteNote>) -> Stream<RouteNote>;
}

/// Health check, declared without the macro.
struct HealthCheck;

impl HasMethodName for HealthCheck {
    const METHOD_NAME: &'static str = "/grpc.health.v1.Health/Check";
}

impl HasIncomingType for HealthCheck {
    type IncomingType = HealthCheckRequest;
}

impl HasOutgoingType for HealthCheck {
    type OutgoingType = HealthCheckResponse;
}

rapace_method::assert_service_method!(HealthCheck);

fn method_table() -> Vec<MethodInfo> {
    let mut table = route_guide_methods::method_infos();
    table.push(HealthCheck::info());
    table
}

fn main() {
    // Output goes to stderr so the table on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let args = Args::parse();

    let table: Vec<MethodInfo> = method_table()
        .into_iter()
        .filter(|info| args.mode.is_none_or(|mode| info.streaming_mode == mode))
        .collect();

    tracing::info!(
        methods = table.len(),
        mode = args.mode.map(StreamingMode::as_str),
        "assembled method table"
    );

    let width = table
        .iter()
        .map(|info| info.method_name.len())
        .max()
        .unwrap_or(0);

    for info in &table {
        let mode = if args.wire {
            info.streaming_mode.as_u32().to_string()
        } else {
            info.streaming_mode.to_string()
        };
        let service = info
            .path()
            .map(|path| path.service_name())
            .unwrap_or("?");
        println!(
            "{:<width$}  {:<16}  {:<10}  {} -> {}",
            info.method_name,
            mode,
            service,
            short_name(info.request_type),
            short_name(info.response_type),
        );
    }
}

/// Last path segment of a type name.
fn short_name(type_name: &str) -> &str {
    type_name.rsplit("::").next().unwrap_or(type_name)
}
