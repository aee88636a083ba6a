//! Map viewport command.
//!
//! Describes a camera from the arguments, feeds it through the fetch
//! coordinator once, and prints what the map would show.

use clap::Args;
use fruitwalk::fetch::{FetchCoordinator, FetchOutcome, LoadState, MapData};
use fruitwalk::filter::FruitFilter;
use fruitwalk::geo::{Coordinate, ViewSize};
use fruitwalk::region::{CameraRegion, MapRegion};
use tracing::{debug, info, warn};

use crate::error::CliError;
use crate::runner::{Api, CliRunner};

/// Zoom used when no extent argument is given.
pub const DEFAULT_VIEW_ZOOM: u8 = 16;

/// Viewport arguments.
#[derive(Debug, Clone, Args)]
pub struct ViewArgs {
    /// Center latitude in decimal degrees
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    /// Center longitude in decimal degrees
    #[arg(long, allow_negative_numbers = true)]
    pub lng: f64,

    /// Visible latitude span in degrees
    #[arg(long, requires = "lng_span", conflicts_with_all = ["zoom", "radius_km"])]
    pub lat_span: Option<f64>,

    /// Visible longitude span in degrees
    #[arg(long, requires = "lat_span", conflicts_with_all = ["zoom", "radius_km"])]
    pub lng_span: Option<f64>,

    /// Camera zoom level (default: 16 when no other extent is given)
    #[arg(long, conflicts_with = "radius_km")]
    pub zoom: Option<u8>,

    /// Show a square this many kilometers across
    #[arg(long)]
    pub radius_km: Option<f64>,

    /// Camera heading in degrees clockwise from north
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    pub heading: f64,

    /// View width in points
    #[arg(long, default_value = "390")]
    pub width: f64,

    /// View height in points
    #[arg(long, default_value = "600")]
    pub height: f64,

    /// Only list locations of this type (repeatable, e.g. --type apple --type fig)
    #[arg(long = "type", value_name = "NAME")]
    pub types: Vec<String>,

    /// Only list locations sharing a type with this loaded location (repeatable)
    #[arg(long, value_name = "ID", conflicts_with = "types")]
    pub like: Vec<u64>,
}

impl ViewArgs {
    /// Builds the camera described by the arguments.
    pub fn camera(&self) -> Result<CameraRegion, CliError> {
        let center = Coordinate::try_new(self.lat, self.lng)?;
        let view = ViewSize::new(self.width, self.height);

        let mut camera = match (self.lat_span, self.lng_span, self.radius_km) {
            (Some(lat_span), Some(lng_span), _) => {
                CameraRegion::new(center, lat_span, lng_span, 0.0, view)
            }
            (_, _, Some(radius_km)) => CameraRegion::around(center, radius_km, view)?,
            _ => CameraRegion::centered_on(center, self.zoom.unwrap_or(DEFAULT_VIEW_ZOOM), view),
        };
        camera.heading = self.heading;
        Ok(camera)
    }
}

/// Run the view command.
pub async fn run(runner: &CliRunner, args: ViewArgs) -> Result<(), CliError> {
    runner.log_startup("view");

    let camera = args.camera()?;
    let region = MapRegion::from_camera(&camera)?;
    let coordinator = runner.create_coordinator()?;

    println!("Viewport");
    println!("  Center: {}", region.center);
    println!("  Zoom:   {}", region.zoom);
    println!("  Bounds: {}", region.bounds);
    println!(
        "  Kind:   {}",
        coordinator.config().kind_for_zoom(region.zoom)
    );
    println!();

    let outcome = coordinator
        .on_viewport_changed(&camera)?
        .await
        .map_err(|e| CliError::Task(e.to_string()))?;
    info!(outcome = describe(&outcome), "Viewport handled");

    let data = coordinator.snapshot();
    if let LoadState::Failed(e) = &data.status {
        return Err(CliError::Api(e.clone()));
    }

    let stats = coordinator.cache().stats();
    debug!(
        hits = stats.hits,
        misses = stats.misses,
        stores = stats.stores,
        evictions = stats.evictions,
        "Region cache"
    );

    println!("Loaded ({})", describe(&outcome));
    if let Some(request) = data.request {
        println!("  Request: {}", request);
    }
    println!("  Cache:   {}", stats);
    println!();

    let filter = if args.like.is_empty() {
        type_filter(&coordinator, &args.types).await
    } else {
        like_filter(&data, &args.like)
    };
    print_map_data(&data, &region, &filter);
    Ok(())
}

/// Resolves `--type` names against the server's type list.
///
/// Locations from the map endpoints carry type ids but usually no names, so
/// names are matched against the type list and the matching ids are added.
/// If the type list cannot be fetched the filter falls back to names only.
async fn type_filter(coordinator: &FetchCoordinator<Api>, names: &[String]) -> FruitFilter {
    let mut filter = FruitFilter::from_names(names);
    if filter.is_empty() {
        return filter;
    }

    match coordinator.api().fruit_types().await {
        Ok(types) => {
            for fruit_type in types {
                let matched = fruit_type
                    .common_names
                    .iter()
                    .chain(&fruit_type.scientific_names)
                    .any(|name| filter.matches_name(name));
                if matched {
                    filter = filter.with_type_id(fruit_type.id);
                }
            }
        }
        Err(e) => warn!(error = %e, "Type list unavailable, filtering by name only"),
    }
    filter
}

/// Builds a filter from the types of the loaded locations named by `--like`.
fn like_filter(data: &MapData, ids: &[u64]) -> FruitFilter {
    let filter =
        FruitFilter::from_locations(data.locations.iter().filter(|l| ids.contains(&l.id)));
    if filter.is_empty() {
        warn!(?ids, "No loaded location to match, listing all");
    }
    filter
}

fn print_map_data(data: &MapData, region: &MapRegion, filter: &FruitFilter) {
    if !data.clusters.is_empty() {
        let visible: Vec<_> = data
            .clusters
            .iter()
            .filter(|c| region.bounds.contains_point(&c.coordinate()))
            .collect();
        let total: u64 = visible.iter().map(|c| c.count).sum();
        println!("{} clusters in view ({} locations)", visible.len(), total);
        for cluster in visible {
            println!("  {:>6}  {}", cluster.count, cluster.coordinate());
        }
        return;
    }

    let mut visible = data.locations_in(&region.bounds);
    if !filter.is_empty() {
        visible.retain(|location| filter.matches(location));
        println!(
            "{} locations in view matching '{}'",
            visible.len(),
            filter.display_name()
        );
    } else {
        println!("{} locations in view", visible.len());
    }

    for location in visible {
        println!(
            "  #{:<9} {:<28} {}",
            location.id,
            location.display_name(),
            location.coordinate()
        );
    }
}

fn describe(outcome: &FetchOutcome) -> &'static str {
    match outcome {
        FetchOutcome::AlreadyCovered => "already loaded",
        FetchOutcome::CacheHit => "from cache",
        FetchOutcome::Fetched => "fetched",
        FetchOutcome::Failed(_) => "failed",
        FetchOutcome::Stale => "superseded",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use fruitwalk::model::FruitLocation;
    use std::sync::Arc;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        view: ViewArgs,
    }

    fn parse(args: &[&str]) -> ViewArgs {
        let mut argv = vec!["fruitwalk"];
        argv.extend_from_slice(args);
        TestCli::try_parse_from(argv).unwrap().view
    }

    #[test]
    fn test_explicit_spans() {
        let args = parse(&[
            "--lat", "38.0", "--lng", "-122.0", "--lat-span", "0.01", "--lng-span", "0.01",
        ]);
        let region = MapRegion::from_camera(&args.camera().unwrap()).unwrap();
        assert_eq!(region.zoom, 17);
        assert!((region.bounds.south_west_lat - 37.995).abs() < 1e-9);
    }

    #[test]
    fn test_default_zoom() {
        let args = parse(&["--lat", "38.0", "--lng", "-122.0"]);
        let camera = args.camera().unwrap();
        assert_eq!(
            camera,
            CameraRegion::centered_on(
                Coordinate::new(38.0, -122.0),
                DEFAULT_VIEW_ZOOM,
                ViewSize::new(390.0, 600.0)
            )
        );
    }

    #[test]
    fn test_heading_applied() {
        let args = parse(&["--lat", "38.0", "--lng", "-122.0", "--heading", "45"]);
        assert_eq!(args.camera().unwrap().heading, 45.0);
    }

    #[test]
    fn test_radius() {
        let args = parse(&["--lat", "38.0", "--lng", "-122.0", "--radius-km", "1.5"]);
        let camera = args.camera().unwrap();
        assert!(camera.lat_span > 0.0);
        assert!(camera.lon_span > camera.lat_span);
    }

    #[test]
    fn test_repeated_types() {
        let args = parse(&["--lat", "1", "--lng", "2", "--type", "apple", "--type", "fig"]);
        assert_eq!(args.types, vec!["apple", "fig"]);
    }

    #[test]
    fn test_like_conflicts_with_type() {
        let result = TestCli::try_parse_from([
            "fruitwalk", "--lat", "1", "--lng", "2", "--like", "5", "--type", "fig",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_like_filter_uses_loaded_types() {
        let location = |id, type_ids| FruitLocation {
            id,
            lat: 0.0,
            lng: 0.0,
            type_ids,
            distance: None,
            photo: None,
            type_names: None,
            favorite: false,
        };
        let data = MapData {
            locations: Arc::new(vec![location(1, vec![97]), location(2, vec![3])]),
            ..MapData::default()
        };

        let filter = like_filter(&data, &[1]);
        assert!(filter.matches(&location(9, vec![97])));
        assert!(!filter.matches(&location(9, vec![3])));
        assert!(like_filter(&data, &[42]).is_empty());
    }

    #[test]
    fn test_span_requires_both_axes() {
        let result =
            TestCli::try_parse_from(["fruitwalk", "--lat", "1", "--lng", "2", "--lat-span", "0.1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_zoom_conflicts_with_radius() {
        let result = TestCli::try_parse_from([
            "fruitwalk", "--lat", "1", "--lng", "2", "--zoom", "12", "--radius-km", "3",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_latitude() {
        let args = parse(&["--lat", "91", "--lng", "0"]);
        assert!(matches!(args.camera(), Err(CliError::Viewport(_))));
    }
}
