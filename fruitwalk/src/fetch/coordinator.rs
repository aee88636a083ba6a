//! Viewport fetch coordinator.
//!
//! Turns a stream of camera changes into at most one network request per
//! logical viewport, and makes sure only the newest request's result reaches
//! the published map state.
//!
//! # Algorithm
//!
//! For each viewport:
//!
//! 1. Skip it if the in-flight request (or, when idle, the committed request)
//!    already covers it.
//! 2. Pick clusters or locations from the zoom, and expand the region by the
//!    matching prefetch multiplier.
//! 3. Mark the expanded request in flight and publish `Loading`.
//! 4. Try the region cache with the expanded box, then the original box.
//! 5. On a miss, fetch the expanded box. When the response arrives, commit
//!    it only if the marker still names this request. Otherwise discard it.
//!
//! Steps 1-4 run in one critical section on the caller's thread, and so does
//! the commit in step 5. Only the network await and the commit are spawned.
//! The state lock is never held across the network await.
//!
//! # Example
//!
//! ```ignore
//! let coordinator = Arc::new(FetchCoordinator::new(api, FetchConfig::default()));
//! let mut updates = coordinator.subscribe();
//!
//! coordinator.on_viewport_changed(&camera)?;
//! updates.changed().await?;
//! println!("{}", updates.borrow().status);
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::config::FetchConfig;
use super::state::{FetchOutcome, LoadState, MapData, RequestMarker};
use crate::api::FruitApi;
use crate::cache::RegionCache;
use crate::geo::GeoError;
use crate::model::FetchKind;
use crate::region::{CameraRegion, MapRegion, ViewportRequest};

/// Mutable coordinator state, guarded by one lock.
#[derive(Debug, Default)]
struct CoordinatorState {
    marker: RequestMarker,
    /// Committed payload, status, and the request that produced them
    data: MapData,
    /// Last region handed to `fetch`, for `reload`
    latest: Option<MapRegion>,
}

/// Where `begin` left a fetch.
enum Step {
    Done(FetchOutcome),
    Network {
        kind: FetchKind,
        search: ViewportRequest,
    },
}

/// Coordinates viewport fetches for one map surface.
pub struct FetchCoordinator<A: FruitApi> {
    api: A,
    cache: RegionCache,
    config: FetchConfig,
    state: Mutex<CoordinatorState>,
    data_tx: watch::Sender<MapData>,
}

impl<A: FruitApi> FetchCoordinator<A> {
    /// Creates a coordinator with an empty cache.
    ///
    /// # Arguments
    ///
    /// * `api` - Fetch-and-decode collaborator
    /// * `config` - Zoom threshold, prefetch multipliers, and cache policy
    pub fn new(api: A, config: FetchConfig) -> Self {
        let (data_tx, _) = watch::channel(MapData::default());
        Self {
            api,
            cache: RegionCache::new(config.stale_entry_policy),
            config,
            state: Mutex::new(CoordinatorState::default()),
            data_tx,
        }
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    pub fn cache(&self) -> &RegionCache {
        &self.cache
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Subscribes to map state changes.
    pub fn subscribe(&self) -> watch::Receiver<MapData> {
        self.data_tx.subscribe()
    }

    /// Returns the current map state.
    pub fn snapshot(&self) -> MapData {
        self.state.lock().data.clone()
    }

    /// Handles a camera change.
    ///
    /// The dedup check and cache lookup run before this returns, so
    /// back-to-back calls take effect in call order. Only the
    /// network request and its commit run on the spawned task. Callers may
    /// drop the returned handle.
    ///
    /// # Errors
    ///
    /// Returns an error, without touching any state, if the camera region is
    /// invalid.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn on_viewport_changed(
        self: &Arc<Self>,
        camera: &CameraRegion,
    ) -> Result<JoinHandle<FetchOutcome>, GeoError> {
        let region = MapRegion::from_camera(camera)?;
        Ok(self.spawn_fetch(region))
    }

    /// Runs the fetch algorithm for `region` to completion.
    pub async fn fetch(&self, region: MapRegion) -> FetchOutcome {
        match self.begin(region) {
            Step::Done(outcome) => outcome,
            Step::Network { kind, search } => self.complete(kind, search).await,
        }
    }

    /// Refetches the most recent viewport.
    ///
    /// The committed request and in-flight marker are forgotten first, so
    /// the viewport is not skipped as already covered. Returns `None` if no
    /// viewport has been seen yet.
    pub fn reload(self: &Arc<Self>) -> Option<JoinHandle<FetchOutcome>> {
        let region = {
            let mut state = self.state.lock();
            state.marker = RequestMarker::Idle;
            state.data.request = None;
            state.latest?
        };

        debug!(zoom = region.zoom, "Reloading viewport");
        Some(self.spawn_fetch(region))
    }

    fn spawn_fetch(self: &Arc<Self>, region: MapRegion) -> JoinHandle<FetchOutcome> {
        match self.begin(region) {
            Step::Done(outcome) => tokio::spawn(async move { outcome }),
            Step::Network { kind, search } => {
                let coordinator = Arc::clone(self);
                tokio::spawn(async move { coordinator.complete(kind, search).await })
            }
        }
    }

    /// Synchronous half of a fetch, run under the state lock.
    fn begin(&self, region: MapRegion) -> Step {
        let original = region.request();
        let kind = self.config.kind_for_zoom(original.zoom);
        let search = region
            .expanded(self.config.prefetch_multiplier(kind))
            .request();

        let mut state = self.state.lock();
        state.latest = Some(region);

        let current = state.marker.in_flight().copied().or(state.data.request);
        if current.is_some_and(|current| current.satisfies(&original)) {
            debug!(zoom = original.zoom, "Viewport already loading or loaded");
            return Step::Done(FetchOutcome::AlreadyCovered);
        }

        state.marker = RequestMarker::InFlight(search);
        state.data.status = LoadState::Loading;
        self.publish(&state.data);

        let hit = self
            .cache
            .lookup(search.zoom, &search.bounds, kind)
            .map(|payload| (payload, search))
            .or_else(|| {
                self.cache
                    .lookup(original.zoom, &original.bounds, kind)
                    .map(|payload| (payload, original))
            });

        if let Some((payload, committed)) = hit {
            debug!(zoom = committed.zoom, kind = %kind, "Serving viewport from cache");
            state.data.commit(payload, committed);
            state.marker = RequestMarker::Idle;
            self.publish(&state.data);
            return Step::Done(FetchOutcome::CacheHit);
        }

        Step::Network { kind, search }
    }

    /// Awaits the network and commits the result if `search` is still current.
    async fn complete(&self, kind: FetchKind, search: ViewportRequest) -> FetchOutcome {
        info!(zoom = search.zoom, kind = %kind, bounds = %search.bounds, "Fetching viewport");
        let result = self.api.fetch(kind, &search).await;

        let mut state = self.state.lock();
        if state.marker != RequestMarker::InFlight(search) {
            debug!(zoom = search.zoom, "Discarding superseded response");
            return FetchOutcome::Stale;
        }
        state.marker = RequestMarker::Idle;

        match result {
            Ok(payload) => {
                info!(zoom = search.zoom, kind = %kind, count = payload.len(), "Viewport loaded");
                self.cache.store(search.zoom, search.bounds, payload.clone());
                state.data.commit(payload, search);
                self.publish(&state.data);
                FetchOutcome::Fetched
            }
            Err(e) => {
                warn!(zoom = search.zoom, kind = %kind, error = %e, "Viewport fetch failed");
                state.data.status = LoadState::Failed(e.clone());
                self.publish(&state.data);
                FetchOutcome::Failed(e)
            }
        }
    }

    /// Resets the map to an empty, cancelled state.
    ///
    /// Responses still in flight find the marker cleared and discard
    /// themselves.
    pub fn cancel(&self) {
        let mut state = self.state.lock();
        state.marker = RequestMarker::Idle;
        state.data.reset();
        state.data.status = LoadState::Cancelled;
        self.publish(&state.data);
        info!("Map loading cancelled");
    }

    fn publish(&self, data: &MapData) {
        self.data_tx.send_replace(data.clone());
    }
}
