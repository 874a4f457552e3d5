//! In-memory store of demo page views.
//!
//! Each open demo page is a view with its own input and analysis machine.
//! Views live in a `parking_lot` map keyed by a random id, are created on
//! first use and are dropped once idle for longer than the configured TTL.
//! Each flow holds at most `capacity` views; a full map gives up its least
//! recently seen idle view to make room.

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::{
    AnalysisMachine, AnalysisState, CreditForm, CreditResult, InputCollector, TenderInput,
    TenderResult,
};

/// One open demo page.
#[derive(Debug)]
pub struct DemoView<I, R> {
    pub id: Uuid,
    pub input: I,
    pub analysis: AnalysisMachine<R>,
    last_seen: Instant,
}

pub type TenderView = DemoView<TenderInput, TenderResult>;
pub type CreditView = DemoView<CreditForm, CreditResult>;
pub type SharedView<I, R> = Arc<Mutex<DemoView<I, R>>>;

impl<I: Default, R> DemoView<I, R> {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            input: I::default(),
            analysis: AnalysisMachine::default(),
            last_seen: Instant::now(),
        }
    }
}

impl<I: InputCollector, R> DemoView<I, R> {
    /// Whether the submit control should be enabled.
    pub fn is_submittable(&self) -> bool {
        self.input.is_ready() && !self.analysis.is_running()
    }

    /// Apply an input mutation; a finished result is discarded afterwards.
    pub fn edit_input(&mut self, edit: impl FnOnce(&mut I)) {
        edit(&mut self.input);
        self.analysis.input_replaced();
        self.touch();
    }
}

impl<I, R> DemoView<I, R> {
    pub fn touch(&mut self) {
        self.last_seen = Instant::now();
    }

    fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        !self.analysis.is_running() && now.saturating_duration_since(self.last_seen) > ttl
    }
}

/// JSON view of a demo page.
#[derive(Debug, Serialize)]
pub struct ViewSnapshot<I, R> {
    pub view_id: Uuid,
    pub input: I,
    pub analysis: AnalysisState<R>,
    pub run: u64,
    pub submittable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl<I, R> From<&DemoView<I, R>> for ViewSnapshot<I, R>
where
    I: InputCollector + Clone,
    R: Clone,
{
    fn from(view: &DemoView<I, R>) -> Self {
        Self {
            view_id: view.id,
            input: view.input.clone(),
            analysis: view.analysis.state().clone(),
            run: view.analysis.run(),
            submittable: view.is_submittable(),
            started_at: view.analysis.started_at(),
            completed_at: view.analysis.completed_at(),
        }
    }
}

const DEFAULT_CAPACITY: usize = 10_000;

/// Every slot of a flow is held by a view with an analysis in flight.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("all {0} demo views are busy")]
pub struct ViewLimitReached(pub usize);

/// Views of a single flow.
pub struct ViewMap<I, R> {
    views: RwLock<HashMap<Uuid, SharedView<I, R>>>,
    capacity: usize,
}

impl<I, R> Default for ViewMap<I, R> {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl<I, R> ViewMap<I, R> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            views: RwLock::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }
}

impl<I: Default, R> ViewMap<I, R> {
    pub fn get(&self, id: Uuid) -> Option<SharedView<I, R>> {
        let view = self.views.read().get(&id).cloned()?;
        view.lock().touch();
        Some(view)
    }

    pub fn get_or_create(&self, id: Uuid) -> Result<SharedView<I, R>, ViewLimitReached> {
        if let Some(view) = self.get(id) {
            return Ok(view);
        }

        let mut views = self.views.write();
        if let Some(view) = views.get(&id) {
            return Ok(Arc::clone(view));
        }

        if views.len() >= self.capacity {
            let oldest = views
                .iter()
                .filter_map(|(id, view)| {
                    let view = view.lock();
                    (!view.analysis.is_running()).then_some((*id, view.last_seen))
                })
                .min_by_key(|(_, last_seen)| *last_seen)
                .map(|(id, _)| id)
                .ok_or(ViewLimitReached(self.capacity))?;
            views.remove(&oldest);
            debug!(view_id = %oldest, "Dropped least recently seen view");
        }

        debug!(view_id = %id, "Creating view");
        let view = Arc::new(Mutex::new(DemoView::new(id)));
        views.insert(id, Arc::clone(&view));
        Ok(view)
    }

    pub fn len(&self) -> usize {
        self.views.read().len()
    }

    /// Drop idle views. Views with an analysis in flight are kept.
    pub fn evict_expired(&self, ttl: Duration) -> usize {
        let now = Instant::now();
        let mut views = self.views.write();
        let before = views.len();
        views.retain(|_, view| !view.lock().is_expired(now, ttl));
        before - views.len()
    }
}

/// All demo views of the running site.
#[derive(Clone, Default)]
pub struct ViewStore {
    pub tender: Arc<ViewMap<TenderInput, TenderResult>>,
    pub credit: Arc<ViewMap<CreditForm, CreditResult>>,
}

impl ViewStore {
    pub fn new(max_views_per_flow: usize) -> Self {
        Self {
            tender: Arc::new(ViewMap::with_capacity(max_views_per_flow)),
            credit: Arc::new(ViewMap::with_capacity(max_views_per_flow)),
        }
    }

    pub fn evict_expired(&self, ttl: Duration) -> usize {
        self.tender.evict_expired(ttl) + self.credit.evict_expired(ttl)
    }

    /// Periodically evict abandoned views.
    pub fn spawn_sweeper(&self, ttl: Duration, every: Duration) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            // first tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let evicted = store.evict_expired(ttl);
                if evicted > 0 {
                    info!(
                        evicted,
                        tender_views = store.tender.len(),
                        credit_views = store.credit.len(),
                        "Evicted idle views"
                    );
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CreditField, SelectedFile};

    #[test]
    fn get_or_create_returns_the_same_view() {
        let map = ViewMap::<TenderInput, TenderResult>::default();
        let id = Uuid::new_v4();

        let first = map.get_or_create(id).unwrap();
        first
            .lock()
            .edit_input(|input| input.set_file(SelectedFile::new("a.pdf", 10)));

        let second = map.get_or_create(id).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(map.len(), 1);
        assert!(map.get(Uuid::new_v4()).is_none());
    }

    #[test]
    fn submittable_follows_input_and_running_state() {
        let mut view = CreditView::new(Uuid::new_v4());
        assert!(!view.is_submittable());

        view.edit_input(|form| {
            form.set(CreditField::CompanyName, "ACME");
            form.set(CreditField::Sector, "comercio");
            form.set(CreditField::YearsInBusiness, "2");
            form.set(CreditField::MonthlyRevenue, "9000");
        });
        assert!(view.is_submittable());

        view.analysis.begin(true).unwrap();
        assert!(!view.is_submittable());
    }

    #[tokio::test(start_paused = true)]
    async fn eviction_skips_running_views() {
        let map = ViewMap::<TenderInput, TenderResult>::default();
        let idle = Uuid::new_v4();
        let busy = Uuid::new_v4();
        map.get_or_create(idle).unwrap();
        map.get_or_create(busy)
            .unwrap()
            .lock()
            .analysis
            .begin(true)
            .unwrap();

        tokio::time::advance(Duration::from_secs(31)).await;

        assert_eq!(map.evict_expired(Duration::from_secs(30)), 1);
        assert!(map.get(idle).is_none());
        assert!(map.get(busy).is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn recently_seen_views_survive_eviction() {
        let store = ViewStore::default();
        let id = Uuid::new_v4();
        store.credit.get_or_create(id).unwrap();

        tokio::time::advance(Duration::from_secs(20)).await;
        store.credit.get(id);
        tokio::time::advance(Duration::from_secs(20)).await;

        assert_eq!(store.evict_expired(Duration::from_secs(30)), 0);
        assert_eq!(store.credit.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn full_map_makes_room_by_dropping_least_recently_seen_view() {
        let map = ViewMap::<TenderInput, TenderResult>::with_capacity(2);
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        map.get_or_create(first).unwrap();
        tokio::time::advance(Duration::from_secs(1)).await;
        map.get_or_create(second).unwrap();
        tokio::time::advance(Duration::from_secs(1)).await;
        map.get(first);

        let third = Uuid::new_v4();
        map.get_or_create(third).unwrap();

        assert_eq!(map.len(), 2);
        assert!(map.get(first).is_some());
        assert!(map.get(second).is_none());
        assert!(map.get(third).is_some());
    }

    #[test]
    fn full_map_of_running_views_refuses_new_ids() {
        let map = ViewMap::<CreditForm, CreditResult>::with_capacity(1);
        let busy = Uuid::new_v4();
        map.get_or_create(busy)
            .unwrap()
            .lock()
            .analysis
            .begin(true)
            .unwrap();

        let err = map.get_or_create(Uuid::new_v4()).unwrap_err();
        assert_eq!(err, ViewLimitReached(1));
        assert!(map.get_or_create(busy).is_ok());
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn snapshot_reports_state_and_submittable() {
        let mut view = TenderView::new(Uuid::new_v4());
        view.edit_input(|input| input.set_file(SelectedFile::new("tender.pdf", 42)));

        let json = serde_json::to_value(ViewSnapshot::from(&view)).unwrap();
        assert_eq!(json["analysis"]["status"], "idle");
        assert_eq!(json["submittable"], true);
        assert_eq!(json["input"]["file"]["name"], "tender.pdf");
        assert!(json.get("started_at").is_none());
    }
}
