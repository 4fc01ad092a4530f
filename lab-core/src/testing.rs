//! Fakes shared by the unit tests.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use lab_client::{ApiError, Endpoint, LabClient, RequestBody, Transport};
use serde_json::Value;
use crate::chart::{ChartSlot, ChartSpec, ChartSurface};

/// Chart surface that records what would have been drawn.
pub struct RecordingSurface {
    mounted: HashSet<ChartSlot>,
    next_id: u32,
    live: HashMap<ChartSlot, Vec<u32>>,
    pub destroyed: usize,
    pub events: Vec<String>,
}

impl RecordingSurface {
    pub fn mounted(slots: &[ChartSlot]) -> Self {
        Self {
            mounted: slots.iter().copied().collect(),
            next_id: 0,
            live: HashMap::new(),
            destroyed: 0,
            events: Vec::new(),
        }
    }

    pub fn all_mounted() -> Self {
        Self::mounted(&ChartSlot::ALL)
    }

    pub fn alive(&self, slot: ChartSlot) -> usize {
        self.live.get(&slot).map_or(0, Vec::len)
    }
}

impl ChartSurface for RecordingSurface {
    type Chart = u32;

    fn is_mounted(&self, slot: ChartSlot) -> bool {
        self.mounted.contains(&slot)
    }

    fn mount(&mut self, slot: ChartSlot, _spec: &ChartSpec) -> u32 {
        self.next_id += 1;
        self.live.entry(slot).or_default().push(self.next_id);
        self.events.push(format!("mount {} #{}", slot.canvas_id(), self.next_id));
        self.next_id
    }

    fn destroy(&mut self, slot: ChartSlot, chart: u32) {
        if let Some(ids) = self.live.get_mut(&slot) {
            ids.retain(|id| *id != chart);
        }
        self.destroyed += 1;
        self.events.push(format!("destroy {} #{chart}", slot.canvas_id()));
    }
}

/// Serves canned JSON by route and records every request it sees.
#[derive(Default)]
pub struct FakeBackend {
    routes: RefCell<HashMap<String, Result<Value, ApiError>>>,
    pub calls: RefCell<Vec<String>>,
    pub uploads: RefCell<Vec<String>>,
    pub json_bodies: RefCell<Vec<Value>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// `route` is the unencoded path, e.g. `/data/files`.
    pub fn on(mut self, route: &str, body: Value) -> Self {
        self.routes.get_mut().insert(route.to_string(), Ok(body));
        self
    }

    pub fn failing(mut self, route: &str, err: ApiError) -> Self {
        self.routes.get_mut().insert(route.to_string(), Err(err));
        self
    }

    pub fn set(&self, route: &str, body: Value) {
        self.routes.borrow_mut().insert(route.to_string(), Ok(body));
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn client(self) -> LabClient<FakeBackend> {
        LabClient::with_transport(self)
    }
}

impl Transport for FakeBackend {
    async fn request(&self, endpoint: &Endpoint, body: RequestBody<'_>) -> Result<Value, ApiError> {
        self.calls.borrow_mut().push(endpoint.to_string());
        match body {
            RequestBody::File(file) => self.uploads.borrow_mut().push(file.name.clone()),
            RequestBody::Json(value) => self.json_bodies.borrow_mut().push(value.clone()),
            RequestBody::Empty => {}
        }
        self.routes
            .borrow()
            .get(&endpoint.route())
            .cloned()
            .unwrap_or_else(|| Err(ApiError::from_status(404, r#"{"detail": "Not Found"}"#)))
    }
}
