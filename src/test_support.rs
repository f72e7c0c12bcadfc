//! A minimal in-memory [`Host`] implementation shared by this crate's own
//! test modules. Not exported: a real host implementation is out of scope
//! for this crate (see `src/host.rs`), this one exists purely so the tree,
//! placement, mutation, swap and resize modules have something concrete to
//! exercise against.
#![cfg(test)]

use crate::{geometry::Rect, host::Host};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct TestClient(pub u32);

#[derive(Debug, Default, Clone)]
pub(crate) struct TestHost {
    next_id: u32,
    monitor: HashMap<TestClient, u32>,
    visible: HashMap<TestClient, bool>,
    floating: HashMap<TestClient, bool>,
    fullscreen: HashMap<TestClient, bool>,
    geometry: HashMap<TestClient, Rect>,
    pub(crate) placements: HashMap<TestClient, Rect>,
    pub(crate) orders: HashMap<u32, Vec<TestClient>>,
    pub(crate) rearrange_requests: Vec<u32>,
}

impl TestHost {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Register a new client on `monitor` with the given state, returning
    /// its handle.
    pub(crate) fn map(
        &mut self,
        monitor: u32,
        visible: bool,
        floating: bool,
        fullscreen: bool,
    ) -> TestClient {
        let c = TestClient(self.next_id);
        self.next_id += 1;

        self.monitor.insert(c, monitor);
        self.visible.insert(c, visible);
        self.floating.insert(c, floating);
        self.fullscreen.insert(c, fullscreen);
        self.geometry.insert(c, Rect::default());

        c
    }

    pub(crate) fn set_geometry(&mut self, c: TestClient, r: Rect) {
        self.geometry.insert(c, r);
    }

    pub(crate) fn set_floating(&mut self, c: TestClient, floating: bool) {
        self.floating.insert(c, floating);
    }
}

impl Host<TestClient, u32> for TestHost {
    fn clients_on(&self, m: u32) -> Vec<TestClient> {
        let mut clients: Vec<_> = self
            .monitor
            .iter()
            .filter(|(_, &mon)| mon == m)
            .map(|(&c, _)| c)
            .collect();
        clients.sort_by_key(|c| c.0);
        clients
    }

    fn visible_on(&self, c: TestClient, m: u32) -> bool {
        self.monitor.get(&c) == Some(&m) && *self.visible.get(&c).unwrap_or(&false)
    }

    fn is_floating(&self, c: TestClient) -> bool {
        *self.floating.get(&c).unwrap_or(&false)
    }

    fn is_fullscreen(&self, c: TestClient) -> bool {
        *self.fullscreen.get(&c).unwrap_or(&false)
    }

    fn geometry(&self, c: TestClient) -> Rect {
        *self.geometry.get(&c).unwrap_or(&Rect::default())
    }

    fn resize(&mut self, c: TestClient, area: Rect) {
        self.placements.insert(c, area);
        self.geometry.insert(c, area);
    }

    fn request_rearrange(&mut self, m: u32) {
        self.rearrange_requests.push(m);
    }

    fn set_client_order(&mut self, m: u32, order: Vec<TestClient>) {
        self.orders.insert(m, order);
    }
}
