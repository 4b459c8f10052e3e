//! Helpers for driving a headless [`VirtualDom`] in tests.

use std::time::Duration;

use dioxus::dioxus_core::NoOpMutations;
use dioxus::prelude::*;

/// Run queued tasks, effects and renders until the dom goes quiet.
pub(crate) async fn settle(dom: &mut VirtualDom) {
    for _ in 0..8 {
        let _ = tokio::time::timeout(Duration::from_millis(10), dom.wait_for_work()).await;
        dom.render_immediate(&mut NoOpMutations);
    }
}
