use std::sync::Arc;
use tokio::time::{Duration, interval};
use tracing::{debug, info};

use crate::metrics::TRACKED_CLIENTS;
use crate::state::ClientAdmission;

// Periodically evicts idle client records so the admission state does not
// grow with every address ever seen
pub async fn sweeper(admission: Arc<ClientAdmission>, every: Duration) {
    let mut interval = interval(every);

    info!("Sweeper started (interval: {:?})", every);

    loop {
        interval.tick().await;

        let removed = admission.sweep();
        let remaining = admission.tracked_clients();
        TRACKED_CLIENTS.set(remaining as i64);

        if removed > 0 {
            debug!(removed, remaining, "evicted idle clients");
        }
    }
}
