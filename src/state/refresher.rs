use crate::state::messages::NetworkRequest;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

pub const REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// Reloads the schedule on a timer so statuses move from Upcoming to Live to
/// Final while the viewer is open.
pub struct PeriodicRefresher {
    network_requests: mpsc::Sender<NetworkRequest>,
    period: Duration,
}

impl PeriodicRefresher {
    pub fn new(network_requests: mpsc::Sender<NetworkRequest>) -> Self {
        Self { network_requests, period: REFRESH_INTERVAL }
    }

    pub async fn run(self) {
        let mut schedule_interval = interval(self.period);
        // The first tick fires immediately; startup already loads the schedule.
        schedule_interval.tick().await;

        loop {
            schedule_interval.tick().await;
            if self
                .network_requests
                .send(NetworkRequest::RefreshSchedule)
                .await
                .is_err()
            {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_refresh_waits_one_full_period() {
        let (tx, mut rx) = mpsc::channel(4);
        let task = tokio::spawn(PeriodicRefresher::new(tx).run());

        tokio::time::sleep(REFRESH_INTERVAL - Duration::from_secs(1)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(matches!(rx.recv().await, Some(NetworkRequest::RefreshSchedule)));
        task.abort();
    }
}
