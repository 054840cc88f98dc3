///! Polling loop: position, overhead check, daylight check, notify
use std::time::Duration;

use anyhow::Result;
use chrono::{Timelike, Utc};

use crate::config::MonitorConfig;
use crate::module::daylight;
use crate::module::notify::Mailer;
use crate::module::sat::{self, Coordinate};
use crate::module::visibility::{is_night, is_overhead};

/// Where the current pass stands. Threaded through every tick; there
/// is no global flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PassState {
    /// Satellite outside the observer's bounding box.
    #[default]
    NotOverhead,
    /// Overhead, but the observer is in daylight.
    OverheadDaylight,
    /// Overhead at night; a notification has been issued for this pass.
    Notified,
}

/// Per-tick decision. Returns the next state and whether a
/// notification should be issued this tick.
///
/// The transition into `Notified` does not depend on the send
/// succeeding; a failed send is not retried on later ticks of the
/// same pass.
pub fn advance(state: PassState, overhead: bool, night: bool) -> (PassState, bool) {
    if !overhead {
        return (PassState::NotOverhead, false);
    }
    if !night {
        return (PassState::OverheadDaylight, false);
    }
    (PassState::Notified, state != PassState::Notified)
}

/// The polling loop and its collaborators.
///
/// Runs without a mailer when the mail credentials are not configured;
/// monitoring and status logging proceed, sends are suppressed.
pub struct Monitor {
    observer: Coordinate,
    poll_interval: Duration,
    http: reqwest::Client,
    mailer: Option<Mailer>,
}

impl Monitor {
    pub fn new(config: &MonitorConfig, mailer: Option<Mailer>) -> Result<Self> {
        Ok(Self {
            observer: config.observer(),
            poll_interval: Duration::from_secs(config.poll_interval_secs),
            http: sat::build_client()?,
            mailer,
        })
    }

    /// Run until the process is interrupted.
    pub async fn run(self) -> Result<()> {
        tracing::info!(
            "Monitoring observer at {:.4}, {:.4} (interval: {}s)",
            self.observer.latitude,
            self.observer.longitude,
            self.poll_interval.as_secs()
        );

        let mut ticker = tokio::time::interval(self.poll_interval);
        let mut state = PassState::default();

        loop {
            ticker.tick().await;
            state = self.tick(state).await;
        }
    }

    /// One full tick; every await completes before the next tick starts.
    async fn tick(&self, state: PassState) -> PassState {
        let satellite = match sat::fetch_position(&self.http).await {
            Ok(position) => position,
            Err(e) => {
                tracing::warn!("Position fetch failed, skipping this tick: {:#}", e);
                return state;
            }
        };

        tracing::info!(
            "Current satellite position: {:.2}, {:.2}",
            satellite.latitude,
            satellite.longitude
        );

        if !is_overhead(self.observer, satellite) {
            tracing::debug!("Satellite is not overhead");
            return advance(state, false, false).0;
        }

        tracing::info!("Satellite is within range of the observer");

        // Fetched only while overhead, so a quiet orbit costs one
        // request per tick instead of two.
        let window = match daylight::fetch_window(&self.http, self.observer).await {
            Ok(window) => Some(window),
            Err(e) => {
                tracing::warn!("Daylight fetch failed, assuming night: {:#}", e);
                None
            }
        };

        let night = is_night(window, Utc::now().hour());
        let (next, notify) = advance(state, true, night);

        if !night {
            tracing::info!("Observer is in daylight, pass not visible");
        } else if notify {
            tracing::info!("Satellite is overhead and the sky is dark");
            match &self.mailer {
                Some(mailer) => match mailer.send_pass_alert(self.observer, satellite).await {
                    Ok(()) => tracing::info!("Notification email sent"),
                    Err(e) => tracing::error!("Failed to send notification: {:#}", e),
                },
                None => {
                    tracing::info!("Notification suppressed: mail credentials not configured")
                }
            }
        } else {
            tracing::debug!("Pass already notified, staying quiet");
        }

        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_sequence(ticks: &[(bool, bool)]) -> (PassState, usize) {
        let mut state = PassState::default();
        let mut sends = 0;
        for &(overhead, night) in ticks {
            let (next, notify) = advance(state, overhead, night);
            state = next;
            if notify {
                sends += 1;
            }
        }
        (state, sends)
    }

    #[test]
    fn test_initial_state_is_not_overhead() {
        assert_eq!(PassState::default(), PassState::NotOverhead);
    }

    #[test]
    fn test_single_notification_per_dark_pass() {
        let (state, sends) = run_sequence(&[(true, true), (true, true), (true, true)]);
        assert_eq!(state, PassState::Notified);
        assert_eq!(sends, 1);
    }

    #[test]
    fn test_daylight_break_rearms_the_notification() {
        // overhead+night, overhead+night, overhead+day, overhead+night
        let (state, sends) = run_sequence(&[(true, true), (true, true), (true, false), (true, true)]);
        assert_eq!(state, PassState::Notified);
        assert_eq!(sends, 2);
    }

    #[test]
    fn test_leaving_the_box_rearms_the_notification() {
        let (state, sends) = run_sequence(&[(true, true), (false, true), (true, true)]);
        assert_eq!(state, PassState::Notified);
        assert_eq!(sends, 2);
    }

    #[test]
    fn test_daytime_pass_never_notifies() {
        let (state, sends) = run_sequence(&[(true, false), (true, false), (false, false)]);
        assert_eq!(state, PassState::NotOverhead);
        assert_eq!(sends, 0);
    }

    #[test]
    fn test_not_overhead_never_notifies() {
        let (state, sends) = run_sequence(&[(false, true), (false, false)]);
        assert_eq!(state, PassState::NotOverhead);
        assert_eq!(sends, 0);
    }
}
