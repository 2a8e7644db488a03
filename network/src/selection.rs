//! Endpoint selection strategies.
//!
//! Both strategies reduce probe results listed in DNS order. `None` means
//! the candidate did not answer.

use futures_util::stream::{self, Stream, StreamExt};
use futures_util::FutureExt;
use std::pin::pin;
use tracing::debug;

/// Submission role: first candidate whose liveness status falls inside
/// `[min_status, max_status]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReachabilityFirst {
    pub min_status: u16,
    pub max_status: u16,
}

impl Default for ReachabilityFirst {
    fn default() -> Self {
        Self {
            min_status: 1,
            max_status: 499,
        }
    }
}

impl ReachabilityFirst {
    pub fn new(min_status: u16, max_status: u16) -> Self {
        Self {
            min_status,
            max_status,
        }
    }

    pub fn accepts(&self, status: u16) -> bool {
        (self.min_status..=self.max_status).contains(&status)
    }

    /// Index and status of the first accepted probe.
    pub fn select(&self, probes: &[Option<u16>]) -> Option<(usize, u16)> {
        self.first_accepted(stream::iter(probes.iter().copied()))
            .now_or_never()
            .flatten()
    }

    /// Pull probe results in order and stop at the first accepted one.
    ///
    /// Nothing past the accepted item is polled, so a lazy stream of probes
    /// never contacts the remaining candidates.
    pub async fn first_accepted<S>(&self, probes: S) -> Option<(usize, u16)>
    where
        S: Stream<Item = Option<u16>>,
    {
        let mut probes = pin!(probes.enumerate());
        while let Some((index, probe)) = probes.next().await {
            match probe {
                Some(status) if self.accepts(status) => return Some((index, status)),
                Some(status) => debug!(index, status, "liveness status rejected"),
                None => debug!(index, "liveness probe unanswered"),
            }
        }
        None
    }
}

/// Query role: strictly highest reported height, earliest candidate on ties.
///
/// Non-responders never win, so a responder reporting height 0 still beats
/// them. With no responder at all there is no selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeightMaximizing;

impl HeightMaximizing {
    pub fn select(&self, probes: &[Option<u64>]) -> Option<(usize, u64)> {
        let mut best: Option<(usize, u64)> = None;
        for (i, probe) in probes.iter().enumerate() {
            let Some(height) = *probe else { continue };
            match best {
                Some((_, top)) if height <= top => {}
                _ => best = Some((i, height)),
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reachability_skips_5xx_and_silence() {
        let s = ReachabilityFirst::default();
        assert_eq!(s.select(&[Some(503), None, Some(200)]), Some((2, 200)));
    }

    #[test]
    fn reachability_accepts_4xx() {
        let s = ReachabilityFirst::default();
        assert_eq!(s.select(&[Some(404), Some(200)]), Some((0, 404)));
        assert!(s.accepts(1));
        assert!(s.accepts(499));
        assert!(!s.accepts(0));
        assert!(!s.accepts(500));
    }

    #[test]
    fn reachability_none_accepted() {
        let s = ReachabilityFirst::default();
        assert_eq!(s.select(&[Some(500), None, Some(502)]), None);
        assert_eq!(s.select(&[]), None);
    }

    #[test]
    fn reachability_custom_range() {
        let s = ReachabilityFirst::new(200, 299);
        assert_eq!(s.select(&[Some(404), Some(204)]), Some((1, 204)));
    }

    #[tokio::test]
    async fn first_accepted_stops_pulling() {
        let s = ReachabilityFirst::default();
        let mut pulled = 0;
        let probes = stream::iter([Some(502), None, Some(301), Some(200)]).inspect(|_| pulled += 1);
        assert_eq!(s.first_accepted(probes).await, Some((2, 301)));
        assert_eq!(pulled, 3);
    }

    #[test]
    fn height_ties_go_to_earliest() {
        let s = HeightMaximizing;
        assert_eq!(s.select(&[Some(100), Some(250), Some(250)]), Some((1, 250)));
    }

    #[test]
    fn height_ignores_non_responders() {
        let s = HeightMaximizing;
        assert_eq!(s.select(&[None, Some(0), None]), Some((1, 0)));
        assert_eq!(s.select(&[None, None]), None);
        assert_eq!(s.select(&[]), None);
    }

    #[test]
    fn height_picks_later_strictly_higher() {
        let s = HeightMaximizing;
        assert_eq!(s.select(&[Some(7), None, Some(8), Some(3)]), Some((2, 8)));
    }
}
