//! Hop and trace data types.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Returns true if the status code falls in the redirect range `[300, 400)`.
pub(crate) fn is_redirect_status(status_code: u16) -> bool {
    (300..400).contains(&status_code)
}

/// One observed request/response step of a redirect chain.
///
/// Serializes as an object with exactly three fields. `duration` is written as
/// an integer number of nanoseconds so the value round-trips exactly; divide by
/// 1,000,000 for milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HopRecord {
    /// The exact URL requested for this hop
    pub url: String,
    /// HTTP status of the response
    pub status_code: u16,
    /// Time from sending the request to receiving the response headers
    #[serde(with = "duration_nanos")]
    pub duration: Duration,
}

impl HopRecord {
    /// True if this hop answered with a redirect status.
    pub fn is_redirect(&self) -> bool {
        is_redirect_status(self.status_code)
    }
}

/// The ordered hops produced by one trace, starting with the initial URL.
///
/// Only the tracer appends to a trace; callers get read-only access. Serializes
/// as a JSON array of [`HopRecord`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trace {
    hops: Vec<HopRecord>,
}

impl Trace {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, hop: HopRecord) {
        self.hops.push(hop);
    }

    /// All hops in request order.
    pub fn hops(&self) -> &[HopRecord] {
        &self.hops
    }

    /// Number of hops recorded.
    pub fn len(&self) -> usize {
        self.hops.len()
    }

    /// True if no request completed.
    pub fn is_empty(&self) -> bool {
        self.hops.is_empty()
    }

    /// The last hop issued, if any.
    pub fn last(&self) -> Option<&HopRecord> {
        self.hops.last()
    }

    /// Status code of the last hop.
    pub fn final_status(&self) -> Option<u16> {
        self.last().map(|hop| hop.status_code)
    }

    /// True if the trace ended on a non-redirect response.
    ///
    /// A trace that ran into the hop limit ends on a redirect and is therefore
    /// incomplete; the limit itself is not reported as an error.
    pub fn is_complete(&self) -> bool {
        self.last().is_some_and(|hop| !hop.is_redirect())
    }

    /// Iterates over the hops in request order.
    pub fn iter(&self) -> std::slice::Iter<'_, HopRecord> {
        self.hops.iter()
    }

    /// Consumes the trace, returning the hops.
    pub fn into_hops(self) -> Vec<HopRecord> {
        self.hops
    }
}

impl IntoIterator for Trace {
    type Item = HopRecord;
    type IntoIter = std::vec::IntoIter<HopRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.hops.into_iter()
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a HopRecord;
    type IntoIter = std::slice::Iter<'a, HopRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.hops.iter()
    }
}

mod duration_nanos {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        // Saturates after ~584 years
        let nanos = u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX);
        serializer.serialize_u64(nanos)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_nanos)
    }
}
