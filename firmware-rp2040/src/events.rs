//! Pipeline events routed to defmt.

use defmt::{debug, info, trace, warn};
use relnav_core::{Event, EventSink};

/// Logs every pipeline event over RTT.
///
/// Routine per-tick noise goes to `trace`, recoverable frame problems to
/// `debug`, and link transitions to `info`/`warn`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefmtEventSink;

impl EventSink for DefmtEventSink {
    fn emit(&mut self, event: Event) {
        match event {
            Event::Incomplete | Event::PoseAccepted => trace!("relnav: {}", event),
            Event::BacklogDrained { bytes } => debug!("relnav: drained {} backlog bytes", bytes),
            Event::Resync { skipped } => debug!("relnav: resync, skipped {} bytes", skipped),
            Event::BadLength { length } => debug!("relnav: bad length byte {}", length),
            Event::ChecksumFailed { computed, received } => debug!(
                "relnav: checksum mismatch, computed {=u8:#x} received {=u8:#x}",
                computed, received
            ),
            Event::VisibilityRejected { seen, required } => debug!(
                "relnav: markers {=u8:#x} of {=u8:#x} in view",
                seen.raw(),
                required.raw()
            ),
            Event::SentinelRejected => debug!("relnav: sensor reported failed estimate"),
            Event::LinkFresh => info!("relnav: link fresh"),
            Event::LinkStale { age_ms } => warn!("relnav: link stale, last pose {} ms ago", age_ms),
            Event::RequestFailed(e) => warn!("relnav: request token not sent: {}", e),
        }
    }
}
