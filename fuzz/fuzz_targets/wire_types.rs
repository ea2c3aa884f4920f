#![no_main]

use libfuzzer_sys::fuzz_target;
use resv_client::{Allocation, LeaseEnvelope, ResourceProperty};

fuzz_target!(|data: &[u8]| {
    if let Ok(envelope) = serde_json::from_slice::<LeaseEnvelope>(data) {
        let lease = envelope.lease;
        let _ = lease.reservation_of_type("physical:host");
        let _ = lease.start_at();
        let _ = lease.end_at();
    }
    if let Ok(allocation) = serde_json::from_slice::<Allocation>(data) {
        let _ = allocation.holds_reservation("resv-1");
    }
    let _ = serde_json::from_slice::<ResourceProperty>(data);
});
