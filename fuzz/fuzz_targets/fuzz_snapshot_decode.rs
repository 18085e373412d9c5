#![no_main]

use libfuzzer_sys::fuzz_target;
use stakepoll_nullables::NullAsset;
use stakepoll_poll::PollController;
use std::sync::Arc;

fuzz_target!(|data: &[u8]| {
    // Restoring must reject malformed or inconsistent images without panicking.
    let _ = bincode::deserialize::<stakepoll_poll::PollSnapshot>(data);
    let _ = bincode::deserialize::<stakepoll_types::Ballot>(data);

    if let Ok(mut poll) = PollController::load_state(data, Arc::new(NullAsset::new())) {
        // A restored poll must survive further calls.
        let _ = poll.end_poll();
        let _ = poll.save_state();
    }
});
