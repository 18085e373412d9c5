#![no_main]

use libfuzzer_sys::fuzz_target;
use stakepoll_sim::{SimConfig, Scenario};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(config) = SimConfig::from_toml_str(text) {
        if let Ok(mut scenario) = Scenario::new(&config) {
            let _ = scenario.run();
        }
    }
});
