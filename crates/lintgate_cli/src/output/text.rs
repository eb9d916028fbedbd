//! Text output formatter

use lintgate_core::ExecutionStateStore;

pub fn output_text(store: &ExecutionStateStore) {
    let libs = &store.libraries().libs;

    if libs.is_empty() {
        println!("No library execution decisions stored.");
    } else {
        for (library, approved) in libs {
            let decision = if *approved { "allowed" } else { "denied" };
            println!("  {:<8} {}", decision, library);
        }
    }

    println!();
    println!(
        "Always allow: {}",
        if store.always_allow() { "on" } else { "off" }
    );
}
