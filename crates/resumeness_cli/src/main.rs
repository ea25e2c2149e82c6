//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `resumeness_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use resumeness_core::DocumentSession;

fn main() {
    let outline = DocumentSession::starter().outline();

    println!("resumeness_core version={}", resumeness_core::core_version());
    println!("starter title={}", outline.title);
    for section in &outline.sections {
        println!("starter section={}", section.title);
    }
}
