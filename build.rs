//! Stamps the build timestamp reported by the `d` command.
//!
//! `POWERMON_BUILD_DATE` is exported as `YYYY-MM-DD HH:MM` (UTC).  When
//! `SOURCE_DATE_EPOCH` is set the stamp is reproducible.  ESP-IDF builds
//! also forward the toolchain environment from `esp-idf-sys`.

use chrono::{DateTime, Utc};

fn main() {
    println!("cargo:rerun-if-env-changed=SOURCE_DATE_EPOCH");
    println!("cargo:rerun-if-changed=build.rs");

    let stamp = std::env::var("SOURCE_DATE_EPOCH")
        .ok()
        .and_then(|s| s.trim().parse::<i64>().ok())
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .unwrap_or_else(Utc::now);

    println!(
        "cargo:rustc-env=POWERMON_BUILD_DATE={}",
        stamp.format("%Y-%m-%d %H:%M")
    );

    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
