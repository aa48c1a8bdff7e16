use std::env;

fn main() {
    // Flash partition geometry for FlashNvs (optional)
    // Parsed at runtime by FlashNvsConfig::default(); invalid values fall back
    // to the built-in defaults

    // Partition base address (hex with 0x prefix, or decimal)
    if let Ok(base) = env::var("NVS_PARTITION_BASE") {
        println!("cargo:rustc-env=NVS_PARTITION_BASE={}", base);
        println!(
            "cargo:warning=Using NVS_PARTITION_BASE from environment: {}",
            base
        );
    } else {
        println!("cargo:rustc-env=NVS_PARTITION_BASE=0x040000");
    }

    // Number of 4 KB slots in the rotation ring
    if let Ok(slots) = env::var("NVS_PARTITION_SLOTS") {
        println!("cargo:rustc-env=NVS_PARTITION_SLOTS={}", slots);
        println!(
            "cargo:warning=Using NVS_PARTITION_SLOTS from environment: {}",
            slots
        );
    } else {
        println!("cargo:rustc-env=NVS_PARTITION_SLOTS=4");
    }

    // Rerun if environment variables change
    println!("cargo:rerun-if-env-changed=NVS_PARTITION_BASE");
    println!("cargo:rerun-if-env-changed=NVS_PARTITION_SLOTS");
}
