use stage2_info::boot::BootConfig;
use stage2_info::memory;
use std::{env, path::PathBuf};

fn main() {
    // Point to the linker script
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let ld = manifest_dir.join("stage2.ld");

    // Fail fast on a boot source combination that is not supported
    let feature = |name: &str| env::var_os(format!("CARGO_FEATURE_{name}")).is_some();
    let config =
        BootConfig::from_flags(feature("QUICKLOAD"), feature("BLOCKDEV"), feature("KERMIT"));
    assert!(
        config.is_some(),
        "unsupported boot source features; enable exactly one of \
         `quickload`, `blockdev`, `kermit`, or `blockdev` + `kermit`"
    );

    // Sanity checks on the platform layout
    let stage2_base = memory::STAGE2_BASE;
    let sdb = memory::SDB_ADDRESS;
    let kernel_load = memory::KERNEL_LOAD_ADDRESS;
    assert!(
        sdb < stage2_base && stage2_base < kernel_load,
        "STAGE2_BASE ({stage2_base:#x}) must lie between {sdb:#x} and {kernel_load:#x}"
    );
    assert_eq!(
        stage2_base & 0x3,
        0,
        "STAGE2_BASE must be 4-byte aligned (got {stage2_base:#x})"
    );

    // Rebuild when inputs change
    println!("cargo:rerun-if-changed={}", ld.display());

    // Linker script
    println!("cargo:rustc-link-arg-bins=-T{}", ld.display());

    // Provide symbols to the linker script
    println!("cargo:rustc-link-arg-bins=--defsym=STAGE2_BASE={stage2_base:#x}");
    println!("cargo:rustc-link-arg-bins=--defsym=SDB_ADDRESS={sdb:#x}");
    println!("cargo:rustc-link-arg-bins=--defsym=KERNEL_LOAD_ADDRESS={kernel_load:#x}");
}
