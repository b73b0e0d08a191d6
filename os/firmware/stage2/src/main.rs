//! # Stage-2 Firmware Entry Points
//!
//! The ROM's stage-2 startup code calls [`linit`] and then [`lmain`]. Nothing
//! in `.bss` may be touched before `linit` returns.

#![no_std]
#![no_main]
#![allow(unsafe_code)]

mod rom;

use crate::rom::RomFirmware;
use stage2_boot::bss::BssRegion;
use stage2_boot::{BootConfig, KernelEntryPoint, SEVERE_TAG, SystemDataBlockRef};
use stage2_console::console_print;
use stage2_info::memory::KERNEL_LOAD_ADDRESS;

/// The boot sources compiled into this image. `build.rs` rejects unsupported
/// feature combinations before this is evaluated.
const BOOT_CONFIG: BootConfig = match BootConfig::from_flags(
    cfg!(feature = "quickload"),
    cfg!(feature = "blockdev"),
    cfg!(feature = "kermit"),
) {
    Some(config) => config,
    None => panic!("unsupported boot source feature combination"),
};

/// Where loaders place the kernel image. Kept for loader backends that
/// reference the symbol instead of the constant.
#[unsafe(no_mangle)]
#[allow(non_upper_case_globals)]
pub static mut kernel_load_ptr: *mut u8 = KERNEL_LOAD_ADDRESS as *mut u8;

unsafe extern "C" {
    static mut _bss_start: u32;
    static mut _bss_end: u32;
}

/// Zero `.bss`.
#[unsafe(no_mangle)]
pub extern "C" fn linit() {
    // SAFETY: the linker script places both symbols word-aligned around
    // `.bss`, and nothing holds a reference into it yet.
    let bss = unsafe { BssRegion::new(&raw mut _bss_start, &raw mut _bss_end) };
    bss.zero();
}

/// Find a kernel and start it.
#[unsafe(no_mangle)]
pub extern "C" fn lmain() -> ! {
    #[cfg(feature = "trace-log")]
    let _ = stage2_console::ConsoleLogger::new(log::LevelFilter::Trace).init();

    let sdb = SystemDataBlockRef::fixed();

    // SAFETY: KERNEL_LOAD_ADDRESS is non-zero; the entry point is only called
    // after a loader reported a complete image there.
    let entry = unsafe { KernelEntryPoint::fixed() };

    log::debug!("Stage 2 up, kernel entry at {entry:?}");
    stage2_boot::boot(BOOT_CONFIG, RomFirmware, sdb, entry)
}

#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    console_print!("{SEVERE_TAG}Stage 2 panic: {}\r\n", info.message());
    loop {
        rom::halt();
    }
}
