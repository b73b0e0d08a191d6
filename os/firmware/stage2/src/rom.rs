//! # ROM Routines and Loader Backends
//!
//! Bindings to the code stage-2 is linked with: the firmware ROM's console,
//! LED and timing routines, and the SD/IDE and Kermit loaders. Loader symbols
//! only exist in builds that enable them.

#[cfg(feature = "kermit")]
use core::ffi::c_int;
use stage2_boot::{BlockDevice, BootSource, LoadError, Loaders, Message, Platform};
use stage2_console::print_cstr;

unsafe extern "C" {
    fn ENABLE_RECV();
    fn mcHalt();
    fn red_led_off();

    #[cfg(feature = "kermit")]
    fn mcBusywait(ticks: u32);

    #[cfg(feature = "blockdev")]
    fn sd_load_kernel() -> bool;
    #[cfg(feature = "blockdev")]
    fn ide_load_kernel() -> bool;

    /// Non-zero on success.
    #[cfg(feature = "kermit")]
    fn receive_kernel() -> c_int;
}

/// One turn of the ROM halt routine.
pub fn halt() {
    // SAFETY: ROM routine, no preconditions.
    unsafe { mcHalt() }
}

/// The machine as stage-2 sees it.
pub struct RomFirmware;

impl Platform for RomFirmware {
    fn enable_receive(&mut self) {
        // SAFETY: ROM routine, no preconditions.
        unsafe { ENABLE_RECV() }
    }

    fn halt(&mut self) {
        halt();
    }

    fn boot_indicator_off(&mut self) {
        // SAFETY: ROM routine, no preconditions.
        unsafe { red_led_off() }
    }

    #[cfg(feature = "kermit")]
    fn busy_wait(&mut self, ticks: u32) {
        // SAFETY: ROM routine, no preconditions.
        unsafe { mcBusywait(ticks) }
    }

    #[cfg(not(feature = "kermit"))]
    fn busy_wait(&mut self, _ticks: u32) {
        // only the Kermit path waits
    }

    fn print(&mut self, message: Message) {
        print_cstr(message.text());
    }
}

impl Loaders for RomFirmware {
    #[cfg(feature = "blockdev")]
    fn load_block_device(&mut self, device: BlockDevice) -> Result<(), LoadError> {
        // SAFETY: the loaders write only to the kernel load area.
        let loaded = unsafe {
            match device {
                BlockDevice::Sd => sd_load_kernel(),
                BlockDevice::Ide => ide_load_kernel(),
            }
        };

        if loaded {
            Ok(())
        } else {
            Err(LoadError::new(BootSource::BlockDevice(device)))
        }
    }

    #[cfg(not(feature = "blockdev"))]
    fn load_block_device(&mut self, device: BlockDevice) -> Result<(), LoadError> {
        Err(LoadError::new(BootSource::BlockDevice(device)))
    }

    #[cfg(feature = "kermit")]
    fn receive_kernel(&mut self) -> Result<(), LoadError> {
        // SAFETY: the receiver writes only to the kernel load area.
        if unsafe { receive_kernel() } != 0 {
            Ok(())
        } else {
            Err(LoadError::new(BootSource::Serial))
        }
    }

    #[cfg(not(feature = "kermit"))]
    fn receive_kernel(&mut self) -> Result<(), LoadError> {
        Err(LoadError::new(BootSource::Serial))
    }
}
