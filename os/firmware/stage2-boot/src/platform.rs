use crate::{LoadError, Message};
use stage2_info::boot::BlockDevice;

/// Machine primitives the sequencer drives. All calls are blocking and
/// fire-and-forget.
pub trait Platform {
    /// Enable the serial receiver. Called once, before any boot source runs.
    fn enable_receive(&mut self);

    /// One turn of the hardware halt primitive. The sequencer calls this
    /// forever once it has given up.
    fn halt(&mut self);

    /// Switch off the boot-in-progress indicator.
    fn boot_indicator_off(&mut self);

    /// Busy-wait for `ticks` firmware delay units.
    fn busy_wait(&mut self, ticks: u32);

    /// Print a line on the boot console.
    fn print(&mut self, message: Message);
}

/// Loader backends. Each call either leaves a complete kernel image at the
/// load address or fails without partial success.
pub trait Loaders {
    /// Probe a block device and load the kernel from it.
    ///
    /// # Errors
    /// The device is absent, unreadable or holds no kernel.
    fn load_block_device(&mut self, device: BlockDevice) -> Result<(), LoadError>;

    /// Run one Kermit receive.
    ///
    /// # Errors
    /// The transfer failed or was aborted by the sender.
    fn receive_kernel(&mut self) -> Result<(), LoadError>;
}

/// Everything the sequencer needs from the machine besides the kernel itself.
pub trait Firmware: Platform + Loaders {}

impl<T> Firmware for T where T: Platform + Loaders {}
