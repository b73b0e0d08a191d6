//! # Boot Interface

use crate::memory::SDB_ADDRESS;
use core::fmt;
use core::marker::{PhantomData, PhantomPinned};

/// Kernel function pointer, as found at
/// [`KERNEL_LOAD_ADDRESS`](crate::memory::KERNEL_LOAD_ADDRESS).
///
/// # ABI
/// Plain C ABI: the System Data Block pointer is passed on the stack.
/// Kernels must not return; the firmware treats a return as a contract violation.
pub type KernelEntryFn = extern "C" fn(*mut SystemDataBlock);

/// The System Data Block.
///
/// Its fields are owned by the firmware ROM and the kernel; stage-2 never
/// looks inside. Modeled as an opaque FFI type so it can only be handled
/// behind a pointer.
#[repr(C)]
pub struct SystemDataBlock {
    _data: [u8; 0],
    _marker: PhantomData<(*mut u8, PhantomPinned)>,
}

/// Handle to the System Data Block.
///
/// The handle is forwarded to the kernel unmodified and never dereferenced
/// by stage-2.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct SystemDataBlockRef(*mut SystemDataBlock);

impl SystemDataBlockRef {
    /// The handle at the platform's fixed [`SDB_ADDRESS`].
    #[must_use]
    pub const fn fixed() -> Self {
        Self::at_address(SDB_ADDRESS)
    }

    /// A handle at an arbitrary address.
    #[must_use]
    pub const fn at_address(address: usize) -> Self {
        Self(core::ptr::with_exposed_provenance_mut(address))
    }

    #[inline]
    #[must_use]
    pub const fn as_ptr(self) -> *mut SystemDataBlock {
        self.0
    }

    #[inline]
    #[must_use]
    pub fn address(self) -> usize {
        self.0.expose_provenance()
    }
}

impl fmt::Debug for SystemDataBlockRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SystemDataBlockRef({:#010x})", self.address())
    }
}

/// A block device the stage-2 firmware can boot from.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BlockDevice {
    /// SD card on the SPI bus. Tried first.
    Sd,
    /// IDE/ATA drive. Tried second.
    Ide,
}

impl fmt::Display for BlockDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sd => f.write_str("SD"),
            Self::Ide => f.write_str("IDE"),
        }
    }
}

/// A backend able to place a kernel image at the load address.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BootSource {
    /// The image is already in memory (emulator quickload / test harness).
    Quickload,
    /// Probe-and-load from a FAT filesystem on a block device.
    BlockDevice(BlockDevice),
    /// Kermit receive over the serial line.
    Serial,
}

impl fmt::Display for BootSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quickload => f.write_str("quickload"),
            Self::BlockDevice(device) => write!(f, "{device} block device"),
            Self::Serial => f.write_str("Kermit serial receive"),
        }
    }
}

/// Block devices in the order they are probed.
const BLOCK_DEVICE_ORDER: &[BlockDevice] = &[BlockDevice::Sd, BlockDevice::Ide];

/// The boot source configuration compiled into a firmware image.
///
/// Exactly one configuration is active per build. The set and order of the
/// sources is fixed here and cannot change at runtime.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BootConfig {
    /// Kernel already present in memory; no loader runs.
    Quickload,
    /// SD, then IDE; halt if neither yields a kernel.
    BlockDevice,
    /// Kermit receive, retried forever.
    Serial,
    /// SD, then IDE, then Kermit receive retried forever.
    BlockDeviceThenSerial,
}

impl BootConfig {
    /// Maps the build feature flags to a configuration.
    ///
    /// Returns `None` for every combination that is not a documented
    /// configuration, including "no loader at all".
    #[must_use]
    pub const fn from_flags(quickload: bool, blockdev: bool, kermit: bool) -> Option<Self> {
        match (quickload, blockdev, kermit) {
            (true, false, false) => Some(Self::Quickload),
            (false, true, false) => Some(Self::BlockDevice),
            (false, false, true) => Some(Self::Serial),
            (false, true, true) => Some(Self::BlockDeviceThenSerial),
            _ => None,
        }
    }

    /// Whether the kernel is treated as already loaded.
    #[must_use]
    pub const fn quickload(self) -> bool {
        matches!(self, Self::Quickload)
    }

    /// Block devices to probe, in order. Empty if block-device boot is not configured.
    #[must_use]
    pub const fn block_devices(self) -> &'static [BlockDevice] {
        match self {
            Self::BlockDevice | Self::BlockDeviceThenSerial => BLOCK_DEVICE_ORDER,
            Self::Quickload | Self::Serial => &[],
        }
    }

    /// Whether the Kermit serial receiver is the final fallback.
    #[must_use]
    pub const fn serial(self) -> bool {
        matches!(self, Self::Serial | Self::BlockDeviceThenSerial)
    }
}

impl fmt::Display for BootConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quickload => f.write_str("quickload"),
            Self::BlockDevice => f.write_str("blockdev"),
            Self::Serial => f.write_str("kermit"),
            Self::BlockDeviceThenSerial => f.write_str("blockdev+kermit"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documented_flag_combinations() {
        assert_eq!(
            BootConfig::from_flags(true, false, false),
            Some(BootConfig::Quickload)
        );
        assert_eq!(
            BootConfig::from_flags(false, true, false),
            Some(BootConfig::BlockDevice)
        );
        assert_eq!(
            BootConfig::from_flags(false, false, true),
            Some(BootConfig::Serial)
        );
        assert_eq!(
            BootConfig::from_flags(false, true, true),
            Some(BootConfig::BlockDeviceThenSerial)
        );
    }

    #[test]
    fn undocumented_flag_combinations_are_rejected() {
        assert_eq!(BootConfig::from_flags(false, false, false), None);
        assert_eq!(BootConfig::from_flags(true, true, false), None);
        assert_eq!(BootConfig::from_flags(true, false, true), None);
        assert_eq!(BootConfig::from_flags(true, true, true), None);
    }

    #[test]
    fn block_devices_are_probed_sd_first() {
        for config in [BootConfig::BlockDevice, BootConfig::BlockDeviceThenSerial] {
            assert_eq!(config.block_devices(), &[BlockDevice::Sd, BlockDevice::Ide]);
        }
        assert!(BootConfig::Quickload.block_devices().is_empty());
        assert!(BootConfig::Serial.block_devices().is_empty());
    }

    #[test]
    fn plans() {
        assert!(BootConfig::Quickload.quickload());
        assert!(!BootConfig::Quickload.serial());
        assert!(!BootConfig::BlockDevice.serial());
        assert!(BootConfig::Serial.serial());
        assert!(BootConfig::BlockDeviceThenSerial.serial());
        assert!(!BootConfig::BlockDeviceThenSerial.quickload());
    }

    #[test]
    fn sdb_handle_is_built_at_compile_time() {
        const SDB: SystemDataBlockRef = SystemDataBlockRef::fixed();
        assert_eq!(SDB.address(), SDB_ADDRESS);
    }

    #[test]
    fn fixed_sdb_handle_points_at_sdb_address() {
        let sdb = SystemDataBlockRef::fixed();
        assert_eq!(sdb.address(), SDB_ADDRESS);
        assert_eq!(sdb, SystemDataBlockRef::at_address(0x400));
    }

    #[test]
    fn source_names() {
        use std::string::ToString;

        assert_eq!(
            BootSource::BlockDevice(BlockDevice::Ide).to_string(),
            "IDE block device"
        );
        assert_eq!(BootSource::Serial.to_string(), "Kermit serial receive");
    }
}
