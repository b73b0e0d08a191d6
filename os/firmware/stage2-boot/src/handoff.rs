//! # Kernel Handoff

use stage2_info::boot::{KernelEntryFn, SystemDataBlockRef};
use stage2_info::memory::KERNEL_LOAD_ADDRESS;

/// Capability to transfer control to a loaded kernel.
///
/// A conforming kernel never returns from [`enter`](Self::enter). If it does,
/// the caller regains control and reports the broken contract.
pub trait KernelEntry {
    fn enter(&self, sdb: SystemDataBlockRef);
}

/// Kernel entry through a function pointer at a raw address.
#[derive(Copy, Clone)]
pub struct KernelEntryPoint(KernelEntryFn);

impl KernelEntryPoint {
    #[must_use]
    pub const fn from_fn(entry: KernelEntryFn) -> Self {
        Self(entry)
    }

    /// The entry point at the platform's [`KERNEL_LOAD_ADDRESS`].
    ///
    /// # Safety
    /// See [`at_address`](Self::at_address).
    #[must_use]
    pub unsafe fn fixed() -> Self {
        unsafe { Self::at_address(KERNEL_LOAD_ADDRESS) }
    }

    /// # Safety
    /// - `address` must be non-zero.
    /// - Before [`KernelEntry::enter`] is called, `address` must hold
    ///   executable code following the [`KernelEntryFn`] ABI.
    #[must_use]
    pub unsafe fn at_address(address: usize) -> Self {
        let code: *const () = core::ptr::with_exposed_provenance(address);
        Self(unsafe { core::mem::transmute::<*const (), KernelEntryFn>(code) })
    }

    #[must_use]
    pub fn address(self) -> usize {
        self.0 as usize
    }
}

impl KernelEntry for KernelEntryPoint {
    fn enter(&self, sdb: SystemDataBlockRef) {
        (self.0)(sdb.as_ptr());
    }
}

impl core::fmt::Debug for KernelEntryPoint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "KernelEntryPoint({:#010x})", self.address())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stage2_info::boot::SystemDataBlock;
    use stage2_info::memory::SDB_ADDRESS;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static SEEN_SDB: AtomicUsize = AtomicUsize::new(0);

    extern "C" fn returning_kernel(sdb: *mut SystemDataBlock) {
        SEEN_SDB.store(sdb.addr(), Ordering::SeqCst);
    }

    #[test]
    fn entry_at_address_receives_the_sdb_pointer() {
        let address = returning_kernel as KernelEntryFn as usize;
        let entry = unsafe { KernelEntryPoint::at_address(address) };
        assert_eq!(entry.address(), address);

        entry.enter(SystemDataBlockRef::fixed());

        assert_eq!(SEEN_SDB.load(Ordering::SeqCst), SDB_ADDRESS);
    }

    #[test]
    fn fixed_entry_points_at_load_address() {
        // Constructing the handle does not touch the address.
        let entry = unsafe { KernelEntryPoint::fixed() };
        assert_eq!(entry.address(), KERNEL_LOAD_ADDRESS);
    }
}
