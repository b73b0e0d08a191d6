//! # Uninitialized Data Region

use core::ops::Range;

/// The `.bss` region, `[start, end)` in words.
pub struct BssRegion {
    range: Range<*mut u32>,
}

impl BssRegion {
    /// # Safety
    /// - `start..end` must be writable, word-aligned memory with `start <= end`.
    /// - No live reference may point into the region when it is zeroed.
    #[must_use]
    pub const unsafe fn new(start: *mut u32, end: *mut u32) -> Self {
        Self { range: start..end }
    }

    /// Number of words in the region.
    #[must_use]
    pub fn len(&self) -> usize {
        let bytes = self
            .range
            .end
            .addr()
            .saturating_sub(self.range.start.addr());
        bytes / size_of::<u32>()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Zero the whole region.
    pub fn zero(&self) {
        // SAFETY: upheld by the caller of `new`.
        unsafe { zero_volatile(self.range.clone()) }
    }
}

/// Zero out a memory range with volatile writes, so the loop survives
/// optimization even though nothing reads the memory afterwards.
///
/// # Safety
/// - `range.start` and `range.end` must be valid and aligned for `T`.
/// - The range must be writable and not aliased.
pub unsafe fn zero_volatile<T>(range: Range<*mut T>)
where
    T: From<u8>,
{
    let mut ptr = range.start;

    while ptr < range.end {
        unsafe {
            core::ptr::write_volatile(ptr, T::from(0));
            ptr = ptr.add(1);
        }
    }
}
