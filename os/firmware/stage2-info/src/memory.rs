//! # Fixed Memory Layout
//!
//! [`SDB_ADDRESS`] and [`KERNEL_LOAD_ADDRESS`] are part of the platform ABI.
//! Changing either breaks every loader backend and every kernel image built
//! against it.

/// Address of the System Data Block, directly above the exception vector table.
pub const SDB_ADDRESS: usize = 0x0000_0400;

/// Link address of the stage-2 firmware image in RAM.
pub const STAGE2_BASE: usize = 0x0000_2000;

/// Address every boot loader places the kernel image at, and the address the
/// kernel is entered at.
pub const KERNEL_LOAD_ADDRESS: usize = 0x0004_0000;

/// Required alignment of [`KERNEL_LOAD_ADDRESS`] (68000 instruction fetch is word-aligned).
pub const KERNEL_LOAD_ALIGN: usize = 2;

const _: () = assert!(SDB_ADDRESS < STAGE2_BASE && STAGE2_BASE < KERNEL_LOAD_ADDRESS);
const _: () = assert!(SDB_ADDRESS.is_multiple_of(4));
const _: () = assert!(KERNEL_LOAD_ADDRESS.is_multiple_of(KERNEL_LOAD_ALIGN));
