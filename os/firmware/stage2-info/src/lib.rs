//! # Stage-2 Platform Interface
//!
//! Constants and types shared between the stage-2 firmware, its build script
//! and anything that needs to agree with it on the machine's boot ABI: loader
//! backends, kernels, and host-side tooling.
//!
//! ## Architecture
//!
//! ### Boot Interface ([`boot`])
//! * **Boot Source Configuration**: the build-time selected fallback chain
//! * **System Data Block**: opaque handle forwarded to the kernel
//! * **Kernel Entry Point**: function signature of a loaded kernel
//!
//! ### Memory Layout ([`memory`])
//! Fixed addresses that every loader and every kernel image assumes:
//!
//! ```text
//! 0x0000_0000 ┌─────────────────────────────────┐
//!             │     Exception Vector Table      │
//! 0x0000_0400 ├─────────────────────────────────┤ SDB_ADDRESS
//!             │       System Data Block         │
//!             ├─────────────────────────────────┤
//!             │     Firmware data and stack     │
//! 0x0000_2000 ├─────────────────────────────────┤ STAGE2_BASE
//!             │   Stage-2 text, data and .bss   │
//! 0x0004_0000 ├─────────────────────────────────┤ KERNEL_LOAD_ADDRESS
//!             │         Kernel Image            │
//!             │   (placed by the boot loader)   │
//!             └─────────────────────────────────┘
//! ```
//!
//! ## Entry Point Convention
//! ```rust
//! # use stage2_info::boot::SystemDataBlock;
//! pub type KernelEntryFn = extern "C" fn(*mut SystemDataBlock);
//! ```
//!
//! The kernel is not expected to return. The signature still models a return
//! so the caller can detect and report a kernel that breaks the contract.

#![cfg_attr(not(any(test, doctest)), no_std)]
#![deny(unsafe_code)]

pub mod boot;
pub mod memory;
