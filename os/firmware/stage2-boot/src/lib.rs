//! # Stage-2 Boot Sequencing
//!
//! Hardware-independent core of the stage-2 firmware: clears the
//! uninitialized data region, walks the configured boot sources in their fixed
//! priority order and hands control to the loaded kernel.
//!
//! ## Boot Flow
//!
//! ```text
//! linit ─→ BssRegion::zero
//!
//! lmain ─→ Start (enable receiver)
//!            │
//!            ├─ Quickload ───────────────────────────────┐
//!            ├─ SearchMedia → SD → IDE ──(success)───────┤
//!            │                   └─(both fail)→ MediaExhausted
//!            │                                    │      │
//!            ├─ SerialReady → SerialReceive ⟲ retry      │
//!            │                   └─(success)→ SerialReceived
//!            │                                           │
//!            └─ NoSource ──→ Halt ⟲              KernelAcquired
//!                              ↑                         │
//!                              └──── PostReturn ←─(kernel returned)
//! ```
//!
//! Which branches exist is fixed by the build's [`BootConfig`]. Everything
//! the sequencer needs from the machine goes through the [`Platform`],
//! [`Loaders`] and [`KernelEntry`] traits; the firmware binary binds them to
//! the ROM routines and loader backends.

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

pub mod bss;
mod error;
mod handoff;
mod message;
mod platform;
mod sequencer;

pub use error::{BootFailure, LoadError};
pub use handoff::{KernelEntry, KernelEntryPoint};
pub use message::{Message, SEVERE_TAG, Severity};
pub use platform::{Firmware, Loaders, Platform};
pub use sequencer::{BootPhase, SERIAL_SETTLE_AFTER, SERIAL_SETTLE_BEFORE, Sequencer, boot};
pub use stage2_info::boot::{BlockDevice, BootConfig, BootSource, SystemDataBlockRef};
