//! # Boot Sequencer
//!
//! The boot phases form a small state machine. [`Sequencer::step`] performs
//! the side effects of the current phase and moves to the next one;
//! [`Sequencer::run`] drives it forever. Which phases are reachable depends
//! only on the build's [`BootConfig`], so every build has a single, fixed
//! path to [`BootPhase::KernelAcquired`].

use crate::{BootFailure, Firmware, KernelEntry, LoadError, Message};
use log::{debug, error, info, trace, warn};
use stage2_info::boot::{BootConfig, BootSource, SystemDataBlockRef};

/// Busy-wait before the first Kermit receive, giving the sender time to start.
pub const SERIAL_SETTLE_BEFORE: u32 = 100_000;

/// Busy-wait after a successful Kermit receive, so the user's terminal
/// program can hand the line back before the kernel prints.
pub const SERIAL_SETTLE_AFTER: u32 = 400_000;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BootPhase {
    /// Reset state; the receiver is not enabled yet.
    Start,
    /// Quickload build: kernel already in memory.
    Quickload,
    /// About to probe the block devices.
    SearchMedia,
    /// Probing the block device at this index of [`BootConfig::block_devices`].
    BlockDevice(usize),
    /// All block devices failed.
    MediaExhausted,
    /// About to start receiving over serial.
    SerialReady,
    /// Receiving over serial; repeats until a receive succeeds.
    SerialReceive,
    /// A serial receive succeeded.
    SerialReceived,
    /// No source can produce a kernel.
    NoSource,
    /// A kernel is at the load address; hand off.
    KernelAcquired,
    /// The kernel returned.
    PostReturn,
    /// Terminal.
    Halt,
}

pub struct Sequencer<F, K> {
    config: BootConfig,
    firmware: F,
    sdb: SystemDataBlockRef,
    entry: K,
    phase: BootPhase,
}

impl<F, K> Sequencer<F, K>
where
    F: Firmware,
    K: KernelEntry,
{
    #[must_use]
    pub const fn new(config: BootConfig, firmware: F, sdb: SystemDataBlockRef, entry: K) -> Self {
        Self {
            config,
            firmware,
            sdb,
            entry,
            phase: BootPhase::Start,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> BootPhase {
        self.phase
    }

    #[must_use]
    pub const fn config(&self) -> BootConfig {
        self.config
    }

    /// Run the current phase and advance. Returns the new phase.
    pub fn step(&mut self) -> BootPhase {
        let next = match self.phase {
            BootPhase::Start => {
                // Always done, for compatibility with programs that expect it.
                self.firmware.enable_receive();
                self.first_source()
            }
            BootPhase::Quickload => {
                self.firmware.print(Message::Quickload);
                BootPhase::KernelAcquired
            }
            BootPhase::SearchMedia => {
                self.firmware.print(Message::SearchingMedia);
                BootPhase::BlockDevice(0)
            }
            BootPhase::BlockDevice(index) => self.try_block_device(index),
            BootPhase::MediaExhausted => {
                self.firmware.print(Message::NoBootableMedia);
                self.after_block_devices()
            }
            BootPhase::SerialReady => {
                self.firmware.print(Message::KermitReady);
                self.firmware.busy_wait(SERIAL_SETTLE_BEFORE);
                BootPhase::SerialReceive
            }
            BootPhase::SerialReceive => self.try_receive(),
            BootPhase::SerialReceived => {
                self.firmware.busy_wait(SERIAL_SETTLE_AFTER);
                self.firmware.print(Message::KernelReceived);
                BootPhase::KernelAcquired
            }
            BootPhase::NoSource => self.fail(BootFailure::NoSource),
            BootPhase::KernelAcquired => {
                info!("Entering kernel, SDB at {:?}", self.sdb);
                self.firmware.boot_indicator_off();
                self.firmware.print(Message::Handoff);
                self.entry.enter(self.sdb);
                BootPhase::PostReturn
            }
            BootPhase::PostReturn => self.fail(BootFailure::KernelReturned),
            BootPhase::Halt => {
                self.firmware.halt();
                BootPhase::Halt
            }
        };

        if next != self.phase {
            trace!("Boot phase {:?} -> {next:?}", self.phase);
        }
        self.phase = next;
        next
    }

    /// Drive the sequencer. Ends in the kernel or in the halt loop.
    pub fn run(mut self) -> ! {
        debug!("Boot configuration: {}", self.config);
        loop {
            self.step();
        }
    }

    const fn first_source(&self) -> BootPhase {
        if self.config.quickload() {
            BootPhase::Quickload
        } else if !self.config.block_devices().is_empty() {
            BootPhase::SearchMedia
        } else if self.config.serial() {
            BootPhase::SerialReady
        } else {
            BootPhase::NoSource
        }
    }

    const fn after_block_devices(&self) -> BootPhase {
        if self.config.serial() {
            BootPhase::SerialReady
        } else {
            BootPhase::NoSource
        }
    }

    fn try_block_device(&mut self, index: usize) -> BootPhase {
        let Some(&device) = self.config.block_devices().get(index) else {
            return BootPhase::MediaExhausted;
        };

        debug!("Trying {}", BootSource::BlockDevice(device));
        match self.firmware.load_block_device(device) {
            Ok(()) => {
                info!("Kernel loaded from {device}");
                BootPhase::KernelAcquired
            }
            Err(e) => {
                warn!("{e}");
                self.next_block_device(index)
            }
        }
    }

    const fn next_block_device(&self, index: usize) -> BootPhase {
        if index + 1 < self.config.block_devices().len() {
            BootPhase::BlockDevice(index + 1)
        } else {
            BootPhase::MediaExhausted
        }
    }

    fn try_receive(&mut self) -> BootPhase {
        match self.firmware.receive_kernel() {
            Ok(()) => BootPhase::SerialReceived,
            Err(e) => {
                self.report_retry(e);
                BootPhase::SerialReceive
            }
        }
    }

    fn report_retry(&mut self, e: LoadError) {
        warn!("{e}; retrying");
        self.firmware.print(Message::ReceiveFailed);
    }

    fn fail(&mut self, failure: BootFailure) -> BootPhase {
        error!("{failure}");
        self.firmware.print(failure.message());
        BootPhase::Halt
    }
}

/// Boot with the given configuration. Never returns.
pub fn boot<F, K>(config: BootConfig, firmware: F, sdb: SystemDataBlockRef, entry: K) -> !
where
    F: Firmware,
    K: KernelEntry,
{
    Sequencer::new(config, firmware, sdb, entry).run()
}
