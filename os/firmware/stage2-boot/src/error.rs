use crate::Message;
use stage2_info::boot::BootSource;

/// A boot source attempt that did not leave a kernel at the load address.
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
#[error("{boot_source} did not yield a kernel")]
pub struct LoadError {
    pub boot_source: BootSource,
}

impl LoadError {
    #[must_use]
    pub const fn new(boot_source: BootSource) -> Self {
        Self { boot_source }
    }
}

/// Conditions that end the boot in the halt loop.
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum BootFailure {
    #[error("no configured boot source produced a kernel")]
    NoSource,
    #[error("the kernel entry point returned control to the firmware")]
    KernelReturned,
}

impl BootFailure {
    /// The console line reporting this failure.
    #[must_use]
    pub const fn message(self) -> Message {
        match self {
            Self::NoSource => Message::NoSourceHalting,
            Self::KernelReturned => Message::KernelReturned,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stage2_info::boot::BlockDevice;

    #[test]
    fn load_error_names_the_source() {
        let e = LoadError::new(BootSource::BlockDevice(BlockDevice::Sd));
        assert_eq!(e.to_string(), "SD block device did not yield a kernel");
    }

    #[test]
    fn failures_map_to_console_lines() {
        assert_eq!(BootFailure::NoSource.message(), Message::NoSourceHalting);
        assert_eq!(
            BootFailure::KernelReturned.message(),
            Message::KernelReturned
        );
    }
}
