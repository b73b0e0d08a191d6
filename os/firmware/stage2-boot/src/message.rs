//! # Boot Console Messages
//!
//! Every line stage-2 prints. The byte-exact text is what boot-log parsing
//! tools key on; do not reword.

use core::ffi::CStr;
use core::fmt;

/// Color-escaped tag that prefixes severe diagnostics.
pub const SEVERE_TAG: &str = "\x1b[1;31mSEVERE\x1b[0m: ";

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Severity {
    Info,
    Severe,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Message {
    /// Emulator quickload build: the kernel is already in memory.
    Quickload,
    /// Block-device probing begins.
    SearchingMedia,
    /// Neither block device yielded a kernel.
    NoBootableMedia,
    /// Kermit receiver is about to listen.
    KermitReady,
    /// A Kermit receive attempt failed; another follows.
    ReceiveFailed,
    /// Kermit delivered a kernel.
    KernelReceived,
    /// Nothing can produce a kernel.
    NoSourceHalting,
    /// Blank line separating firmware output from kernel output.
    Handoff,
    /// The kernel entry point returned.
    KernelReturned,
}

impl Message {
    /// The message as the NUL-terminated string handed to the console.
    #[must_use]
    pub const fn text(self) -> &'static CStr {
        match self {
            Self::Quickload => c"Starting MAME Quickload kernel...\r\n",
            Self::SearchingMedia => c"Searching for boot media...\r\n",
            Self::NoBootableMedia => c"No bootable media found\r\n",
            Self::KermitReady => c"Ready for Kermit receive...\r\n",
            Self::ReceiveFailed => {
                c"\x1b[1;31mSEVERE\x1b[0m: Receive failed; Ready for retry...\r\n"
            }
            Self::KernelReceived => c"Kernel received okay; Starting...\r\n",
            Self::NoSourceHalting => c"No bootable media found & no Kermit support; Halting...\r\n",
            Self::Handoff => c"\r\n",
            Self::KernelReturned => {
                c"\x1b[1;31mSEVERE\x1b[0m: Kernel should not return! Halting\r\n"
            }
        }
    }

    /// The message bytes, without the terminating NUL.
    #[must_use]
    pub const fn as_bytes(self) -> &'static [u8] {
        self.text().to_bytes()
    }

    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::ReceiveFailed | Self::KernelReturned => Severity::Severe,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = core::str::from_utf8(self.as_bytes()).map_err(|_| fmt::Error)?;
        f.write_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Message; 9] = [
        Message::Quickload,
        Message::SearchingMedia,
        Message::NoBootableMedia,
        Message::KermitReady,
        Message::ReceiveFailed,
        Message::KernelReceived,
        Message::NoSourceHalting,
        Message::Handoff,
        Message::KernelReturned,
    ];

    #[test]
    fn every_line_ends_in_crlf() {
        for m in ALL {
            assert!(m.as_bytes().ends_with(b"\r\n"), "{m:?}");
        }
    }

    #[test]
    fn severe_lines_carry_the_tag() {
        for m in ALL {
            let tagged = m.as_bytes().starts_with(SEVERE_TAG.as_bytes());
            assert_eq!(tagged, m.severity() == Severity::Severe, "{m:?}");
        }
    }

    #[test]
    fn exact_bytes() {
        assert_eq!(
            Message::ReceiveFailed.as_bytes(),
            b"\x1b[1;31mSEVERE\x1b[0m: Receive failed; Ready for retry...\r\n"
        );
        assert_eq!(
            Message::KernelReturned.as_bytes(),
            b"\x1b[1;31mSEVERE\x1b[0m: Kernel should not return! Halting\r\n"
        );
        assert_eq!(Message::Handoff.as_bytes(), b"\r\n");
    }

    #[test]
    fn display_matches_bytes() {
        for m in ALL {
            assert_eq!(m.to_string().as_bytes(), m.as_bytes());
        }
    }
}
