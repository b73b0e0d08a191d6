//! # Firmware Console Output
//!
//! Text output for stage-2 through the ROM's `mcPrint` routine, which writes a
//! NUL-terminated string to the default serial console.
//!
//! ## Output Mechanism
//! ```text
//! console_print! / ConsoleLogger
//!     ↓
//! ChunkWriter (fmt::Write, fixed stack buffer)
//!     ↓
//! mcPrint(const char*) → UART
//! ```
//!
//! Formatting never allocates: text is collected into a small stack buffer and
//! handed to `mcPrint` one NUL-terminated chunk at a time.
//!
//! ## Feature System
//!
//! ### `enabled` Feature (default)
//! Links against the firmware's `mcPrint`. Without it (and in unit tests)
//! every output call is a no-op.
//!
//! ## Usage
//! ```rust,ignore
//! use stage2_console::{ConsoleLogger, console_print};
//! use log::LevelFilter;
//!
//! ConsoleLogger::new(LevelFilter::Debug).init().ok();
//! console_print!("SDB at {:#x}\r\n", 0x400);
//! ```

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

mod chunk;
mod logger;

pub use chunk::{CHUNK_CAPACITY, ChunkWriter};
pub use logger::ConsoleLogger;

#[cfg(all(feature = "enabled", not(test)))]
#[doc(hidden)]
pub mod console_fmt {
    use crate::ChunkWriter;
    use core::ffi::{CStr, c_char};
    use core::fmt;

    unsafe extern "C" {
        /// Firmware ROM: print a NUL-terminated string to the default console.
        fn mcPrint(text: *const c_char);
    }

    /// Print a NUL-terminated string as-is.
    #[inline]
    pub fn print_cstr(text: &CStr) {
        // SAFETY: `text` is NUL-terminated and outlives the call.
        unsafe { mcPrint(text.as_ptr()) }
    }

    #[doc(hidden)]
    pub fn console_write(args: fmt::Arguments) {
        let mut sink = ChunkWriter::new(print_cstr);
        // Best-effort output; a formatting error drops the rest of the line.
        let _ = fmt::write(&mut sink, args);
        sink.flush();
    }
}

#[cfg(any(not(feature = "enabled"), test))]
#[doc(hidden)]
pub mod console_fmt {
    use core::ffi::CStr;
    use core::fmt;

    #[inline(always)]
    #[allow(clippy::inline_always)]
    pub const fn print_cstr(_: &CStr) {
        // no-op when feature disabled
    }

    #[doc(hidden)]
    #[inline(always)]
    #[allow(clippy::inline_always)]
    pub fn console_write(_: fmt::Arguments) {
        // no-op when feature disabled
    }
}

pub use console_fmt::print_cstr;

/// Formatted output to the firmware console.
#[macro_export]
macro_rules! console_print {
    ($($arg:tt)*) => {{
        $crate::console_fmt::console_write(core::format_args!($($arg)*));
    }};
}
