//! # Secure Console
//!
//! Diagnostic output of the secure world. Everything ends up in the TX FIFO
//! of UART0, byte by byte and without allocation, so it is usable from the
//! first instruction of the TEE up to a panic handler.
//!
//! ```text
//! log::error!(...)        uart_trace!(...)
//!        │                       │
//!   UartLogger (log::Log)        │
//!        └──────────┬────────────┘
//!                   ▼
//!           UartSink (fmt::Write)
//!                   ▼
//!        UART0 TX FIFO  (riscv32)
//!        capture buffer (host)
//! ```
//!
//! On non-RISC-V hosts the bytes land in a fixed-size capture buffer
//! instead, which [`uart_fmt::with_captured`] exposes for tests.
//!
//! ## Usage
//! ```rust,no_run
//! use log::{LevelFilter, info};
//! use tee_console::UartLogger;
//!
//! UartLogger::new(LevelFilter::Info).init().ok();
//! info!(target: "tee_services", "secure services ready");
//! ```
//!
//! Disabling the default `enabled` feature turns all output into no-ops.

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

mod logger;

pub use logger::UartLogger;

#[cfg(feature = "enabled")]
#[doc(hidden)]
pub mod uart_fmt {
    use core::fmt::{self, Write};

    #[cfg(target_arch = "riscv32")]
    mod hw {
        use core::ptr::{read_volatile, write_volatile};

        const UART0_BASE: usize = 0x6000_0000;
        const UART_FIFO_REG: usize = UART0_BASE;
        const UART_STATUS_REG: usize = UART0_BASE + 0x1C;
        const UART_TXFIFO_CNT_SHIFT: u32 = 16;
        const UART_TXFIFO_CNT_MASK: u32 = 0xFF;
        const UART_FIFO_DEPTH: u32 = 128;

        #[inline]
        pub fn putc(c: u8) {
            // SAFETY: UART0 registers are always mapped in M-mode.
            unsafe {
                while (read_volatile(UART_STATUS_REG as *const u32) >> UART_TXFIFO_CNT_SHIFT)
                    & UART_TXFIFO_CNT_MASK
                    >= UART_FIFO_DEPTH - 1
                {
                    core::hint::spin_loop();
                }
                write_volatile(UART_FIFO_REG as *mut u32, u32::from(c));
            }
        }
    }

    #[cfg(not(target_arch = "riscv32"))]
    mod hw {
        use tee_sync::SpinLock;

        pub const CAPACITY: usize = 16 * 1024;

        pub struct Capture {
            pub buf: [u8; CAPACITY],
            pub len: usize,
        }

        pub static CAPTURE: SpinLock<Capture> = SpinLock::new(Capture {
            buf: [0; CAPACITY],
            len: 0,
        });

        #[inline]
        pub fn putc(c: u8) {
            let mut cap = CAPTURE.lock();
            if cap.len < CAPACITY {
                let len = cap.len;
                cap.buf[len] = c;
                cap.len += 1;
            }
        }
    }

    /// Run `f` over everything written so far (host only).
    ///
    /// Output beyond the capture capacity is dropped.
    #[cfg(not(target_arch = "riscv32"))]
    pub fn with_captured<R>(f: impl FnOnce(&str) -> R) -> R {
        let cap = hw::CAPTURE.lock();
        let text = match core::str::from_utf8(&cap.buf[..cap.len]) {
            Ok(text) => text,
            Err(e) => {
                // A message cut off at the capacity limit.
                let valid = e.valid_up_to();
                core::str::from_utf8(&cap.buf[..valid]).unwrap_or_default()
            }
        };
        f(text)
    }

    /// Forget all captured output (host only).
    #[cfg(not(target_arch = "riscv32"))]
    pub fn clear_captured() {
        hw::CAPTURE.lock().len = 0;
    }

    pub struct UartSink;

    impl Write for UartSink {
        #[inline]
        fn write_str(&mut self, s: &str) -> fmt::Result {
            for b in s.bytes() {
                hw::putc(b);
            }
            Ok(())
        }
    }

    #[doc(hidden)]
    #[inline]
    pub fn uart_write(args: fmt::Arguments) {
        // Best effort; there is nobody to report a failed write to.
        let _ = fmt::write(&mut UartSink, args);
    }
}

#[cfg(not(feature = "enabled"))]
#[doc(hidden)]
pub mod uart_fmt {
    use core::fmt;

    #[doc(hidden)]
    #[inline]
    pub fn uart_write(_: fmt::Arguments) {}
}

/// Formatted output straight to the secure UART, bypassing `log`.
#[macro_export]
macro_rules! uart_trace {
    ($($arg:tt)*) => {{
        $crate::uart_fmt::uart_write(core::format_args!($($arg)*));
    }};
}
