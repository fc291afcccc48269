//! # delopay-cli
//!
//! The `delopay` binary: every payments and providers operation as a
//! subcommand, printing the decoded response as pretty JSON.
//!
//! ## Usage
//!
//! ```bash
//! export DELOPAY_API_KEY=sk_test_...
//!
//! delopay payments get pay_123
//! delopay providers stripe-methods --merchant-country DE --customer-country NL --currency EUR
//! ```

pub mod commands;

pub use commands::Cli;
