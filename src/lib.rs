//! Moderately simple runtime-registered command line flags parser.
//!
//! A program declares named, typed flags bound to caller-owned storage slots,
//! optionally grouped under subcommands, and hands the argument vector to a
//! [`Context`]. Flags before the first subcommand token are global; flags
//! after it belong to that subcommand. Matched values are converted with
//! overflow detection, written through the slots, and gated by optional
//! validators.
//!
//! ```
//! use std::{cell::Cell, rc::Rc};
//! use rflags::{Context, Flag, Parsed, Slot, Subcommand};
//!
//! let port = Rc::new(Cell::new(8080u16));
//!
//! let mut ctx = Context::new();
//! ctx.add_flag(Flag::new("port", Slot::UInt16(Rc::clone(&port))).description("Port to listen on"))?;
//! ctx.add_subcommand(Subcommand::new("serve", "Start the server", |_args| {}))?;
//!
//! if let Parsed::Command(cmd) = ctx.try_parse(&["app", "-port", "9000", "serve"])? {
//!     ctx.invoke(cmd);
//! }
//! assert_eq!(port.get(), 9000);
//! # Ok::<(), rflags::Error>(())
//! ```

mod cmd;
mod ctx;
mod error;
mod flag;
mod help;
mod parse;
mod ty;

pub use crate::{
    cmd::{Args, Subcommand},
    ctx::Context,
    error::Error,
    flag::{Flag, Validator},
    parse::Parsed,
    ty::{FlagType, Slot, Value},
};

pub type Result<T, E = Error> = std::result::Result<T, E>;
