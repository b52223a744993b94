//! The two-pass scan: global flags up to the first subcommand token, then
//! that subcommand's flags, then the required-flag post-check.

use tracing::{debug, trace};

use crate::{cmd::Subcommand, ctx::Context, flag::Flag, ty, ty::FlagType, Error, Result};

/// Outcome of a non-terminating parse.
pub enum Parsed<'a> {
    /// A help flag was seen during the global scan; nothing past it was
    /// parsed.
    Help,
    /// A subcommand matched and its flags are bound and validated.
    Command(&'a Subcommand),
    /// No subcommand token appeared; global flags are still bound.
    NoCommand,
}

pub(crate) fn parse<'a, S: AsRef<str>>(ctx: &'a Context, argv: &[S]) -> Result<Parsed<'a>> {
    // Pass 1: global flags, left to right from index 1. The first non-flag
    // token naming a subcommand ends the pass.
    let mut selected = None;
    let mut i = 1;
    while i < argv.len() {
        let token = argv[i].as_ref();
        if let Some(name) = flag_name(token) {
            if name == "help" {
                return Ok(Parsed::Help);
            }
            if let Some(flag) = ctx.flags().iter().find(|it| it.name() == name) {
                i = bind_global(ctx, flag, argv, i)?;
            }
            // Unrecognized flag tokens before a subcommand are not an error.
        } else if let Some(idx) = ctx.subcommands().iter().position(|it| it.name() == token) {
            selected = Some((idx, i));
            break;
        }
        i += 1;
    }

    let (idx, cmd_at) = match selected {
        Some(it) => it,
        None => return Ok(Parsed::NoCommand),
    };
    let cmd = &ctx.subcommands()[idx];
    debug!(command = cmd.name(), "selected subcommand");

    // Pass 2: everything after the subcommand token. Each matched flag
    // consumes exactly one value token; unmatched names skip their presumed
    // value to keep pairs aligned.
    let mut seen = vec![false; cmd.flags().len()];
    let mut i = cmd_at + 1;
    while i < argv.len() {
        let token = argv[i].as_ref();
        let name = token.strip_prefix('-').unwrap_or(token);
        let j = match cmd.flags().iter().position(|it| it.name() == name) {
            Some(it) => it,
            None => {
                i += 2;
                continue;
            }
        };
        seen[j] = true;
        let flag = &cmd.flags()[j];
        match argv.get(i + 1) {
            Some(value) => {
                bind_command_flag(flag, value.as_ref())?;
                i += 2;
            }
            // A boolean as the very last token degrades to a bare switch.
            None if flag.ty() == FlagType::Bool => {
                flag.set_bool(true);
                i += 1;
            }
            None => return Err(Error::MissingValue(flag.name().to_owned())),
        }
        flag.check()?;
        trace!(flag = flag.name(), "bound subcommand flag");
    }

    // Required means "seen on the command line", not "non-default": a flag
    // explicitly supplied with its default value still counts.
    for (flag, seen) in cmd.flags().iter().zip(seen) {
        if flag.is_required() && !seen {
            return Err(Error::MissingRequired(flag.name().to_owned()));
        }
    }

    Ok(Parsed::Command(cmd))
}

/// Strip one or two leading dashes; `None` when the token is not a flag.
fn flag_name(token: &str) -> Option<&str> {
    let name = token.strip_prefix('-')?;
    Some(name.strip_prefix('-').unwrap_or(name))
}

/// Bind one global flag starting at `argv[i]`; returns the index of the last
/// consumed token.
fn bind_global<S: AsRef<str>>(ctx: &Context, flag: &Flag, argv: &[S], i: usize) -> Result<usize> {
    let next = argv.get(i + 1).map(|it| it.as_ref());

    if flag.ty() == FlagType::Bool {
        let consumed = match next {
            Some(token) if ty::parse_bool(token).is_some() => {
                flag.bind(token)?;
                i + 1
            }
            // Bare switch: end of input, another flag token, or a subcommand
            // name next.
            None => {
                flag.set_bool(true);
                i
            }
            Some(token) if is_switch_boundary(ctx, token) => {
                flag.set_bool(true);
                i
            }
            Some(token) => {
                return Err(Error::InvalidValue {
                    flag: flag.name().to_owned(),
                    ty: FlagType::Bool,
                    token: token.to_owned(),
                })
            }
        };
        flag.check()?;
        return Ok(consumed);
    }

    let value = next.ok_or_else(|| Error::MissingValue(flag.name().to_owned()))?;
    flag.bind(value)?;
    flag.check()?;
    trace!(flag = flag.name(), value, "bound global flag");
    Ok(i + 1)
}

fn is_switch_boundary(ctx: &Context, token: &str) -> bool {
    token.starts_with('-') || ctx.subcommands().iter().any(|it| it.name() == token)
}

/// Subcommand flags always consume their value token; for booleans any token
/// other than a `true`/`false` literal reads as the switch being present.
fn bind_command_flag(flag: &Flag, value: &str) -> Result<()> {
    if flag.ty() == FlagType::Bool && ty::parse_bool(value).is_none() {
        flag.set_bool(true);
        return Ok(());
    }
    flag.bind(value)
}
