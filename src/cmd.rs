use std::fmt;

use crate::{ctx::Context, flag::Flag, ty::Value, Error, Result};

/// A named mode owning its own flag set and a callback invoked once those
/// flags are bound.
pub struct Subcommand {
    name: String,
    description: String,
    callback: Box<dyn Fn(Args<'_>)>,
    flags: Vec<Flag>,
    flag_capacity: Option<usize>,
}

impl Subcommand {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        callback: impl Fn(Args<'_>) + 'static,
    ) -> Subcommand {
        Subcommand {
            name: name.into(),
            description: description.into(),
            callback: Box::new(callback),
            flags: Vec::new(),
            flag_capacity: None,
        }
    }

    /// Opt in to a bounded flag registry; without it the set grows freely.
    pub fn flag_capacity(mut self, capacity: usize) -> Subcommand {
        self.flag_capacity = Some(capacity);
        self
    }

    /// Register a flag scoped to this subcommand.
    pub fn flag(mut self, flag: Flag) -> Result<Subcommand> {
        if self.flags.iter().any(|it| it.name() == flag.name()) {
            return Err(Error::DuplicateFlag(flag.name().to_owned()));
        }
        if let Some(capacity) = self.flag_capacity {
            if self.flags.len() >= capacity {
                return Err(Error::CapacityExhausted {
                    cmd: self.name.clone(),
                    flag: flag.name().to_owned(),
                    capacity,
                });
            }
        }
        self.flags.push(flag);
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn descr(&self) -> &str {
        &self.description
    }

    /// Flags in registration order.
    pub fn flags(&self) -> &[Flag] {
        &self.flags
    }

    pub fn flag_value(&self, name: &str) -> Option<Value> {
        self.flags.iter().find(|it| it.name() == name).map(Flag::value)
    }

    pub(crate) fn declared_capacity(&self) -> Option<usize> {
        self.flag_capacity
    }

    pub(crate) fn call(&self, args: Args<'_>) {
        (self.callback)(args)
    }
}

// Manual impl: the callback cannot derive.
impl fmt::Debug for Subcommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subcommand")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("flags", &self.flags.len())
            .finish()
    }
}

/// The bundle a subcommand callback receives: the subcommand's own bound
/// flags plus the owning [`Context`] for reaching global flag values.
pub struct Args<'a> {
    pub(crate) cmd: &'a Subcommand,
    pub(crate) ctx: &'a Context,
}

impl<'a> Args<'a> {
    /// Value of one of the subcommand's own flags.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.cmd.flag_value(name)
    }

    /// Value of a global flag.
    pub fn global(&self, name: &str) -> Option<Value> {
        self.ctx.flag_value(name)
    }

    pub fn flags(&self) -> &'a [Flag] {
        self.cmd.flags()
    }

    pub fn command(&self) -> &'a Subcommand {
        self.cmd
    }

    pub fn context(&self) -> &'a Context {
        self.ctx
    }
}
