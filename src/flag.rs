use crate::{
    ty::{FlagType, Slot, Value},
    Error, Result,
};

/// A post-conversion acceptance predicate with an optional failure message.
///
/// Validators only gate acceptance; they never mutate the value.
pub struct Validator {
    check: Box<dyn Fn(&Value) -> bool>,
    message: Option<String>,
}

impl Validator {
    pub fn new(check: impl Fn(&Value) -> bool + 'static) -> Validator {
        Validator { check: Box::new(check), message: None }
    }

    /// Text shown when the predicate rejects a value. Without it, a generic
    /// "invalid value" message is composed from the flag name.
    pub fn message(mut self, message: impl Into<String>) -> Validator {
        self.message = Some(message.into());
        self
    }
}

/// A named, typed, described binding between a flag name and a storage slot.
///
/// Built with chained setters and handed to [`crate::Context::add_flag`] or
/// [`crate::Subcommand::flag`]:
///
/// ```
/// # use std::{cell::Cell, rc::Rc};
/// # use rflags::{Flag, Slot, Validator};
/// let retries = Rc::new(Cell::new(0i32));
/// let flag = Flag::new("retries", Slot::Int(Rc::clone(&retries)))
///     .description("Retry budget")
///     .required()
///     .validator(Validator::new(|v| v.as_i64().map_or(false, |n| n >= 0)));
/// ```
pub struct Flag {
    name: String,
    slot: Slot,
    description: String,
    required: bool,
    validator: Option<Validator>,
}

impl Flag {
    /// `name` is the lookup key: case-sensitive, stored without dashes.
    pub fn new(name: impl Into<String>, slot: Slot) -> Flag {
        Flag {
            name: name.into(),
            slot,
            description: String::new(),
            required: false,
            validator: None,
        }
    }

    pub fn description(mut self, text: impl Into<String>) -> Flag {
        self.description = text.into();
        self
    }

    pub fn required(mut self) -> Flag {
        self.required = true;
        self
    }

    pub fn validator(mut self, validator: Validator) -> Flag {
        self.validator = Some(validator);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> FlagType {
        self.slot.ty()
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn descr(&self) -> &str {
        &self.description
    }

    /// Snapshot of the currently stored value.
    pub fn value(&self) -> Value {
        self.slot.get()
    }

    pub(crate) fn bind(&self, token: &str) -> Result<()> {
        self.slot.bind(&self.name, token)
    }

    // Only meaningful for Bool slots; used by the parser for bare switches.
    pub(crate) fn set_bool(&self, value: bool) {
        if let Slot::Bool(cell) = &self.slot {
            cell.set(value);
        }
    }

    /// Run the attached validator, if any, against the current value.
    pub(crate) fn check(&self) -> Result<()> {
        let validator = match &self.validator {
            Some(it) => it,
            None => return Ok(()),
        };
        if (validator.check)(&self.slot.get()) {
            return Ok(());
        }
        let msg = validator
            .message
            .clone()
            .unwrap_or_else(|| format!("invalid value for flag `{}`", self.name));
        Err(Error::Rejected(msg))
    }
}
