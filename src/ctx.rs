use std::{cell::Cell, process, rc::Rc};

use crate::{
    cmd::{Args, Subcommand},
    flag::Flag,
    parse::{self, Parsed},
    ty::{Slot, Value},
    Error, Result,
};

/// The registry root: owns all global flags and subcommands for one program
/// invocation.
///
/// Always carries an implicit `help` boolean flag; dropping the context
/// releases every descriptor it owns.
pub struct Context {
    flags: Vec<Flag>,
    commands: Vec<Subcommand>,
}

impl Context {
    pub fn new() -> Context {
        let help = Flag::new("help", Slot::Bool(Rc::new(Cell::new(false))))
            .description("Print help message");
        Context { flags: vec![help], commands: Vec::new() }
    }

    /// Register a global flag. Duplicate names are rejected before any
    /// parsing begins.
    pub fn add_flag(&mut self, flag: Flag) -> Result<()> {
        if self.flags.iter().any(|it| it.name() == flag.name()) {
            return Err(Error::DuplicateFlag(flag.name().to_owned()));
        }
        self.flags.push(flag);
        Ok(())
    }

    /// Register a subcommand. Duplicate names and a declared zero flag
    /// capacity are rejected.
    pub fn add_subcommand(&mut self, cmd: Subcommand) -> Result<()> {
        if cmd.declared_capacity() == Some(0) {
            return Err(Error::ZeroCapacity(cmd.name().to_owned()));
        }
        if self.commands.iter().any(|it| it.name() == cmd.name()) {
            return Err(Error::DuplicateSubcommand(cmd.name().to_owned()));
        }
        self.commands.push(cmd);
        Ok(())
    }

    pub fn flags(&self) -> &[Flag] {
        &self.flags
    }

    pub fn subcommands(&self) -> &[Subcommand] {
        &self.commands
    }

    pub fn flag_value(&self, name: &str) -> Option<Value> {
        self.flags.iter().find(|it| it.name() == name).map(Flag::value)
    }

    pub fn subcommand(&self, name: &str) -> Option<&Subcommand> {
        self.commands.iter().find(|it| it.name() == name)
    }

    /// Parse `argv` (program name at index 0) without terminating: errors and
    /// the help request come back as values.
    pub fn try_parse<S: AsRef<str>>(&self, argv: &[S]) -> Result<Parsed<'_>> {
        parse::parse(self, argv)
    }

    /// Parse `argv` the way the CLI surface promises: `-help`/`--help` prints
    /// usage to stdout and exits 0; any parse error prints to stderr and
    /// exits 1, with the usage text appended when a required flag is missing.
    pub fn parse_or_exit<S: AsRef<str>>(&self, argv: &[S]) -> Option<&Subcommand> {
        let program = argv.first().map(|it| it.as_ref().to_owned()).unwrap_or_default();
        match self.try_parse(argv) {
            Ok(Parsed::Help) => {
                print!("{}", self.help(&program));
                process::exit(0);
            }
            Ok(Parsed::Command(cmd)) => Some(cmd),
            Ok(Parsed::NoCommand) => None,
            Err(err) => {
                eprintln!("{}", err);
                if let Error::MissingRequired(_) = err {
                    eprint!("{}", self.help(&program));
                }
                process::exit(1);
            }
        }
    }

    /// [`Context::parse_or_exit`] over the process argument vector.
    pub fn parse_from_env(&self) -> Option<&Subcommand> {
        let argv = std::env::args().collect::<Vec<_>>();
        self.parse_or_exit(&argv)
    }

    /// Parse and, if a subcommand matched, invoke its callback.
    pub fn run_or_exit<S: AsRef<str>>(&self, argv: &[S]) -> Option<&Subcommand> {
        let cmd = self.parse_or_exit(argv)?;
        self.invoke(cmd);
        Some(cmd)
    }

    /// Call the subcommand's callback exactly once, synchronously, with its
    /// bound flags and this context.
    pub fn invoke(&self, cmd: &Subcommand) {
        cmd.call(Args { cmd, ctx: self })
    }

    /// Render the usage listing. Pure; safe to call any number of times.
    pub fn help(&self, program: &str) -> String {
        crate::help::render(self, program)
    }
}

impl Default for Context {
    fn default() -> Context {
        Context::new()
    }
}
