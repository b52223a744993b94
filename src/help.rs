//! Help rendering: aligned usage text computed from the registry, mutating
//! nothing.

use std::fmt::Write;

use crate::{ctx::Context, flag::Flag};

macro_rules! w {
    ($($tt:tt)*) => {
        drop(write!($($tt)*))
    };
}

pub(crate) fn render(ctx: &Context, program: &str) -> String {
    let mut buf = String::new();

    w!(buf, "{}\n", program);
    w!(buf, "Global flags:\n");
    let name_w = column(ctx.flags().iter().map(|it| it.name().len()));
    let type_w = column(ctx.flags().iter().map(|it| bracketed(it).len()));
    for flag in ctx.flags() {
        w!(
            buf,
            "  -{name:<nw$} --{name}({req}) {ty:<tw$}: {descr}\n\n",
            name = flag.name(),
            req = requirement(flag),
            ty = bracketed(flag),
            descr = flag.descr(),
            nw = name_w,
            tw = type_w,
        );
    }

    w!(buf, "Subcommands:\n");
    let all = ctx.subcommands().iter().flat_map(|it| it.flags().iter());
    let name_w = column(all.clone().map(|it| it.name().len()));
    let type_w = column(all.map(|it| bracketed(it).len()));
    for cmd in ctx.subcommands() {
        w!(buf, "  {}: {}\n", cmd.name(), cmd.descr());
        for flag in cmd.flags() {
            w!(
                buf,
                "    -{name:<nw$} --{name}({req}) {ty:<tw$}: {descr}\n",
                name = flag.name(),
                req = requirement(flag),
                ty = bracketed(flag),
                descr = flag.descr(),
                nw = name_w,
                tw = type_w,
            );
        }
        w!(buf, "\n");
    }

    buf
}

fn bracketed(flag: &Flag) -> String {
    format!("<{}>", flag.ty())
}

fn requirement(flag: &Flag) -> &'static str {
    if flag.is_required() {
        "Required"
    } else {
        "Optional"
    }
}

fn column(lens: impl Iterator<Item = usize>) -> usize {
    lens.max().unwrap_or(0)
}
