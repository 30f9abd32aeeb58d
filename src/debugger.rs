use crate::MmioBus;
use crate::mems::{IO_ADDRESS_MAP, MSIP_BASE, MTIME_BASE, MTIMECMP_BASE};
use colored::{ColoredString, Colorize};

pub fn print_bus_state(bus: &MmioBus) {
    print!("{}", render_bus_state(bus));
}

const BANNER: &str = "===================== MMIO =====================";
const RULE: &str = "------------------------------------------------";

pub fn render_bus_state(bus: &MmioBus) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", BANNER.bright_cyan().bold()));

    out.push_str(&format!("{}\n", "Registers:".bright_magenta().bold()));
    let clint = bus.clint();
    for (name, addr, value) in [
        ("mtime", MTIME_BASE, clint.mtime()),
        ("mtimecmp", MTIMECMP_BASE, clint.mtimecmp()),
        ("msip", MSIP_BASE, clint.msip()),
    ] {
        out.push_str(&format!(
            "  {:<10}{}  {}\n",
            name.bright_green(),
            format!("@{addr:#010x}").bright_black(),
            format_register_value(value)
        ));
    }

    let timer = if clint.mtimecmp() >= clint.mtime() {
        "armed: next tick fires".bright_red()
    } else {
        "idle".normal()
    };
    out.push_str(&format!("  timer: {timer}\n"));

    out.push_str(&format!("{}\n", RULE.bright_cyan()));

    let console = bus.console();
    out.push_str(&format!(
        "{} {} consumed, {} pending\n",
        "Console:".bright_magenta().bold(),
        console.consumed().len(),
        console.pending().len()
    ));
    if !console.pending().is_empty() {
        let text = String::from_utf8_lossy(console.pending());
        let escaped = text.escape_debug().to_string();
        out.push_str(&format!("  pending: {}\n", escaped.bright_yellow()));
    }

    out.push_str(&format!("{}\n", "Address map:".bright_magenta().bold()));
    for range in IO_ADDRESS_MAP.iter() {
        out.push_str(&format!(
            "  {:<12}[{:#010x}, {:#010x})\n",
            format!("{:?}", range.peripheral),
            range.base,
            range.limit
        ));
    }

    out
}

fn format_register_value(value: u64) -> ColoredString {
    match value {
        0 => "0x0000000000000000".bright_black(),
        v if v < 0x1000 => format!("{v:#018x}").bright_red(),
        v => format!("{v:#018x}").white(),
    }
}
