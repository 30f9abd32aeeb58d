use anyhow::Context;
use rvsim_mmio::debugger::render_bus_state;
use rvsim_mmio::{AccessWidth, MmioBus, MmioError, SimError, is_io_address};
use std::io::Write;

mod script;
use script::{Command, Step, parse_script};

const USAGE: &str = "usage: mmio-replay <script> [--dump]";

fn check_io(line: usize, addr: u64, out: &mut impl Write) -> Result<bool, SimError> {
    if is_io_address(addr) {
        return Ok(true);
    }
    log::warn!("line {line}: {addr:#x} is not an I/O address, skipping");
    writeln!(out, "line {line}: skip {addr:#x} (not MMIO)")?;
    Ok(false)
}

fn report_fault(line: usize, fault: MmioError, out: &mut impl Write) -> Result<(), SimError> {
    writeln!(out, "line {line}: trap {fault} (mcause {})", fault.cause())?;
    Ok(())
}

fn replay(bus: &mut MmioBus, steps: &[Step], out: &mut impl Write) -> Result<(), SimError> {
    let width = AccessWidth::DOUBLEWORD;

    for step in steps {
        let line = step.line;
        match step.command {
            Command::Read { addr } => {
                if check_io(line, addr, out)? {
                    let value = bus.read(width, addr);
                    writeln!(out, "line {line}: read {addr:#x} -> {value:#018x}")?;
                }
            }
            Command::Write { addr, value } => {
                if check_io(line, addr, out)?
                    && let Err(fault) = bus.write(width, addr, value)
                {
                    report_fault(line, fault, out)?;
                }
            }
            Command::Amo { addr, op, value } => {
                if check_io(line, addr, out)?
                    && let Err(fault) = bus.atomic_op(addr, width, op, false, false, value)
                {
                    report_fault(line, fault, out)?;
                }
            }
            Command::Tick { count } => {
                for _ in 0..count {
                    let mtime = bus.clint().mtime();
                    if bus.tick() {
                        writeln!(out, "line {line}: timer interrupt at mtime {mtime}")?;
                    }
                }
            }
            Command::Drain => {
                let bytes = bus.consume_console_output();
                out.write_all(&bytes)?;
            }
            Command::Dump => {
                write!(out, "{}", render_bus_state(bus))?;
            }
        }
    }

    Ok(())
}

fn run() -> Result<(), SimError> {
    env_logger::init();

    let mut path = None;
    let mut dump = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--dump" => dump = true,
            _ if path.is_none() => path = Some(arg),
            _ => return Err(anyhow::anyhow!(USAGE).into()),
        }
    }
    let path = path.ok_or_else(|| anyhow::anyhow!(USAGE))?;

    let source = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read script {path}"))?;
    let steps = parse_script(&source)
        .with_context(|| format!("Failed to parse script {path}"))?;
    log::info!("Loaded {} steps from {path}", steps.len());

    let mut bus = MmioBus::new();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    replay(&mut bus, &steps, &mut out)?;

    // Flush whatever the program left behind.
    out.write_all(&bus.consume_console_output())?;
    if dump {
        write!(out, "{}", render_bus_state(&bus))?;
    }
    out.flush()?;
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replay_source(source: &str) -> (MmioBus, String) {
        let mut bus = MmioBus::new();
        let mut out = Vec::new();
        let steps = parse_script(source).unwrap();
        replay(&mut bus, &steps, &mut out).unwrap();
        (bus, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_replay_console_and_timer() {
        let source = "\
write 0xfff4 0x48
write 0x2710 0x69
drain
write 0x02004000 3
tick 4
";
        let (bus, out) = replay_source(source);
        assert!(out.starts_with("Hi"));
        assert!(out.contains("line 5: timer interrupt at mtime 1"));
        assert_eq!(out.matches("timer interrupt").count(), 1);
        assert_eq!(bus.clint().mtime(), 5);
    }

    #[test]
    fn test_replay_faults_and_skips() {
        let source = "\
write 0x02000004 1
amo 0x0200bff8 amoadd 1
read 0x80000000
";
        let (bus, out) = replay_source(source);
        assert!(out.contains("line 1: trap Store/AMO access fault"));
        assert!(out.contains("line 2: trap Store/AMO access fault"));
        assert!(out.contains("(mcause 7)"));
        assert!(out.contains("line 3: skip 0x80000000"));
        assert_eq!(bus.clint().mtime(), 1);
    }

    #[test]
    fn test_replay_skips_faults_only_on_io_addresses() {
        let source = "\
write 0x80000000 1
amo 0x80000000 amoswap 1
write 0x0200bff8 9
";
        let (bus, out) = replay_source(source);
        assert_eq!(out.matches("skip 0x80000000").count(), 2);
        assert!(!out.contains("trap"));
        assert_eq!(bus.clint().mtime(), 9);
    }

    #[test]
    fn test_replay_reads() {
        let (_, out) = replay_source("read 0x0200bff8\nread 0x2715\n");
        assert!(out.contains("read 0x200bff8 -> 0x0000000000000001"));
        assert!(out.contains("read 0x2715 -> 0xaaaaaaaaaaaaaaaa"));
    }
}
