use rvsim_mmio::AmoOp;
use thiserror::Error;

/// Upper bound on a single `tick` line.
pub const MAX_TICKS: u64 = 1 << 32;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    #[error("line {line}: unknown command `{command}`")]
    UnknownCommand { line: usize, command: String },

    #[error("line {line}: missing operand for `{command}`")]
    MissingOperand { line: usize, command: String },

    #[error("line {line}: invalid number `{text}`")]
    InvalidNumber { line: usize, text: String },

    #[error("line {line}: unknown atomic operation `{text}`")]
    UnknownAmoOp { line: usize, text: String },

    #[error("line {line}: trailing operand `{text}`")]
    TrailingOperand { line: usize, text: String },

    #[error("line {line}: tick count {count} exceeds {max}", max = MAX_TICKS)]
    TooManyTicks { line: usize, count: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Read { addr: u64 },
    Write { addr: u64, value: u64 },
    Amo { addr: u64, op: AmoOp, value: u64 },
    Tick { count: u64 },
    Drain,
    Dump,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub line: usize,
    pub command: Command,
}

fn parse_number(line: usize, text: &str) -> Result<u64, ScriptError> {
    let cleaned = text.replace('_', "");
    let hex = cleaned
        .strip_prefix("0x")
        .or_else(|| cleaned.strip_prefix("0X"));
    let parsed = match hex {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => cleaned.parse(),
    };
    parsed.map_err(|_| ScriptError::InvalidNumber {
        line,
        text: text.to_string(),
    })
}

fn operand<'a>(
    line: usize,
    command: &str,
    words: &mut impl Iterator<Item = &'a str>,
) -> Result<&'a str, ScriptError> {
    words.next().ok_or_else(|| ScriptError::MissingOperand {
        line,
        command: command.to_string(),
    })
}

fn parse_tick_count(line: usize, text: Option<&str>) -> Result<u64, ScriptError> {
    let count = match text {
        Some(text) => parse_number(line, text)?,
        None => 1,
    };
    if count > MAX_TICKS {
        return Err(ScriptError::TooManyTicks { line, count });
    }
    Ok(count)
}

fn parse_line(line: usize, text: &str) -> Result<Option<Command>, ScriptError> {
    let text = text.split('#').next().unwrap_or_default();
    let mut words = text.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(None);
    };

    let parsed = match command.to_ascii_lowercase().as_str() {
        "read" | "r" => {
            let addr = parse_number(line, operand(line, command, &mut words)?)?;
            Command::Read { addr }
        }
        "write" | "w" => {
            let addr = parse_number(line, operand(line, command, &mut words)?)?;
            let value = parse_number(line, operand(line, command, &mut words)?)?;
            Command::Write { addr, value }
        }
        "amo" => {
            let addr = parse_number(line, operand(line, command, &mut words)?)?;
            let op_text = operand(line, command, &mut words)?;
            let Some(op) = AmoOp::from_mnemonic(op_text) else {
                return Err(ScriptError::UnknownAmoOp {
                    line,
                    text: op_text.to_string(),
                });
            };
            let value = parse_number(line, operand(line, command, &mut words)?)?;
            Command::Amo { addr, op, value }
        }
        "tick" => Command::Tick {
            count: parse_tick_count(line, words.next())?,
        },
        "drain" => Command::Drain,
        "dump" => Command::Dump,
        _ => {
            return Err(ScriptError::UnknownCommand {
                line,
                command: command.to_string(),
            });
        }
    };

    if let Some(extra) = words.next() {
        return Err(ScriptError::TrailingOperand {
            line,
            text: extra.to_string(),
        });
    }
    Ok(Some(parsed))
}

pub fn parse_script(source: &str) -> Result<Vec<Step>, ScriptError> {
    let mut steps = Vec::new();
    for (index, text) in source.lines().enumerate() {
        let line = index + 1;
        if let Some(command) = parse_line(line, text)? {
            steps.push(Step { line, command });
        }
    }
    Ok(steps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script() {
        let source = "\
# print a character and arm the timer
write 0xfff4 72
w 0x0200_4000 0x10   # mtimecmp

read 0x200bff8
amo 0x2000000 amoswap 1
tick 3
tick
drain
dump
";
        let steps = parse_script(source).unwrap();
        let commands: Vec<_> = steps.iter().map(|s| s.command.clone()).collect();
        assert_eq!(
            commands,
            vec![
                Command::Write {
                    addr: 0xFFF4,
                    value: 72,
                },
                Command::Write {
                    addr: 0x0200_4000,
                    value: 0x10,
                },
                Command::Read { addr: 0x0200_BFF8 },
                Command::Amo {
                    addr: 0x0200_0000,
                    op: AmoOp::Swap,
                    value: 1,
                },
                Command::Tick { count: 3 },
                Command::Tick { count: 1 },
                Command::Drain,
                Command::Dump,
            ]
        );
        assert_eq!(steps[0].line, 2);
        assert_eq!(steps[2].line, 5);
    }

    #[test]
    fn test_tick_count_is_capped() {
        let steps = parse_script("tick 0x100000000").unwrap();
        assert_eq!(steps[0].command, Command::Tick { count: MAX_TICKS });

        assert_eq!(
            parse_script("tick 0xffffffffffffffff"),
            Err(ScriptError::TooManyTicks {
                line: 1,
                count: u64::MAX,
            })
        );
        assert_eq!(
            parse_script("tick\ntick 4294967297"),
            Err(ScriptError::TooManyTicks {
                line: 2,
                count: MAX_TICKS + 1,
            })
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            parse_script("write 0xfff4"),
            Err(ScriptError::MissingOperand {
                line: 1,
                command: "write".to_string(),
            })
        );
        assert_eq!(
            parse_script("\nread 0xzz"),
            Err(ScriptError::InvalidNumber {
                line: 2,
                text: "0xzz".to_string(),
            })
        );
        assert_eq!(
            parse_script("amo 0x10 amofoo 1"),
            Err(ScriptError::UnknownAmoOp {
                line: 1,
                text: "amofoo".to_string(),
            })
        );
        assert_eq!(
            parse_script("jump 0x10"),
            Err(ScriptError::UnknownCommand {
                line: 1,
                command: "jump".to_string(),
            })
        );
        assert_eq!(
            parse_script("drain now"),
            Err(ScriptError::TrailingOperand {
                line: 1,
                text: "now".to_string(),
            })
        );
    }
}
