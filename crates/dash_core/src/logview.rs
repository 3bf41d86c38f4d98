//! Grouping of the flat analysis log into colored display blocks.

/// Display color of one log block. Blocks cycle through the five colors in
/// declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogColor {
    Blue,
    Red,
    Yellow,
    Green,
    Brown,
}

pub const LOG_COLOR_CYCLE: [LogColor; 5] = [
    LogColor::Blue,
    LogColor::Red,
    LogColor::Yellow,
    LogColor::Green,
    LogColor::Brown,
];

#[derive(Debug, Clone, PartialEq)]
pub struct LogBlock {
    pub color: LogColor,
    pub lines: Vec<String>,
}

/// Split a flat line list into blocks on blank lines, assigning colors from
/// [`LOG_COLOR_CYCLE`]. Consecutive blank lines produce no empty blocks.
pub fn group_log_blocks(lines: &[String]) -> Vec<LogBlock> {
    let mut blocks = Vec::new();
    let mut current: Vec<String> = Vec::new();

    for line in lines {
        if line.is_empty() {
            if !current.is_empty() {
                let color = LOG_COLOR_CYCLE[blocks.len() % LOG_COLOR_CYCLE.len()];
                blocks.push(LogBlock {
                    color,
                    lines: std::mem::take(&mut current),
                });
            }
        } else {
            current.push(line.clone());
        }
    }
    if !current.is_empty() {
        let color = LOG_COLOR_CYCLE[blocks.len() % LOG_COLOR_CYCLE.len()];
        blocks.push(LogBlock {
            color,
            lines: current,
        });
    }

    blocks
}
