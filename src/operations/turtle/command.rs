/// What a turtle command does.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CommandKind {
    /// Lift the pen and move to `(x, y)` on face 1, measured along the
    /// initial heading and its right-hand side.
    Start { x: f64, y: f64 },
    Forward(f64),
    Backward(f64),
    /// Degrees, counter-clockwise seen from outside the current face.
    TurnLeft(f64),
    /// Degrees, clockwise seen from outside the current face.
    TurnRight(f64),
}

/// A parsed command with its 1-based source line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurtleCommand {
    pub kind: CommandKind,
    pub line_number: usize,
}

impl TurtleCommand {
    #[must_use]
    pub fn new(kind: CommandKind, line_number: usize) -> Self {
        Self { kind, line_number }
    }

    /// Signed travel distance for motion commands, `None` otherwise.
    #[must_use]
    pub fn distance(&self) -> Option<f64> {
        match self.kind {
            CommandKind::Forward(d) => Some(d),
            CommandKind::Backward(d) => Some(-d),
            _ => None,
        }
    }

    /// Signed turn in radians, positive to the left, for turn commands.
    #[must_use]
    pub fn turn(&self) -> Option<f64> {
        match self.kind {
            CommandKind::TurnLeft(deg) => Some(deg.to_radians()),
            CommandKind::TurnRight(deg) => Some(-deg.to_radians()),
            _ => None,
        }
    }
}

/// Parses a command script.
///
/// One command per line, keywords are case-insensitive:
///
/// ```text
/// start <x> <y>
/// fd <distance>
/// bk <distance>
/// lt <degrees>
/// rt <degrees>
/// ```
///
/// Blank lines and unknown keywords are skipped. Missing or unparseable
/// numbers read as 0.
#[must_use]
pub fn parse_commands(text: &str) -> Vec<TurtleCommand> {
    text.lines()
        .enumerate()
        .filter_map(|(i, line)| {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            let keyword = tokens.first()?.to_ascii_lowercase();
            let arg = |n: usize| number(tokens.get(n).copied());
            let kind = match keyword.as_str() {
                "start" => CommandKind::Start { x: arg(1), y: arg(2) },
                "fd" => CommandKind::Forward(arg(1)),
                "bk" => CommandKind::Backward(arg(1)),
                "lt" => CommandKind::TurnLeft(arg(1)),
                "rt" => CommandKind::TurnRight(arg(1)),
                _ => return None,
            };
            Some(TurtleCommand::new(kind, i + 1))
        })
        .collect()
}

fn number(token: Option<&str>) -> f64 {
    token
        .and_then(|t| t.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_basic_script() {
        let commands = parse_commands("start 0 0\nfd 1.0\nrt 90\nfd 1.0");
        assert_eq!(
            commands,
            vec![
                TurtleCommand::new(CommandKind::Start { x: 0.0, y: 0.0 }, 1),
                TurtleCommand::new(CommandKind::Forward(1.0), 2),
                TurtleCommand::new(CommandKind::TurnRight(90.0), 3),
                TurtleCommand::new(CommandKind::Forward(1.0), 4),
            ]
        );
    }

    #[test]
    fn keywords_ignore_case_and_spacing() {
        let commands = parse_commands("  FD   2\n\tLt 45\nBK 0.5");
        assert_eq!(commands.len(), 3);
        assert_eq!(commands[0].kind, CommandKind::Forward(2.0));
        assert_eq!(commands[1].kind, CommandKind::TurnLeft(45.0));
        assert_eq!(commands[2].distance(), Some(-0.5));
    }

    #[test]
    fn skips_blank_and_unknown_lines_keeping_line_numbers() {
        let commands = parse_commands("\njump 3\nfd 1\n\nrt 10\n");
        let lines: Vec<usize> = commands.iter().map(|c| c.line_number).collect();
        assert_eq!(lines, vec![3, 5]);
    }

    #[test]
    fn bad_numbers_read_as_zero() {
        let commands = parse_commands("fd abc\nstart 1\nlt NaN\nrt inf");
        assert_eq!(commands[0].kind, CommandKind::Forward(0.0));
        assert_eq!(commands[1].kind, CommandKind::Start { x: 1.0, y: 0.0 });
        assert_eq!(commands[2].kind, CommandKind::TurnLeft(0.0));
        assert_eq!(commands[3].kind, CommandKind::TurnRight(0.0));
    }

    #[test]
    fn turns_are_signed_radians() {
        let left = TurtleCommand::new(CommandKind::TurnLeft(90.0), 1);
        let right = TurtleCommand::new(CommandKind::TurnRight(90.0), 1);
        assert!((left.turn().unwrap_or_default() - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert!((right.turn().unwrap_or_default() + std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert_eq!(left.distance(), None);
    }
}
