//! Rover drive commands
//!
//! The rover firmware reads one ASCII character per line from the HC-05
//! serial channel. Nothing is ever sent back.

/// Directional commands understood by the rover firmware
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoverCommand {
    Forward,
    Left,
    Right,
    Backward,
    Stop,
}

impl RoverCommand {
    /// Every command, in the order the instructions line lists them
    pub const ALL: [RoverCommand; 5] = [
        Self::Forward,
        Self::Left,
        Self::Right,
        Self::Backward,
        Self::Stop,
    ];

    /// Parse a command character (case-insensitive)
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'F' => Some(Self::Forward),
            'L' => Some(Self::Left),
            'R' => Some(Self::Right),
            'B' => Some(Self::Backward),
            'S' => Some(Self::Stop),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Self::Forward => 'F',
            Self::Left => 'L',
            Self::Right => 'R',
            Self::Backward => 'B',
            Self::Stop => 'S',
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Forward => "Forward",
            Self::Left => "Left",
            Self::Right => "Right",
            Self::Backward => "Backward",
            Self::Stop => "Stop",
        }
    }

    /// Bytes written to the serial link: the command character and a newline
    pub fn wire_bytes(&self) -> [u8; 2] {
        [self.as_char() as u8, b'\n']
    }
}

impl std::fmt::Display for RoverCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Human readable name for a command character, or the character itself
pub fn command_label(c: char) -> String {
    match RoverCommand::from_char(c) {
        Some(command) if command.as_char() == c => command.label().to_string(),
        _ => c.to_string(),
    }
}

/// "Control Commands: F=Forward, L=Left, ..." line shown above the pad
pub fn instructions() -> String {
    let pairs: Vec<String> = RoverCommand::ALL
        .iter()
        .map(|c| format!("{}={}", c.as_char(), c.label()))
        .collect();
    format!("Control Commands: {}", pairs.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_label() {
        assert_eq!(command_label('F'), "Forward");
        assert_eq!(command_label('S'), "Stop");
    }

    #[test]
    fn test_unknown_character_is_logged_raw() {
        assert_eq!(command_label('X'), "X");
        assert_eq!(command_label('7'), "7");
        // Lower case parses for keyboard input but is not a wire command label
        assert_eq!(command_label('f'), "f");
    }

    #[test]
    fn test_wire_bytes() {
        assert_eq!(RoverCommand::Forward.wire_bytes(), *b"F\n");
        assert_eq!(RoverCommand::Stop.wire_bytes(), *b"S\n");
    }

    #[test]
    fn test_from_char_round_trips_every_command() {
        for command in RoverCommand::ALL {
            assert_eq!(RoverCommand::from_char(command.as_char()), Some(command));
        }
        assert_eq!(RoverCommand::from_char('b'), Some(RoverCommand::Backward));
        assert_eq!(RoverCommand::from_char('Q'), None);
    }

    #[test]
    fn test_instructions_line() {
        assert_eq!(
            instructions(),
            "Control Commands: F=Forward, L=Left, R=Right, B=Backward, S=Stop"
        );
    }
}
