/// Logical player commands; the browser maps `KeyboardEvent.code` onto these.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Jump,
    /// Honored only after a game over.
    Restart,
}

impl Command {
    pub fn from_key_code(code: &str) -> Option<Self> {
        match code {
            "Space" | "ArrowUp" => Some(Command::Jump),
            "KeyR" => Some(Command::Restart),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_jump_and_restart_keys() {
        assert_eq!(Command::from_key_code("Space"), Some(Command::Jump));
        assert_eq!(Command::from_key_code("ArrowUp"), Some(Command::Jump));
        assert_eq!(Command::from_key_code("KeyR"), Some(Command::Restart));
        assert_eq!(Command::from_key_code("ArrowDown"), None);
        assert_eq!(Command::from_key_code("r"), None);
    }
}
