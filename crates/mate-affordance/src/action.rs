use core::fmt;

/// Action the planner wants to perform on a world object.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AffordanceAction {
    Climb,
    Jump,
    TakeCover,
    Interact,
    Pickup,
    Open,
    Other(String),
}

impl AffordanceAction {
    /// Parse a verb. Unknown verbs are kept as [`AffordanceAction::Other`], lowercased.
    pub fn from_verb(verb: &str) -> Self {
        let verb = verb.trim().to_ascii_lowercase();
        match verb.as_str() {
            "climb" => AffordanceAction::Climb,
            "jump" | "jump_on" => AffordanceAction::Jump,
            "take_cover" | "cover" => AffordanceAction::TakeCover,
            "interact" | "use" => AffordanceAction::Interact,
            "pickup" | "pick_up" => AffordanceAction::Pickup,
            "open" => AffordanceAction::Open,
            _ => AffordanceAction::Other(verb),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            AffordanceAction::Climb => "climb",
            AffordanceAction::Jump => "jump",
            AffordanceAction::TakeCover => "take_cover",
            AffordanceAction::Interact => "interact",
            AffordanceAction::Pickup => "pickup",
            AffordanceAction::Open => "open",
            AffordanceAction::Other(verb) => verb,
        }
    }
}

impl fmt::Display for AffordanceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_map_to_the_same_action() {
        assert_eq!(AffordanceAction::from_verb("jump_on"), AffordanceAction::Jump);
        assert_eq!(AffordanceAction::from_verb(" Pick_Up "), AffordanceAction::Pickup);
        assert_eq!(AffordanceAction::from_verb("use"), AffordanceAction::Interact);
        assert_eq!(
            AffordanceAction::from_verb("Throw"),
            AffordanceAction::Other("throw".to_string())
        );
    }
}
