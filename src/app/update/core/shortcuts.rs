use super::super::super::messages::Message;
use super::super::super::state::App;
use super::super::Effect;
use iced::keyboard::{Key, Modifiers, key};

impl App {
    pub(super) fn handle_key_pressed(
        &mut self,
        key: Key,
        modifiers: Modifiers,
        effects: &mut Vec<Effect>,
    ) {
        if let Some(shortcut) = self.shortcut_message_for_key(key, modifiers) {
            effects.extend(self.reduce(shortcut));
        }
    }

    pub(super) fn shortcut_message_for_key(
        &self,
        key: Key,
        modifiers: Modifiers,
    ) -> Option<Message> {
        let pressed = match key.as_ref() {
            Key::Named(key::Named::Space) => "space".to_string(),
            Key::Character(ch) => ch.to_ascii_lowercase(),
            _ => return None,
        };

        if Self::shortcut_matches(
            &self.config.key_toggle_play_pause,
            "space",
            &pressed,
            modifiers,
        ) {
            Some(Message::TogglePlayPause)
        } else if Self::shortcut_matches(&self.config.key_safe_quit, "ctrl+q", &pressed, modifiers)
        {
            Some(Message::SafeQuit)
        } else if Self::shortcut_matches(
            &self.config.key_toggle_notebook,
            "ctrl+n",
            &pressed,
            modifiers,
        ) {
            Some(Message::ToggleNotebook)
        } else if Self::shortcut_matches(
            &self.config.key_toggle_file_list,
            "ctrl+l",
            &pressed,
            modifiers,
        ) {
            Some(Message::ToggleFileList)
        } else {
            None
        }
    }

    pub(super) fn shortcut_matches(
        raw: &str,
        fallback: &str,
        pressed: &str,
        modifiers: Modifiers,
    ) -> bool {
        let normalized = Self::normalize_shortcut_token(raw, fallback);

        let mut required_ctrl = false;
        let mut required_alt = false;
        let mut required_logo = false;
        let mut required_shift = false;
        let mut required_key: Option<&str> = None;

        for token in normalized
            .split('+')
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            match token {
                "ctrl" | "control" => required_ctrl = true,
                "alt" => required_alt = true,
                "logo" | "meta" | "super" | "cmd" | "command" => required_logo = true,
                "shift" => required_shift = true,
                key => required_key = Some(key),
            }
        }

        let required_key = required_key.unwrap_or(fallback);
        if pressed != required_key {
            return false;
        }

        modifiers.control() == required_ctrl
            && modifiers.alt() == required_alt
            && modifiers.logo() == required_logo
            && modifiers.shift() == required_shift
    }

    pub(super) fn normalize_shortcut_token(raw: &str, fallback: &str) -> String {
        let normalized = raw.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            fallback.to_string()
        } else {
            normalized.replace("spacebar", "space")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::keyboard::Modifiers;

    #[test]
    fn normalizes_spacebar_alias() {
        assert_eq!(App::normalize_shortcut_token(" SpaceBar ", "x"), "space");
    }

    #[test]
    fn matches_ctrl_n_shortcut() {
        assert!(App::shortcut_matches("ctrl+n", "x", "n", Modifiers::CTRL));
        assert!(!App::shortcut_matches("ctrl+n", "x", "n", Modifiers::empty()));
    }

    #[test]
    fn rejects_unexpected_extra_modifier() {
        assert!(!App::shortcut_matches(
            "ctrl+l",
            "x",
            "l",
            Modifiers::CTRL | Modifiers::SHIFT,
        ));
    }

    #[test]
    fn empty_binding_uses_fallback() {
        assert!(App::shortcut_matches("  ", "space", "space", Modifiers::empty()));
    }

    #[test]
    fn configured_keys_map_to_messages() {
        let app = super::super::tests::test_app();
        let message = app.shortcut_message_for_key(Key::Character("l".into()), Modifiers::CTRL);
        assert!(matches!(message, Some(Message::ToggleFileList)));
        let message = app.shortcut_message_for_key(Key::Character("Q".into()), Modifiers::CTRL);
        assert!(matches!(message, Some(Message::SafeQuit)));
        let message = app.shortcut_message_for_key(Key::Character("x".into()), Modifiers::empty());
        assert!(message.is_none());
    }
}
