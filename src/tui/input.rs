use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    Quit,
    Submit,
    InputChar(char),
    Backspace,
    HistoryPrev,
    HistoryNext,
    ScrollUp,
    ScrollDown,
    // editor overlay
    EditorSave,
    EditorClose,
    EditorChar(char),
    EditorBackspace,
    EditorNewline,
}

/// Maps a key event to an action. The overlay owns the keyboard while open,
/// nano-style: ^O writes out, ^X exits.
pub fn map_key(key: KeyEvent, editor_open: bool) -> Option<UiAction> {
    if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
        return None;
    }
    if editor_open {
        return match key.code {
            KeyCode::Char('o') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(UiAction::EditorSave)
            }
            KeyCode::Char('x') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(UiAction::EditorClose)
            }
            KeyCode::Enter => Some(UiAction::EditorNewline),
            KeyCode::Backspace => Some(UiAction::EditorBackspace),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(UiAction::EditorChar(c))
            }
            _ => None,
        };
    }
    match key.code {
        KeyCode::Esc => Some(UiAction::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(UiAction::Quit)
        }
        KeyCode::Enter => Some(UiAction::Submit),
        KeyCode::Up => Some(UiAction::HistoryPrev),
        KeyCode::Down => Some(UiAction::HistoryNext),
        KeyCode::PageUp => Some(UiAction::ScrollUp),
        KeyCode::PageDown => Some(UiAction::ScrollDown),
        KeyCode::Backspace => Some(UiAction::Backspace),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(UiAction::InputChar(c))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{map_key, UiAction};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn editor_keys_only_apply_while_open() {
        let ctrl_o = KeyEvent::new(KeyCode::Char('o'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl_o, true), Some(UiAction::EditorSave));
        assert_eq!(map_key(ctrl_o, false), None);
        let ctrl_x = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl_x, true), Some(UiAction::EditorClose));
    }

    #[test]
    fn plain_chars_feed_the_active_buffer() {
        let a = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        assert_eq!(map_key(a, false), Some(UiAction::InputChar('a')));
        assert_eq!(map_key(a, true), Some(UiAction::EditorChar('a')));
    }

    #[test]
    fn enter_submits_or_inserts_newline() {
        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(map_key(enter, false), Some(UiAction::Submit));
        assert_eq!(map_key(enter, true), Some(UiAction::EditorNewline));
    }
}
