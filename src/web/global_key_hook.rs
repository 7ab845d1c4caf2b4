use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use yew::prelude::*;
use std::fmt;

/// The keys the game cares about, decoded from a keydown event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordleKey {
    Letter(char),
    Backspace,
    Enter,
}

impl WordleKey {
    /// Decodes a JS `event.key` value. Letters come back uppercase.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Enter" => Some(WordleKey::Enter),
            "Backspace" | "Delete" => Some(WordleKey::Backspace),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_alphabetic() => Some(WordleKey::Letter(c.to_ascii_uppercase())),
                    _ => None,
                }
            }
        }
    }
}

pub struct KeyEvent {
    event: Box<KeyboardEvent>,
    key: String,
    prevented: bool,
}

/// Listens to keydown on the whole document and forwards each event to a yew callback, so the
/// grid can be typed into without focusing anything.
///
/// Registers the listener on create, and de-registers on drop.
pub struct KeyListener {
    callback: Closure<dyn FnMut(KeyboardEvent)>,
}

impl KeyListener {
    /// None when there's no window (or the listener couldn't be added)
    pub fn create(target: Callback<KeyEvent>) -> Option<Self> {
        let window = web_sys::window()?;
        let callback = Closure::wrap(Box::new(move |event: KeyboardEvent| {
            let key = event.key();
            target.emit(KeyEvent {
                event: Box::new(event),
                key,
                prevented: false,
            })
        }) as Box<dyn FnMut(_)>);

        let cb_ref = callback.as_ref().unchecked_ref();
        match window.add_event_listener_with_callback("keydown", cb_ref) {
            Ok(()) => {
                log::debug!("registered global keydown listener");
                Some(Self { callback })
            }
            Err(err) => {
                log::warn!("failed to register keydown listener: {:?}", err);
                None
            }
        }
    }
}

impl Drop for KeyListener {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            let cb_ref = self.callback.as_ref().unchecked_ref();
            if let Ok(()) = window.remove_event_listener_with_callback("keydown", cb_ref) {
                log::debug!("de-registered keydown callback");
                return;
            }
        }

        log::warn!("did not remove global keydown callback listener!")
    }
}

impl KeyEvent {
    /// Stops the browser from also acting on this key (checked for exactly once). Returns
    /// whether this call was the one that prevented it.
    pub fn prevent_default(&mut self) -> bool {
        if self.prevented {
            return false;
        }

        self.event.prevent_default();
        self.prevented = true;
        true
    }

    /// The key as provided by JS (event.key), e.g. "a", "Enter"
    pub fn key(&self) -> &str {
        self.key.as_str()
    }

    /// The game key this event stands for. Ctrl/Cmd/Alt combinations are left to the browser so
    /// shortcuts like Cmd+R keep working.
    pub fn wordle_key(&self) -> Option<WordleKey> {
        if self.is_control_key() {
            None
        } else {
            WordleKey::from_key(self.key())
        }
    }

    pub fn is_control_key(&self) -> bool {
        self.event.ctrl_key() || self.event.meta_key() || self.event.alt_key()
    }
}

impl fmt::Debug for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyEvent[key={}, prevent_default={}]", self.key(), self.prevented)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("a", Some(WordleKey::Letter('A')); "lowercase letter")]
    #[test_case("Q", Some(WordleKey::Letter('Q')); "uppercase letter")]
    #[test_case("Enter", Some(WordleKey::Enter); "enter")]
    #[test_case("Backspace", Some(WordleKey::Backspace); "backspace")]
    #[test_case("Delete", Some(WordleKey::Backspace); "delete")]
    #[test_case("1", None; "digit")]
    #[test_case("Shift", None; "modifier")]
    #[test_case("é", None; "accented")]
    fn test_from_key(key: &str, expected: Option<WordleKey>) {
        assert_eq!(WordleKey::from_key(key), expected);
    }
}
