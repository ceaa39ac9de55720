//! Keyboard input handling for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::runtime::App;
use crate::config::ScenarioConfig;

/// Preset bound to a digit key: `1` selects the first entry of
/// [`ScenarioConfig::PRESETS`], and so on.
pub fn preset_for_key(c: char) -> Option<&'static str> {
    let idx = c.to_digit(10)?.checked_sub(1)?;
    ScenarioConfig::PRESETS.get(idx as usize).copied()
}

/// Footer line listing every binding, presets included.
pub fn footer_hint() -> String {
    let presets: Vec<String> = ScenarioConfig::PRESETS
        .iter()
        .enumerate()
        .map(|(i, name)| format!("{}:{name}", i + 1))
        .collect();
    format!(" q:Quit  Space:Pause  +/-:Speed  r:Restart  {}", presets.join(" "))
}

/// Maps a key event to an application action.
///
/// Guards on [`KeyEventKind::Press`] to avoid double-fire on some terminals.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit = true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit = true,
        KeyCode::Char(' ') => app.toggle_pause(),
        KeyCode::Char('+' | '=') | KeyCode::Right => app.speed_up(),
        KeyCode::Char('-') | KeyCode::Left => app.speed_down(),
        KeyCode::Char('r') => app.restart(),
        KeyCode::Char(c) => {
            if let Some(preset) = preset_for_key(c) {
                app.switch_preset(preset);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn digit_keys_follow_preset_list() {
        for (i, name) in ScenarioConfig::PRESETS.iter().enumerate() {
            let key = char::from_digit(i as u32 + 1, 10).unwrap();
            assert_eq!(preset_for_key(key), Some(*name));
        }
        assert_eq!(preset_for_key('0'), None);
        assert_eq!(preset_for_key('9'), None);
        assert_eq!(preset_for_key('x'), None);
    }

    #[test]
    fn footer_lists_every_preset() {
        let hint = footer_hint();
        for (i, name) in ScenarioConfig::PRESETS.iter().enumerate() {
            assert!(hint.contains(&format!("{}:{name}", i + 1)), "{hint}");
        }
    }

    #[test]
    fn digit_key_switches_preset() {
        let mut app = App::new("baseline").unwrap();
        handle_key(&mut app, press(KeyCode::Char('3')));
        assert_eq!(app.preset_name, ScenarioConfig::PRESETS[2]);
    }

    #[test]
    fn quit_and_pause_keys() {
        let mut app = App::new("baseline").unwrap();
        handle_key(&mut app, press(KeyCode::Char(' ')));
        assert!(app.paused);
        handle_key(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.quit);
    }
}
