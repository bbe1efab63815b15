// src/config/prefs.rs
//
// Tiny key=value prefs file under .store/. Unknown keys are ignored
// so older files keep loading.
use std::{fs, path::Path};

use super::state::AppState;

pub fn load(path: &str) -> AppState {
    let mut state = AppState::default();
    if !Path::new(path).exists() {
        return state;
    }
    let text = match fs::read_to_string(path) { Ok(t) => t, Err(_) => return state };
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') { continue; }
        if let Some(eq) = line.find('=') {
            let key = line[..eq].trim();
            let val = line[eq + 1..].trim();
            match key {
                "api_base" => if !val.is_empty() { state.options.api_base = val.to_string(); },
                "last_address" => state.gui.last_address = val.to_string(),
                "window_w" => if let Ok(v) = val.parse::<u32>() { state.gui.window_w = v; },
                "window_h" => if let Ok(v) = val.parse::<u32>() { state.gui.window_h = v; },
                _ => {}
            }
        }
    }
    state
}

pub fn save(path: &str, state: &AppState) {
    let mut s = String::new();
    s.push_str(&format!("api_base={}\n", state.options.api_base));
    s.push_str(&format!("last_address={}\n", state.gui.last_address));
    s.push_str(&format!("window_w={}\n", state.gui.window_w));
    s.push_str(&format!("window_h={}\n", state.gui.window_h));
    if let Some(dir) = Path::new(path).parent() {
        let _ = fs::create_dir_all(dir);
    }
    let _ = fs::write(path, s);
}
