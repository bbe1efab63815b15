// src/config/state.rs
use super::options::AppOptions;

#[derive(Clone, Debug)]
pub struct GuiState {
    pub window_w: u32,
    pub window_h: u32,

    /// Address shown in the address bar on startup.
    pub last_address: String,
}

impl Default for GuiState {
    fn default() -> Self {
        Self {
            window_w: 980,
            window_h: 640,
            last_address: s!(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppState {
    pub options: AppOptions,
    pub gui: GuiState,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            options: AppOptions::default(),
            gui: GuiState::default(),
        }
    }
}
