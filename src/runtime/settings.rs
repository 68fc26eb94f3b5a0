use crate::config;

/// Load and validate settings. Config is optional, so any problem falls back
/// to defaults with a note on stderr before the terminal is taken over.
pub fn load_settings() -> config::Settings {
    match config::Settings::load() {
        Ok(s) => {
            if let Err(msg) = s.validate() {
                eprintln!("vibe: invalid config, using defaults: {msg}");
                config::Settings::default()
            } else {
                s
            }
        }
        Err(e) => {
            eprintln!("vibe: failed to load config, using defaults: {e}");
            config::Settings::default()
        }
    }
}
