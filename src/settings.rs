//! Audio preferences
//!
//! Held in memory for the session; nothing is written back to the browser.

/// Player-facing sound settings
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Silence everything
    pub muted: bool,
    /// Pause music while the window loses focus
    pub mute_on_blur: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
            mute_on_blur: true,
        }
    }
}

impl Settings {
    fn scaled(&self, channel: f32) -> f64 {
        if self.muted {
            return 0.0;
        }
        (self.master_volume.clamp(0.0, 1.0) * channel.clamp(0.0, 1.0)) as f64
    }

    /// Volume handed to one-shot effects
    pub fn effective_sfx_volume(&self) -> f64 {
        self.scaled(self.sfx_volume)
    }

    /// Volume handed to the music loop
    pub fn effective_music_volume(&self) -> f64 {
        self.scaled(self.music_volume)
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
        log::info!("Audio {}", if self.muted { "muted" } else { "unmuted" });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_volumes() {
        let settings = Settings {
            master_volume: 0.5,
            sfx_volume: 0.5,
            music_volume: 1.0,
            ..Default::default()
        };
        assert!((settings.effective_sfx_volume() - 0.25).abs() < 1e-6);
        assert!((settings.effective_music_volume() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_mute_silences_everything() {
        let mut settings = Settings::default();
        settings.toggle_mute();
        assert_eq!(settings.effective_sfx_volume(), 0.0);
        assert_eq!(settings.effective_music_volume(), 0.0);
        settings.toggle_mute();
        assert!(settings.effective_music_volume() > 0.0);
    }

    #[test]
    fn test_out_of_range_volume_is_clamped() {
        let settings = Settings {
            master_volume: 3.0,
            sfx_volume: -1.0,
            ..Default::default()
        };
        assert_eq!(settings.effective_sfx_volume(), 0.0);
        assert!((settings.effective_music_volume() - 0.7).abs() < 1e-6);
    }
}
