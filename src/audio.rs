//! Sound playback through `<audio>` elements
//!
//! Every effect gets a fresh element so overlapping shots don't cut each
//! other off. The music loop keeps one element for the whole session.

use crate::sim::GameEvent;

/// Background music, looped while a game is running
pub const MUSIC_PATH: &str = "sounds/S31-200% Production.ogg";

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// A volley left the ship
    Shot,
    /// An enemy was shot down
    Explosion,
}

impl SoundEffect {
    pub fn path(self) -> &'static str {
        match self {
            SoundEffect::Shot => "sounds/Shoot 3.wav",
            SoundEffect::Explosion => "sounds/explosion.wav",
        }
    }

    /// Effect that accompanies a game event, if any
    pub fn for_event(event: GameEvent) -> Option<Self> {
        match event {
            GameEvent::Shot => Some(SoundEffect::Shot),
            GameEvent::EnemyDestroyed => Some(SoundEffect::Explosion),
            GameEvent::GameOver | GameEvent::Reset => None,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use manager::{AudioManager, play, stop};

#[cfg(target_arch = "wasm32")]
mod manager {
    use wasm_bindgen_futures::JsFuture;
    use web_sys::HtmlAudioElement;

    use super::{MUSIC_PATH, SoundEffect};
    use crate::settings::Settings;
    use crate::sim::GameEvent;

    /// Start playback of `path` at `volume`
    ///
    /// Returns the element so the caller can stop it later. Autoplay
    /// rejections arrive asynchronously and are only logged.
    pub fn play(path: &str, volume: f64, looping: bool) -> Option<HtmlAudioElement> {
        let audio = match HtmlAudioElement::new_with_src(path) {
            Ok(audio) => audio,
            Err(e) => {
                log::warn!("Could not create audio element for {}: {:?}", path, e);
                return None;
            }
        };
        audio.set_volume(volume);
        audio.set_loop(looping);

        match audio.play() {
            Ok(promise) => {
                let path = path.to_string();
                wasm_bindgen_futures::spawn_local(async move {
                    if let Err(e) = JsFuture::from(promise).await {
                        log::warn!("Playback of {} refused: {:?}", path, e);
                    }
                });
            }
            Err(e) => log::warn!("Playback of {} failed: {:?}", path, e),
        }

        Some(audio)
    }

    /// Pause and rewind
    pub fn stop(audio: &HtmlAudioElement) {
        if let Err(e) = audio.pause() {
            log::warn!("Failed to pause audio: {:?}", e);
        }
        audio.set_current_time(0.0);
    }

    /// Audio manager for the game
    pub struct AudioManager {
        settings: Settings,
        music: Option<HtmlAudioElement>,
    }

    impl AudioManager {
        pub fn new(settings: Settings) -> Self {
            Self {
                settings,
                music: None,
            }
        }

        pub fn settings(&self) -> &Settings {
            &self.settings
        }

        pub fn set_settings(&mut self, settings: Settings) {
            self.settings = settings;
            if let Some(music) = &self.music {
                music.set_volume(self.settings.effective_music_volume());
            }
        }

        pub fn play_effect(&self, effect: SoundEffect) {
            let vol = self.settings.effective_sfx_volume();
            if vol <= 0.0 {
                return;
            }
            play(effect.path(), vol, false);
        }

        /// Restart the music loop from the beginning
        pub fn start_music(&mut self) {
            self.stop_music();
            self.music = play(MUSIC_PATH, self.settings.effective_music_volume(), true);
        }

        pub fn stop_music(&mut self) {
            if let Some(music) = self.music.take() {
                stop(&music);
            }
        }

        /// Resume a loop the browser held back until a user gesture
        pub fn resume_music(&self) {
            let Some(music) = &self.music else { return };
            if music.paused() {
                if let Err(e) = music.play() {
                    log::warn!("Failed to resume music: {:?}", e);
                }
            }
        }

        /// Pause or resume the music when the page loses or regains focus
        pub fn set_focused(&self, focused: bool) {
            if !self.settings.mute_on_blur {
                return;
            }
            if focused {
                self.resume_music();
            } else if let Some(music) = &self.music {
                if let Err(e) = music.pause() {
                    log::warn!("Failed to pause music: {:?}", e);
                }
            }
        }

        /// React to one simulation event
        pub fn handle_event(&mut self, event: GameEvent) {
            match event {
                GameEvent::GameOver => self.stop_music(),
                GameEvent::Reset => self.start_music(),
                other => {
                    if let Some(effect) = SoundEffect::for_event(other) {
                        self.play_effect(effect);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_sounds() {
        assert_eq!(
            SoundEffect::for_event(GameEvent::Shot),
            Some(SoundEffect::Shot)
        );
        assert_eq!(
            SoundEffect::for_event(GameEvent::EnemyDestroyed),
            Some(SoundEffect::Explosion)
        );
        assert_eq!(SoundEffect::for_event(GameEvent::GameOver), None);
        assert_eq!(SoundEffect::for_event(GameEvent::Reset), None);
    }

    #[test]
    fn test_paths_point_into_sounds_dir() {
        for effect in [SoundEffect::Shot, SoundEffect::Explosion] {
            assert!(effect.path().starts_with("sounds/"));
        }
        assert!(MUSIC_PATH.ends_with(".ogg"));
    }
}
