//! Audio seam: cues derived from engine events and the sinks that react to them.

/// Cue for selecting background and event tracks. Track names live in the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    GameStarted,
    RowsCleared(u32),
    Paused,
    Resumed,
    GameOverWithNewHighScore,
    GameOverNormal,
}

/// Purely reactive consumer of cues.
pub trait AudioSink {
    fn cue(&mut self, cue: AudioCue);
}

/// Default sink: logs every cue at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn cue(&mut self, cue: AudioCue) {
        log::debug!("audio cue: {cue:?}");
    }
}

impl<S: AudioSink + ?Sized> AudioSink for Box<S> {
    fn cue(&mut self, cue: AudioCue) {
        (**self).cue(cue);
    }
}

#[cfg(feature = "audio")]
pub use music::{AudioError, MusicPlayer};

#[cfg(feature = "audio")]
mod music {
    use super::{AudioCue, AudioSink};
    use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
    use std::fs::File;
    use std::io::BufReader;
    use std::path::{Path, PathBuf};
    use thiserror::Error;

    const LEVEL_TRACK: &str = "level_music.mp3";
    const HIGH_SCORE_TRACK: &str = "high_score.mp3";
    const GAME_OVER_TRACK: &str = "game_over.mp3";
    const MUSIC_VOLUME: f32 = 0.5;

    #[derive(Debug, Error)]
    pub enum AudioError {
        #[error("no audio output: {0}")]
        Stream(#[from] rodio::StreamError),
        #[error("cannot open sink: {0}")]
        Play(#[from] rodio::PlayError),
        #[error("cannot decode {path}: {source}")]
        Decode {
            path: PathBuf,
            source: rodio::decoder::DecoderError,
        },
        #[error("cannot open {path}: {source}")]
        Io {
            path: PathBuf,
            source: std::io::Error,
        },
    }

    /// Plays tracks from a music directory through the default output device.
    pub struct MusicPlayer {
        _stream: OutputStream,
        handle: OutputStreamHandle,
        dir: PathBuf,
        current: Option<Sink>,
    }

    impl MusicPlayer {
        pub fn new(dir: impl Into<PathBuf>) -> Result<Self, AudioError> {
            let (stream, handle) = OutputStream::try_default()?;
            let mut player = Self {
                _stream: stream,
                handle,
                dir: dir.into(),
                current: None,
            };
            // The level track already plays behind the title screen.
            if let Err(err) = player.play(LEVEL_TRACK, true) {
                log::warn!("audio: {err}");
            }
            Ok(player)
        }

        fn decode(path: &Path) -> Result<Decoder<BufReader<File>>, AudioError> {
            let file = File::open(path).map_err(|source| AudioError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            Decoder::new(BufReader::new(file)).map_err(|source| AudioError::Decode {
                path: path.to_path_buf(),
                source,
            })
        }

        /// Replace whatever is playing with `track`.
        fn play(&mut self, track: &str, looped: bool) -> Result<(), AudioError> {
            let source = Self::decode(&self.dir.join(track))?;
            let sink = Sink::try_new(&self.handle)?;
            sink.set_volume(MUSIC_VOLUME);
            if looped {
                sink.append(source.repeat_infinite());
            } else {
                sink.append(source);
            }
            // Dropping the previous sink stops it.
            self.current = Some(sink);
            Ok(())
        }
    }

    /// What the player does with the output for one cue.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub(super) enum Action {
        Play { track: &'static str, looped: bool },
        Pause,
        Resume,
    }

    /// A row clear restarts the level track from the top, as starting a game does.
    pub(super) fn action_for(cue: AudioCue) -> Action {
        match cue {
            AudioCue::GameStarted | AudioCue::RowsCleared(_) => Action::Play {
                track: LEVEL_TRACK,
                looped: true,
            },
            AudioCue::Paused => Action::Pause,
            AudioCue::Resumed => Action::Resume,
            AudioCue::GameOverWithNewHighScore => Action::Play {
                track: HIGH_SCORE_TRACK,
                looped: false,
            },
            AudioCue::GameOverNormal => Action::Play {
                track: GAME_OVER_TRACK,
                looped: false,
            },
        }
    }

    impl AudioSink for MusicPlayer {
        fn cue(&mut self, cue: AudioCue) {
            let result = match action_for(cue) {
                Action::Play { track, looped } => self.play(track, looped),
                Action::Pause => {
                    if let Some(sink) = &self.current {
                        sink.pause();
                    }
                    Ok(())
                }
                Action::Resume => {
                    if let Some(sink) = &self.current {
                        sink.play();
                    }
                    Ok(())
                }
            };
            if let Err(err) = result {
                log::warn!("audio: {err}");
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn row_clear_restarts_level_track() {
            let level = Action::Play {
                track: LEVEL_TRACK,
                looped: true,
            };
            assert_eq!(action_for(AudioCue::RowsCleared(2)), level);
            assert_eq!(action_for(AudioCue::GameStarted), level);
        }

        #[test]
        fn game_over_tracks_play_once() {
            assert_eq!(
                action_for(AudioCue::GameOverNormal),
                Action::Play {
                    track: GAME_OVER_TRACK,
                    looped: false
                }
            );
            assert_eq!(
                action_for(AudioCue::GameOverWithNewHighScore),
                Action::Play {
                    track: HIGH_SCORE_TRACK,
                    looped: false
                }
            );
            assert_eq!(action_for(AudioCue::Paused), Action::Pause);
            assert_eq!(action_for(AudioCue::Resumed), Action::Resume);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<AudioCue>);

    impl AudioSink for Recorder {
        fn cue(&mut self, cue: AudioCue) {
            self.0.push(cue);
        }
    }

    #[test]
    fn boxed_sink_forwards() {
        let mut boxed: Box<Recorder> = Box::default();
        boxed.cue(AudioCue::Paused);
        boxed.cue(AudioCue::Resumed);
        assert_eq!(boxed.0, vec![AudioCue::Paused, AudioCue::Resumed]);
    }
}
