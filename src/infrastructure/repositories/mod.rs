pub mod audio_file_repository;
pub mod google_tts_repository;
pub mod tts_repository;

pub use audio_file_repository::AudioFileRepository;
pub use google_tts_repository::GoogleTtsRepository;
pub use tts_repository::TtsRepository;
