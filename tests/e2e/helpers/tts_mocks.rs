use httpmock::Method::GET;
use httpmock::{Mock, MockServer};

/// Minimal MP3 frame with a trailing marker byte so clips can be told apart
pub fn mock_audio_bytes(marker: u8) -> Vec<u8> {
    vec![
        0xFF, 0xFB, 0x90, 0x00, // MP3 frame header
        0x00, 0x00, 0x00, marker,
    ]
}

/// Respond with audio for one exact text
pub fn mock_clip<'a>(server: &'a MockServer, text: &str, audio: &[u8]) -> Mock<'a> {
    let audio = audio.to_vec();
    server.mock(|when, then| {
        when.method(GET)
            .path("/translate_tts")
            .query_param("q", text)
            .query_param("client", "tw-ob");
        then.status(200)
            .header("content-type", "audio/mpeg")
            .body(audio);
    })
}

/// Fail every request for one exact text
pub fn mock_outage<'a>(server: &'a MockServer, text: &str, status: u16) -> Mock<'a> {
    server.mock(|when, then| {
        when.method(GET).path("/translate_tts").query_param("q", text);
        then.status(status).body("Service Unavailable");
    })
}
