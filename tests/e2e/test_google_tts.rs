use crate::e2e::helpers;

use helpers::tts_mocks::{mock_audio_bytes, mock_clip, mock_outage};
use helpers::TestContext;
use httpmock::Method::GET;
use kana_audio_gen::domain::vocabulary::{LanguageCode, Speed};
use kana_audio_gen::infrastructure::repositories::TtsRepository;

#[tokio::test]
async fn it_should_request_audio_with_gtts_parameters() {
    let ctx = TestContext::new();
    let mock = ctx.server.mock(|when, then| {
        when.method(GET)
            .path("/translate_tts")
            .query_param("ie", "UTF-8")
            .query_param("q", "ねこ")
            .query_param("tl", "ja")
            .query_param("ttsspeed", "1")
            .query_param("total", "1")
            .query_param("idx", "0")
            .query_param("textlen", "2")
            .query_param("client", "tw-ob");
        then.status(200).body(mock_audio_bytes(7));
    });

    let audio = ctx
        .tts_repo()
        .synthesize("ねこ", &LanguageCode::japanese(), Speed::Normal)
        .await
        .unwrap();

    mock.assert();
    assert_eq!(audio, mock_audio_bytes(7));
}

#[tokio::test]
async fn it_should_request_slow_speech() {
    let ctx = TestContext::new();
    let mock = ctx.server.mock(|when, then| {
        when.method(GET)
            .path("/translate_tts")
            .query_param("q", "すし")
            .query_param("ttsspeed", "0.3");
        then.status(200).body(mock_audio_bytes(1));
    });

    ctx.tts_repo()
        .synthesize("すし", &LanguageCode::japanese(), Speed::Slow)
        .await
        .unwrap();

    mock.assert();
}

#[tokio::test]
async fn it_should_report_http_errors() {
    let ctx = TestContext::new();
    let mock = mock_outage(&ctx.server, "やま", 503);

    let err = ctx
        .tts_repo()
        .synthesize("やま", &LanguageCode::japanese(), Speed::Normal)
        .await
        .unwrap_err();

    mock.assert_hits(1);
    assert!(err.contains("503"), "unexpected error: {err}");
}

#[tokio::test]
async fn it_should_split_long_text_and_merge_audio_in_order() {
    let ctx = TestContext::new();
    // 60 + 60 characters: too long for one request, split at the full stop
    let first = format!("{}。", "あ".repeat(59));
    let second = format!("{}。", "い".repeat(59));
    let first_mock = mock_clip(&ctx.server, &first, &mock_audio_bytes(1));
    let second_mock = mock_clip(&ctx.server, &second, &mock_audio_bytes(2));

    let audio = ctx
        .tts_repo()
        .synthesize(&format!("{first}{second}"), &LanguageCode::japanese(), Speed::Normal)
        .await
        .unwrap();

    first_mock.assert();
    second_mock.assert();
    let mut expected = mock_audio_bytes(1);
    expected.extend(mock_audio_bytes(2));
    assert_eq!(audio, expected);
}
