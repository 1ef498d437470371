use crate::e2e::helpers;

use helpers::fixtures::{vocabulary_set, write_batch_file};
use helpers::tts_mocks::{mock_audio_bytes, mock_clip, mock_outage};
use helpers::{batch_config, TestContext};
use kana_audio_gen::controllers::batch::{write_report, BatchController};
use kana_audio_gen::domain::shared::report_dto::BatchReport;
use kana_audio_gen::domain::synthesis::{BatchError, BatchResult, BatchRunnerApi};
use kana_audio_gen::domain::vocabulary::{find_builtin, VocabularyItem, VocabularySet};
use kana_audio_gen::error::AppError;
use pretty_assertions::assert_eq;

#[tokio::test]
async fn it_should_generate_every_clip_of_a_healthy_batch() {
    let ctx = TestContext::new();
    let set = find_builtin("hiragana-m").unwrap();
    let mocks: Vec<_> = set
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| mock_clip(&ctx.server, &item.text, &mock_audio_bytes(i as u8)))
        .collect();
    let base_dir = ctx.output_root().join(&set.directory);

    let result = ctx
        .runner()
        .run(&set.items, &base_dir, &batch_config(3))
        .await
        .unwrap();

    assert_eq!(
        result,
        BatchResult {
            total: 5,
            succeeded: 5,
            failed_identifiers: vec![],
        }
    );
    for (i, (item, mock)) in set.items.iter().zip(&mocks).enumerate() {
        mock.assert_hits(1);
        let clip = std::fs::read(ctx.clip_path("hiragana/m", &item.id)).unwrap();
        assert_eq!(clip, mock_audio_bytes(i as u8));
    }
}

#[tokio::test]
async fn it_should_retry_a_failing_item_and_keep_going() {
    let ctx = TestContext::new();
    let items = vec![
        VocabularyItem::new("item1", "いち"),
        VocabularyItem::new("item2", "に"),
        VocabularyItem::new("item3", "さん"),
    ];
    let ok_first = mock_clip(&ctx.server, "いち", &mock_audio_bytes(1));
    let outage = mock_outage(&ctx.server, "に", 503);
    let ok_last = mock_clip(&ctx.server, "さん", &mock_audio_bytes(3));
    let base_dir = ctx.output_root().join("n5/numbers");

    let result = ctx
        .runner()
        .run(&items, &base_dir, &batch_config(2))
        .await
        .unwrap();

    assert_eq!(
        result,
        BatchResult {
            total: 3,
            succeeded: 2,
            failed_identifiers: vec!["item2".to_string()],
        }
    );
    ok_first.assert_hits(1);
    outage.assert_hits(2);
    ok_last.assert_hits(1);
    assert!(!ctx.clip_path("n5/numbers", "item2").exists());
    assert!(ctx.clip_path("n5/numbers", "item3").exists());
}

#[tokio::test]
async fn it_should_reject_duplicate_identifiers_without_calling_the_service() {
    let ctx = TestContext::new();
    let mock = mock_clip(&ctx.server, "あめ", &mock_audio_bytes(1));
    let items = vec![
        VocabularyItem::new("ame", "あめ"),
        VocabularyItem::new("ame", "あめ"),
    ];

    let err = ctx
        .runner()
        .run(&items, &ctx.output_root().join("dup"), &batch_config(3))
        .await
        .unwrap_err();

    assert!(matches!(err, BatchError::DuplicateIdentifier(_)));
    mock.assert_hits(0);
}

#[tokio::test]
async fn it_should_converge_when_rerun_after_an_outage() {
    let ctx = TestContext::new();
    let items = vec![VocabularyItem::new("hon", "ほん"), VocabularyItem::new("ten", "てん")];
    let base_dir = ctx.output_root().join("n5/wn");
    let runner = ctx.runner();

    let hon = mock_clip(&ctx.server, "ほん", &mock_audio_bytes(1));
    let mut outage = mock_outage(&ctx.server, "てん", 500);
    let first = runner.run(&items, &base_dir, &batch_config(2)).await.unwrap();
    assert_eq!(first.failed_identifiers, vec!["ten".to_string()]);

    // Service recovers; the full batch is simply run again
    outage.delete();
    let ten = mock_clip(&ctx.server, "てん", &mock_audio_bytes(2));
    let second = runner.run(&items, &base_dir, &batch_config(2)).await.unwrap();

    assert!(second.is_complete());
    hon.assert_hits(2);
    ten.assert_hits(1);
    assert_eq!(std::fs::read(ctx.clip_path("n5/wn", "hon")).unwrap(), mock_audio_bytes(1));
    assert_eq!(std::fs::read(ctx.clip_path("n5/wn", "ten")).unwrap(), mock_audio_bytes(2));
}

#[tokio::test]
async fn it_should_generate_batch_files_through_the_controller_and_report() {
    let ctx = TestContext::new();
    let scratch = tempfile::tempdir().unwrap();
    let set = vocabulary_set(
        "roleplay",
        "n5/roleplayH",
        &[("konnichiwa", "こんにちは。"), ("sayounara", "さようなら。")],
    );
    let batch_file = write_batch_file(scratch.path(), &set);
    let loaded = VocabularySet::from_json_file(&batch_file).unwrap();
    let _hello = mock_clip(&ctx.server, "こんにちは。", &mock_audio_bytes(1));
    let _goodbye = mock_outage(&ctx.server, "さようなら。", 429);

    let controller = BatchController::new(
        ctx.runner(),
        ctx.output_root().to_path_buf(),
        batch_config(1),
    );
    let generation = controller.generate(&[loaded]).await;
    assert!(generation.aborted.is_none());

    let report_path = scratch.path().join("report.json");
    write_report(&report_path, &generation.reports).unwrap();
    let written: Vec<BatchReport> =
        serde_json::from_str(&std::fs::read_to_string(&report_path).unwrap()).unwrap();

    assert_eq!(written.len(), 1);
    assert_eq!(written[0].set, "roleplay");
    assert_eq!(written[0].total, 2);
    assert_eq!(written[0].succeeded, 1);
    assert_eq!(written[0].failed_identifiers, vec!["sayounara".to_string()]);
    assert!(ctx.clip_path("n5/roleplayH", "konnichiwa").exists());
    assert!(!ctx.clip_path("n5/roleplayH", "sayounara").exists());
}

#[tokio::test]
async fn it_should_stop_at_an_unusable_directory_and_keep_finished_reports() {
    let ctx = TestContext::new();
    let scratch = tempfile::tempdir().unwrap();
    // A regular file where the second set's directory should go
    std::fs::write(ctx.output_root().join("n5"), b"in the way").unwrap();
    let first = vocabulary_set("m", "hiragana/m", &[("ma", "ま")]);
    let blocked = vocabulary_set("yr", "n5/yr", &[("yama", "やま")]);
    let ma = mock_clip(&ctx.server, "ま", &mock_audio_bytes(1));
    let yama = mock_clip(&ctx.server, "やま", &mock_audio_bytes(2));

    let controller = BatchController::new(
        ctx.runner(),
        ctx.output_root().to_path_buf(),
        batch_config(3),
    );
    let generation = controller.generate(&[first, blocked]).await;

    let err = generation.aborted.as_ref().unwrap();
    assert!(matches!(err, AppError::Storage(_)));
    assert_eq!(err.exit_code(), 73);
    ma.assert_hits(1);
    yama.assert_hits(0);

    let report_path = scratch.path().join("report.json");
    write_report(&report_path, &generation.reports).unwrap();
    let written: Vec<BatchReport> =
        serde_json::from_str(&std::fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(written.len(), 1);
    assert_eq!(written[0].set, "m");
    assert!(written[0].is_complete());
}
