//! Vocabulary tables shipped with the generator.
//!
//! Each table maps to one directory under the output root; the identifiers are
//! the file stems the app screens load.

use super::error::VocabularyError;
use super::model::{VocabularyItem, VocabularySet};
use std::path::PathBuf;

const GRUPO_A_PHRASES: &[(&str, &str)] = &[
    ("a_phrase", "あ、あめ"),
    ("i_phrase", "い、いぬ"),
    ("u_phrase", "う、うみ"),
    ("e_phrase", "え、えき"),
    ("o_phrase", "お、おちゃ"),
];

const GRUPO_A_EXAMPLES: &[(&str, &str)] = &[
    ("a_ame", "あめ"),
    ("a_asa", "あさ"),
    ("a_ai", "あい"),
    ("i_inu", "いぬ"),
    ("i_ie", "いえ"),
    ("i_isu", "いす"),
    ("u_umi", "うみ"),
    ("u_ushi", "うし"),
    ("u_uta", "うた"),
    ("e_eki", "えき"),
    ("e_enpitsu", "えんぴつ"),
    ("e_e", "え"),
    ("o_ocha", "おちゃ"),
    ("o_onigiri", "おにぎり"),
    ("o_okane", "おかね"),
];

const GRUPO_S: &[(&str, &str)] = &[
    ("sa", "さ。さかな。"),
    ("shi", "し。しま。"),
    ("su", "す。すし。"),
    ("se", "せ。せんせい。"),
    ("so", "そ。そら。"),
];

const GRUPO_Z: &[(&str, &str)] = &[
    ("za", "ざ。ざる。"),
    ("ji", "じ。じしょ。"),
    ("zu", "ず。ずぼん。"),
    ("ze", "ぜ。ぜんぶ。"),
    ("zo", "ぞ。ぞう。"),
];

const GRUPO_N: &[(&str, &str)] = &[
    ("na", "な。なつ。"),
    ("ni", "に。にほん。"),
    ("nu", "ぬ。ぬの。"),
    ("ne", "ね。ねこ。"),
    ("no", "の。のむ。"),
];

const HIRAGANA_M: &[(&str, &str)] = &[
    ("ma", "ま"),
    ("mi", "み"),
    ("mu", "む"),
    ("me", "め"),
    ("mo", "も"),
];

const KATAKANA: &[(&str, &str)] = &[
    ("a", "ア"), ("i", "イ"), ("u", "ウ"), ("e", "エ"), ("o", "オ"),
    ("ka", "カ"), ("ki", "キ"), ("ku", "ク"), ("ke", "ケ"), ("ko", "コ"),
    ("sa", "サ"), ("shi", "シ"), ("su", "ス"), ("se", "セ"), ("so", "ソ"),
    ("ta", "タ"), ("chi", "チ"), ("tsu", "ツ"), ("te", "テ"), ("to", "ト"),
    ("na", "ナ"), ("ni", "ニ"), ("nu", "ヌ"), ("ne", "ネ"), ("no", "ノ"),
    ("ha", "ハ"), ("hi", "ヒ"), ("fu", "フ"), ("he", "ヘ"), ("ho", "ホ"),
    ("ma", "マ"), ("mi", "ミ"), ("mu", "ム"), ("me", "メ"), ("mo", "モ"),
    ("ya", "ヤ"), ("yu", "ユ"), ("yo", "ヨ"),
    ("ra", "ラ"), ("ri", "リ"), ("ru", "ル"), ("re", "レ"), ("ro", "ロ"),
    ("wa", "ワ"), ("wo", "ヲ"), ("n", "ン"),
];

const ROLEPLAY_H: &[(&str, &str)] = &[
    ("konnichiwa", "こんにちは。"),
    ("ohayo_gozaimasu", "おはよう ございます。"),
    ("hajimemashite_yoroshiku", "はじめまして。 よろしく おねがいします。"),
];

const WN_PHRASES: &[(&str, &str)] = &[
    ("watashi_wa", "わたしは"),
    ("ringo_wo_tabemasu", "りんごをたべます"),
    ("konbanwa", "こんばんは"),
    ("ongaku_ga_suki", "おんがくがすきです"),
    ("tenki_ga_ii", "てんきがいいです"),
    ("enpitsu_kaimasu", "えんぴつをかいます"),
];

const WN_VOCAB: &[(&str, &str)] = &[
    ("hon", "ほん"),
    ("ongaku", "おんがく"),
    ("ginkou", "ぎんこう"),
    ("san", "さん"),
    ("ten", "てん"),
    ("ame", "あめ"),
    ("sakana", "さかな"),
    ("hayai", "はやい"),
    ("raion", "らいおん"),
    ("reizouko", "れいぞうこ"),
];

const YR: &[(&str, &str)] = &[
    ("yama", "やま"),
    ("yuki", "ゆき"),
    ("yoru", "よる"),
    ("ringo", "りんご"),
    ("reizouko", "れいぞうこ"),
    ("raion", "らいおん"),
];

const EXAM_WN: &[(&str, &str)] = &[
    ("hon", "ほん"),
    ("ongaku", "おんがく"),
    ("ginkou", "ぎんこう"),
    ("san", "さん"),
    ("ten", "てん"),
    ("ame", "あめ"),
    ("sakana", "さかな"),
    ("hayai", "はやい"),
    ("neko", "ねこ"),
    ("mizu", "みず"),
];

/// (name, directory, table)
const CATALOG: &[(&str, &str, &[(&str, &str)])] = &[
    ("grupo-a-phrases", "n5/grupoA", GRUPO_A_PHRASES),
    ("grupo-a-examples", "n5/grupoA/examples", GRUPO_A_EXAMPLES),
    ("grupo-s", "n5/grupoS", GRUPO_S),
    ("grupo-z", "n5/grupoZ", GRUPO_Z),
    ("grupo-n", "n5/grupoN", GRUPO_N),
    ("hiragana-m", "hiragana/m", HIRAGANA_M),
    ("katakana", "katakana", KATAKANA),
    ("roleplay-h", "n5/roleplayH", ROLEPLAY_H),
    ("wn-phrases", "n5/wn", WN_PHRASES),
    ("wn-vocab", "n5/wn", WN_VOCAB),
    ("yr", "n5/yr", YR),
    ("exam-yr", "n5/yr", YR),
    ("exam-wn", "n5/wn", EXAM_WN),
];

fn build_set(name: &str, directory: &str, table: &[(&str, &str)]) -> VocabularySet {
    VocabularySet {
        name: name.to_string(),
        directory: PathBuf::from(directory),
        language: None,
        items: table
            .iter()
            .map(|(id, text)| VocabularyItem::new(*id, *text))
            .collect(),
        source: None,
    }
}

/// All built-in sets, in catalog order
pub fn builtin_sets() -> Vec<VocabularySet> {
    CATALOG
        .iter()
        .map(|(name, directory, table)| build_set(name, directory, table))
        .collect()
}

pub fn find_builtin(name: &str) -> Result<VocabularySet, VocabularyError> {
    CATALOG
        .iter()
        .find(|(candidate, _, _)| *candidate == name)
        .map(|(name, directory, table)| build_set(name, directory, table))
        .ok_or_else(|| VocabularyError::UnknownSet(name.to_string()))
}
