//! Country display-name localization.
//!
//! Literal translation tables for the reference economies, keyed by ISO-3
//! code. The overlay only touches the display `country` field; `code`
//! remains the identity key, so a localized dataset still merges and
//! compares the same way.

use crate::{CountryRecord, Language};

/// Returns the localized display name for an ISO-3 code, or `None` when
/// no translation exists (callers fall back to the record's own name).
#[must_use]
pub fn localized_name(code: &str, language: Language) -> Option<&'static str> {
    let (zh, fr, ja) = translation_lookup(code)?;
    match language {
        Language::En => None,
        Language::Zh => Some(zh),
        Language::Fr => Some(fr),
        Language::Ja => Some(ja),
    }
}

/// Produces a copy of the dataset with display names localized.
///
/// Records without a translation keep their original name.
#[must_use]
pub fn localize_dataset(records: &[CountryRecord], language: Language) -> Vec<CountryRecord> {
    records
        .iter()
        .map(|record| {
            let mut localized = record.clone();
            if let Some(name) = localized_name(&record.code, language) {
                localized.country = name.to_string();
            }
            localized
        })
        .collect()
}

/// `(zh, fr, ja)` display names per ISO-3 code.
fn translation_lookup(code: &str) -> Option<(&'static str, &'static str, &'static str)> {
    Some(match code {
        "USA" => ("美国", "États-Unis", "アメリカ合衆国"),
        "CHN" => ("中国", "Chine", "中国"),
        "DEU" => ("德国", "Allemagne", "ドイツ"),
        "JPN" => ("日本", "Japon", "日本"),
        "IND" => ("印度", "Inde", "インド"),
        "GBR" => ("英国", "Royaume-Uni", "イギリス"),
        "FRA" => ("法国", "France", "フランス"),
        "ITA" => ("意大利", "Italie", "イタリア"),
        "CAN" => ("加拿大", "Canada", "カナダ"),
        "RUS" => ("俄罗斯", "Russie", "ロシア"),
        "BRA" => ("巴西", "Brésil", "ブラジル"),
        "MEX" => ("墨西哥", "Mexique", "メキシコ"),
        "AUS" => ("澳大利亚", "Australie", "オーストラリア"),
        "ESP" => ("西班牙", "Espagne", "スペイン"),
        "KOR" => ("韩国", "Corée du Sud", "韓国"),
        "IDN" => ("印度尼西亚", "Indonésie", "インドネシア"),
        "TUR" => ("土耳其", "Turquie", "トルコ"),
        "NLD" => ("荷兰", "Pays-Bas", "オランダ"),
        "SAU" => ("沙特阿拉伯", "Arabie saoudite", "サウジアラビア"),
        "CHE" => ("瑞士", "Suisse", "スイス"),
        "POL" => ("波兰", "Pologne", "ポーランド"),
        "BEL" => ("比利时", "Belgique", "ベルギー"),
        "SWE" => ("瑞典", "Suède", "スウェーデン"),
        "ARG" => ("阿根廷", "Argentine", "アルゼンチン"),
        "ARE" => ("阿联酋", "Émirats arabes unis", "アラブ首長国連邦"),
        _ => return None,
    })
}
