use std::collections::BTreeMap;

pub const DEFAULT_LANG_CODE: &str = "en_US";
pub const DEFAULT_TIMEZONE: &str = "America/New_York";

/// Locale tag to display language.
const SYSTEM_LOCALES: &[(&str, &str)] = &[
    ("ar", "Arabic"),
    ("ar_AE", "Arabic"),
    ("ar_EG", "Arabic"),
    ("ar_SA", "Arabic"),
    ("bn", "Bangla"),
    ("bn_BD", "Bangla"),
    ("cs", "Czech"),
    ("cs_CZ", "Czech"),
    ("da", "Danish"),
    ("da_DK", "Danish"),
    ("de", "German"),
    ("de_AT", "German"),
    ("de_CH", "German"),
    ("de_DE", "German"),
    ("el", "Greek"),
    ("el_GR", "Greek"),
    ("en", "English"),
    ("en_AU", "English"),
    ("en_CA", "English"),
    ("en_GB", "English"),
    ("en_GH", "English"),
    ("en_IE", "English"),
    ("en_IN", "English"),
    ("en_KE", "English"),
    ("en_NG", "English"),
    ("en_NZ", "English"),
    ("en_US", "English"),
    ("en_ZA", "English"),
    ("es", "Spanish"),
    ("es_AR", "Spanish"),
    ("es_ES", "Spanish"),
    ("es_MX", "Spanish"),
    ("es_US", "Spanish"),
    ("fi", "Finnish"),
    ("fi_FI", "Finnish"),
    ("fr", "French"),
    ("fr_BE", "French"),
    ("fr_CA", "French"),
    ("fr_CH", "French"),
    ("fr_FR", "French"),
    ("ha", "Hausa"),
    ("ha_NG", "Hausa"),
    ("he", "Hebrew"),
    ("he_IL", "Hebrew"),
    ("hi", "Hindi"),
    ("hi_IN", "Hindi"),
    ("hu", "Hungarian"),
    ("hu_HU", "Hungarian"),
    ("id", "Indonesian"),
    ("id_ID", "Indonesian"),
    ("ig", "Igbo"),
    ("ig_NG", "Igbo"),
    ("it", "Italian"),
    ("it_CH", "Italian"),
    ("it_IT", "Italian"),
    ("ja", "Japanese"),
    ("ja_JP", "Japanese"),
    ("ko", "Korean"),
    ("ko_KR", "Korean"),
    ("ms", "Malay"),
    ("ms_MY", "Malay"),
    ("nb", "Norwegian Bokmål"),
    ("nb_NO", "Norwegian Bokmål"),
    ("nl", "Dutch"),
    ("nl_BE", "Dutch"),
    ("nl_NL", "Dutch"),
    ("pl", "Polish"),
    ("pl_PL", "Polish"),
    ("pt", "Portuguese"),
    ("pt_BR", "Portuguese"),
    ("pt_PT", "Portuguese"),
    ("ro", "Romanian"),
    ("ro_RO", "Romanian"),
    ("ru", "Russian"),
    ("ru_RU", "Russian"),
    ("sv", "Swedish"),
    ("sv_SE", "Swedish"),
    ("sw", "Swahili"),
    ("sw_KE", "Swahili"),
    ("th", "Thai"),
    ("th_TH", "Thai"),
    ("tr", "Turkish"),
    ("tr_TR", "Turkish"),
    ("uk", "Ukrainian"),
    ("uk_UA", "Ukrainian"),
    ("vi", "Vietnamese"),
    ("vi_VN", "Vietnamese"),
    ("yo", "Yoruba"),
    ("yo_NG", "Yoruba"),
    ("zh", "Chinese"),
    ("zh_CN", "Chinese"),
    ("zh_HK", "Chinese"),
    ("zh_TW", "Chinese"),
];

/// Supported locales sorted by tag.
pub fn system_locales() -> BTreeMap<&'static str, &'static str> {
    SYSTEM_LOCALES.iter().copied().collect()
}
