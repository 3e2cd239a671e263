//! GlotPress locale metadata, keyed by WordPress locale.
//!
//! Subset of <https://github.com/GlotPress/gp-locales> covering the
//! locales WooCommerce extensions are translated into. Lookups never fail:
//! an unknown locale yields empty strings.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocaleProp {
    EnglishName,
    NativeName,
    LangCodeIso6391,
    LangCodeIso6392,
    LangCodeIso6393,
}

#[derive(Debug)]
pub struct Locale {
    pub wp_locale: &'static str,
    pub english_name: &'static str,
    pub native_name: &'static str,
    pub iso_639_1: &'static str,
    pub iso_639_2: &'static str,
    pub iso_639_3: &'static str,
}

macro_rules! locales {
    ($( $wp:literal => ($en:literal, $native:literal, $i1:literal, $i2:literal, $i3:literal) ),* $(,)?) => {
        &[ $( Locale {
            wp_locale: $wp,
            english_name: $en,
            native_name: $native,
            iso_639_1: $i1,
            iso_639_2: $i2,
            iso_639_3: $i3,
        } ),* ]
    };
}

// Sorted by wp_locale; `find` relies on it.
static LOCALES: &[Locale] = locales! {
    "af" => ("Afrikaans", "Afrikaans", "af", "afr", "afr"),
    "ar" => ("Arabic", "العربية", "ar", "ara", ""),
    "az" => ("Azerbaijani", "Azərbaycan dili", "az", "aze", ""),
    "bg_BG" => ("Bulgarian", "Български", "bg", "bul", ""),
    "bn_BD" => ("Bengali", "বাংলা", "bn", "ben", ""),
    "bs_BA" => ("Bosnian", "Bosanski", "bs", "bos", ""),
    "ca" => ("Catalan", "Català", "ca", "cat", ""),
    "cs_CZ" => ("Czech", "Čeština", "cs", "ces", ""),
    "cy" => ("Welsh", "Cymraeg", "cy", "cym", ""),
    "da_DK" => ("Danish", "Dansk", "da", "dan", ""),
    "de_CH" => ("German (Switzerland)", "Deutsch (Schweiz)", "de", "", ""),
    "de_DE" => ("German", "Deutsch", "de", "", ""),
    "de_DE_formal" => ("German (Formal)", "Deutsch (Sie)", "de", "", ""),
    "el" => ("Greek", "Ελληνικά", "el", "ell", ""),
    "en_AU" => ("English (Australia)", "English (Australia)", "en", "eng", "eng"),
    "en_CA" => ("English (Canada)", "English (Canada)", "en", "eng", "eng"),
    "en_GB" => ("English (UK)", "English (UK)", "en", "eng", "eng"),
    "en_NZ" => ("English (New Zealand)", "English (New Zealand)", "en", "eng", "eng"),
    "en_ZA" => ("English (South Africa)", "English (South Africa)", "en", "eng", "eng"),
    "eo" => ("Esperanto", "Esperanto", "eo", "epo", ""),
    "es_AR" => ("Spanish (Argentina)", "Español de Argentina", "es", "spa", ""),
    "es_CL" => ("Spanish (Chile)", "Español de Chile", "es", "spa", ""),
    "es_CO" => ("Spanish (Colombia)", "Español de Colombia", "es", "spa", ""),
    "es_ES" => ("Spanish (Spain)", "Español", "es", "spa", "spa"),
    "es_MX" => ("Spanish (Mexico)", "Español de México", "es", "spa", "spa"),
    "es_PE" => ("Spanish (Peru)", "Español de Perú", "es", "spa", ""),
    "es_VE" => ("Spanish (Venezuela)", "Español de Venezuela", "es", "spa", ""),
    "et" => ("Estonian", "Eesti", "et", "est", ""),
    "eu" => ("Basque", "Euskara", "eu", "eus", ""),
    "fa_IR" => ("Persian", "فارسی", "fa", "fas", ""),
    "fi" => ("Finnish", "Suomi", "fi", "fin", ""),
    "fr_BE" => ("French (Belgium)", "Français de Belgique", "fr", "fra", ""),
    "fr_CA" => ("French (Canada)", "Français du Canada", "fr", "fra", ""),
    "fr_FR" => ("French (France)", "Français", "fr", "fra", ""),
    "ga" => ("Irish", "Gaelige", "ga", "gle", ""),
    "gd" => ("Scottish Gaelic", "Gàidhlig", "gd", "gla", "gla"),
    "gl_ES" => ("Galician", "Galego", "gl", "glg", ""),
    "gu" => ("Gujarati", "ગુજરાતી", "gu", "guj", ""),
    "he_IL" => ("Hebrew", "עִבְרִית", "he", "", ""),
    "hi_IN" => ("Hindi", "हिन्दी", "hi", "hin", ""),
    "hr" => ("Croatian", "Hrvatski", "hr", "hrv", ""),
    "hu_HU" => ("Hungarian", "Magyar", "hu", "hun", ""),
    "hy" => ("Armenian", "Հայերեն", "hy", "hye", ""),
    "id_ID" => ("Indonesian", "Bahasa Indonesia", "id", "ind", ""),
    "is_IS" => ("Icelandic", "Íslenska", "is", "isl", ""),
    "it_IT" => ("Italian", "Italiano", "it", "ita", ""),
    "ja" => ("Japanese", "日本語", "ja", "", ""),
    "ka_GE" => ("Georgian", "ქართული", "ka", "kat", ""),
    "kk" => ("Kazakh", "Қазақ тілі", "kk", "kaz", ""),
    "km" => ("Khmer", "ភាសាខ្មែរ", "km", "khm", ""),
    "ko_KR" => ("Korean", "한국어", "ko", "kor", ""),
    "lt_LT" => ("Lithuanian", "Lietuvių kalba", "lt", "lit", ""),
    "lv" => ("Latvian", "Latviešu valoda", "lv", "lav", ""),
    "mk_MK" => ("Macedonian", "Македонски јазик", "mk", "mkd", ""),
    "mn" => ("Mongolian", "Монгол", "mn", "mon", ""),
    "mr" => ("Marathi", "मराठी", "mr", "mar", ""),
    "ms_MY" => ("Malay", "Bahasa Melayu", "ms", "msa", ""),
    "my_MM" => ("Myanmar (Burmese)", "ဗမာစာ", "my", "mya", ""),
    "nb_NO" => ("Norwegian (Bokmål)", "Norsk bokmål", "nb", "nob", ""),
    "ne_NP" => ("Nepali", "नेपाली", "ne", "nep", ""),
    "nl_BE" => ("Dutch (Belgium)", "Nederlands (België)", "nl", "nld", ""),
    "nl_NL" => ("Dutch", "Nederlands", "nl", "nld", ""),
    "nl_NL_formal" => ("Dutch (Formal)", "Nederlands (Formeel)", "nl", "nld", ""),
    "nn_NO" => ("Norwegian (Nynorsk)", "Norsk nynorsk", "nn", "nno", ""),
    "pa_IN" => ("Punjabi", "ਪੰਜਾਬੀ", "pa", "pan", ""),
    "pl_PL" => ("Polish", "Polski", "pl", "pol", ""),
    "pt_AO" => ("Portuguese (Angola)", "Português de Angola", "pt", "", ""),
    "pt_BR" => ("Portuguese (Brazil)", "Português do Brasil", "pt", "por", ""),
    "pt_PT" => ("Portuguese (Portugal)", "Português", "pt", "", ""),
    "ro_RO" => ("Romanian", "Română", "ro", "ron", ""),
    "ru_RU" => ("Russian", "Русский", "ru", "rus", ""),
    "si_LK" => ("Sinhala", "සිංහල", "si", "sin", ""),
    "sk_SK" => ("Slovak", "Slovenčina", "sk", "slk", ""),
    "sl_SI" => ("Slovenian", "Slovenščina", "sl", "slv", ""),
    "sq" => ("Albanian", "Shqip", "sq", "sqi", ""),
    "sr_RS" => ("Serbian", "Српски језик", "sr", "srp", ""),
    "sv_SE" => ("Swedish", "Svenska", "sv", "swe", ""),
    "sw" => ("Swahili", "Kiswahili", "sw", "swa", ""),
    "ta_IN" => ("Tamil", "தமிழ்", "ta", "tam", ""),
    "te" => ("Telugu", "తెలుగు", "te", "tel", ""),
    "th" => ("Thai", "ไทย", "th", "tha", ""),
    "tl" => ("Tagalog", "Tagalog", "tl", "tgl", ""),
    "tr_TR" => ("Turkish", "Türkçe", "tr", "tur", ""),
    "uk" => ("Ukrainian", "Українська", "uk", "ukr", ""),
    "ur" => ("Urdu", "اردو", "ur", "urd", ""),
    "uz_UZ" => ("Uzbek", "O‘zbekcha", "uz", "uzb", ""),
    "vi" => ("Vietnamese", "Tiếng Việt", "vi", "vie", ""),
    "zh_CN" => ("Chinese (China)", "简体中文", "zh", "zho", ""),
    "zh_HK" => ("Chinese (Hong Kong)", "香港中文版", "zh", "zho", ""),
    "zh_TW" => ("Chinese (Taiwan)", "繁體中文", "zh", "zho", ""),
};

pub fn find(wp_locale: &str) -> Option<&'static Locale> {
    LOCALES
        .binary_search_by(|l| l.wp_locale.cmp(wp_locale))
        .ok()
        .map(|i| &LOCALES[i])
}

pub fn locale_prop(wp_locale: &str, prop: LocaleProp) -> &'static str {
    let Some(l) = find(wp_locale) else {
        return "";
    };
    match prop {
        LocaleProp::EnglishName => l.english_name,
        LocaleProp::NativeName => l.native_name,
        LocaleProp::LangCodeIso6391 => l.iso_639_1,
        LocaleProp::LangCodeIso6392 => l.iso_639_2,
        LocaleProp::LangCodeIso6393 => l.iso_639_3,
    }
}
