/// Indonesian stopwords excluded from TF-IDF term weighting.
///
/// Fixed list; question words (`apa`, `bagaimana`, `kapan`, …) are
/// deliberately included because they carry no topical signal in an
/// FAQ bank where almost every entry is a question.
pub const INDONESIAN_STOPWORDS: &[&str] = &[
    "yang", "dan", "di", "ke", "dari", "dalam", "dengan", "untuk", "pada", "adalah",
    "atau", "ini", "itu", "tidak", "ada", "akan", "jika", "bisa", "dapat", "sudah",
    "saya", "anda", "kamu", "dia", "mereka", "kita", "kami", "nya", "mu", "ku",
    "apa", "bagaimana", "kapan", "dimana", "mengapa", "siapa", "berapa", "mana",
    "juga", "lebih", "paling", "sangat", "sekali", "masih", "belum",
    "harus", "perlu", "ingin", "mau", "boleh", "hanya", "saja", "lagi",
];

/// Returns true if `token` is in the stopword list.
pub fn is_stopword(token: &str) -> bool {
    INDONESIAN_STOPWORDS.contains(&token)
}
